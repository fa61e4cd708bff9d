// BSD 2-Clause License
//
// Copyright (c) 2026 the symex authors
//
// All rights reserved.
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are
// met:
//
// 1. Redistributions of source code must retain the above copyright
// notice, this list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright
// notice, this list of conditions and the following disclaimer in the
// documentation and/or other materials provided with the distribution.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS
// "AS IS" AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT
// LIMITED TO, THE IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR
// A PARTICULAR PURPOSE ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT
// HOLDER OR CONTRIBUTORS BE LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL,
// SPECIAL, EXEMPLARY, OR CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT
// LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR SERVICES; LOSS OF USE,
// DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER CAUSED AND ON ANY
// THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY, OR TORT
// (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
// OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

//! The solver adapter (C6): a thin façade over an SMT solver. Stateless
//! across calls — each `check` creates a fresh solver context, asserts the
//! conjuncts, checks, and discards it, matching the "no persisted solver
//! state" resource discipline from spec.md §5.

use crate::state::PathCond;
use crate::symval::{BinOp, Cmp};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmtResult {
    Sat,
    Unsat,
    Unknown,
}

pub trait Solver {
    fn check(&self, conjuncts: &PathCond) -> SmtResult;
}

#[cfg(feature = "z3")]
pub use z3_backend::Z3Solver;

#[cfg(feature = "z3")]
mod z3_backend {
    use super::*;
    use crate::symval::Kind;
    use crate::symval::SymVal;
    use z3::ast::{Ast, Bool, Int};
    use z3::{Config, Context, SatResult};

    /// The real backend. A fresh `Context`/`Solver` is built per call,
    /// matching the "solver contexts are scoped to one check call"
    /// resource rule in spec.md §5 — there is deliberately no caching of
    /// solver state or queries (a non-goal).
    pub struct Z3Solver;

    impl Solver for Z3Solver {
        fn check(&self, conjuncts: &PathCond) -> SmtResult {
            let cfg = Config::new();
            let ctx = Context::new(&cfg);
            let solver = z3::Solver::new(&ctx);
            for conjunct in conjuncts.iter() {
                solver.assert(&lower_bool(&ctx, conjunct));
            }
            match solver.check() {
                SatResult::Sat => SmtResult::Sat,
                SatResult::Unsat => SmtResult::Unsat,
                SatResult::Unknown => SmtResult::Unknown,
            }
        }
    }

    fn lower_bool<'ctx>(ctx: &'ctx Context, v: &SymVal) -> Bool<'ctx> {
        match v.kind() {
            Kind::BoolConst(b) => Bool::from_bool(ctx, *b),
            Kind::BoolVar(name) => Bool::new_const(ctx, name.as_str()),
            Kind::Cmp(op, l, r) => {
                let (lhs, rhs) = (lower_int(ctx, l), lower_int(ctx, r));
                match op {
                    Cmp::Eq => lhs._eq(&rhs),
                    Cmp::Neq => lhs._eq(&rhs).not(),
                    Cmp::Lt => lhs.lt(&rhs),
                    Cmp::Le => lhs.le(&rhs),
                    Cmp::Gt => lhs.gt(&rhs),
                    Cmp::Ge => lhs.ge(&rhs),
                }
            }
            Kind::Not(inner) => lower_bool(ctx, inner).not(),
            Kind::IntConst(_) | Kind::IntVar(_) | Kind::BinOp(..) => {
                panic!("symbolic value {} used where a boolean was expected", v)
            }
        }
    }

    fn lower_int<'ctx>(ctx: &'ctx Context, v: &SymVal) -> Int<'ctx> {
        match v.kind() {
            Kind::IntConst(i) => Int::from_i64(ctx, *i),
            Kind::IntVar(name) => Int::new_const(ctx, name.as_str()),
            Kind::BinOp(op, l, r) => {
                let (lhs, rhs) = (lower_int(ctx, l), lower_int(ctx, r));
                match op {
                    BinOp::Add => Int::add(ctx, &[&lhs, &rhs]),
                    BinOp::Sub => Int::sub(ctx, &[&lhs, &rhs]),
                    BinOp::Mul => Int::mul(ctx, &[&lhs, &rhs]),
                }
            }
            Kind::BoolConst(_) | Kind::BoolVar(_) | Kind::Cmp(..) | Kind::Not(_) => {
                panic!("symbolic value {} used where an integer was expected", v)
            }
        }
    }
}

/// A deterministic, fully scripted solver for unit tests of the
/// branch/assert orchestration (C4) in isolation from real arithmetic —
/// the design notes in spec.md §9 ask for the core to be testable against
/// a mocked decision procedure whose answers are pinned down in advance.
#[derive(Debug, Default)]
pub struct ScriptedSolver {
    responses: std::cell::RefCell<std::collections::VecDeque<SmtResult>>,
}

impl ScriptedSolver {
    pub fn new(responses: impl IntoIterator<Item = SmtResult>) -> Self {
        ScriptedSolver { responses: std::cell::RefCell::new(responses.into_iter().collect()) }
    }
}

impl Solver for ScriptedSolver {
    fn check(&self, _conjuncts: &PathCond) -> SmtResult {
        self.responses.borrow_mut().pop_front().expect("ScriptedSolver ran out of scripted responses")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_solver_replays_in_order() {
        let solver = ScriptedSolver::new([SmtResult::Sat, SmtResult::Unsat]);
        let pc = PathCond::new();
        assert_eq!(solver.check(&pc), SmtResult::Sat);
        assert_eq!(solver.check(&pc), SmtResult::Unsat);
    }
}

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

//! The branch/assert engine (C4): the core's centerpiece. Computes
//! feasibility of both polarities of a condition via the solver adapter
//! and forks or fails accordingly (spec.md §4.4). Every path through here
//! must preserve the "every popped state has a satisfiable path_cond"
//! invariant (data model invariant 2 / testable property "feasibility
//! invariant").

use crate::dispatch::{finish, Step};
use crate::error::{Error, FatalKind};
use crate::ir::{BlockId, InstrId, Operand, Program};
use crate::smt::{Solver, SmtResult};
use crate::state::State;
use crate::symval::SymVal;

// `jump` needs `Program` to resolve block targets into entry instructions;
// `assert` only needs the condition and the statically-known `next`
// instruction, so it takes no `Program` reference.

pub fn jump<S: Solver>(
    program: &Program,
    solver: &S,
    mut state: State,
    cond: &Operand,
    then_blk: BlockId,
    else_blk: BlockId,
) -> Result<Step, Error> {
    let cv = match state.eval(cond) {
        Some(v) => v,
        None => {
            state.error = Some("using unknown value".to_string());
            return Ok(Step::Done(state));
        }
    };

    let mut pc_then = state.path_cond.clone();
    pc_then.push_back(cv.clone());
    let mut pc_else = state.path_cond.clone();
    pc_else.push_back(SymVal::not(cv));

    let r_then = solver.check(&pc_then);
    let r_else = solver.check(&pc_else);

    match (r_then, r_else) {
        (SmtResult::Unknown, _) | (_, SmtResult::Unknown) => Err(Error::Fatal(FatalKind::SolverUnknown)),
        (SmtResult::Unsat, SmtResult::Unsat) => Err(Error::Fatal(FatalKind::BothUnsat)),
        (SmtResult::Sat, SmtResult::Unsat) => {
            state.pc = program.block(then_blk).first();
            state.path_cond = pc_then;
            Ok(finish(state))
        }
        (SmtResult::Unsat, SmtResult::Sat) => {
            state.pc = program.block(else_blk).first();
            state.path_cond = pc_else;
            Ok(finish(state))
        }
        (SmtResult::Sat, SmtResult::Sat) => {
            // Both polarities feasible: fork. The else-side is a deep
            // copy enqueued for later; the popped state becomes the
            // then-side and is marked `fork` so the driver re-queues it
            // too, rather than continuing it on the Rust call stack —
            // keeping all recursion in the worklist, not the stack.
            let mut forked = state.copy();
            forked.pc = program.block(else_blk).first();
            forked.path_cond = pc_else;

            state.pc = program.block(then_blk).first();
            state.path_cond = pc_then;
            state.fork = true;

            Ok(Step::Fork(state, forked))
        }
    }
}

pub fn assert<S: Solver>(solver: &S, mut state: State, cond: &Operand, next: Option<InstrId>) -> Result<Step, Error> {
    let cv = match state.eval(cond) {
        Some(v) => v,
        None => {
            state.error = Some("using unknown value".to_string());
            return Ok(Step::Done(state));
        }
    };

    let mut pc_hold = state.path_cond.clone();
    pc_hold.push_back(cv.clone());
    let mut pc_viol = state.path_cond.clone();
    pc_viol.push_back(SymVal::not(cv.clone()));

    let r_hold = solver.check(&pc_hold);
    let r_viol = solver.check(&pc_viol);

    match (r_hold, r_viol) {
        (SmtResult::Unknown, _) | (_, SmtResult::Unknown) => Err(Error::Fatal(FatalKind::SolverUnknown)),
        (SmtResult::Unsat, SmtResult::Unsat) => Err(Error::Fatal(FatalKind::BothUnsat)),
        (SmtResult::Sat, SmtResult::Unsat) => {
            state.pc = next;
            state.path_cond = pc_hold;
            Ok(finish(state))
        }
        (SmtResult::Unsat, SmtResult::Sat) => {
            state.path_cond = pc_viol;
            state.error = Some(format!("assertion failed: {} does not hold", cv));
            Ok(Step::Done(state))
        }
        (SmtResult::Sat, SmtResult::Sat) => {
            // Both the continuation and a violation witness are feasible:
            // the witness is reported as one error path, and exploration
            // continues down the holding path. Asserting `x >= 0` on an
            // unconstrained `x` is the textbook case.
            let mut failing = state.copy();
            failing.path_cond = pc_viol;
            failing.error = Some(format!("assertion failed: {} does not hold", cv));

            state.pc = next;
            state.path_cond = pc_hold;
            state.fork = true;

            Ok(Step::Fork(state, failing))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch;
    use crate::parser::parse;
    use crate::smt::ScriptedSolver;
    use crate::smt::SmtResult::*;

    fn single_jump_program() -> crate::ir::Program {
        parse("block then_b:\n  halt\nblock else_b:\n  halt\nblock entry:\n  if true then then_b else else_b\n").unwrap()
    }

    #[test]
    fn both_unsat_is_fatal() {
        let program = single_jump_program();
        let entry = program.lookup_block("entry").unwrap();
        let instr = program.block(entry).first().unwrap();
        let state = State::new(Some(instr));
        let solver = ScriptedSolver::new([Unsat, Unsat]);
        let result = dispatch_jump(&program, &solver, state);
        assert!(matches!(result, Err(Error::Fatal(FatalKind::BothUnsat))));
    }

    #[test]
    fn solver_unknown_is_fatal() {
        let program = single_jump_program();
        let entry = program.lookup_block("entry").unwrap();
        let instr = program.block(entry).first().unwrap();
        let state = State::new(Some(instr));
        let solver = ScriptedSolver::new([Sat, Unknown]);
        let result = dispatch_jump(&program, &solver, state);
        assert!(matches!(result, Err(Error::Fatal(FatalKind::SolverUnknown))));
    }

    #[test]
    fn sat_sat_forks_with_independent_path_conditions() {
        let program = single_jump_program();
        let entry = program.lookup_block("entry").unwrap();
        let instr = program.block(entry).first().unwrap();
        let state = State::new(Some(instr));
        let solver = ScriptedSolver::new([Sat, Sat]);

        match dispatch_jump(&program, &solver, state).unwrap() {
            Step::Fork(then_state, else_state) => {
                assert_eq!(then_state.path_cond.len(), 2);
                assert_eq!(else_state.path_cond.len(), 2);
                assert_ne!(then_state.pc, else_state.pc);
                // Set by the branch engine itself; the driver (`executor`)
                // is the one that clears it once it re-queues the state.
                assert!(then_state.fork);
            }
            _ => panic!("expected a fork"),
        }
    }

    #[test]
    fn sat_unsat_takes_the_then_branch_only() {
        let program = single_jump_program();
        let entry = program.lookup_block("entry").unwrap();
        let instr = program.block(entry).first().unwrap();
        let then_blk = program.lookup_block("then_b").unwrap();
        let state = State::new(Some(instr));
        let solver = ScriptedSolver::new([Sat, Unsat]);

        match dispatch_jump(&program, &solver, state).unwrap() {
            Step::Continue(s) => assert_eq!(s.pc, program.block(then_blk).first()),
            other => panic!("expected Continue into then_b, got a different Step variant: {}", matches_name(&other)),
        }
    }

    fn matches_name(step: &Step) -> &'static str {
        match step {
            Step::Continue(_) => "Continue",
            Step::Fork(..) => "Fork",
            Step::Done(_) => "Done",
        }
    }

    fn dispatch_jump(
        program: &crate::ir::Program,
        solver: &ScriptedSolver,
        state: State,
    ) -> Result<Step, Error> {
        let entry = program.lookup_block("entry").unwrap();
        let instr = program.instr(program.block(entry).first().unwrap());
        match &instr.kind {
            crate::ir::InstrKind::Jump { cond, then_blk, else_blk } => {
                jump(program, solver, state, cond, *then_blk, *else_blk)
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn assert_sat_sat_yields_one_continuation_and_one_error() {
        let program = parse("block entry:\n  %0 = load x\n  assert %0\n  halt\n").unwrap();
        let entry = program.lookup_block("entry").unwrap();
        let load_instr = program.block(entry).first().unwrap();

        let mut state = State::new(Some(load_instr));
        let assert_instr = match dispatch::dispatch(&program, &ScriptedSolver::new([]), state.clone()).unwrap() {
            Step::Continue(s) => {
                state = s;
                state.pc.unwrap()
            }
            _ => panic!("expected load to continue"),
        };
        let next = program.instr(assert_instr).next;
        let cond = match &program.instr(assert_instr).kind {
            crate::ir::InstrKind::Assert(c) => c,
            _ => unreachable!(),
        };

        let solver = ScriptedSolver::new([Sat, Sat]);
        match assert(&solver, state, cond, next) {
            Ok(Step::Fork(continuing, failing)) => {
                assert!(continuing.error.is_none());
                assert_eq!(continuing.path_cond.len(), 2);
                assert!(failing.error.is_some());
            }
            other => panic!("expected a fork into continuation + witness, got {:?}", other.is_ok()),
        }
    }
}

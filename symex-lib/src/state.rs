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

//! The per-path execution state (C2) and its forking discipline.
//!
//! `variables` and `values` are persistent (`im`) maps and `path_cond` is a
//! persistent vector, so `copy()` is a handful of `Rc` bumps rather than a
//! hand-rolled deep clone — there is no loop here to get wrong, which is
//! exactly the property the data model's independence invariant demands.

use im::{HashMap, Vector};

use crate::ir::{InstrId, Operand, VarId};
use crate::symval::SymVal;

pub type PathCond = Vector<SymVal>;

#[derive(Clone, Debug)]
pub struct State {
    /// `None` means the path terminated normally.
    pub pc: Option<InstrId>,
    pub variables: HashMap<VarId, SymVal>,
    pub values: HashMap<InstrId, SymVal>,
    pub path_cond: PathCond,
    pub error: Option<String>,
    pub fork: bool,
}

impl State {
    pub fn new(entry: Option<InstrId>) -> Self {
        let mut path_cond = Vector::new();
        path_cond.push_back(SymVal::bool_const(true));
        State { pc: entry, variables: HashMap::new(), values: HashMap::new(), path_cond, error: None, fork: false }
    }

    pub fn read(&self, var: VarId) -> Option<SymVal> {
        self.variables.get(&var).cloned()
    }

    pub fn write(&mut self, var: VarId, val: SymVal) {
        self.variables.insert(var, val);
    }

    /// Literal conversion per spec.md §4.1: a boolean literal becomes
    /// `BoolConst`, an integer literal becomes `IntConst`, and an
    /// instruction operand is looked up in `values` (`None` if its
    /// producer hasn't executed on this path — malformed IR, not a normal
    /// path event; see `Error::Fatal` callers in `dispatch`/`branch`).
    ///
    /// Because the IR's operand kinds are already statically distinct
    /// (`Operand::BoolLit` vs `Operand::IntLit`), there's no runtime
    /// ambiguity to resolve here the way the untyped Python prototype had
    /// to (test `isinstance(v, bool)` before `isinstance(v, int)`); the
    /// grammar enforces the same priority at parse time.
    pub fn eval(&self, operand: &Operand) -> Option<SymVal> {
        match operand {
            Operand::BoolLit(b) => Some(SymVal::bool_const(*b)),
            Operand::IntLit(i) => Some(SymVal::int_const(*i)),
            Operand::Var(var) => self.read(*var),
            Operand::Instr(id) => self.values.get(id).cloned(),
        }
    }

    pub fn set(&mut self, instr: InstrId, val: SymVal) {
        self.values.insert(instr, val);
    }

    /// Deep copy: mutating the returned state's maps or `path_cond` never
    /// affects `self` (data model invariant 3). With persistent
    /// collections this is just a clone of the `im::HashMap`/`Vector`
    /// handles, which is O(1) and still gives real independence because
    /// `im`'s mutators always return (or mutate in place into) a new
    /// version rather than touching shared nodes.
    pub fn copy(&self) -> State {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use id_arena::Arena;

    fn fresh_var_id() -> VarId {
        let mut arena: Arena<crate::ir::Variable> = Arena::new();
        arena.alloc(crate::ir::Variable::new("x".to_string()))
    }

    #[test]
    fn copy_is_independent() {
        let var = fresh_var_id();
        let mut original = State::new(None);
        original.write(var, SymVal::int_const(1));

        let mut forked = original.copy();
        forked.write(var, SymVal::int_const(2));
        forked.path_cond.push_back(SymVal::bool_const(false));

        assert_eq!(original.read(var), Some(SymVal::int_const(1)));
        assert_eq!(forked.read(var), Some(SymVal::int_const(2)));
        assert_eq!(original.path_cond.len(), 1);
        assert_eq!(forked.path_cond.len(), 2);
    }

    #[test]
    fn path_cond_starts_true() {
        let state = State::new(None);
        assert_eq!(state.path_cond.len(), 1);
        assert_eq!(state.path_cond[0], SymVal::bool_const(true));
    }

    #[test]
    fn eval_literal_priority() {
        let state = State::new(None);
        assert_eq!(state.eval(&Operand::BoolLit(true)), Some(SymVal::bool_const(true)));
        assert_eq!(state.eval(&Operand::BoolLit(false)), Some(SymVal::bool_const(false)));
        assert_ne!(state.eval(&Operand::BoolLit(true)), state.eval(&Operand::IntLit(1)));
    }
}

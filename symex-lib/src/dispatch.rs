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

//! The instruction dispatcher (C3): routes each instruction kind to a
//! handler. Arithmetic/comparison/LOAD/STORE/GOTO are the inherited
//! straight-line handlers from spec.md §4.3; JUMP and ASSERT delegate to
//! the branch/assert engine (`branch`), the core's centerpiece.

use crate::branch;
use crate::error::Error;
use crate::ir::{InstrKind, Program};
use crate::smt::Solver;
use crate::state::State;
use crate::symval::SymVal;

/// Outcome of advancing one popped state by one instruction.
pub enum Step {
    /// Advanced in place; still running.
    Continue(State),
    /// A branch or assertion split into two paths. Both are handed back
    /// to the driver, which pushes both onto the worklist (data model
    /// §3's `fork` flag marks which one this was).
    Fork(State, State),
    /// The path terminated (`pc` reached end-of-program) or recorded an
    /// error; the driver tallies it and does not requeue it.
    Done(State),
}

pub fn dispatch<S: Solver>(program: &Program, solver: &S, mut state: State) -> Result<Step, Error> {
    // A state already carrying an error (e.g. the witness half of a split
    // assertion) is terminal the moment it's next dispatched, regardless
    // of where its stale `pc` points.
    if state.error.is_some() {
        return Ok(Step::Done(state));
    }

    let instr_id = match state.pc {
        Some(id) => id,
        None => return Ok(Step::Done(state)),
    };
    let instr = program.instr(instr_id);

    match &instr.kind {
        InstrKind::Arith(op, l, r) => {
            match (state.eval(l), state.eval(r)) {
                (Some(lv), Some(rv)) => {
                    state.set(instr_id, SymVal::bin_op(*op, lv, rv));
                    state.pc = instr.next;
                }
                _ => state.error = Some("using unknown value".to_string()),
            }
            Ok(finish(state))
        }
        InstrKind::Compare(op, l, r) => {
            match (state.eval(l), state.eval(r)) {
                (Some(lv), Some(rv)) => {
                    state.set(instr_id, SymVal::cmp(*op, lv, rv));
                    state.pc = instr.next;
                }
                _ => state.error = Some("using unknown value".to_string()),
            }
            Ok(finish(state))
        }
        InstrKind::Load(var) => {
            match state.read(*var) {
                Some(val) => state.set(instr_id, val),
                // Uninitialized cell: mint a fresh free variable named
                // after the memory cell. It is *not* written back into
                // `variables` — the load just means "this path saw some
                // unconstrained value", per spec.md §4.3.
                None => {
                    let name = program.variable(*var).name().to_string();
                    state.set(instr_id, SymVal::int_var(name));
                }
            }
            state.pc = instr.next;
            Ok(finish(state))
        }
        InstrKind::Store(val, var) => {
            match state.eval(val) {
                Some(v) => {
                    state.write(*var, v);
                    state.pc = instr.next;
                }
                None => state.error = Some("using unknown value".to_string()),
            }
            Ok(finish(state))
        }
        InstrKind::Goto(target) => {
            state.pc = program.block(*target).first();
            Ok(finish(state))
        }
        InstrKind::Halt => {
            state.pc = None;
            Ok(finish(state))
        }
        InstrKind::Jump { cond, then_blk, else_blk } => branch::jump(program, solver, state, cond, *then_blk, *else_blk),
        InstrKind::Assert(cond) => branch::assert(solver, state, cond, instr.next),
    }
}

pub(crate) fn finish(state: State) -> Step {
    if state.error.is_some() || state.pc.is_none() {
        Step::Done(state)
    } else {
        Step::Continue(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::smt::ScriptedSolver;

    #[test]
    fn arithmetic_and_store_advance_pc_and_set_value() {
        let program = parse("block entry:\n  store 1, x\n  %0 = x + x\n  halt\n").unwrap();
        let solver = ScriptedSolver::new([]);
        let state = State::new(program.entry_block().first());

        let state = match dispatch(&program, &solver, state).unwrap() {
            Step::Continue(s) => s,
            _ => panic!("expected store to continue"),
        };
        let state = match dispatch(&program, &solver, state).unwrap() {
            Step::Continue(s) => s,
            _ => panic!("expected arith to continue"),
        };
        match dispatch(&program, &solver, state).unwrap() {
            Step::Done(s) => assert!(s.error.is_none() && s.pc.is_none()),
            _ => panic!("expected halt to finish the path"),
        }
    }

    #[test]
    fn load_of_uninitialized_cell_mints_a_free_variable_without_writing_it_back() {
        let program = parse("block entry:\n  %0 = load x\n  halt\n").unwrap();
        let solver = ScriptedSolver::new([]);
        let state = State::new(program.entry_block().first());
        let var = program.lookup_var("x").unwrap();

        let state = match dispatch(&program, &solver, state).unwrap() {
            Step::Continue(s) => s,
            _ => panic!("expected load to continue"),
        };
        assert!(state.read(var).is_none());
    }

    #[test]
    fn an_already_errored_state_is_terminal_on_redispatch() {
        let program = parse("block entry:\n  halt\n").unwrap();
        let solver = ScriptedSolver::new([]);
        let mut state = State::new(program.entry_block().first());
        state.error = Some("using unknown value".to_string());

        match dispatch(&program, &solver, state).unwrap() {
            Step::Done(s) => assert!(s.error.is_some()),
            _ => panic!("expected an errored state to stay done"),
        }
    }

    #[test]
    fn using_an_unevaluated_operand_is_a_path_error_not_a_crash() {
        // The second instruction is dispatched directly, skipping the
        // first, so `%0` has no entry in `values` on this path — malformed
        // IR, tolerated as a per-path error per spec.md §7 rather than a
        // crash.
        let program = parse("block entry:\n  %0 = x + x\n  store %0, x\n  halt\n").unwrap();
        let second = program.entry_block()[1];
        let solver = ScriptedSolver::new([]);
        let state = State::new(Some(second));
        match dispatch(&program, &solver, state).unwrap() {
            Step::Done(s) => assert_eq!(s.error.as_deref(), Some("using unknown value")),
            _ => panic!("expected an unresolved operand to be a path error"),
        }
    }
}

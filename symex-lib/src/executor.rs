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

//! The exploration driver (C5): a single-threaded, LIFO worklist that pops
//! one state at a time and runs it until it terminates, errors, or forks
//! (spec.md §4.5). All recursion from branching lives in the worklist,
//! not the Rust call stack, so path depth is bounded only by memory.

use crate::dispatch::{self, Step};
use crate::error::Error;
use crate::ir::Program;
use crate::smt::Solver;
use crate::state::State;

/// Final tally of a completed exploration: `executed_paths` counts every
/// path that ran to normal termination or recorded an error;
/// `errors` counts only the latter (spec.md §6/§8 "path accounting").
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Report {
    pub executed_paths: u64,
    pub errors: u64,
}

/// Runs the exploration to completion. `Err` here is always one of the
/// fatal strata from spec.md §7 (solver `unknown`, both polarities
/// `unsat`, or an unknown instruction kind) — anything else is tallied in
/// the returned `Report` and the corresponding path is simply discarded.
pub fn run<S: Solver>(program: &Program, solver: &S) -> Result<Report, Error> {
    let mut worklist: Vec<State> = vec![State::new(program.entry_block().first())];
    let mut report = Report::default();

    while let Some(mut state) = worklist.pop() {
        loop {
            match dispatch::dispatch(program, solver, state)? {
                Step::Continue(next) => {
                    state = next;
                }
                Step::Fork(mut continuing, pushed) => {
                    continuing.fork = false;
                    // LIFO: settle the deep-copied side first so that, if
                    // both sides are live, the continuing side (`then`, by
                    // spec.md §4.4's tie-break) is the next one popped,
                    // matching depth-first exploration order without
                    // recursing. A fork half can itself carry an error
                    // already (the assert-violation witness from
                    // `branch::assert`'s both-`sat` case); data model
                    // invariant 5 forbids ever putting an errored state
                    // back on the worklist, so that half is tallied here
                    // immediately instead of being pushed.
                    settle_or_requeue(pushed, &mut worklist, &mut report);
                    settle_or_requeue(continuing, &mut worklist, &mut report);
                    break;
                }
                Step::Done(finished) => {
                    tally(finished, &mut report);
                    break;
                }
            }
        }
    }

    Ok(report)
}

/// Tallies a terminated or errored state into the report. Never pushes
/// anything back onto the worklist; callers that already know a state is
/// a `Step::Done` use this directly.
fn tally(finished: State, report: &mut Report) {
    report.executed_paths += 1;
    if let Some(msg) = &finished.error {
        report.errors += 1;
        crate::log!(crate::log::VERBOSE, &format!("error path: {}", msg));
    }
}

/// One half of a `Step::Fork`: pushed onto the worklist to keep exploring,
/// unless it already carries an error (the assert-violation witness from
/// `branch::assert`'s both-`sat` case), in which case data model invariant
/// 5 ("a state with `error != null` is never returned to the worklist")
/// requires tallying it as a finished error path right away instead.
fn settle_or_requeue(state: State, worklist: &mut Vec<State>, report: &mut Report) {
    if state.error.is_some() {
        tally(state, report);
    } else {
        worklist.push(state);
    }
}

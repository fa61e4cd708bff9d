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

use std::fmt;

/// The two error strata that can escape the executor: a malformed program
/// that failed to parse, and a fatal condition encountered mid-exploration
/// (spec stratum 2 — these abort the whole run rather than just one path).
#[derive(Debug, Clone)]
pub enum Error {
    Parse(String),
    Fatal(FatalKind),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FatalKind {
    /// The solver returned `unknown` for a query. The exploration loses
    /// its soundness guarantees at that point, so it refuses to continue.
    SolverUnknown,
    /// Both polarities of a branch or assertion were `unsat`, contradicting
    /// the invariant that every popped state has a satisfiable path_cond.
    BothUnsat,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parse(msg) => write!(f, "parse error: {}", msg),
            Error::Fatal(FatalKind::SolverUnknown) => {
                write!(f, "solver returned unknown; exploration cannot continue soundly")
            }
            Error::Fatal(FatalKind::BothUnsat) => {
                write!(f, "both branches unsat; path condition invariant violated")
            }
        }
    }
}

impl std::error::Error for Error {}

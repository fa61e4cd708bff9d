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

//! A small bitflag-level logger, in the house style of the project this
//! engine grew out of (`log_from`/`log!`), rather than pulling in a full
//! logging façade for what is, at most, one line per branch decision.

use std::sync::atomic::{AtomicU8, Ordering};

pub const VERBOSE: u8 = 0;

static FLAGS: AtomicU8 = AtomicU8::new(0);

pub fn set_verbose(on: bool) {
    FLAGS.store(if on { 1 << VERBOSE } else { 0 }, Ordering::Relaxed)
}

pub fn log_from(level: u8, message: &str) {
    if FLAGS.load(Ordering::Relaxed) & (1 << level) != 0 {
        eprintln!("{}", message)
    }
}

#[macro_export]
macro_rules! log {
    ($level: expr, $message: expr) => {
        $crate::log::log_from($level, $message)
    };
}

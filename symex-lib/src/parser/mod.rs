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

//! The textual-IR parser (spec.md §6's "parser" collaborator, made
//! concrete per SPEC_FULL.md section 3). Two stages: `grammar` (generated
//! by `lalrpop` from `grammar.lalrpop`) parses source text into the
//! name-based AST (`ast`), then `lower` resolves block/variable/value
//! names into the `ir::Program` graph's arena handles.

use crate::error::Error;
use crate::ir::Program;

pub mod ast;
mod lower;

lalrpop_util::lalrpop_mod!(
    #[allow(clippy::all)]
    grammar,
    "/parser/grammar.rs"
);

pub fn parse(source: &str) -> Result<Program, Error> {
    let ast = grammar::AstParser::new().parse(source).map_err(|e| Error::Parse(e.to_string()))?;
    lower::lower(ast)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_straight_line_program() {
        let src = "block entry:\n  store 1, x\n  %0 = x == 1\n  assert %0\n  halt\n";
        let program = parse(src).expect("should parse");
        assert!(program.entry_block().first().is_some());
        assert_eq!(program.variables().count(), 1);
    }

    #[test]
    fn comments_and_whitespace_are_ignored() {
        let src = "; a trivial program\nblock entry:\n  ; no-op block\n  halt\n";
        let program = parse(src).expect("should parse");
        assert!(program.entry_block().first().is_some());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse("not an ir program @@@").is_err());
    }
}

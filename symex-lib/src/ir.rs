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

//! The IR data structures the core treats as an external collaborator:
//! `Instruction`, `Variable`, basic blocks, and the comparison/arithmetic
//! operator enums shared with the symbolic value algebra (`symval`).

use id_arena::{Arena, Id};
use std::collections::HashMap;

use crate::symval::{BinOp, Cmp};

pub type InstrId = Id<Instr>;
pub type VarId = Id<Variable>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockId(pub usize);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Variable {
    name: String,
}

impl Variable {
    pub(crate) fn new(name: String) -> Self {
        Variable { name }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// An operand to an instruction: either a literal, a reference to a
/// declared `Variable`, or a reference to a prior instruction standing for
/// its produced value (the SSA-like `values` lookup in `State`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operand {
    IntLit(i64),
    BoolLit(bool),
    Var(VarId),
    Instr(InstrId),
}

#[derive(Debug, Clone)]
pub enum InstrKind {
    Arith(BinOp, Operand, Operand),
    Compare(Cmp, Operand, Operand),
    Load(VarId),
    Store(Operand, VarId),
    Jump { cond: Operand, then_blk: BlockId, else_blk: BlockId },
    Assert(Operand),
    Goto(BlockId),
    Halt,
}

#[derive(Debug, Clone)]
pub struct Instr {
    pub kind: InstrKind,
    /// `None` at block end, or for any terminator (`Jump`, `Goto`, `Halt`)
    /// whose continuation is determined by control transfer rather than
    /// falling through. `Assert` is not a terminator in this sense: its
    /// `next` is where the "assertion holds" continuation resumes.
    pub next: Option<InstrId>,
}

#[derive(Debug)]
pub struct BasicBlock {
    pub name: String,
    pub(crate) instrs: Vec<InstrId>,
}

impl std::ops::Index<usize> for BasicBlock {
    type Output = InstrId;

    fn index(&self, i: usize) -> &InstrId {
        &self.instrs[i]
    }
}

impl BasicBlock {
    pub fn first(&self) -> Option<InstrId> {
        self.instrs.first().copied()
    }
}

#[derive(Debug)]
pub struct Program {
    instrs: Arena<Instr>,
    variables: Arena<Variable>,
    blocks: Vec<BasicBlock>,
    var_index: HashMap<String, VarId>,
    block_index: HashMap<String, BlockId>,
    entry: BlockId,
}

impl Program {
    pub(crate) fn new(
        instrs: Arena<Instr>,
        variables: Arena<Variable>,
        blocks: Vec<BasicBlock>,
        var_index: HashMap<String, VarId>,
        block_index: HashMap<String, BlockId>,
        entry: BlockId,
    ) -> Self {
        Program { instrs, variables, blocks, var_index, block_index, entry }
    }

    pub fn entry_block(&self) -> &BasicBlock {
        &self.blocks[self.entry.0]
    }

    pub fn block(&self, id: BlockId) -> &BasicBlock {
        &self.blocks[id.0]
    }

    pub fn instr(&self, id: InstrId) -> &Instr {
        &self.instrs[id]
    }

    pub fn variable(&self, id: VarId) -> &Variable {
        &self.variables[id]
    }

    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter().map(|(_, v)| v)
    }

    pub fn lookup_block(&self, name: &str) -> Option<BlockId> {
        self.block_index.get(name).copied()
    }

    pub fn lookup_var(&self, name: &str) -> Option<VarId> {
        self.var_index.get(name).copied()
    }
}

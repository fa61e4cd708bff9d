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

//! Resolves the name-based AST into the arena-backed `Program` graph,
//! assigning `VarId`/`BlockId`/`InstrId` handles. Where `ir` treats
//! `Instruction`/`Variable`/`BasicBlock` as the external contract
//! (spec.md §6), this is the lowering step that actually builds one.

use std::collections::HashMap;

use id_arena::Arena;

use crate::error::Error;
use crate::ir::{BasicBlock, BlockId, Instr, InstrId, InstrKind, Operand as IrOperand, Program, VarId, Variable};
use crate::parser::ast::{self, Ast};

pub(super) fn lower(ast: Ast) -> Result<Program, Error> {
    if ast.blocks.is_empty() {
        return Err(Error::Parse("program has no blocks".into()));
    }

    let mut block_index: HashMap<String, BlockId> = HashMap::new();
    for (i, block) in ast.blocks.iter().enumerate() {
        if block_index.insert(block.name.clone(), BlockId(i)).is_some() {
            return Err(Error::Parse(format!("duplicate block `{}`", block.name)));
        }
    }
    let entry = *block_index.get("entry").ok_or_else(|| Error::Parse("program has no `entry` block".into()))?;

    let mut variables: Arena<Variable> = Arena::new();
    let mut var_index: HashMap<String, VarId> = HashMap::new();
    let mut instrs: Arena<Instr> = Arena::new();

    // Pass 1: allocate one placeholder Instr per statement, in textual
    // order, so that `%n` references occurring anywhere in the program
    // resolve to a concrete InstrId before any operand is lowered.
    let mut block_instr_ids: Vec<Vec<InstrId>> = Vec::with_capacity(ast.blocks.len());
    let mut value_index: HashMap<u32, InstrId> = HashMap::new();

    for block in &ast.blocks {
        let mut ids = Vec::with_capacity(block.stmts.len());
        for stmt in &block.stmts {
            let id = instrs.alloc(Instr { kind: InstrKind::Halt, next: None });
            if let Some(v) = produced_value(stmt) {
                if value_index.insert(v, id).is_some() {
                    return Err(Error::Parse(format!("value `%{}` redefined", v)));
                }
            }
            ids.push(id);
        }
        block_instr_ids.push(ids);
    }

    // Pass 2: lower each statement's operands (now that every `%n` is
    // known) and fill in the real InstrKind plus intra-block `next` links.
    for (bi, block) in ast.blocks.iter().enumerate() {
        let ids = &block_instr_ids[bi];
        for (i, stmt) in block.stmts.iter().enumerate() {
            let is_last = i + 1 == block.stmts.len();
            let kind = lower_stmt(stmt, &mut variables, &mut var_index, &value_index, &block_index)?;
            let is_terminator = matches!(kind, InstrKind::Jump { .. } | InstrKind::Goto(_) | InstrKind::Halt);
            if is_terminator && !is_last {
                return Err(Error::Parse(format!("block `{}` has instructions after a terminator", block.name)));
            }
            let next = if is_terminator { None } else if is_last { None } else { Some(ids[i + 1]) };
            instrs[ids[i]] = Instr { kind, next };
        }
    }

    let blocks = ast
        .blocks
        .iter()
        .zip(block_instr_ids)
        .map(|(b, ids)| BasicBlock { name: b.name.clone(), instrs: ids })
        .collect();

    Ok(Program::new(instrs, variables, blocks, var_index, block_index, entry))
}

fn produced_value(stmt: &ast::Stmt) -> Option<u32> {
    match stmt {
        ast::Stmt::Arith(v, ..) | ast::Stmt::Compare(v, ..) | ast::Stmt::Load(v, _) => Some(*v),
        _ => None,
    }
}

fn var_id(name: &str, variables: &mut Arena<Variable>, var_index: &mut HashMap<String, VarId>) -> VarId {
    if let Some(id) = var_index.get(name) {
        *id
    } else {
        let id = variables.alloc(Variable::new(name.to_string()));
        var_index.insert(name.to_string(), id);
        id
    }
}

fn lower_operand(
    op: &ast::Operand,
    variables: &mut Arena<Variable>,
    var_index: &mut HashMap<String, VarId>,
    value_index: &HashMap<u32, InstrId>,
) -> Result<IrOperand, Error> {
    Ok(match op {
        ast::Operand::IntLit(i) => IrOperand::IntLit(*i),
        ast::Operand::BoolLit(b) => IrOperand::BoolLit(*b),
        ast::Operand::Var(name) => IrOperand::Var(var_id(name, variables, var_index)),
        ast::Operand::Value(v) => {
            let id = value_index.get(v).ok_or_else(|| Error::Parse(format!("value `%{}` used before definition", v)))?;
            IrOperand::Instr(*id)
        }
    })
}

fn lower_stmt(
    stmt: &ast::Stmt,
    variables: &mut Arena<Variable>,
    var_index: &mut HashMap<String, VarId>,
    value_index: &HashMap<u32, InstrId>,
    block_index: &HashMap<String, BlockId>,
) -> Result<InstrKind, Error> {
    let block_id = |name: &str| -> Result<BlockId, Error> {
        block_index.get(name).copied().ok_or_else(|| Error::Parse(format!("unknown block `{}`", name)))
    };
    Ok(match stmt {
        ast::Stmt::Arith(_, op, l, r) => InstrKind::Arith(
            *op,
            lower_operand(l, variables, var_index, value_index)?,
            lower_operand(r, variables, var_index, value_index)?,
        ),
        ast::Stmt::Compare(_, op, l, r) => InstrKind::Compare(
            *op,
            lower_operand(l, variables, var_index, value_index)?,
            lower_operand(r, variables, var_index, value_index)?,
        ),
        ast::Stmt::Load(_, var) => InstrKind::Load(var_id(var, variables, var_index)),
        ast::Stmt::Store(val, var) => {
            InstrKind::Store(lower_operand(val, variables, var_index, value_index)?, var_id(var, variables, var_index))
        }
        ast::Stmt::Jump { cond, then_blk, else_blk } => InstrKind::Jump {
            cond: lower_operand(cond, variables, var_index, value_index)?,
            then_blk: block_id(then_blk)?,
            else_blk: block_id(else_blk)?,
        },
        ast::Stmt::Goto(target) => InstrKind::Goto(block_id(target)?),
        ast::Stmt::Assert(cond) => InstrKind::Assert(lower_operand(cond, variables, var_index, value_index)?),
        ast::Stmt::Halt => InstrKind::Halt,
    })
}

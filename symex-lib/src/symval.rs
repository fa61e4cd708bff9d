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

//! The symbolic value algebra (C1): constructs and combines formulas over
//! integers and booleans. Every produced term is usable both as an operand
//! to further constructors and as input to the solver adapter (`smt`).

use std::fmt;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cmp {
    Eq,
    Neq,
    Lt,
    Le,
    Gt,
    Ge,
}

/// A symbolic value. Cheap to clone: the payload is reference-counted so
/// that forked states can share the terms they didn't touch (data model
/// invariant 3 permits, but doesn't require, structural sharing).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SymVal(Rc<SymValKind>);

#[derive(Debug, PartialEq, Eq, Hash)]
enum SymValKind {
    IntConst(i64),
    BoolConst(bool),
    IntVar(String),
    BoolVar(String),
    BinOp(BinOp, SymVal, SymVal),
    Cmp(Cmp, SymVal, SymVal),
    Not(SymVal),
}

impl SymVal {
    pub fn int_const(i: i64) -> Self {
        SymVal(Rc::new(SymValKind::IntConst(i)))
    }

    pub fn bool_const(b: bool) -> Self {
        SymVal(Rc::new(SymValKind::BoolConst(b)))
    }

    pub fn int_var<S: Into<String>>(name: S) -> Self {
        SymVal(Rc::new(SymValKind::IntVar(name.into())))
    }

    pub fn bool_var<S: Into<String>>(name: S) -> Self {
        SymVal(Rc::new(SymValKind::BoolVar(name.into())))
    }

    pub fn bin_op(op: BinOp, lhs: SymVal, rhs: SymVal) -> Self {
        SymVal(Rc::new(SymValKind::BinOp(op, lhs, rhs)))
    }

    pub fn cmp(op: Cmp, lhs: SymVal, rhs: SymVal) -> Self {
        SymVal(Rc::new(SymValKind::Cmp(op, lhs, rhs)))
    }

    pub fn not(v: SymVal) -> Self {
        // Double negation is not collapsed here: the algebra makes no
        // structural-sharing requirement, and folding is the solver's job.
        SymVal(Rc::new(SymValKind::Not(v)))
    }

    pub(crate) fn kind(&self) -> &SymValKind {
        &self.0
    }
}

impl fmt::Display for SymVal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.0 {
            SymValKind::IntConst(i) => write!(f, "{}", i),
            SymValKind::BoolConst(b) => write!(f, "{}", b),
            SymValKind::IntVar(name) => write!(f, "{}", name),
            SymValKind::BoolVar(name) => write!(f, "{}", name),
            SymValKind::BinOp(op, l, r) => {
                let sym = match op {
                    BinOp::Add => "+",
                    BinOp::Sub => "-",
                    BinOp::Mul => "*",
                };
                write!(f, "({} {} {})", l, sym, r)
            }
            SymValKind::Cmp(op, l, r) => {
                let sym = match op {
                    Cmp::Eq => "==",
                    Cmp::Neq => "!=",
                    Cmp::Lt => "<",
                    Cmp::Le => "<=",
                    Cmp::Gt => ">",
                    Cmp::Ge => ">=",
                };
                write!(f, "({} {} {})", l, sym, r)
            }
            SymValKind::Not(v) => write!(f, "!{}", v),
        }
    }
}

pub(crate) use SymValKind as Kind;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_and_int_consts_are_distinct_kinds() {
        // The literal-priority property from the spec: a boolean literal
        // must never collapse into IntConst(0/1).
        let t = SymVal::bool_const(true);
        let one = SymVal::int_const(1);
        assert_ne!(t, one);
        match t.kind() {
            Kind::BoolConst(true) => (),
            other => panic!("expected BoolConst(true), got {:?}", other),
        }
    }

    #[test]
    fn cloning_shares_the_rc_payload() {
        let x = SymVal::int_var("x");
        let y = x.clone();
        assert_eq!(x, y);
    }
}

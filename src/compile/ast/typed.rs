//! Type-resolved tree produced by validation and consumed by code generation.
//!
//! A node only exists if its parse subtree validated. Identifiers carry the
//! resolved symbol and every expression carries its inferred type, so nothing
//! downstream needs the symbol table or the type registry.

use crate::compile::{
    ast::BinaryOp,
    semantic::symbols::{Function, Variable},
    types::TypeRef,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub decls: Vec<Decl>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Var(VarDecl),
    Func(FunctionDecl),
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub var: Variable,
    pub init: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub func: Function,
    pub params: Vec<VarDecl>,
    pub body: Block,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Decl(VarDecl),
    Expr(Expr),
    Block(Block),
    Return(Option<Expr>),
    If(Expr, Box<Stmt>, Option<Box<Stmt>>),
    Empty,
}

impl Stmt {
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Int(i32, TypeRef),
    Ident(Variable),
    Binary(BinaryOp, Box<Expr>, Box<Expr>, TypeRef),
    Call(Function, Vec<Expr>),
}

impl Expr {
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    pub fn ty(&self) -> &TypeRef {
        match self {
            Self::Int(_, ty) | Self::Binary(_, _, _, ty) => ty,
            Self::Ident(var) => &var.ty,
            Self::Call(func, _) => &func.return_type,
        }
    }
}

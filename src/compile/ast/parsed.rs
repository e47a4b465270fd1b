//! Untyped tree handed over by the parser. Names are still plain strings and
//! nothing has been checked beyond the grammar.

use crate::compile::ast::{BinaryOp, SourcePos, int_literal::IntLiteral};

#[derive(Debug, Clone, Default)]
pub struct Program {
    pub decls: Vec<Decl>,
}

#[derive(Debug, Clone)]
pub enum Decl {
    Var(VarDecl),
    Func(FunctionDecl),
}

impl Decl {
    pub fn span(&self) -> SourcePos {
        match self {
            Self::Var(decl) => decl.span.clone(),
            Self::Func(decl) => decl.span.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct VarDecl {
    pub ty: String,
    pub name: String,
    pub init: Option<Expr>,
    pub span: SourcePos,
}

#[derive(Debug, Clone)]
pub struct FunctionDecl {
    pub ty: String,
    pub name: String,
    pub params: Vec<VarDecl>,
    pub body: Block,
    pub span: SourcePos,
}

#[derive(Debug, Clone)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: SourcePos,
}

#[derive(Debug, Clone)]
pub enum Stmt {
    Decl(VarDecl),
    Expr(Expr),
    Block(Block),
    Return(Option<Expr>, SourcePos),
    If(Expr, Box<Stmt>, Option<Box<Stmt>>, SourcePos),
    Empty(SourcePos),
}

impl Stmt {
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    pub fn span(&self) -> SourcePos {
        match self {
            Self::Decl(decl) => decl.span.clone(),
            Self::Expr(expr) => expr.span(),
            Self::Block(block) => block.span.clone(),
            Self::Return(_, span) | Self::If(_, _, _, span) | Self::Empty(span) => span.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Expr {
    Int(IntLiteral, SourcePos),
    Ident(String, SourcePos),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    Call(String, Vec<Expr>, SourcePos),
}

impl Expr {
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    pub fn span(&self) -> SourcePos {
        match self {
            Self::Int(_, span) | Self::Ident(_, span) | Self::Call(_, _, span) => span.clone(),
            Self::Binary(_, lhs, rhs) => {
                let SourcePos { start, .. } = lhs.span();
                let SourcePos { end, .. } = rhs.span();

                start..end
            }
        }
    }
}

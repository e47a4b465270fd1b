//! Path-sensitive return analysis over validated function bodies.
//!
//! Unlike the flag the validator threads through a body, an `if` only counts
//! as returning when both of its branches do.

use crate::compile::ast::typed::{Block, Stmt};

pub fn block_returns(block: &Block) -> bool {
    block.stmts.iter().any(does_return)
}

pub fn does_return(stmt: &Stmt) -> bool {
    match stmt {
        Stmt::If(_, then, otherwise) => {
            if let Some(otherwise) = otherwise {
                return does_return(then) && does_return(otherwise);
            }

            false
        }
        Stmt::Return(_) => true,
        Stmt::Block(block) => block_returns(block),
        Stmt::Decl(_) | Stmt::Expr(_) | Stmt::Empty => false,
    }
}

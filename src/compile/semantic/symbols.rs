use crate::{
    compile::types::TypeRef,
    datstructures::scope_stack::{Scope, ScopeId},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    pub ty: TypeRef,
    /// Scope the variable was declared in.
    pub scope: ScopeId,
}

/// Signature of a declared function. The body lives in the AST node that
/// declared it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub name: String,
    pub return_type: TypeRef,
    pub params: Vec<Variable>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbol {
    Variable(Variable),
    Function(Function),
}

impl Symbol {
    pub fn name(&self) -> &str {
        match self {
            Self::Variable(var) => &var.name,
            Self::Function(func) => &func.name,
        }
    }
}

/// Root scope of a compilation unit after validation.
pub type SymbolTable = Scope<String, Symbol>;

use std::fmt::Display;

use thiserror::Error;

use crate::{
    compile::{
        ast::{BinaryOp, SourcePos, parsed, typed},
        types::{TypeError, TypeRef, TypeRegistry},
    },
    infra::YfcError,
};

pub mod controlflow;
pub mod symbols;
pub mod typecheck;
pub mod validate;

pub use validate::{Validation, ValidatorOptions, validate};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SemanticError {
    #[error("Type {name} is already registered.")]
    DuplicateType { name: String },

    #[error("Type {name} is not known.")]
    UnknownType { name: String },

    #[error("Symbol {name} is already declared in this scope.")]
    DuplicateSymbol { name: String },

    #[error("Identifier {name} is used without being declared.")]
    UnknownIdentifier { name: String },

    #[error("Function {name} is called without being declared.")]
    UnknownFunction { name: String },

    #[error("Call to {callee} does not match its parameters: {mismatch}")]
    ArgumentMismatch {
        callee: String,
        mismatch: ArgumentMismatch,
    },

    #[error("Expression has unexpected type. Expected was `{expected}`, but got `{got}`")]
    TypeMismatch { expected: TypeRef, got: TypeRef },

    #[error("Function {function} returns void but a value is returned.")]
    ReturnFromVoid { function: String },

    #[error("Variable {name} cannot have type void.")]
    VoidVariable { name: String },

    #[error("Operator {op} cannot be applied to `{ty}`.")]
    InvalidOperand { op: BinaryOp, ty: TypeRef },

    #[error("Only variables can be assigned to.")]
    InvalidAssignment,

    #[error("Integer literal {literal} out of bounds.")]
    IntLiteralOutOfBounds { literal: String },

    #[error("Function {function} does not return a value on every path.")]
    MissingReturn { function: String },
}

impl SemanticError {
    pub fn at(self, span: SourcePos) -> Diagnostic {
        Diagnostic { error: self, span }
    }
}

impl From<TypeError> for SemanticError {
    fn from(value: TypeError) -> Self {
        match value {
            TypeError::DuplicateType(name) => Self::DuplicateType { name },
            TypeError::UnknownType(name) => Self::UnknownType { name },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentMismatch {
    Arity {
        expected: usize,
        got: usize,
    },
    Type {
        index: usize,
        expected: TypeRef,
        got: TypeRef,
    },
}

impl Display for ArgumentMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Arity { expected, got } => {
                write!(f, "expected {expected} arguments, but got {got}")
            }
            Self::Type {
                index,
                expected,
                got,
            } => write!(
                f,
                "argument {} should be `{expected}`, but is `{got}`",
                index + 1
            ),
        }
    }
}

/// A semantic error together with the source range it refers to.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{error}")]
pub struct Diagnostic {
    pub error: SemanticError,
    pub span: SourcePos,
}

/// Receives diagnostics as validation finds them.
pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Conditions that stop validation of the whole unit.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FatalError {
    #[error("Out of memory while building the syntax tree.")]
    AllocationFailure,
}

/// Validates a parsed program against the builtin types. Fails with every
/// diagnostic found if any declaration was rejected.
#[tracing::instrument(level = "debug", skip_all)]
pub fn analyze(
    program: &parsed::Program,
    options: ValidatorOptions,
) -> Result<typed::Program, YfcError> {
    let types = TypeRegistry::with_builtins();
    let mut diagnostics = Vec::new();

    let (ast, symbols, had_error) =
        validate(program, &types, &mut diagnostics, options)?.into_parts();

    if had_error {
        tracing::debug!(count = diagnostics.len(), "validation failed");
        return Err(YfcError::SemanticError(diagnostics));
    }

    tracing::debug!(globals = symbols.len(), "validation succeeded");
    Ok(ast)
}

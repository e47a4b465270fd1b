//! Type relations used by the validator: assignment compatibility and binary
//! operator typing.

use std::rc::Rc;

use crate::compile::{
    ast::BinaryOp,
    semantic::SemanticError,
    types::{Format, TypeRef},
};

/// Compatibility for assignment, initialisation, arguments and returns.
///
/// Types are compatible when their formats match. The relation is symmetric,
/// so `void` is compatible only with `void`.
pub fn compatible(expected: &TypeRef, got: &TypeRef) -> Result<(), SemanticError> {
    if expected.format() == got.format() {
        return Ok(());
    }

    Err(SemanticError::TypeMismatch {
        expected: Rc::clone(expected),
        got: Rc::clone(got),
    })
}

/// Result type of an arithmetic operation on two values.
///
/// Within a format the wider type wins and ties keep the left operand. Across
/// formats the floating point operand wins whatever its width.
pub fn promote(lhs: &TypeRef, rhs: &TypeRef) -> TypeRef {
    let winner = match (lhs.format(), rhs.format()) {
        (Format::Float, Format::Int) => lhs,
        (Format::Int, Format::Float) => rhs,
        _ if rhs.size_bits() > lhs.size_bits() => rhs,
        _ => lhs,
    };

    Rc::clone(winner)
}

enum Operands {
    /// Any value
    Value,
    /// Int-format values only
    Integral,
}

enum Synthesized {
    Promoted,
    Bool,
}

trait TypeCheckableOperation {
    fn operands(&self) -> Operands;
    fn synthesized_type(&self) -> Synthesized;
}

impl TypeCheckableOperation for BinaryOp {
    fn operands(&self) -> Operands {
        match self {
            Self::Mod
            | Self::BitwiseAnd
            | Self::BitwiseOr
            | Self::BitwiseXor
            | Self::ShiftLeft
            | Self::ShiftRight => Operands::Integral,

            Self::Assign
            | Self::Add
            | Self::Sub
            | Self::Mul
            | Self::Div
            | Self::LogicalAnd
            | Self::LogicalOr
            | Self::Eq
            | Self::NotEq
            | Self::Less
            | Self::LessEq
            | Self::Greater
            | Self::GreaterEq => Operands::Value,
        }
    }

    fn synthesized_type(&self) -> Synthesized {
        match self {
            Self::Assign
            | Self::Add
            | Self::Sub
            | Self::Mul
            | Self::Div
            | Self::Mod
            | Self::BitwiseAnd
            | Self::BitwiseOr
            | Self::BitwiseXor
            | Self::ShiftLeft
            | Self::ShiftRight => Synthesized::Promoted,

            Self::LogicalAnd
            | Self::LogicalOr
            | Self::Eq
            | Self::NotEq
            | Self::Less
            | Self::LessEq
            | Self::Greater
            | Self::GreaterEq => Synthesized::Bool,
        }
    }
}

/// Types a binary operation. Assignment is handled by the caller, which
/// already knows the target's type.
pub fn binary(
    op: BinaryOp,
    lhs: &TypeRef,
    rhs: &TypeRef,
    bool_ty: &TypeRef,
) -> Result<TypeRef, SemanticError> {
    for operand in [lhs, rhs] {
        let accepted = match op.operands() {
            Operands::Value => operand.format() != Format::None,
            Operands::Integral => operand.format() == Format::Int,
        };

        if !accepted {
            return Err(SemanticError::InvalidOperand {
                op,
                ty: Rc::clone(operand),
            });
        }
    }

    match op.synthesized_type() {
        Synthesized::Promoted => Ok(promote(lhs, rhs)),
        Synthesized::Bool => Ok(Rc::clone(bool_ty)),
    }
}

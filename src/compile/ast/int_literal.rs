use std::num::IntErrorKind;

use crate::compile::semantic::SemanticError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntLiteral {
    value: String,
    base: u32,
}

impl IntLiteral {
    pub(crate) fn new(value: impl Into<String>, base: u32) -> IntLiteral {
        IntLiteral {
            value: value.into(),
            base,
        }
    }

    #[cfg(test)]
    pub(crate) fn decimal(value: u32) -> IntLiteral {
        IntLiteral::new(value.to_string(), 10)
    }

    /// Literals have the `int` type, so they must fit a signed 32-bit value.
    pub fn parse(&self) -> Result<i32, SemanticError> {
        i32::from_str_radix(&self.value, self.base).map_err(|err| match err.kind() {
            IntErrorKind::PosOverflow => SemanticError::IntLiteralOutOfBounds {
                literal: self.value.clone(),
            },
            _ => unreachable!("Parser returned invalid number: {}", self.value),
        })
    }
}

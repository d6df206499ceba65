//! Conversion between the interpreter and IR value domains.
//!
//! Interpreter → IR is lossy: signed, unsigned and enum values all become
//! plain `bits[N]`. That is fine for comparison, where only the bit
//! pattern matters. IR → interpreter needs the static type to recover the
//! lost tags.

use std::fmt;

use crate::{ConcreteType, InterpValue, IrValue};

/// A value or type that cannot be carried across domains.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ConversionError {
    /// The value has no IR representation (e.g. a function value).
    Unrepresentable { value: String },
    /// An IR value does not have the shape its static type requires.
    TypeMismatch { expected: String, got: String },
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::Unrepresentable { value } => {
                write!(f, "cannot convert `{value}` to an IR value")
            }
            ConversionError::TypeMismatch { expected, got } => {
                write!(f, "IR value `{got}` does not match type `{expected}`")
            }
        }
    }
}

impl std::error::Error for ConversionError {}

impl InterpValue {
    /// Convert to the IR domain.
    pub fn to_ir(&self) -> Result<IrValue, ConversionError> {
        match self {
            InterpValue::UBits(bits) | InterpValue::SBits(bits) | InterpValue::Enum { bits, .. } => {
                Ok(IrValue::Bits(bits.clone()))
            }
            InterpValue::Tuple(elements) => Ok(IrValue::Tuple(interp_values_to_ir(elements)?)),
            InterpValue::Array(elements) => Ok(IrValue::Array(interp_values_to_ir(elements)?)),
            InterpValue::Token => Ok(IrValue::Token),
            InterpValue::Function(_) => Err(ConversionError::Unrepresentable {
                value: self.to_string(),
            }),
        }
    }
}

/// Convert an argument list, failing on the first unrepresentable value.
pub fn interp_values_to_ir(values: &[InterpValue]) -> Result<Vec<IrValue>, ConversionError> {
    values.iter().map(InterpValue::to_ir).collect()
}

/// Convert an IR value back to the interpreter domain under `ty`.
pub fn ir_to_interp(value: &IrValue, ty: &ConcreteType) -> Result<InterpValue, ConversionError> {
    let mismatch = || ConversionError::TypeMismatch {
        expected: ty.to_string(),
        got: value.to_string(),
    };
    match (ty, value) {
        (ConcreteType::Bits { signed, width }, IrValue::Bits(bits)) if bits.width() == *width => {
            Ok(if *signed {
                InterpValue::SBits(bits.clone())
            } else {
                InterpValue::UBits(bits.clone())
            })
        }
        (ConcreteType::Enum { name, width, .. }, IrValue::Bits(bits)) if bits.width() == *width => {
            Ok(InterpValue::Enum {
                name: name.clone(),
                bits: bits.clone(),
            })
        }
        (ConcreteType::Tuple(types), IrValue::Tuple(elements)) if types.len() == elements.len() => {
            elements
                .iter()
                .zip(types)
                .map(|(element, ty)| ir_to_interp(element, ty))
                .collect::<Result<_, _>>()
                .map(InterpValue::Tuple)
        }
        (ConcreteType::Array { element, size }, IrValue::Array(elements))
            if elements.len() == *size =>
        {
            elements
                .iter()
                .map(|e| ir_to_interp(e, element))
                .collect::<Result<_, _>>()
                .map(InterpValue::Array)
        }
        (ConcreteType::Token, IrValue::Token) => Ok(InterpValue::Token),
        _ => Err(mismatch()),
    }
}

//! Interpreter value domain.
//!
//! Values as the tree-walking interpreter sees them: bit vectors carry
//! their signedness (or enum identity), and functions are first-class.

use std::fmt;

use crate::value::write_joined;
use crate::{Bits, FunctionRef};

/// Static type of a source-level value, as recorded by the type checker.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum ConcreteType {
    Bits {
        signed: bool,
        width: u32,
    },
    Enum {
        name: String,
        signed: bool,
        width: u32,
    },
    Tuple(Vec<ConcreteType>),
    Array {
        element: Box<ConcreteType>,
        size: usize,
    },
    Token,
    Function {
        params: Vec<ConcreteType>,
        ret: Box<ConcreteType>,
    },
}

impl ConcreteType {
    pub fn ubits(width: u32) -> Self {
        ConcreteType::Bits {
            signed: false,
            width,
        }
    }

    pub fn sbits(width: u32) -> Self {
        ConcreteType::Bits {
            signed: true,
            width,
        }
    }

    pub fn array(element: ConcreteType, size: usize) -> Self {
        ConcreteType::Array {
            element: Box::new(element),
            size,
        }
    }
}

impl fmt::Display for ConcreteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConcreteType::Bits { signed, width } => {
                write!(f, "{}{width}", if *signed { 's' } else { 'u' })
            }
            ConcreteType::Enum { name, .. } => f.write_str(name),
            ConcreteType::Tuple(elements) => {
                f.write_str("(")?;
                write_joined(f, elements)?;
                f.write_str(")")
            }
            ConcreteType::Array { element, size } => write!(f, "{element}[{size}]"),
            ConcreteType::Token => f.write_str("token"),
            ConcreteType::Function { params, ret } => {
                f.write_str("fn(")?;
                write_joined(f, params)?;
                write!(f, ") -> {ret}")
            }
        }
    }
}

/// A value produced by the interpreter.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum InterpValue {
    UBits(Bits),
    SBits(Bits),
    Enum { name: String, bits: Bits },
    Tuple(Vec<InterpValue>),
    Array(Vec<InterpValue>),
    Token,
    Function(FunctionRef),
}

impl InterpValue {
    pub fn ubits(width: u32, value: u64) -> Self {
        InterpValue::UBits(Bits::from_u64(width, value))
    }

    pub fn sbits(width: u32, value: i64) -> Self {
        InterpValue::SBits(Bits::from_i64(width, value))
    }

    pub fn bool(value: bool) -> Self {
        InterpValue::ubits(1, u64::from(value))
    }
}

impl fmt::Display for InterpValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterpValue::UBits(bits) => write!(f, "u{}:{bits}", bits.width()),
            InterpValue::SBits(bits) => write!(f, "s{}:{}", bits.width(), bits.fmt_signed()),
            InterpValue::Enum { name, bits } => write!(f, "{name}:{bits}"),
            InterpValue::Tuple(elements) => {
                f.write_str("(")?;
                write_joined(f, elements)?;
                f.write_str(")")
            }
            InterpValue::Array(elements) => {
                f.write_str("[")?;
                write_joined(f, elements)?;
                f.write_str("]")
            }
            InterpValue::Token => f.write_str("token"),
            InterpValue::Function(function) => write!(f, "fn {}", function.identifier),
        }
    }
}

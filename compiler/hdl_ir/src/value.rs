//! IR value domain.
//!
//! These are the values the compiled (JIT) path consumes and produces.
//! The IR has no notion of signedness or enums; everything scalar is
//! `bits[N]`.

use std::fmt;

use crate::Bits;

/// Type of an IR value.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum IrType {
    Bits(u32),
    Tuple(Vec<IrType>),
    Array { element: Box<IrType>, size: usize },
    Token,
}

impl IrType {
    pub fn array(element: IrType, size: usize) -> Self {
        IrType::Array {
            element: Box::new(element),
            size,
        }
    }
}

impl fmt::Display for IrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrType::Bits(width) => write!(f, "bits[{width}]"),
            IrType::Tuple(elements) => {
                f.write_str("(")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{element}")?;
                }
                f.write_str(")")
            }
            IrType::Array { element, size } => write!(f, "{element}[{size}]"),
            IrType::Token => f.write_str("token"),
        }
    }
}

/// A value in the IR domain.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum IrValue {
    Bits(Bits),
    Tuple(Vec<IrValue>),
    Array(Vec<IrValue>),
    Token,
}

impl IrValue {
    /// Shorthand for a `bits[width]` value.
    pub fn ubits(width: u32, value: u64) -> Self {
        IrValue::Bits(Bits::from_u64(width, value))
    }

    /// Single-bit boolean, as produced by predicates.
    pub fn bool(value: bool) -> Self {
        IrValue::ubits(1, u64::from(value))
    }

    pub fn bits(&self) -> Option<&Bits> {
        match self {
            IrValue::Bits(bits) => Some(bits),
            _ => None,
        }
    }

    /// Whether the underlying bit pattern is entirely zero.
    ///
    /// A quickcheck predicate whose result is all zeros has been falsified.
    /// Tokens carry no bits and never count as zero.
    pub fn is_all_zeros(&self) -> bool {
        match self {
            IrValue::Bits(bits) => bits.is_zero(),
            IrValue::Tuple(elements) | IrValue::Array(elements) => {
                elements.iter().all(IrValue::is_all_zeros)
            }
            IrValue::Token => false,
        }
    }

    /// Type of this value. Arrays take their element type from the first
    /// element; an empty array is typed as `bits[0][0]`.
    pub fn ty(&self) -> IrType {
        match self {
            IrValue::Bits(bits) => IrType::Bits(bits.width()),
            IrValue::Tuple(elements) => IrType::Tuple(elements.iter().map(IrValue::ty).collect()),
            IrValue::Array(elements) => {
                let element = elements.first().map_or(IrType::Bits(0), IrValue::ty);
                IrType::array(element, elements.len())
            }
            IrValue::Token => IrType::Token,
        }
    }
}

impl fmt::Display for IrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrValue::Bits(bits) => write!(f, "bits[{}]:{bits}", bits.width()),
            IrValue::Tuple(elements) => {
                f.write_str("(")?;
                write_joined(f, elements)?;
                f.write_str(")")
            }
            IrValue::Array(elements) => {
                f.write_str("[")?;
                write_joined(f, elements)?;
                f.write_str("]")
            }
            IrValue::Token => f.write_str("token"),
        }
    }
}

pub(crate) fn write_joined<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

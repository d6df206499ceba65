//! Random IR values for property-based testing.
//!
//! Generation is driven entirely by the caller's RNG, so a seeded RNG
//! reproduces the same sequence of values.

use rand::RngCore;

use crate::{Bits, IrType, IrValue};

/// Uniformly random bit vector of the given width.
pub fn random_bits<R: RngCore + ?Sized>(width: u32, rng: &mut R) -> Bits {
    let words: Vec<u64> = (0..width.div_ceil(64)).map(|_| rng.next_u64()).collect();
    Bits::from_words(width, &words)
}

/// Random value of type `ty`.
pub fn random_value<R: RngCore + ?Sized>(ty: &IrType, rng: &mut R) -> IrValue {
    match ty {
        IrType::Bits(width) => IrValue::Bits(random_bits(*width, rng)),
        IrType::Tuple(elements) => {
            IrValue::Tuple(elements.iter().map(|e| random_value(e, rng)).collect())
        }
        IrType::Array { element, size } => {
            IrValue::Array((0..*size).map(|_| random_value(element, rng)).collect())
        }
        IrType::Token => IrValue::Token,
    }
}

/// One random argument per parameter, in parameter order.
pub fn random_function_arguments<R: RngCore + ?Sized>(params: &[IrType], rng: &mut R) -> Vec<IrValue> {
    params.iter().map(|ty| random_value(ty, rng)).collect()
}

//! Arbitrary-width bit vectors.
//!
//! Both value domains bottom out in [`Bits`]: the interpreter tags them as
//! signed/unsigned/enum, the IR treats them as raw `bits[N]`.
//!
//! Storage is little-endian 64-bit words. Bits at or above `width` are
//! always zero, so structural equality is value equality.

use std::fmt;

use smallvec::{smallvec, SmallVec};

const WORD_BITS: u32 = 64;

#[inline]
fn word_count(width: u32) -> usize {
    width.div_ceil(WORD_BITS) as usize
}

/// A fixed-width bit vector.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Bits {
    width: u32,
    words: SmallVec<[u64; 2]>,
}

impl Bits {
    /// All-zero value of the given width.
    pub fn zero(width: u32) -> Self {
        Bits {
            width,
            words: smallvec![0; word_count(width)],
        }
    }

    /// Build from an unsigned value, truncating to `width`.
    pub fn from_u64(width: u32, value: u64) -> Self {
        let mut bits = Self::zero(width);
        if let Some(first) = bits.words.first_mut() {
            *first = value;
        }
        bits.normalize();
        bits
    }

    /// Build from a signed value (two's complement), truncating to `width`.
    #[expect(clippy::cast_sign_loss, reason = "two's complement reinterpretation")]
    pub fn from_i64(width: u32, value: i64) -> Self {
        let fill = if value < 0 { u64::MAX } else { 0 };
        let mut bits = Bits {
            width,
            words: smallvec![fill; word_count(width)],
        };
        if let Some(first) = bits.words.first_mut() {
            *first = value as u64;
        }
        bits.normalize();
        bits
    }

    /// Build from little-endian words. Missing words are zero, extra words
    /// and bits above `width` are dropped.
    pub fn from_words(width: u32, words: &[u64]) -> Self {
        let mut bits = Self::zero(width);
        for (dst, src) in bits.words.iter_mut().zip(words) {
            *dst = *src;
        }
        bits.normalize();
        bits
    }

    /// Clear every bit at or above `width`.
    fn normalize(&mut self) {
        let rem = self.width % WORD_BITS;
        if rem != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1u64 << rem) - 1;
            }
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.words.iter().all(|w| *w == 0)
    }

    /// Value of bit `index`; bits beyond the width read as zero.
    pub fn bit(&self, index: u32) -> bool {
        if index >= self.width {
            return false;
        }
        let word = self.words[(index / WORD_BITS) as usize];
        (word >> (index % WORD_BITS)) & 1 == 1
    }

    /// Unsigned value, if it fits in 64 bits.
    pub fn to_u64(&self) -> Option<u64> {
        if self.words.iter().skip(1).any(|w| *w != 0) {
            return None;
        }
        Some(self.words.first().copied().unwrap_or(0))
    }

    /// Sign-extended value, if it fits in 64 bits.
    #[expect(clippy::cast_possible_wrap, reason = "two's complement reinterpretation")]
    pub fn to_i64(&self) -> Option<i64> {
        let Some(&low) = self.words.first() else {
            return Some(0);
        };
        if self.width <= WORD_BITS {
            let value = if self.width < WORD_BITS && self.bit(self.width - 1) {
                low | !((1u64 << self.width) - 1)
            } else {
                low
            };
            return Some(value as i64);
        }
        let candidate = low as i64;
        (Self::from_i64(self.width, candidate) == *self).then_some(candidate)
    }

    /// Render as a signed decimal when it fits, hex otherwise.
    pub fn fmt_signed(&self) -> String {
        self.to_i64()
            .map_or_else(|| self.to_string(), |v| v.to_string())
    }
}

impl fmt::Display for Bits {
    /// Decimal up to 64 bits wide, `0x`-prefixed hex for wider values.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.width <= WORD_BITS {
            return write!(f, "{}", self.words.first().copied().unwrap_or(0));
        }
        let mut significant = self.words.iter().rev().skip_while(|word| **word == 0);
        let Some(top) = significant.next() else {
            return f.write_str("0x0");
        };
        write!(f, "0x{top:x}")?;
        for word in significant {
            write!(f, "{word:016x}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;

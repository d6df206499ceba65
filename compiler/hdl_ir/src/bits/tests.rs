use super::*;
use proptest::prelude::*;

#[test]
fn test_from_u64_truncates_to_width() {
    let bits = Bits::from_u64(4, 0xff);
    assert_eq!(bits.to_u64(), Some(0xf));
    assert!(!bits.is_zero());
}

#[test]
fn test_zero_width() {
    let bits = Bits::zero(0);
    assert!(bits.is_zero());
    assert_eq!(bits.to_u64(), Some(0));
    assert_eq!(bits.to_i64(), Some(0));
    assert_eq!(bits, Bits::from_words(0, &[1, 2]));
}

#[test]
fn test_from_i64_sign_extends_across_words() {
    let bits = Bits::from_i64(100, -1);
    assert!(bits.bit(99));
    assert!(!bits.bit(100));
    assert_eq!(bits.to_i64(), Some(-1));
    assert_eq!(bits.to_u64(), None);
}

#[test]
fn test_to_i64_narrow() {
    assert_eq!(Bits::from_u64(4, 0b1111).to_i64(), Some(-1));
    assert_eq!(Bits::from_u64(4, 0b0111).to_i64(), Some(7));
    assert_eq!(Bits::from_u64(8, 0x80).to_i64(), Some(-128));
}

#[test]
fn test_to_i64_wide_out_of_range() {
    let bits = Bits::from_words(128, &[0, 1]);
    assert_eq!(bits.to_i64(), None);
    assert_eq!(bits.fmt_signed(), "0x10000000000000000");
}

#[test]
fn test_bit_access() {
    let bits = Bits::from_u64(8, 0b1010_0001);
    assert!(bits.bit(0));
    assert!(!bits.bit(1));
    assert!(bits.bit(7));
    assert!(!bits.bit(8));
}

#[test]
fn test_display() {
    assert_eq!(Bits::from_u64(8, 42).to_string(), "42");
    assert_eq!(
        Bits::from_words(72, &[0xdead_beef, 0xab]).to_string(),
        "0xab00000000deadbeef"
    );
    assert_eq!(Bits::from_u64(4, 0xf).fmt_signed(), "-1");
}

#[test]
fn test_display_wide_values_use_hex() {
    assert_eq!(Bits::from_u64(64, 255).to_string(), "255");
    assert_eq!(Bits::from_u64(65, 255).to_string(), "0xff");
    assert_eq!(Bits::zero(100).to_string(), "0x0");
}

#[test]
fn test_from_words_masks_top_word() {
    let bits = Bits::from_words(65, &[u64::MAX, u64::MAX, 7]);
    assert_eq!(bits, Bits::from_words(65, &[u64::MAX, 1]));
    assert!(bits.bit(64));
    assert!(!bits.bit(65));
}

proptest! {
    #[test]
    fn prop_u64_roundtrip_within_width(width in 1u32..=64, value in any::<u64>()) {
        let bits = Bits::from_u64(width, value);
        let mask = if width == 64 { u64::MAX } else { (1u64 << width) - 1 };
        prop_assert_eq!(bits.to_u64(), Some(value & mask));
    }

    #[test]
    fn prop_i64_sign_extension_is_stable(width in 64u32..=200, value in any::<i64>()) {
        let bits = Bits::from_i64(width, value);
        prop_assert_eq!(bits.to_i64(), Some(value));
    }

    #[test]
    fn prop_bits_above_width_do_not_affect_equality(width in 1u32..=130, words in any::<[u64; 3]>()) {
        let a = Bits::from_words(width, &words);
        let mut noisy = words;
        for (low, word) in (0u32..).step_by(64).zip(noisy.iter_mut()) {
            if low >= width {
                *word = u64::MAX;
            } else if width - low < 64 {
                *word |= u64::MAX << (width - low);
            }
        }
        prop_assert_eq!(a, Bits::from_words(width, &noisy));
    }
}

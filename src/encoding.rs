//! Base-91 encoding for compressed APRS fields.
//!
//! APRS packs latitude, longitude and telemetry values into short runs of
//! printable characters using a radix-91 numeral system. Each digit is
//! `value % 91 + 33`, so the alphabet is `'!'` (0) through `'{'` (90), most
//! significant digit first.
//!
//! ## Functions
//!
//! - [`base91_encode`]: Encodes a value into a fixed-width array
//! - [`base91_encode_into`]: Encodes a value into a caller-provided slice
//! - [`base91_decode`]: Recovers the value from its digits
//!
//! ## Limitations
//!
//! - Encoding keeps only the low `width` digits: a value of `91^width` or
//!   more silently loses its high-order part. This is a precision limit of
//!   the field, not an error.

use crate::consts::{BASE91_OFFSET, BASE91_RADIX};

/// Highest valid Base-91 character (`'{'`).
pub const BASE91_MAX_CHAR: u8 = BASE91_OFFSET + (BASE91_RADIX as u8) - 1;

/// Encodes `value` as exactly `W` Base-91 characters.
///
/// # Example
/// ```rust
/// use habtx::encoding::base91_encode;
///
/// assert_eq!(&base91_encode::<2>(8280), b"{{");
/// assert_eq!(&base91_encode::<4>(0), b"!!!!");
/// ```
pub fn base91_encode<const W: usize>(value: u32) -> [u8; W] {
    let mut out = [0u8; W];
    base91_encode_into(&mut out, value);
    out
}

/// Fills `out` right to left with the Base-91 digits of `value`.
///
/// The width of the field is `out.len()`.
pub fn base91_encode_into(out: &mut [u8], value: u32) {
    let mut v = value;
    for digit in out.iter_mut().rev() {
        *digit = (v % BASE91_RADIX) as u8 + BASE91_OFFSET;
        v /= BASE91_RADIX;
    }
}

/// Decodes Base-91 digits back into a value.
///
/// # Returns
/// `None` if any character is outside `'!'..='{'` or the value overflows a
/// `u32`.
pub fn base91_decode(digits: &[u8]) -> Option<u32> {
    digits.iter().try_fold(0u32, |acc, &c| {
        if !(BASE91_OFFSET..=BASE91_MAX_CHAR).contains(&c) {
            return None;
        }
        acc.checked_mul(BASE91_RADIX)?
            .checked_add(u32::from(c - BASE91_OFFSET))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_is_most_significant_first() {
        // 91 = "10" in base 91
        assert_eq!(&base91_encode::<2>(91), b"\"!");
        assert_eq!(&base91_encode::<3>(91 * 91 + 2), b"\"!#");
    }

    #[test]
    fn test_encode_drops_high_order_digits() {
        assert_eq!(base91_encode::<2>(91 * 91), base91_encode::<2>(0));
        assert_eq!(base91_encode::<1>(92), base91_encode::<1>(1));
    }

    #[test]
    fn test_round_trip_within_range() {
        for v in (0..91 * 91 * 91).step_by(97) {
            assert_eq!(base91_decode(&base91_encode::<3>(v)), Some(v));
        }
        let max = 91u32.pow(4) - 1;
        assert_eq!(&base91_encode::<4>(max), b"{{{{");
        assert_eq!(base91_decode(&base91_encode::<4>(max)), Some(max));
    }

    #[test]
    fn test_decode_rejects_characters_outside_alphabet() {
        assert_eq!(base91_decode(b"!|"), None);
        assert_eq!(base91_decode(b" !"), None);
        assert_eq!(base91_decode(b""), Some(0));
    }

    #[test]
    fn test_encode_into_uses_slice_width() {
        let mut buf = [0u8; 5];
        base91_encode_into(&mut buf[1..4], 1);
        assert_eq!(&buf, b"\0!!\"\0");
    }
}

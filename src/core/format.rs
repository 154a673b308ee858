//! Fixed-width field formatting for the legacy record layout.
//!
//! Every numeric field is a sign byte followed by zero-padded digits; every
//! descriptor is left-justified and space-padded to a fixed byte width; every
//! record line is padded with spaces to exactly [`LINE_BYTES`]. Values that
//! do not fit their field error out — they are never truncated or clamped,
//! since a silently shortened amount corrupts every field to its right.

use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;
use rust_decimal::prelude::ToPrimitive;

use super::error::ExtractError;

/// Exact byte length of every record line.
pub const LINE_BYTES: usize = 128;

/// Byte width of the left-justified end descriptor.
pub const DESC_BYTES: usize = 18;

/// Byte width of every signed amount and count field in this layout:
/// one sign byte plus ten digit positions.
pub const AMOUNT_BYTES: usize = 11;

/// Format a decimal currency amount as a sign byte plus zero-padded cents.
///
/// The amount is rounded to 2 decimal places, half away from zero, and the
/// decimal point removed: `signed_amount(dec!(-12.345), 11)` is
/// `"-0000001235"`. The sign reflects the original value (`+` for zero).
///
/// # Errors
///
/// [`ExtractError::FieldOverflow`] when the cent digits exceed `width - 1`.
pub fn signed_amount(amount: Decimal, width: usize) -> Result<String, ExtractError> {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let cents = (rounded * Decimal::ONE_HUNDRED)
        .to_i128()
        .ok_or_else(|| overflow(amount, width))?;
    signed_digits(cents.unsigned_abs(), amount < Decimal::ZERO, width)
        .ok_or_else(|| overflow(amount, width))
}

/// Format an integer-valued count the same way, without cent scaling.
///
/// The value is rounded to a whole number, half away from zero:
/// `signed_count(dec!(41), 11)` is `"+0000000041"`.
pub fn signed_count(value: Decimal, width: usize) -> Result<String, ExtractError> {
    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let whole = rounded
        .to_i128()
        .ok_or_else(|| overflow(value, width))?;
    signed_digits(whole.unsigned_abs(), value < Decimal::ZERO, width)
        .ok_or_else(|| overflow(value, width))
}

/// Format an amount already held in integer cents.
pub fn signed_cents(cents: i64, width: usize) -> Result<String, ExtractError> {
    signed_digits(u128::from(cents.unsigned_abs()), cents < 0, width).ok_or_else(|| {
        ExtractError::FieldOverflow {
            value: cents.to_string(),
            width,
        }
    })
}

fn overflow(value: Decimal, width: usize) -> ExtractError {
    ExtractError::FieldOverflow {
        value: value.to_string(),
        width,
    }
}

/// Sign byte + zero padding + digits, total length exactly `width` bytes.
/// `None` when the digits do not fit the `width - 1` digit positions.
fn signed_digits(magnitude: u128, negative: bool, width: usize) -> Option<String> {
    let digits = magnitude.to_string();
    let positions = width.checked_sub(1)?;
    if digits.len() > positions {
        return None;
    }
    let mut out = String::with_capacity(width);
    out.push(if negative { '-' } else { '+' });
    for _ in digits.len()..positions {
        out.push('0');
    }
    out.push_str(&digits);
    Some(out)
}

/// Left-justify a descriptor into exactly `width` bytes.
///
/// Text longer than `width` bytes is cut at the largest character boundary
/// that fits, then space-padded back up to `width`; shorter text is
/// space-padded. The result always has a UTF-8 byte length of `width`,
/// so the operation is idempotent.
pub fn pad_descriptor(text: &str, width: usize) -> String {
    let mut end = text.len().min(width);
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    let mut out = String::with_capacity(width);
    out.push_str(&text[..end]);
    for _ in end..width {
        out.push(' ');
    }
    out
}

/// The run of spaces needed between `left` and `right` so the joined line
/// is exactly [`LINE_BYTES`] long.
///
/// # Errors
///
/// [`ExtractError::LineOverflow`] when the two halves already exceed the
/// record length — a formatting defect upstream, never padded over.
pub fn filler(left: &str, right: &str) -> Result<String, ExtractError> {
    let have = left.len() + right.len();
    match LINE_BYTES.checked_sub(have) {
        Some(missing) => Ok(" ".repeat(missing)),
        None => Err(ExtractError::LineOverflow {
            have,
            want: LINE_BYTES,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn signed_amount_rounds_half_away_from_zero() {
        assert_eq!(signed_amount(dec!(-12.345), 11).unwrap(), "-0000001235");
        assert_eq!(signed_amount(dec!(12.345), 11).unwrap(), "+0000001235");
        assert_eq!(signed_amount(dec!(10.004), 11).unwrap(), "+0000001000");
    }

    #[test]
    fn signed_amount_zero_is_positive() {
        assert_eq!(signed_amount(Decimal::ZERO, 11).unwrap(), "+0000000000");
    }

    #[test]
    fn signed_amount_overflow_errors() {
        // 10 digit positions hold at most 99,999,999.99
        let err = signed_amount(dec!(123456789.00), 11).unwrap_err();
        assert!(matches!(err, ExtractError::FieldOverflow { width: 11, .. }));
        assert!(signed_amount(dec!(99999999.99), 11).is_ok());
    }

    #[test]
    fn signed_count_has_no_cent_scaling() {
        assert_eq!(signed_count(dec!(41), 11).unwrap(), "+0000000041");
        assert_eq!(signed_count(dec!(-2.5), 11).unwrap(), "-0000000003");
    }

    #[test]
    fn signed_cents_handles_extremes() {
        assert_eq!(signed_cents(-800, 11).unwrap(), "-0000000800");
        assert_eq!(signed_cents(0, 11).unwrap(), "+0000000000");
        assert!(signed_cents(i64::MIN, 11).is_err());
    }

    #[test]
    fn pad_descriptor_pads_and_truncates() {
        assert_eq!(pad_descriptor("STATE TAX", 18), "STATE TAX         ");
        assert_eq!(pad_descriptor("", 4), "    ");
        assert_eq!(pad_descriptor("ABCDEFGHIJKLMNOPQRSTU", 18).len(), 18);
    }

    #[test]
    fn pad_descriptor_respects_char_boundaries() {
        // 'É' is two bytes; cutting mid-character falls back to the
        // previous boundary and pads the gap with a space.
        let padded = pad_descriptor("CAFÉ", 4);
        assert_eq!(padded.len(), 4);
        assert_eq!(padded, "CAF ");
    }

    #[test]
    fn filler_reaches_exact_line_length() {
        let left = "A".repeat(35);
        let right = "B".repeat(29);
        let fill = filler(&left, &right).unwrap();
        assert_eq!(left.len() + fill.len() + right.len(), LINE_BYTES);
    }

    #[test]
    fn filler_rejects_overlong_halves() {
        let left = "A".repeat(100);
        let right = "B".repeat(29);
        assert!(matches!(
            filler(&left, &right),
            Err(ExtractError::LineOverflow { have: 129, .. })
        ));
    }
}

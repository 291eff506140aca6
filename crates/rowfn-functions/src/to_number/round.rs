//! Decimal round-half-up on `f64`.
//!
//! Binary rounding (`f64::round`, formatting with a precision) is not used:
//! the value is taken in its shortest round-trip decimal form and rounded as
//! a `Decimal`, so `2.675` at scale 2 gives `2.68`.

use rust_decimal::{Decimal, RoundingStrategy};

/// Largest scale a `Decimal` can carry.
const MAX_DECIMAL_SCALE: u32 = 28;

/// Round `value` to `scale` fractional digits, ties away from zero.
///
/// Non-finite values pass through unchanged; a zero result is `+0.0`.
/// Values beyond `Decimal` range are already integral and are returned as is,
/// as are all values when `scale` exceeds the `Decimal` maximum.
pub fn round_half_up(value: f64, scale: u32) -> f64 {
    if !value.is_finite() || scale >= MAX_DECIMAL_SCALE {
        return value;
    }

    // Half-away-from-zero only looks at the first dropped digit, so cutting
    // the text at the `Decimal` scale limit does not change the result.
    let text = value.to_string();
    let text = match text.find('.') {
        Some(dot) => &text[..text.len().min(dot + 1 + MAX_DECIMAL_SCALE as usize)],
        None => text.as_str(),
    };
    let Ok(decimal) = text.parse::<Decimal>() else {
        return value;
    };

    let rounded = decimal.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        return 0.0;
    }
    // Text conversion keeps the nearest `f64` to the rounded decimal.
    rounded.to_string().parse::<f64>().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ties_round_away_from_zero() {
        assert_eq!(round_half_up(1234.565, 2), 1234.57);
        assert_eq!(round_half_up(2.675, 2), 2.68);
        assert_eq!(round_half_up(0.125, 2), 0.13);
        assert_eq!(round_half_up(2.5, 0), 3.0);
        assert_eq!(round_half_up(-2.5, 0), -3.0);
        assert_eq!(round_half_up(-1.005, 2), -1.01);
    }

    #[test]
    fn test_below_half_truncates() {
        assert_eq!(round_half_up(1234.564, 2), 1234.56);
        assert_eq!(round_half_up(2.4999, 0), 2.0);
        assert_eq!(round_half_up(-0.3, 0), 0.0);
    }

    #[test]
    fn test_carry_propagates() {
        assert_eq!(round_half_up(999.995, 2), 1000.0);
        assert_eq!(round_half_up(9.5, 0), 10.0);
        assert_eq!(round_half_up(0.0096, 2), 0.01);
    }

    #[test]
    fn test_small_magnitudes() {
        assert_eq!(round_half_up(0.004, 2), 0.0);
        assert_eq!(round_half_up(0.005, 2), 0.01);
        assert_eq!(round_half_up(0.0005, 3), 0.001);
        assert_eq!(round_half_up(0.00009, 3), 0.0);
        assert!(round_half_up(-0.004, 2).is_sign_positive());
    }

    #[test]
    fn test_already_within_scale() {
        assert_eq!(round_half_up(1234.5, 2), 1234.5);
        assert_eq!(round_half_up(1e300, 0), 1e300);
        assert_eq!(round_half_up(0.1, 10), 0.1);
        assert_eq!(round_half_up(5e-324, u32::MAX), 5e-324);
        assert_eq!(round_half_up(1e29, 2), 1e29);
    }

    #[test]
    fn test_digits_past_decimal_scale() {
        assert_eq!(round_half_up(1.5e-20, 20), 2e-20);
        assert_eq!(round_half_up(5.5e-28, 27), 1e-27);
        assert_eq!(round_half_up(4.6e-29, 27), 0.0);
        assert_eq!(round_half_up(1.23e-30, 2), 0.0);
    }

    #[test]
    fn test_non_finite_passes_through() {
        assert_eq!(round_half_up(f64::INFINITY, 2), f64::INFINITY);
        assert_eq!(round_half_up(f64::NEG_INFINITY, 2), f64::NEG_INFINITY);
        assert!(round_half_up(f64::NAN, 2).is_nan());
    }
}

//! Text -> number against a compiled `ParsePlan`.
//!
//! The digits are collected as a decimal string and converted to `f64` in a
//! single correctly-rounded step; percent/per-mille become an exponent shift.

use std::cmp::Reverse;

use super::error::NumberParseError;
use super::pattern::{Affixes, ParsePlan};
use super::round::round_half_up;

impl ParsePlan {
    /// Parse `text` and round half-up to `max_fraction_digits`.
    pub fn parse(&self, text: &str) -> Result<f64, NumberParseError> {
        let value = self.parse_unrounded(text)?;
        Ok(round_half_up(value, self.max_fraction_digits))
    }

    /// Parse `text` without the final rounding step.
    pub fn parse_unrounded(&self, text: &str) -> Result<f64, NumberParseError> {
        // Longest prefix first; on a tie the negative form goes first so an
        // explicit negative suffix can win.
        let mut candidates = [(&self.negative, true), (&self.positive, false)];
        candidates.sort_by_key(|(affixes, _)| Reverse(affixes.prefix.len()));

        let mut first_failure = None;
        for (affixes, negative) in candidates {
            let Some(rest) = text.strip_prefix(affixes.prefix.as_str()) else {
                continue;
            };
            match self.parse_body(rest, affixes, negative) {
                Ok(value) => return Ok(value),
                Err(reason) => {
                    first_failure.get_or_insert(reason);
                }
            }
        }

        let reason = first_failure.unwrap_or_else(|| {
            format!(
                "expected prefix '{}' or '{}'",
                self.positive.prefix, self.negative.prefix
            )
        });
        Err(NumberParseError {
            input: text.to_string(),
            pattern: self.pattern.clone(),
            reason,
        })
    }

    fn parse_body(&self, rest: &str, affixes: &Affixes, negative: bool) -> Result<f64, String> {
        let bytes = rest.as_bytes();
        let mut pos = 0;
        let mut digits = String::with_capacity(bytes.len());

        // Integer part with optional grouping separators.
        let mut groups: Vec<usize> = Vec::new();
        let mut current_group = 0usize;
        let mut integer_digits = 0usize;
        loop {
            match bytes.get(pos) {
                Some(b) if b.is_ascii_digit() => {
                    digits.push(char::from(*b));
                    integer_digits += 1;
                    current_group += 1;
                    pos += 1;
                }
                Some(b',') if self.grouping_size.is_some() => {
                    let followed_by_digit = bytes.get(pos + 1).is_some_and(u8::is_ascii_digit);
                    if current_group == 0 || !followed_by_digit {
                        return Err(format!(
                            "misplaced grouping separator at position {}",
                            self.text_offset(affixes, pos)
                        ));
                    }
                    groups.push(current_group);
                    current_group = 0;
                    pos += 1;
                }
                _ => break,
            }
        }
        if !groups.is_empty() {
            groups.push(current_group);
            if self.strict_grouping {
                self.check_groups(&groups)?;
            }
        }

        // Fraction part.
        let mut fraction_digits = 0usize;
        if bytes.get(pos) == Some(&b'.') {
            pos += 1;
            while let Some(b) = bytes.get(pos).filter(|b| b.is_ascii_digit()) {
                digits.push(char::from(*b));
                fraction_digits += 1;
                pos += 1;
            }
        }
        if integer_digits + fraction_digits == 0 {
            return Err("no digits found".to_string());
        }

        // Optional exponent; left unconsumed when malformed.
        let mut exponent = 0i64;
        if bytes.get(pos) == Some(&b'E') {
            let mut cursor = pos + 1;
            let exp_negative = match bytes.get(cursor) {
                Some(b'-') => {
                    cursor += 1;
                    true
                }
                Some(b'+') => {
                    cursor += 1;
                    false
                }
                _ => false,
            };
            let start = cursor;
            let mut magnitude = 0i64;
            while let Some(b) = bytes.get(cursor).filter(|b| b.is_ascii_digit()) {
                magnitude = magnitude
                    .saturating_mul(10)
                    .saturating_add(i64::from(b - b'0'));
                cursor += 1;
            }
            if cursor > start {
                exponent = if exp_negative { -magnitude } else { magnitude };
                pos = cursor;
            }
        }

        // Suffix must close the text exactly.
        let tail = &rest[pos..];
        if tail != affixes.suffix {
            return Err(if let Some(extra) = tail.strip_prefix(affixes.suffix.as_str()) {
                format!("unexpected trailing characters '{}'", extra)
            } else {
                format!("expected suffix '{}' but found '{}'", affixes.suffix, tail)
            });
        }

        // `f64` parsing saturates out-of-range exponents itself.
        let scale = i64::try_from(fraction_digits).unwrap_or(i64::MAX);
        let decimal_exponent = exponent
            .saturating_sub(scale)
            .saturating_sub(self.multiplier.decimal_shift());
        let magnitude: f64 = format!("{}e{}", digits, decimal_exponent)
            .parse()
            .map_err(|_| "digits do not form a number".to_string())?;
        Ok(if negative { -magnitude } else { magnitude })
    }

    fn check_groups(&self, groups: &[usize]) -> Result<(), String> {
        let Some(size) = self.grouping_size else {
            return Ok(());
        };
        let Some((leading, rest)) = groups.split_first() else {
            return Ok(());
        };
        if *leading == 0 || *leading > size || rest.iter().any(|g| *g != size) {
            return Err(format!("digit groups do not match grouping size {}", size));
        }
        Ok(())
    }

    /// Character offset in the original text (prefix included) for diagnostics.
    fn text_offset(&self, affixes: &Affixes, pos: usize) -> usize {
        affixes.prefix.chars().count() + pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(pattern: &str) -> ParsePlan {
        ParsePlan::compile(pattern).unwrap()
    }

    #[test]
    fn test_plain_and_grouped() {
        let p = plan("#,##0.00");
        assert_eq!(p.parse_unrounded("1,234.567").unwrap(), 1234.567);
        assert_eq!(p.parse_unrounded("1234.5").unwrap(), 1234.5);
        assert_eq!(p.parse_unrounded("12,34,5").unwrap(), 12345.0);
        assert_eq!(p.parse_unrounded(".5").unwrap(), 0.5);
        assert_eq!(p.parse_unrounded("7.").unwrap(), 7.0);
    }

    #[test]
    fn test_grouping_separator_rejected_without_grouping() {
        let p = plan("0.00");
        let err = p.parse_unrounded("1,234").unwrap_err();
        assert!(err.reason.contains("trailing"), "{}", err.reason);
    }

    #[test]
    fn test_misplaced_separators() {
        let p = plan("#,##0");
        assert!(p.parse_unrounded(",123").is_err());
        assert!(p.parse_unrounded("1,,234").is_err());
        assert!(p.parse_unrounded("1,").is_err());
        assert!(p.parse_unrounded("1,.5").is_err());
    }

    #[test]
    fn test_strict_grouping() {
        let p = plan("#,##0").with_strict_grouping(true);
        assert_eq!(p.parse_unrounded("12,345,678").unwrap(), 12345678.0);
        assert_eq!(p.parse_unrounded("12345").unwrap(), 12345.0);
        assert!(p.parse_unrounded("12,34").is_err());
        assert!(p.parse_unrounded("1234,567").is_err());
    }

    #[test]
    fn test_signs() {
        let p = plan("#,##0.00");
        assert_eq!(p.parse_unrounded("-1,000.25").unwrap(), -1000.25);
        assert!(p.parse_unrounded("--1").is_err());
        assert!(p.parse_unrounded("1-").is_err());

        let p = plan("#,##0.00;(#,##0.00)");
        assert_eq!(p.parse_unrounded("(12.50)").unwrap(), -12.5);
        assert_eq!(p.parse_unrounded("12.50").unwrap(), 12.5);
        assert!(p.parse_unrounded("(12.50").is_err());

        let p = plan("0;0-");
        assert_eq!(p.parse_unrounded("5-").unwrap(), -5.0);
        assert_eq!(p.parse_unrounded("5").unwrap(), 5.0);
    }

    #[test]
    fn test_affix_literals() {
        let p = plan("$#,##0.00 USD");
        assert_eq!(p.parse_unrounded("$1,500.00 USD").unwrap(), 1500.0);
        assert_eq!(p.parse_unrounded("-$2.00 USD").unwrap(), -2.0);
        assert!(p.parse_unrounded("1,500.00 USD").is_err());
        assert!(p.parse_unrounded("$1,500.00").is_err());
    }

    #[test]
    fn test_multipliers_shift_exactly() {
        let p = plan("#0.00%");
        assert_eq!(p.parse_unrounded("12.5%").unwrap(), 0.125);
        assert_eq!(p.parse_unrounded("-50%").unwrap(), -0.5);

        let p = plan("0\u{2030}");
        assert_eq!(p.parse_unrounded("25\u{2030}").unwrap(), 0.025);
    }

    #[test]
    fn test_exponent() {
        let p = plan("0.###E0");
        assert_eq!(p.parse_unrounded("1.5E3").unwrap(), 1500.0);
        assert_eq!(p.parse_unrounded("25E-2").unwrap(), 0.25);
        assert!(p.parse_unrounded("1.5E").is_err());
        assert_eq!(p.parse_unrounded("1E99999").unwrap(), f64::INFINITY);
        assert_eq!(p.parse_unrounded("1E-99999").unwrap(), 0.0);
        assert_eq!(
            p.parse_unrounded("1E99999999999999999999999").unwrap(),
            f64::INFINITY
        );
    }

    #[test]
    fn test_long_fraction_keeps_its_scale() {
        let p = plan("0.00");
        let text = format!("1.{}", "0".repeat(200_001));
        assert_eq!(p.parse_unrounded(&text).unwrap(), 1.0);
        assert_eq!(p.parse(&text).unwrap(), 1.0);
    }

    #[test]
    fn test_exponent_cancels_long_mantissa() {
        let p = plan("0.###E0");
        let text = format!("1{}E-150000", "0".repeat(150_000));
        assert_eq!(p.parse_unrounded(&text).unwrap(), 1.0);

        let text = format!("0.{}25E300000", "0".repeat(299_999));
        assert_eq!(p.parse_unrounded(&text).unwrap(), 2.5);
    }

    #[test]
    fn test_error_context() {
        let p = plan("#,##0.00");
        let err = p.parse_unrounded("abc").unwrap_err();
        assert_eq!(err.input, "abc");
        assert_eq!(err.pattern, "#,##0.00");
        assert_eq!(err.reason, "no digits found");
    }

    #[test]
    fn test_non_ascii_tail_is_rejected() {
        let p = plan("0.00");
        assert!(p.parse_unrounded("1.5€").is_err());
        assert!(p.parse_unrounded("١٢٣").is_err());
    }
}

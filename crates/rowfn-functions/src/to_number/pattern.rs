//! Pattern compiler: decimal format string -> `ParsePlan`.
//!
//! Symbols inside the number part: `0` required digit, `#` optional digit,
//! `,` grouping separator, `.` decimal point, `E` exponent. Affix symbols:
//! `%` (value / 100), `‰` (value / 1000), `'` quoting, `;` negative subpattern.
//! Everything else in an affix is a literal.

use super::error::FormatPatternError;

const PER_MILLE: char = '\u{2030}';

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Multiplier {
    #[default]
    One,
    Percent,
    PerMille,
}

impl Multiplier {
    /// Power of ten the parsed value is divided by.
    pub fn decimal_shift(self) -> i64 {
        match self {
            Multiplier::One => 0,
            Multiplier::Percent => 2,
            Multiplier::PerMille => 3,
        }
    }
}

/// Literal text expected before and after the number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Affixes {
    pub prefix: String,
    pub suffix: String,
}

/// Compiled, immutable form of a format pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePlan {
    pub(super) pattern: String,
    pub(super) positive: Affixes,
    pub(super) negative: Affixes,
    pub(super) grouping_size: Option<usize>,
    pub(super) min_integer_digits: usize,
    pub(super) min_fraction_digits: usize,
    pub(super) max_fraction_digits: u32,
    pub(super) exponent_digits: Option<usize>,
    pub(super) multiplier: Multiplier,
    pub(super) strict_grouping: bool,
}

impl ParsePlan {
    pub fn compile(pattern: &str) -> Result<Self, FormatPatternError> {
        if pattern.is_empty() {
            return Err(FormatPatternError::new(pattern, "empty pattern"));
        }

        let mut compiler = Compiler::new(pattern);
        let (positive, more) = compiler.subpattern()?;
        let mut negative = Affixes {
            prefix: format!("-{}", positive.affixes.prefix),
            suffix: positive.affixes.suffix.clone(),
        };
        if more {
            let (explicit, again) = compiler.subpattern()?;
            if again {
                return Err(compiler.err("more than one ';' separator"));
            }
            // Identical affixes could never tell the signs apart; keep the default.
            if explicit.affixes != positive.affixes {
                negative = explicit.affixes;
            }
        }

        let shape = &positive.number;
        let fraction_digits = shape.fraction_zeros + shape.fraction_hashes;
        Ok(Self {
            pattern: pattern.to_string(),
            negative,
            grouping_size: shape.grouping_size,
            min_integer_digits: shape.integer_zeros,
            min_fraction_digits: shape.fraction_zeros,
            max_fraction_digits: u32::try_from(fraction_digits).unwrap_or(u32::MAX),
            exponent_digits: shape.exponent_digits,
            multiplier: positive.multiplier,
            positive: positive.affixes,
            strict_grouping: false,
        })
    }

    /// Enforce the grouping size when parsing.
    pub fn with_strict_grouping(mut self, strict: bool) -> Self {
        self.strict_grouping = strict;
        self
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Number of `0`/`#` after the decimal point; the rounding scale.
    pub fn max_fraction_digits(&self) -> u32 {
        self.max_fraction_digits
    }

    pub fn min_fraction_digits(&self) -> usize {
        self.min_fraction_digits
    }

    pub fn min_integer_digits(&self) -> usize {
        self.min_integer_digits
    }

    pub fn grouping_size(&self) -> Option<usize> {
        self.grouping_size
    }

    pub fn exponent_digits(&self) -> Option<usize> {
        self.exponent_digits
    }

    pub fn multiplier(&self) -> Multiplier {
        self.multiplier
    }

    pub fn positive_affixes(&self) -> &Affixes {
        &self.positive
    }

    pub fn negative_affixes(&self) -> &Affixes {
        &self.negative
    }

    pub fn strict_grouping(&self) -> bool {
        self.strict_grouping
    }
}

#[derive(Debug, Default)]
struct NumberShape {
    integer_hashes: usize,
    integer_zeros: usize,
    grouping_size: Option<usize>,
    fraction_zeros: usize,
    fraction_hashes: usize,
    exponent_digits: Option<usize>,
}

impl NumberShape {
    fn digit_symbols(&self) -> usize {
        self.integer_hashes + self.integer_zeros + self.fraction_zeros + self.fraction_hashes
    }
}

#[derive(Debug, Default)]
struct Subpattern {
    affixes: Affixes,
    number: NumberShape,
    multiplier: Multiplier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Prefix,
    Number,
    Suffix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Part {
    Integer,
    Fraction,
    Exponent,
}

struct Compiler<'a> {
    pattern: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Compiler<'a> {
    fn new(pattern: &'a str) -> Self {
        Self {
            pattern,
            chars: pattern.chars().collect(),
            pos: 0,
        }
    }

    fn err(&self, reason: impl Into<String>) -> FormatPatternError {
        FormatPatternError::new(self.pattern, reason)
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.pos + 1).copied()
    }

    /// Compile one subpattern starting at `self.pos`. The flag is true when
    /// it was terminated by `;`.
    fn subpattern(&mut self) -> Result<(Subpattern, bool), FormatPatternError> {
        let mut sub = Subpattern::default();
        let mut phase = Phase::Prefix;
        let mut part = Part::Integer;
        let mut in_quote = false;
        let mut saw_group = false;
        let mut since_group = 0usize;
        let mut more = false;

        while let Some(&c) = self.chars.get(self.pos) {
            match phase {
                Phase::Prefix | Phase::Suffix => {
                    let affix = if phase == Phase::Prefix {
                        &mut sub.affixes.prefix
                    } else {
                        &mut sub.affixes.suffix
                    };

                    if in_quote {
                        if c != '\'' {
                            affix.push(c);
                        } else if self.peek_next() == Some('\'') {
                            affix.push('\'');
                            self.pos += 1;
                        } else {
                            in_quote = false;
                        }
                        self.pos += 1;
                        continue;
                    }

                    match c {
                        '\'' => {
                            if self.peek_next() == Some('\'') {
                                affix.push('\'');
                                self.pos += 1;
                            } else {
                                in_quote = true;
                            }
                        }
                        '#' | '0'..='9' | ',' | '.' => {
                            if phase == Phase::Prefix {
                                phase = Phase::Number;
                                continue;
                            }
                            return Err(
                                self.err(format!("unquoted special character '{}' in suffix", c))
                            );
                        }
                        ';' => {
                            if phase == Phase::Prefix {
                                return Err(self.err("subpattern has no digit symbols"));
                            }
                            self.pos += 1;
                            more = true;
                            break;
                        }
                        '%' | PER_MILLE => {
                            if sub.multiplier != Multiplier::One {
                                return Err(self.err("more than one percent or per-mille symbol"));
                            }
                            sub.multiplier = if c == '%' {
                                Multiplier::Percent
                            } else {
                                Multiplier::PerMille
                            };
                            affix.push(c);
                        }
                        _ => affix.push(c),
                    }
                    self.pos += 1;
                }
                Phase::Number => {
                    let shape = &mut sub.number;
                    match (c, part) {
                        ('#', Part::Integer) => {
                            if shape.integer_zeros > 0 {
                                return Err(self.err("'#' cannot follow '0' in the integer part"));
                            }
                            shape.integer_hashes += 1;
                            since_group += 1;
                        }
                        ('0', Part::Integer) => {
                            shape.integer_zeros += 1;
                            since_group += 1;
                        }
                        ('#', Part::Fraction) => shape.fraction_hashes += 1,
                        ('0', Part::Fraction) => {
                            if shape.fraction_hashes > 0 {
                                return Err(self.err("'0' cannot follow '#' in the fraction part"));
                            }
                            shape.fraction_zeros += 1;
                        }
                        ('0', Part::Exponent) => {
                            *shape.exponent_digits.get_or_insert(0) += 1;
                        }
                        ('#', Part::Exponent) => {
                            return Err(self.err("exponent digits must be '0'"));
                        }
                        ('1'..='9', _) => {
                            return Err(self.err(format!(
                                "digit '{}' in pattern (rounding increments are not supported)",
                                c
                            )));
                        }
                        (',', Part::Integer) => {
                            saw_group = true;
                            since_group = 0;
                        }
                        (',', _) => {
                            return Err(self.err("grouping separator outside the integer part"));
                        }
                        ('.', Part::Integer) => {
                            self.close_integer(shape, saw_group, since_group)?;
                            part = Part::Fraction;
                        }
                        ('.', _) => {
                            return Err(self.err("more than one decimal separator"));
                        }
                        ('E', Part::Integer) | ('E', Part::Fraction) => {
                            if part == Part::Integer {
                                self.close_integer(shape, saw_group, since_group)?;
                            }
                            shape.exponent_digits = Some(0);
                            part = Part::Exponent;
                        }
                        _ => {
                            if part == Part::Integer {
                                self.close_integer(shape, saw_group, since_group)?;
                            }
                            phase = Phase::Suffix;
                            continue;
                        }
                    }
                    self.pos += 1;
                }
            }
        }

        if in_quote {
            return Err(self.err("unterminated quote"));
        }
        if phase == Phase::Number && part == Part::Integer {
            self.close_integer(&mut sub.number, saw_group, since_group)?;
        }
        if sub.number.digit_symbols() == 0 {
            return Err(self.err("pattern has no digit symbols"));
        }
        if sub.number.exponent_digits == Some(0) {
            return Err(self.err("exponent requires at least one '0'"));
        }
        Ok((sub, more))
    }

    fn close_integer(
        &self,
        shape: &mut NumberShape,
        saw_group: bool,
        since_group: usize,
    ) -> Result<(), FormatPatternError> {
        if saw_group {
            if since_group == 0 {
                return Err(self.err("grouping separator at the end of the integer part"));
            }
            shape.grouping_size = Some(since_group);
        }
        Ok(())
    }
}

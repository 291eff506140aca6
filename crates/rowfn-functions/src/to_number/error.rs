use thiserror::Error;

/// A format pattern that cannot be compiled into a parse plan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid format pattern '{pattern}': {reason}")]
pub struct FormatPatternError {
    pub pattern: String,
    pub reason: String,
}

impl FormatPatternError {
    pub fn new(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }
}

/// Text that does not conform to a valid pattern. Recoverable per row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot parse input '{input}' with pattern '{pattern}': {reason}")]
pub struct NumberParseError {
    pub input: String,
    pub pattern: String,
    pub reason: String,
}

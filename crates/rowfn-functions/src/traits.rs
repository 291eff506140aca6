//! Function trait + common interfaces.
//!
//! The host calls `setup(...)` once per instance with whatever arguments it
//! knows to be constant, then `eval(...)` once per row.

use rowfn_core::types::Scalar;
use thiserror::Error;

use crate::descriptor::FunctionDescriptor;
use crate::to_number::{FormatPatternError, NumberParseError};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FnError {
    /// Setup-time: the format pattern is structurally invalid.
    #[error(transparent)]
    FormatPattern(#[from] FormatPatternError),

    /// Row-time: one input does not conform to an otherwise valid pattern.
    #[error(transparent)]
    NumberParse(#[from] NumberParseError),

    #[error("signature error in '{function}': {message}")]
    Signature {
        function: &'static str,
        message: String,
    },

    #[error("setup error: {0}")]
    Setup(String),

    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    #[error("registry error: {0}")]
    Registry(String),

    #[error("argument error: {0}")]
    Argument(String),
}

impl FnError {
    /// Row-level data errors leave the instance usable for the next row.
    pub fn is_row_error(&self) -> bool {
        matches!(self, FnError::NumberParse(_))
    }
}

impl From<rowfn_core::Error> for FnError {
    fn from(e: rowfn_core::Error) -> Self {
        FnError::Argument(e.to_string())
    }
}

/// Trait that all scalar functions implement.
///
/// Invariants:
/// - `eval` never mutates state that changes later results, except for
///   functions whose descriptor sets `is_random`.
/// - A failed `eval` leaves the instance exactly as it was.
pub trait ScalarFunction: Send + 'static {
    fn descriptor(&self) -> &'static FunctionDescriptor;

    /// Canonical name (stable).
    fn name(&self) -> &'static str {
        self.descriptor().primary_name()
    }

    /// One-time initialization. `constants[i]` is `Some` when argument `i`
    /// is the same for every row this instance will see.
    fn setup(&mut self, _constants: &[Option<Scalar>]) -> Result<(), FnError> {
        Ok(())
    }

    /// Evaluate one row. Inputs are non-null unless the descriptor says
    /// `NullHandling::Internal`.
    fn eval(&mut self, args: &[Scalar]) -> Result<Scalar, FnError>;
}

/// Evaluate honoring the descriptor's null handling: `NullIfNull` functions
/// are skipped and yield `Scalar::Null` when any argument is null.
pub fn eval_with_nulls(func: &mut dyn ScalarFunction, args: &[Scalar]) -> Result<Scalar, FnError> {
    if func.descriptor().short_circuits(args) {
        return Ok(Scalar::Null);
    }
    func.eval(args)
}

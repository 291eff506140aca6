//! `to_number(text, pattern)`: pattern-driven string -> double with half-up rounding.
//!
//! The pattern is normally constant for a call site, so `setup` compiles it
//! once into a `ParsePlan` and every row reuses it. The constancy is not
//! trusted blindly: when a row carries a different pattern (or none was
//! supplied at setup), that row gets a transient plan compiled on the spot.
//!
//! Lifecycle:
//! - `Uninitialized` -> `Compiled` after a successful setup;
//! - `Uninitialized` -> `Invalid` after a failed setup (terminal: build a new
//!   instance to use another pattern);
//! - row evaluation, failed or not, never changes the state.

mod error;
mod parse;
mod pattern;
mod round;

pub use error::{FormatPatternError, NumberParseError};
pub use pattern::{Affixes, Multiplier, ParsePlan};
pub use round::round_half_up;

use rowfn_core::prelude::{DataType, FunctionConfig, Scalar};

use crate::descriptor::{FunctionDescriptor, NullHandling, SetupKind, Signature};
use crate::traits::{FnError, ScalarFunction};

pub static TO_NUMBER: FunctionDescriptor = FunctionDescriptor {
    names: &["to_number"],
    signature: Signature::new(&[DataType::Utf8, DataType::Utf8], DataType::Float64),
    null_handling: NullHandling::NullIfNull,
    is_random: false,
    setup: SetupKind::ConstantArgs(&[1]),
};

#[derive(Debug, Clone, PartialEq)]
pub enum PlanState {
    Uninitialized,
    Compiled(ParsePlan),
    Invalid(FormatPatternError),
}

#[derive(Debug, Clone)]
pub struct ToNumber {
    state: PlanState,
    strict_grouping: bool,
}

impl ToNumber {
    pub fn new(config: &FunctionConfig) -> Self {
        Self {
            state: PlanState::Uninitialized,
            strict_grouping: config.strict_grouping,
        }
    }

    /// Construct and set up in one step.
    pub fn with_pattern(pattern: &str, config: &FunctionConfig) -> Result<Self, FnError> {
        let mut func = Self::new(config);
        func.prepare(pattern)?;
        Ok(func)
    }

    pub fn state(&self) -> &PlanState {
        &self.state
    }

    /// The cached plan, if setup succeeded.
    pub fn plan(&self) -> Option<&ParsePlan> {
        match &self.state {
            PlanState::Compiled(plan) => Some(plan),
            _ => None,
        }
    }

    /// One-time setup with a constant pattern.
    ///
    /// Repeating it with the same pattern is a no-op; a different pattern on
    /// an already compiled instance is rejected.
    pub fn prepare(&mut self, pattern: &str) -> Result<&ParsePlan, FnError> {
        if self.state == PlanState::Uninitialized {
            match self.compile(pattern) {
                Ok(plan) => self.state = PlanState::Compiled(plan),
                Err(err) => {
                    self.state = PlanState::Invalid(err.clone());
                    return Err(err.into());
                }
            }
        }
        match &self.state {
            PlanState::Compiled(plan) if plan.pattern() == pattern => Ok(plan),
            PlanState::Compiled(plan) => Err(FnError::Setup(format!(
                "to_number already compiled for pattern '{}', got '{}'",
                plan.pattern(),
                pattern
            ))),
            PlanState::Invalid(err) => Err(err.clone().into()),
            PlanState::Uninitialized => {
                Err(FnError::Setup("to_number plan missing after setup".into()))
            }
        }
    }

    /// Parse one row. Uses the cached plan when `pattern` matches it,
    /// otherwise compiles a transient plan for this call only.
    pub fn evaluate(&self, text: &str, pattern: &str) -> Result<f64, FnError> {
        match &self.state {
            PlanState::Invalid(err) => Err(err.clone().into()),
            PlanState::Compiled(plan) if plan.pattern() == pattern => Ok(plan.parse(text)?),
            _ => {
                #[cfg(feature = "tracing")]
                tracing::debug!(pattern, "to_number compiling per-call plan");
                let plan = self.compile(pattern)?;
                Ok(plan.parse(text)?)
            }
        }
    }

    fn compile(&self, pattern: &str) -> Result<ParsePlan, FormatPatternError> {
        let plan = ParsePlan::compile(pattern)?.with_strict_grouping(self.strict_grouping);
        #[cfg(feature = "tracing")]
        tracing::trace!(
            pattern,
            max_fraction_digits = plan.max_fraction_digits(),
            grouping_size = ?plan.grouping_size(),
            "compiled parse plan"
        );
        Ok(plan)
    }
}

impl ScalarFunction for ToNumber {
    fn descriptor(&self) -> &'static FunctionDescriptor {
        &TO_NUMBER
    }

    fn setup(&mut self, constants: &[Option<Scalar>]) -> Result<(), FnError> {
        match constants.get(1) {
            Some(Some(Scalar::Str(pattern))) => {
                self.prepare(pattern)?;
                Ok(())
            }
            // Null pattern: every row is skipped by null handling.
            Some(Some(Scalar::Null)) | Some(None) | None => Ok(()),
            Some(Some(other)) => Err(FnError::Signature {
                function: TO_NUMBER.primary_name(),
                message: format!("pattern must be Utf8, got {}", other.type_name()),
            }),
        }
    }

    fn eval(&mut self, args: &[Scalar]) -> Result<Scalar, FnError> {
        TO_NUMBER.check_args(args)?;
        let value = self.evaluate(args[0].as_str()?, args[1].as_str()?)?;
        Ok(Scalar::F64(value))
    }
}

//! Registration surface: `Signature`, `NullHandling`, `SetupKind`, `FunctionDescriptor`.
//!
//! Descriptors are `'static` data. The host reads them to decide dispatch,
//! null short-circuiting, and whether a call is eligible for constant folding.

use rowfn_core::prelude::{DataType, Scalar};
use serde::Serialize;

use crate::traits::FnError;

/// Fixed input types and the single output type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Signature {
    pub inputs: &'static [DataType],
    pub output: DataType,
}

impl Signature {
    pub const fn new(inputs: &'static [DataType], output: DataType) -> Self {
        Self { inputs, output }
    }

    pub const fn arity(&self) -> usize {
        self.inputs.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NullHandling {
    /// Function is not invoked when any input is null; the output is null.
    NullIfNull,
    /// Function runs even for null inputs and decides itself.
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SetupKind {
    /// No state at all; `setup` is a no-op.
    Stateless,
    /// State is created when the instance is constructed (e.g. a generator).
    PerInstance,
    /// `setup` wants the listed argument positions as constants and caches
    /// derived state from them. Non-constant calls still work, only slower.
    ConstantArgs(&'static [usize]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FunctionDescriptor {
    /// Invocation names; the first one is canonical.
    pub names: &'static [&'static str],
    pub signature: Signature,
    pub null_handling: NullHandling,
    /// Non-deterministic across invocations; never constant-fold or cache per row.
    pub is_random: bool,
    pub setup: SetupKind,
}

impl FunctionDescriptor {
    pub fn primary_name(&self) -> &'static str {
        self.names.first().copied().unwrap_or("<anonymous>")
    }

    pub fn arity(&self) -> usize {
        self.signature.arity()
    }

    pub fn requires_setup(&self) -> bool {
        !matches!(self.setup, SetupKind::Stateless)
    }

    /// True when the host should skip the call and emit null for `args`.
    pub fn short_circuits(&self, args: &[Scalar]) -> bool {
        self.null_handling == NullHandling::NullIfNull && args.iter().any(Scalar::is_null)
    }

    /// Validate arity and argument types against the signature.
    pub fn check_args(&self, args: &[Scalar]) -> Result<(), FnError> {
        if args.len() != self.arity() {
            return Err(FnError::Signature {
                function: self.primary_name(),
                message: format!("expected {} argument(s), got {}", self.arity(), args.len()),
            });
        }
        for (idx, (arg, expected)) in args.iter().zip(self.signature.inputs).enumerate() {
            if arg.data_type() != Some(*expected) {
                return Err(FnError::Signature {
                    function: self.primary_name(),
                    message: format!(
                        "argument {} must be {}, got {}",
                        idx,
                        expected,
                        arg.type_name()
                    ),
                });
            }
        }
        Ok(())
    }
}

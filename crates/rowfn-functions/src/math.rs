//! Arithmetic, constant, and rounding functions.
//!
//! None of these has an error path for data: out-of-range inputs follow
//! IEEE-754 propagation (NaN/Inf) and are returned as-is.

use rowfn_core::prelude::{DataType, Scalar};

use crate::descriptor::{FunctionDescriptor, NullHandling, SetupKind, Signature};
use crate::traits::{FnError, ScalarFunction};

/// `-x`. `i64::MIN` has no positive counterpart and wraps to itself
/// (two's-complement negation), the same result JVM- and C-style engines give.
pub fn negate(x: i64) -> i64 {
    x.wrapping_neg()
}

/// `a^b` with IEEE-754 `pow` semantics: `power(0, 0) == 1`, a negative base
/// with a fractional exponent is NaN.
pub fn power(a: f64, b: f64) -> f64 {
    a.powf(b)
}

pub fn pi() -> f64 {
    std::f64::consts::PI
}

pub fn ceiling(x: f64) -> f64 {
    x.ceil()
}

pub fn floor(x: f64) -> f64 {
    x.floor()
}

pub static NEGATE: FunctionDescriptor = FunctionDescriptor {
    names: &["negative", "u-", "-"],
    signature: Signature::new(&[DataType::Int64], DataType::Int64),
    null_handling: NullHandling::NullIfNull,
    is_random: false,
    setup: SetupKind::Stateless,
};

pub static POWER: FunctionDescriptor = FunctionDescriptor {
    names: &["power"],
    signature: Signature::new(&[DataType::Float64, DataType::Float64], DataType::Float64),
    null_handling: NullHandling::NullIfNull,
    is_random: false,
    setup: SetupKind::Stateless,
};

pub static PI: FunctionDescriptor = FunctionDescriptor {
    names: &["pi"],
    signature: Signature::new(&[], DataType::Float64),
    null_handling: NullHandling::NullIfNull,
    is_random: false,
    setup: SetupKind::Stateless,
};

pub static CEILING: FunctionDescriptor = FunctionDescriptor {
    names: &["ceil", "ceiling", "democeil"],
    signature: Signature::new(&[DataType::Float64], DataType::Float64),
    null_handling: NullHandling::NullIfNull,
    is_random: false,
    setup: SetupKind::Stateless,
};

pub static FLOOR: FunctionDescriptor = FunctionDescriptor {
    names: &["floor", "demofloor"],
    signature: Signature::new(&[DataType::Float64], DataType::Float64),
    null_handling: NullHandling::NullIfNull,
    is_random: false,
    setup: SetupKind::Stateless,
};

#[derive(Debug, Default, Clone, Copy)]
pub struct Negate;

impl ScalarFunction for Negate {
    fn descriptor(&self) -> &'static FunctionDescriptor {
        &NEGATE
    }

    fn eval(&mut self, args: &[Scalar]) -> Result<Scalar, FnError> {
        NEGATE.check_args(args)?;
        Ok(Scalar::I64(negate(args[0].as_i64()?)))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Power;

impl ScalarFunction for Power {
    fn descriptor(&self) -> &'static FunctionDescriptor {
        &POWER
    }

    fn eval(&mut self, args: &[Scalar]) -> Result<Scalar, FnError> {
        POWER.check_args(args)?;
        Ok(Scalar::F64(power(args[0].as_f64()?, args[1].as_f64()?)))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Pi;

impl ScalarFunction for Pi {
    fn descriptor(&self) -> &'static FunctionDescriptor {
        &PI
    }

    fn eval(&mut self, args: &[Scalar]) -> Result<Scalar, FnError> {
        PI.check_args(args)?;
        Ok(Scalar::F64(pi()))
    }
}

macro_rules! unary_float_fn {
    ($name:ident, $desc:ident, $f:path) => {
        #[derive(Debug, Default, Clone, Copy)]
        pub struct $name;

        impl ScalarFunction for $name {
            fn descriptor(&self) -> &'static FunctionDescriptor {
                &$desc
            }

            fn eval(&mut self, args: &[Scalar]) -> Result<Scalar, FnError> {
                $desc.check_args(args)?;
                Ok(Scalar::F64($f(args[0].as_f64()?)))
            }
        }
    };
}

unary_float_fn!(Ceiling, CEILING, ceiling);
unary_float_fn!(Floor, FLOOR, floor);

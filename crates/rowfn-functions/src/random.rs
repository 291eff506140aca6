//! Uniform random doubles in `[0, 1)`.
//!
//! The descriptor marks the function as random; enforcing "no constant
//! folding, no per-row caching" is the host's job.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rowfn_core::prelude::{DataType, FunctionConfig, Scalar};

use crate::descriptor::{FunctionDescriptor, NullHandling, SetupKind, Signature};
use crate::traits::{FnError, ScalarFunction};

pub static RANDOM: FunctionDescriptor = FunctionDescriptor {
    names: &["random", "rand"],
    signature: Signature::new(&[], DataType::Float64),
    null_handling: NullHandling::NullIfNull,
    is_random: true,
    setup: SetupKind::PerInstance,
};

/// Owns its generator; never share one instance across threads.
#[derive(Debug, Clone)]
pub struct Random {
    rng: StdRng,
}

impl Random {
    /// Seeded from `config.seed` when present, otherwise from OS entropy.
    pub fn new(config: &FunctionConfig) -> Self {
        match config.seed {
            Some(seed) => Self::with_seed(seed),
            None => Self {
                rng: StdRng::from_entropy(),
            },
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn next_random(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

impl ScalarFunction for Random {
    fn descriptor(&self) -> &'static FunctionDescriptor {
        &RANDOM
    }

    fn eval(&mut self, args: &[Scalar]) -> Result<Scalar, FnError> {
        RANDOM.check_args(args)?;
        Ok(Scalar::F64(self.next_random()))
    }
}

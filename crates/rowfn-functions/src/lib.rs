#![forbid(unsafe_code)]
//! rowfn-functions: scalar numeric functions invoked once per row by a host evaluator.
//!
//! Design intent:
//! - Every function is synchronous and CPU-bound; nothing here blocks or spawns.
//! - Each function exposes a static `FunctionDescriptor` (aliases, signature,
//!   null handling, randomness, setup needs) so the host can plan around it.
//! - Instances are exclusively owned by one evaluation context (`&mut self`);
//!   the host makes one instance per thread/partition instead of sharing.

pub mod descriptor;
pub mod math;
pub mod random;
pub mod registry;
pub mod to_number;
pub mod traits;

pub use descriptor::{FunctionDescriptor, NullHandling, SetupKind, Signature};
pub use math::{ceiling, floor, negate, pi, power, Ceiling, Floor, Negate, Pi, Power};
pub use random::Random;
pub use registry::{Factory, Registry};
pub use to_number::{
    round_half_up, FormatPatternError, NumberParseError, ParsePlan, PlanState, ToNumber,
};
pub use traits::{eval_with_nulls, FnError, ScalarFunction};

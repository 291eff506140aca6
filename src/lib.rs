#![forbid(unsafe_code)]
//! rowfn: scalar numeric functions for row-at-a-time query evaluation.
//!
//! Re-exports `rowfn-core` (values, config, errors) and `rowfn-functions`
//! (the functions, their descriptors, and the registry).

pub use rowfn_core::prelude::*;
pub use rowfn_functions::*;

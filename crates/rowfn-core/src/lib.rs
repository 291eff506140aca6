#![forbid(unsafe_code)]
//! rowfn-core: value types, errors, and configuration shared by the function crates.
//!
//! Nothing in here evaluates anything. The function crate consumes these types
//! and the host evaluator converts its own column representation to/from
//! `Scalar` at the call boundary.

pub mod config;
pub mod error;
pub mod prelude;
pub mod schema;
pub mod types;

pub use config::FunctionConfig;
pub use error::{Error, Result};
pub use schema::DataType;
pub use types::Scalar;

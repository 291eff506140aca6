//! Convenient re-exports for downstream crates.

pub use crate::config::FunctionConfig;
pub use crate::error::{Error, Result};
pub use crate::schema::DataType;
pub use crate::types::Scalar;

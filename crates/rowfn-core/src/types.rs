//! Lightweight scalar values exchanged with the host evaluator.
//!
//! The host converts from its own column representation into `Scalar` per row
//! (or calls the typed entry points in `rowfn-functions` directly).

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::schema::DataType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Scalar {
    Null,
    Bool(bool),
    I64(i64),
    F64(f64),
    Str(String),
}

impl Scalar {
    /// Logical type of the value; `None` for `Null`, which is untyped.
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Scalar::Null => None,
            Scalar::Bool(_) => Some(DataType::Boolean),
            Scalar::I64(_) => Some(DataType::Int64),
            Scalar::F64(_) => Some(DataType::Float64),
            Scalar::Str(_) => Some(DataType::Utf8),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.data_type().map(DataType::name).unwrap_or("Null")
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    pub fn as_i64(&self) -> Result<i64> {
        match self {
            Scalar::I64(v) => Ok(*v),
            other => Err(mismatch(DataType::Int64, other)),
        }
    }

    pub fn as_f64(&self) -> Result<f64> {
        match self {
            Scalar::F64(v) => Ok(*v),
            other => Err(mismatch(DataType::Float64, other)),
        }
    }

    pub fn as_str(&self) -> Result<&str> {
        match self {
            Scalar::Str(s) => Ok(s.as_str()),
            other => Err(mismatch(DataType::Utf8, other)),
        }
    }
}

fn mismatch(expected: DataType, found: &Scalar) -> Error {
    Error::TypeMismatch {
        expected: expected.name(),
        found: found.type_name(),
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::I64(v)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::F64(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Str(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::Str(v)
    }
}

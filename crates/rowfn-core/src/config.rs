//! Function configuration that hosts can serialize/deserialize.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FunctionConfig {
    /// Optional seed for the random function. When set, every `random`
    /// instance created with this config yields the same sequence.
    pub seed: Option<u64>,

    /// Enforce the pattern's grouping size when `to_number` parses text.
    /// Off by default: separators are accepted anywhere between integer digits.
    pub strict_grouping: bool,
}

impl FunctionConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `ROWFN_SEED`: random seed (u64)
    /// - `ROWFN_STRICT_GROUPING`: `true`/`false`/`1`/`0`
    ///
    /// A variable that is set but malformed is an error rather than silently ignored.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`FunctionConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(s) = lookup("ROWFN_SEED") {
            let v = s
                .trim()
                .parse::<u64>()
                .map_err(|e| Error::Config(format!("ROWFN_SEED='{}': {}", s, e)))?;
            cfg.seed = Some(v);
        }

        if let Some(s) = lookup("ROWFN_STRICT_GROUPING") {
            cfg.strict_grouping = parse_flag(&s).ok_or_else(|| {
                Error::Config(format!("ROWFN_STRICT_GROUPING='{}': expected a boolean", s))
            })?;
        }

        Ok(cfg)
    }

    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

//! Engine configuration.
//!
//! The only tunables are the structural limits that protect the traversal
//! from pathological input. They are read from TOML:
//!
//! ```toml
//! [limits]
//! max_depth = 32
//! max_array_len = 256
//! ```

use serde::Deserialize;

use crate::error::EngineError;

/// Default maximum nesting depth of objects below the request root.
pub const DEFAULT_MAX_DEPTH: usize = 32;
/// Default maximum number of elements in any array.
pub const DEFAULT_MAX_ARRAY_LEN: usize = 256;

/// Bounds on the shape of a request tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Limits {
    pub max_depth: usize,
    pub max_array_len: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_array_len: DEFAULT_MAX_ARRAY_LEN,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub limits: Limits,
}

impl EngineConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, EngineError> {
        let cfg: EngineConfig = toml::from_str(s)?;
        cfg.check()?;
        Ok(cfg)
    }

    fn check(&self) -> Result<(), EngineError> {
        if self.limits.max_depth == 0 {
            return Err(EngineError::Config(
                "limits.max_depth must be at least 1".to_string(),
            ));
        }
        if self.limits.max_array_len == 0 {
            return Err(EngineError::Config(
                "limits.max_array_len must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

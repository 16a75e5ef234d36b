//! Configuration for the challenge gate.

use serde::{Deserialize, Serialize};

use crate::types::{GateError, Result, Symbol};

/// Configuration for the access engine and its session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    /// Symbol alphabet the required symbol rotates through. Must hold at
    /// least two distinct symbols.
    pub alphabet: Vec<Symbol>,
    /// How many activity records are retained, newest first.
    pub history_cap: usize,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            alphabet: ["⭐", "🎯", "✅", "🔑"].iter().map(|s| Symbol::from(*s)).collect(),
            history_cap: 5,
        }
    }
}

impl GateConfig {
    /// Load config from YAML, rejecting an unusable alphabet.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| GateError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| GateError::Config(e.to_string()))
    }

    fn validate(&self) -> Result<()> {
        if self.alphabet.len() < 2 {
            return Err(GateError::Config(
                "alphabet needs at least two symbols".to_string(),
            ));
        }
        if self.history_cap == 0 {
            return Err(GateError::Config("history_cap must be positive".to_string()));
        }
        Ok(())
    }
}

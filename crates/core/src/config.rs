// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Gate configuration
//!
//! Loaded from TOML. Every key is optional:
//!
//! ```toml
//! name = "accounts"
//! settle_yields = 10
//! pending_warn_threshold = 1000
//! stall_threshold = "30s"
//! ```

use crate::gate::DEFAULT_SETTLE_YIELDS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors from loading or validating a [`GateConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config syntax: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to render config: {0}")]
    Render(#[from] toml::ser::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Configuration for one gate instance
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GateConfig {
    /// Name attached to every log event of the gate
    pub name: String,
    /// Scheduler yields in one settlement window
    pub settle_yields: usize,
    /// Warn when a deferral queue grows past this length. Queues are never capped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_warn_threshold: Option<usize>,
    /// How long blocking work may stay outstanding before it is reported as stalled
    #[serde(with = "humantime_serde")]
    pub stall_threshold: Duration,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            name: "gate".to_string(),
            settle_yields: DEFAULT_SETTLE_YIELDS,
            pending_warn_threshold: None,
            stall_threshold: Duration::from_secs(30),
        }
    }
}

impl GateConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_settle_yields(mut self, yields: usize) -> Self {
        self.settle_yields = yields;
        self
    }

    pub fn with_pending_warn_threshold(mut self, threshold: usize) -> Self {
        self.pending_warn_threshold = Some(threshold);
        self
    }

    pub fn with_stall_threshold(mut self, threshold: Duration) -> Self {
        self.stall_threshold = threshold;
        self
    }

    /// Parse and validate a TOML document
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: GateConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Invalid("name must not be empty".to_string()));
        }
        if self.settle_yields == 0 {
            return Err(ConfigError::Invalid(
                "settle_yields must be at least 1".to_string(),
            ));
        }
        if self.pending_warn_threshold == Some(0) {
            return Err(ConfigError::Invalid(
                "pending_warn_threshold must be at least 1".to_string(),
            ));
        }
        if self.stall_threshold.is_zero() {
            return Err(ConfigError::Invalid(
                "stall_threshold must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

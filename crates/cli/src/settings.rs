// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Locating and loading the gate configuration

use ag_core::GateConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Default location: `<config dir>/ag/gate.toml`
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ag").join("gate.toml"))
}

/// Resolve the effective configuration
///
/// An explicit path must exist. The default path is only read when present,
/// falling back to built-in defaults otherwise.
pub fn resolve(explicit: Option<&Path>) -> Result<GateConfig> {
    if let Some(path) = explicit {
        return GateConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()));
    }

    match default_path() {
        Some(path) if path.is_file() => {
            tracing::debug!(path = %path.display(), "loading default config");
            GateConfig::load(&path)
                .with_context(|| format!("failed to load config from {}", path.display()))
        }
        _ => Ok(GateConfig::default()),
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ag config` - Print the effective gate configuration

use ag_core::GateConfig;
use anyhow::Result;

pub fn config(config: &GateConfig) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}

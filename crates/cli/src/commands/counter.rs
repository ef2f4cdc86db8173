// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ag counter` - Concurrent increments against a gated counter

use crate::counter::Counter;
use ag_adapters::MemoryStorage;
use ag_core::{Gate, GateConfig, StallMonitor, SystemClock};
use anyhow::{Context, Result};
use clap::Args;
use std::time::Duration;

#[derive(Args)]
pub struct CounterArgs {
    /// Number of concurrent increments
    #[arg(long, default_value = "5", value_parser = clap::value_parser!(u32).range(1..))]
    pub calls: u32,

    /// Simulated storage latency in milliseconds
    #[arg(long = "latency-ms", default_value = "1")]
    pub latency_ms: u64,
}

pub async fn counter(args: CounterArgs, config: GateConfig) -> Result<()> {
    let gate = Gate::try_with_config(config)?;
    let mut storage = MemoryStorage::new();
    if args.latency_ms > 0 {
        storage = storage.with_latency(Duration::from_millis(args.latency_ms));
    }
    let counter = Counter::new(storage, gate.clone());

    let handles: Vec<_> = (0..args.calls)
        .map(|_| {
            let counter = counter.clone();
            tokio::spawn(async move { counter.increment().await })
        })
        .collect();

    let monitor = StallMonitor::for_gate(&gate, SystemClock);
    for (i, handle) in handles.into_iter().enumerate() {
        let value = handle
            .await
            .context("increment task failed")?
            .with_context(|| format!("call {} failed", i + 1))?;
        println!("call {}: {}", i + 1, value);
        monitor.check(&gate);
    }

    println!("final: {}", counter.value().await?);
    tracing::debug!(snapshot = ?gate.snapshot(), "counter finished");
    Ok(())
}

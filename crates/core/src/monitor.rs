// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stall detection for blocking work
//!
//! A blocking operation that never settles starves every deferred call on its
//! gate. The gate does not cancel anything; the monitor only reports.

use crate::clock::Clock;
use crate::gate::{Gate, HandleId};
use std::time::Duration;
use tracing::warn;

/// Blocking work outstanding longer than the stall threshold
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StalledOp {
    pub gate: String,
    pub handle: HandleId,
    pub label: Option<&'static str>,
    pub elapsed: Duration,
}

/// Periodic inspector of a gate's outstanding blocking work
pub struct StallMonitor<C: Clock> {
    threshold: Duration,
    clock: C,
}

impl<C: Clock> StallMonitor<C> {
    pub fn new(threshold: Duration, clock: C) -> Self {
        Self { threshold, clock }
    }

    /// Use the gate's configured stall threshold
    pub fn for_gate(gate: &Gate, clock: C) -> Self {
        Self::new(gate.config().stall_threshold, clock)
    }

    pub fn threshold(&self) -> Duration {
        self.threshold
    }

    /// Report every stalled handle on `gate`, oldest first
    pub fn check(&self, gate: &Gate) -> Vec<StalledOp> {
        let stalled: Vec<StalledOp> = gate
            .outstanding()
            .into_iter()
            .filter_map(|op| {
                let elapsed = self.clock.elapsed_since(op.started);
                (elapsed > self.threshold).then(|| StalledOp {
                    gate: gate.name().to_string(),
                    handle: op.handle,
                    label: op.label,
                    elapsed,
                })
            })
            .collect();

        for op in &stalled {
            warn!(
                gate = %op.gate,
                gate_id = %gate.id(),
                handle = %op.handle,
                label = op.label,
                elapsed_ms = elapsed_ms(op.elapsed),
                "blocking work stalled; deferred calls cannot proceed"
            );
        }

        stalled
    }
}

/// Whole milliseconds, saturating at `u64::MAX`
fn elapsed_ms(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
#[path = "monitor_tests.rs"]
mod tests;

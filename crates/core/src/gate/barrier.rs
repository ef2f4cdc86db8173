// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Settlement barrier
//!
//! Yields to the scheduler a fixed number of times so that continuations
//! chained off a just-finished blocking operation can register new blocking
//! work before the drain engine trusts that the gate is quiescent.
//!
//! This is a heuristic. It covers continuation chains shorter than the
//! yield count, not arbitrarily deep ones.

/// Default number of yields in one settlement window
pub const DEFAULT_SETTLE_YIELDS: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettlementBarrier {
    yields: usize,
}

impl SettlementBarrier {
    /// A window of `yields` yields, never fewer than one
    pub fn new(yields: usize) -> Self {
        Self {
            yields: yields.max(1),
        }
    }

    pub fn yields(&self) -> usize {
        self.yields
    }

    /// Give pending continuations one settlement window to run
    pub async fn settle(&self) {
        for _ in 0..self.yields {
            tokio::task::yield_now().await;
        }
    }
}

impl Default for SettlementBarrier {
    fn default() -> Self {
        Self::new(DEFAULT_SETTLE_YIELDS)
    }
}

#[cfg(test)]
#[path = "barrier_tests.rs"]
mod tests;

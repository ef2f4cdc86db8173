// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A counter actor whose state lives behind gated storage

use ag_adapters::{GatedStorage, StorageAdapter, StorageError};
use ag_core::Gate;
use serde_json::json;

const KEY: &str = "count";

/// Counter persisted under a single storage key
///
/// `increment` reads then writes with no lock. Concurrent calls still observe
/// distinct values because the read and write are blocking work and the
/// method itself is blockable.
#[derive(Clone)]
pub struct Counter<S> {
    storage: GatedStorage<S>,
}

impl<S: StorageAdapter> Counter<S> {
    pub fn new(storage: S, gate: Gate) -> Self {
        Self {
            storage: GatedStorage::new(storage, gate),
        }
    }

    pub fn gate(&self) -> &Gate {
        self.storage.gate()
    }

    /// Add one and return the new value
    pub async fn increment(&self) -> Result<u64, StorageError> {
        let storage = self.storage.clone();
        self.gate()
            .blockable(move || async move {
                let next = storage.get_u64(KEY).await?.unwrap_or(0) + 1;
                storage.put(KEY, json!(next)).await?;
                Ok::<_, StorageError>(next)
            })
            .await
    }

    /// Current value, zero when never incremented
    pub async fn value(&self) -> Result<u64, StorageError> {
        Ok(self.storage.get_u64(KEY).await?.unwrap_or(0))
    }
}

#[cfg(test)]
#[path = "counter_tests.rs"]
mod tests;

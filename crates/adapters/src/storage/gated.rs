// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Storage whose every call is blocking work on a gate

use super::{StorageAdapter, StorageError};
use ag_core::Gate;
use async_trait::async_trait;
use serde_json::Value;

/// Wraps a storage adapter so reads and writes close the gate while pending
///
/// Blockable handlers on the same gate cannot start between one handler's
/// read and its following write, which makes read-modify-write sequences
/// appear atomic to callers.
#[derive(Clone)]
pub struct GatedStorage<S> {
    inner: S,
    gate: Gate,
}

impl<S: StorageAdapter> GatedStorage<S> {
    pub fn new(inner: S, gate: Gate) -> Self {
        Self { inner, gate }
    }

    pub fn gate(&self) -> &Gate {
        &self.gate
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Read a value as an unsigned integer, `None` when absent
    pub async fn get_u64(&self, key: &str) -> Result<Option<u64>, StorageError> {
        match self.get(key).await? {
            None => Ok(None),
            Some(value) => value
                .as_u64()
                .map(Some)
                .ok_or_else(|| StorageError::TypeMismatch {
                    key: key.to_string(),
                    expected: "an unsigned integer",
                }),
        }
    }
}

#[async_trait]
impl<S: StorageAdapter> StorageAdapter for GatedStorage<S> {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        self.gate
            .blocking_labelled("storage.get", self.inner.get(key))
            .await
    }

    async fn put(&self, key: &str, value: Value) -> Result<(), StorageError> {
        self.gate
            .blocking_labelled("storage.put", self.inner.put(key, value))
            .await
    }

    async fn delete(&self, key: &str) -> Result<bool, StorageError> {
        self.gate
            .blocking_labelled("storage.delete", self.inner.delete(key))
            .await
    }
}

#[cfg(test)]
#[path = "gated_tests.rs"]
mod tests;

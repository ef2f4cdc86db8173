// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake storage adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{StorageAdapter, StorageError};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Recorded storage call
#[derive(Debug, Clone, PartialEq)]
pub enum StorageCall {
    Get { key: String },
    Put { key: String, value: Value },
    Delete { key: String },
}

#[derive(Default)]
struct FakeStorageState {
    values: HashMap<String, Value>,
    calls: Vec<StorageCall>,
    fail_next: Option<StorageError>,
}

/// Fake storage adapter that records calls and can inject failures
#[derive(Clone, Default)]
pub struct FakeStorageAdapter {
    inner: Arc<Mutex<FakeStorageState>>,
}

impl FakeStorageAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<StorageCall> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .clone()
    }

    /// Make the next call fail with `error`
    pub fn fail_next(&self, error: StorageError) {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .fail_next = Some(error);
    }

    /// Seed a value without recording a call
    pub fn set(&self, key: &str, value: Value) {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .values
            .insert(key.to_string(), value);
    }

    /// Peek at a value without recording a call
    pub fn value(&self, key: &str) -> Option<Value> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .values
            .get(key)
            .cloned()
    }

    fn record(&self, call: StorageCall) -> Result<(), StorageError> {
        let mut state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        state.calls.push(call);
        match state.fail_next.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl StorageAdapter for FakeStorageAdapter {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        self.record(StorageCall::Get {
            key: key.to_string(),
        })?;
        tokio::task::yield_now().await;
        Ok(self.value(key))
    }

    async fn put(&self, key: &str, value: Value) -> Result<(), StorageError> {
        self.record(StorageCall::Put {
            key: key.to_string(),
            value: value.clone(),
        })?;
        tokio::task::yield_now().await;
        self.set(key, value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, StorageError> {
        self.record(StorageCall::Delete {
            key: key.to_string(),
        })?;
        tokio::task::yield_now().await;
        let mut state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        Ok(state.values.remove(key).is_some())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;

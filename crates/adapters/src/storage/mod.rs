// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Key-value storage adapters

mod gated;
mod memory;

pub use gated::GatedStorage;
pub use memory::MemoryStorage;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeStorageAdapter, StorageCall};

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors from storage operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage backend failed: {0}")]
    Backend(String),
    #[error("value for {key} is not {expected}")]
    TypeMismatch { key: String, expected: &'static str },
}

/// Adapter for an actor's durable key-value state
#[async_trait]
pub trait StorageAdapter: Clone + Send + Sync + 'static {
    /// Read a value
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;

    /// Write a value, replacing any previous one
    async fn put(&self, key: &str, value: Value) -> Result<(), StorageError>;

    /// Delete a value, returning whether it existed
    async fn delete(&self, key: &str) -> Result<bool, StorageError>;
}

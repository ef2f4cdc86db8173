// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::fetch::{FetchAdapter, FetchError, FetchRequest, FetchResponse};
use crate::storage::{StorageAdapter, StorageError};
use async_trait::async_trait;
use serde_json::Value;
use tracing::Instrument;

/// Wrapper that adds tracing to any StorageAdapter
#[derive(Clone)]
pub struct TracedStorageAdapter<S> {
    inner: S,
}

impl<S> TracedStorageAdapter<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S: StorageAdapter> StorageAdapter for TracedStorageAdapter<S> {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let span = tracing::debug_span!("storage.get", key);
        async {
            let start = std::time::Instant::now();
            let result = self.inner.get(key).await;
            let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

            match &result {
                Ok(value) => tracing::debug!(found = value.is_some(), elapsed_ms, "read"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "read failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn put(&self, key: &str, value: Value) -> Result<(), StorageError> {
        let span = tracing::debug_span!("storage.put", key);
        async {
            let start = std::time::Instant::now();
            let result = self.inner.put(key, value).await;
            let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

            match &result {
                Ok(()) => tracing::debug!(elapsed_ms, "written"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "write failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn delete(&self, key: &str) -> Result<bool, StorageError> {
        let span = tracing::debug_span!("storage.delete", key);
        async {
            let result = self.inner.delete(key).await;
            match &result {
                Ok(existed) => tracing::debug!(existed, "deleted"),
                Err(e) => tracing::warn!(error = %e, "delete failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

/// Wrapper that adds tracing to any FetchAdapter
#[derive(Clone)]
pub struct TracedFetchAdapter<F> {
    inner: F,
}

impl<F> TracedFetchAdapter<F> {
    pub fn new(inner: F) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<F: FetchAdapter> FetchAdapter for TracedFetchAdapter<F> {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, FetchError> {
        let span = tracing::info_span!("fetch", method = %request.method, url = %request.url);
        async {
            tracing::info!(has_body = request.body.is_some(), "sending");

            let start = std::time::Instant::now();
            let result = self.inner.fetch(request).await;
            let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

            match &result {
                Ok(response) => tracing::info!(
                    status = response.status,
                    body_len = response.body.len(),
                    elapsed_ms,
                    "response received"
                ),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "fetch failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;

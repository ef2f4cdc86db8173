// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake fetch adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{FetchAdapter, FetchError, FetchRequest, FetchResponse};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Recorded fetch call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchCall {
    pub method: String,
    pub url: String,
}

#[derive(Default)]
struct FakeFetchState {
    routes: HashMap<String, Result<FetchResponse, FetchError>>,
    calls: Vec<FetchCall>,
}

/// Fake fetch adapter with canned responses per URL
#[derive(Clone, Default)]
pub struct FakeFetchAdapter {
    inner: Arc<Mutex<FakeFetchState>>,
}

impl FakeFetchAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer requests for `url` with `response`
    pub fn route(&self, url: &str, response: Result<FetchResponse, FetchError>) {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .routes
            .insert(url.to_string(), response);
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<FetchCall> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .clone()
    }
}

#[async_trait]
impl FetchAdapter for FakeFetchAdapter {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, FetchError> {
        let response = {
            let mut state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
            state.calls.push(FetchCall {
                method: request.method.clone(),
                url: request.url.clone(),
            });
            state.routes.get(&request.url).cloned()
        };
        tokio::task::yield_now().await;
        response.unwrap_or(Err(FetchError::NoRoute(request.url)))
    }
}

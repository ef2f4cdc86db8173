// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fetches whose responses are held back while the gate is blocked

use super::{FetchAdapter, FetchError, FetchRequest, FetchResponse};
use ag_core::Gate;
use async_trait::async_trait;

/// Wraps a fetch adapter as blockable-response work
///
/// Requests go out immediately; a response (or failure) reaches the caller
/// only once no blocking work is outstanding on the gate.
#[derive(Clone)]
pub struct GatedFetch<F> {
    inner: F,
    gate: Gate,
}

impl<F: FetchAdapter> GatedFetch<F> {
    pub fn new(inner: F, gate: Gate) -> Self {
        Self { inner, gate }
    }

    pub fn gate(&self) -> &Gate {
        &self.gate
    }
}

#[async_trait]
impl<F: FetchAdapter> FetchAdapter for GatedFetch<F> {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, FetchError> {
        self.gate
            .blockable_response(self.inner.fetch(request))
            .await
    }
}

#[cfg(test)]
#[path = "gated_tests.rs"]
mod tests;

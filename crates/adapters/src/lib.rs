// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Storage and network adapters that run behind a gate
//!
//! Storage calls are blocking work; fetches are blockable-response work.

pub mod fetch;
pub mod storage;
pub mod traced;

pub use fetch::{FetchAdapter, FetchError, FetchRequest, FetchResponse, GatedFetch};
pub use storage::{GatedStorage, MemoryStorage, StorageAdapter, StorageError};
pub use traced::{TracedFetchAdapter, TracedStorageAdapter};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use fetch::{FakeFetchAdapter, FetchCall};
#[cfg(any(test, feature = "test-support"))]
pub use storage::{FakeStorageAdapter, StorageCall};

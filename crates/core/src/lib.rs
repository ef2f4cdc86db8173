// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ag-core: input/output gates for actor-style shared state
//!
//! This crate provides:
//! - [`Gate`], a per-actor coordinator that serializes async access to
//!   shared state without locks
//! - Three gate kinds: blocking (storage I/O), blockable (request handlers)
//!   and blockable-response (outbound calls whose results are withheld)
//! - Stall monitoring for blocking work that never settles
//! - TOML-backed gate configuration

pub mod clock;
pub mod config;
pub mod gate;
pub mod id;
pub mod monitor;

pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{ConfigError, GateConfig};
pub use gate::{
    Gate, GateKind, GateSnapshot, Gated, HandleId, OutstandingOp, SettlementBarrier,
    DEFAULT_SETTLE_YIELDS,
};
pub use id::GateId;
pub use monitor::{StallMonitor, StalledOp};

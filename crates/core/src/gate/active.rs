// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Active-operations set
//!
//! Tracks every blocking operation currently outstanding on one gate.
//! Membership is the only signal used to decide whether deferred work may run.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Instant;

/// Token for one in-flight blocking operation
///
/// Ids come from a per-gate counter that is never reset, so a handle issued
/// before [`Gate::reset`](super::Gate::reset) can never alias a later one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandleId(pub u64);

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "h-{}", self.0)
    }
}

/// A blocking operation that has begun but not yet settled
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutstandingOp {
    pub handle: HandleId,
    pub label: Option<&'static str>,
    pub started: Instant,
}

#[derive(Debug, Default)]
pub(crate) struct ActiveSet {
    ops: BTreeMap<HandleId, OutstandingOp>,
    next_id: u64,
}

impl ActiveSet {
    /// Register a new handle
    pub(crate) fn begin(&mut self, label: Option<&'static str>, started: Instant) -> HandleId {
        self.next_id += 1;
        let handle = HandleId(self.next_id);
        self.ops.insert(
            handle,
            OutstandingOp {
                handle,
                label,
                started,
            },
        );
        handle
    }

    /// Remove a handle. Returns true only when this removal emptied the set.
    ///
    /// Unknown handles are ignored.
    pub(crate) fn end(&mut self, handle: HandleId) -> bool {
        self.ops.remove(&handle).is_some() && self.ops.is_empty()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.ops.len()
    }

    /// Outstanding operations, oldest first
    pub(crate) fn outstanding(&self) -> Vec<OutstandingOp> {
        self.ops.values().cloned().collect()
    }

    /// Drop all members. The id counter keeps counting.
    pub(crate) fn clear(&mut self) {
        self.ops.clear();
    }
}

#[cfg(test)]
#[path = "active_tests.rs"]
mod tests;

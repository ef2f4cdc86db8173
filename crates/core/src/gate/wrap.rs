// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Function-level gate wrappers
//!
//! `gate.wrap_blockable(op)` turns an async function into one with the same
//! arguments and output whose timing follows the gate. Functions taking
//! several arguments take them as a tuple.

use super::Gate;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// The three gate disciplines
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GateKind {
    Blocking,
    Blockable,
    BlockableResponse,
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateKind::Blocking => f.write_str("blocking"),
            GateKind::Blockable => f.write_str("blockable"),
            GateKind::BlockableResponse => f.write_str("blockable-response"),
        }
    }
}

/// An async function bound to a gate
pub struct Gated<F> {
    gate: Gate,
    kind: GateKind,
    op: Arc<F>,
}

impl<F> Gated<F> {
    fn new(gate: Gate, kind: GateKind, op: F) -> Self {
        Self {
            gate,
            kind,
            op: Arc::new(op),
        }
    }

    pub fn kind(&self) -> GateKind {
        self.kind
    }

    pub fn gate(&self) -> &Gate {
        &self.gate
    }

    /// Call the wrapped function
    ///
    /// A blocking call closes the gate as soon as it is made. The other kinds
    /// take effect when the returned future is first polled.
    pub fn call<A, Fut>(&self, args: A) -> impl Future<Output = Fut::Output>
    where
        F: Fn(A) -> Fut,
        Fut: Future,
    {
        let gate = self.gate.clone();
        let op = Arc::clone(&self.op);
        let kind = self.kind;
        let guard = (kind == GateKind::Blocking).then(|| gate.begin(None));
        async move {
            match kind {
                GateKind::Blocking => {
                    let _guard = guard;
                    (*op)(args).await
                }
                GateKind::Blockable => gate.blockable(move || (*op)(args)).await,
                GateKind::BlockableResponse => gate.blockable_response((*op)(args)).await,
            }
        }
    }
}

impl<F> Clone for Gated<F> {
    fn clone(&self) -> Self {
        Self {
            gate: self.gate.clone(),
            kind: self.kind,
            op: Arc::clone(&self.op),
        }
    }
}

impl<F> fmt::Debug for Gated<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gated")
            .field("gate", &self.gate.name())
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl Gate {
    /// Wrap `op` so every call runs as blocking work
    pub fn wrap_blocking<F>(&self, op: F) -> Gated<F> {
        Gated::new(self.clone(), GateKind::Blocking, op)
    }

    /// Wrap `op` so calls are deferred while the gate is blocked
    pub fn wrap_blockable<F>(&self, op: F) -> Gated<F> {
        Gated::new(self.clone(), GateKind::Blockable, op)
    }

    /// Wrap `op` so calls start at once but deliver only when the gate is open
    pub fn wrap_blockable_response<F>(&self, op: F) -> Gated<F> {
        Gated::new(self.clone(), GateKind::BlockableResponse, op)
    }
}

#[cfg(test)]
#[path = "wrap_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Input/output gates for one actor's shared state
//!
//! A [`Gate`] coordinates three kinds of async work:
//! - **blocking** work (storage reads/writes) is tracked in the active set
//!   for as long as it is pending
//! - **blockable** work (request handlers) does not start while any blocking
//!   work is outstanding; it waits in the invocation queue
//! - **blockable-response** work (outbound calls) starts immediately, but its
//!   result is withheld in the response queue until blocking work settles
//!
//! Once the active set empties, a drain task waits one settlement window,
//! then releases queued responses before queued invocations, re-checking
//! quiescence after every release.
//!
//! Ordering is cooperative: the gate assumes one logical thread of control
//! (tokio's current-thread runtime or a `LocalSet`). Bookkeeping stays
//! consistent elsewhere, but the settlement window is only meaningful when
//! tasks interleave at await points.

mod active;
mod barrier;
mod drain;
mod queues;
mod wrap;

pub use active::{HandleId, OutstandingOp};
pub use barrier::{SettlementBarrier, DEFAULT_SETTLE_YIELDS};
pub use wrap::{GateKind, Gated};

use crate::config::{ConfigError, GateConfig};
use crate::id::GateId;
use active::ActiveSet;
use queues::{DeferralQueues, Lane};
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;
use tokio::sync::oneshot;
use tracing::{debug, trace, warn};

/// Signal that lets one deferred caller proceed
type Release = oneshot::Sender<()>;

#[derive(Debug, Default)]
struct GateState {
    active: ActiveSet,
    queues: DeferralQueues<Release>,
    /// A drain task owns the queues
    draining: bool,
    /// Bumped by reset so a drain task from before the reset stands down
    epoch: u64,
}

impl GateState {
    /// Claim the drain engine when deferred work exists and no drain is running
    fn claim_drain(&mut self) -> Option<u64> {
        if self.draining || self.queues.is_empty() {
            return None;
        }
        self.draining = true;
        Some(self.epoch)
    }
}

struct GateInner {
    id: GateId,
    config: GateConfig,
    barrier: SettlementBarrier,
    state: Mutex<GateState>,
}

/// Point-in-time view of a gate's bookkeeping
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GateSnapshot {
    /// Outstanding blocking operations
    pub active: usize,
    /// Results waiting to be delivered
    pub pending_responses: usize,
    /// Calls waiting to start
    pub pending_invocations: usize,
    /// Whether a drain task is running
    pub draining: bool,
}

impl GateSnapshot {
    /// No blocking work, nothing queued, no drain in progress
    pub fn is_idle(&self) -> bool {
        self.active == 0
            && self.pending_responses == 0
            && self.pending_invocations == 0
            && !self.draining
    }
}

/// Coordinator for one actor's gated work
///
/// Cloning is cheap and yields another handle to the same gate. Gates built
/// separately share nothing.
#[derive(Clone)]
pub struct Gate {
    inner: Arc<GateInner>,
}

impl Gate {
    pub fn new() -> Self {
        Self::with_config(GateConfig::default())
    }

    /// Build a gate from `config` after validating it
    pub fn try_with_config(config: GateConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    /// Build a gate without validating `config`
    ///
    /// A `settle_yields` of zero is raised to one.
    pub fn with_config(config: GateConfig) -> Self {
        let barrier = SettlementBarrier::new(config.settle_yields);
        let gate = Self {
            inner: Arc::new(GateInner {
                id: GateId::new(),
                config,
                barrier,
                state: Mutex::new(GateState::default()),
            }),
        };
        debug!(
            gate = %gate.name(),
            gate_id = %gate.id(),
            settle_yields = barrier.yields(),
            "gate created"
        );
        gate
    }

    pub fn id(&self) -> &GateId {
        &self.inner.id
    }

    pub fn name(&self) -> &str {
        &self.inner.config.name
    }

    pub fn config(&self) -> &GateConfig {
        &self.inner.config
    }

    /// True when no blocking work is outstanding right now
    pub fn is_quiescent(&self) -> bool {
        self.lock().active.is_empty()
    }

    pub fn snapshot(&self) -> GateSnapshot {
        let state = self.lock();
        GateSnapshot {
            active: state.active.len(),
            pending_responses: state.queues.len(Lane::Response),
            pending_invocations: state.queues.len(Lane::Invocation),
            draining: state.draining,
        }
    }

    /// Outstanding blocking operations, oldest first
    pub fn outstanding(&self) -> Vec<OutstandingOp> {
        self.lock().active.outstanding()
    }

    /// Clear the active set and both queues
    ///
    /// Meant for isolating test scenarios. Callers still parked in a queue are
    /// abandoned: their futures never complete and should be dropped. Blocking
    /// work still running when the gate is reset no longer counts when it ends.
    pub fn reset(&self) {
        let (cleared, abandoned) = {
            let mut state = self.lock();
            let cleared = state.active.len();
            state.active.clear();
            let abandoned = state.queues.clear();
            state.draining = false;
            state.epoch += 1;
            (cleared, abandoned)
        };
        debug!(
            gate = %self.name(),
            gate_id = %self.id(),
            cleared,
            abandoned,
            "gate reset"
        );
    }

    /// Run `work` as blocking work
    ///
    /// The gate counts as blocked from this call until `work` settles or the
    /// returned future is dropped, polled or not. The output passes through
    /// unchanged.
    pub fn blocking<Fut>(&self, work: Fut) -> impl Future<Output = Fut::Output>
    where
        Fut: Future,
    {
        self.run_blocking(None, work)
    }

    /// Like [`Gate::blocking`], recording `label` for stall reports
    pub fn blocking_labelled<Fut>(
        &self,
        label: &'static str,
        work: Fut,
    ) -> impl Future<Output = Fut::Output>
    where
        Fut: Future,
    {
        self.run_blocking(Some(label), work)
    }

    /// Run the work produced by `op` as blockable work
    ///
    /// If the gate is blocked when first polled, `op` is not called until the
    /// drain engine admits it, in FIFO order with other deferred calls. Its
    /// output is then held back like a blockable response.
    pub fn blockable<F, Fut>(&self, op: F) -> impl Future<Output = Fut::Output>
    where
        F: FnOnce() -> Fut,
        Fut: Future,
    {
        let gate = self.clone();
        async move {
            gate.admit(Lane::Invocation).await;
            let output = op().await;
            gate.admit(Lane::Response).await;
            output
        }
    }

    /// Run `work` immediately, withholding its output while the gate is blocked
    pub fn blockable_response<Fut>(&self, work: Fut) -> impl Future<Output = Fut::Output>
    where
        Fut: Future,
    {
        let gate = self.clone();
        async move {
            let output = work.await;
            gate.admit(Lane::Response).await;
            output
        }
    }

    fn run_blocking<Fut>(
        &self,
        label: Option<&'static str>,
        work: Fut,
    ) -> impl Future<Output = Fut::Output>
    where
        Fut: Future,
    {
        let guard = self.begin(label);
        async move {
            let _guard = guard;
            work.await
        }
    }

    fn begin(&self, label: Option<&'static str>) -> BlockingGuard {
        let (handle, active) = {
            let mut state = self.lock();
            let handle = state.active.begin(label, Instant::now());
            (handle, state.active.len())
        };
        trace!(
            gate = %self.name(),
            gate_id = %self.id(),
            %handle,
            label,
            active,
            "blocking work started"
        );
        BlockingGuard {
            gate: self.clone(),
            handle,
        }
    }

    fn end(&self, handle: HandleId) {
        let drain_epoch = {
            let mut state = self.lock();
            if state.active.end(handle) {
                state.claim_drain()
            } else {
                None
            }
        };
        trace!(gate = %self.name(), gate_id = %self.id(), %handle, "blocking work settled");
        if let Some(epoch) = drain_epoch {
            self.spawn_drain(epoch);
        }
    }

    /// Wait until `lane` work may proceed
    ///
    /// Returns at once when the gate is not blocked. Otherwise parks in the
    /// lane's queue until released. A caller released while the gate has
    /// become blocked again goes back to the head of its queue.
    async fn admit(&self, lane: Lane) {
        let mut requeued = false;
        loop {
            let (released, pending) = {
                let mut state = self.lock();
                if state.active.is_empty() {
                    return;
                }
                let (tx, rx) = oneshot::channel();
                let pending = if requeued {
                    state.queues.requeue(lane, tx)
                } else {
                    state.queues.enqueue(lane, tx)
                };
                (rx, pending)
            };
            debug!(
                gate = %self.name(),
                gate_id = %self.id(),
                %lane,
                pending,
                requeued,
                "deferred"
            );
            self.warn_if_backlogged(lane, pending);

            if released.await.is_err() {
                debug!(gate = %self.name(), gate_id = %self.id(), %lane, "deferred work abandoned by reset");
                std::future::pending::<()>().await;
            }
            requeued = true;
        }
    }

    fn warn_if_backlogged(&self, lane: Lane, pending: usize) {
        if let Some(threshold) = self.inner.config.pending_warn_threshold {
            if pending == threshold.saturating_add(1) {
                warn!(
                    gate = %self.name(),
                    gate_id = %self.id(),
                    %lane,
                    pending,
                    threshold,
                    "deferral queue grew past warning threshold"
                );
            }
        }
    }

    fn spawn_drain(&self, epoch: u64) {
        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                runtime.spawn(self.clone().drain(epoch));
            }
            Err(_) => {
                self.lock().draining = false;
                warn!(
                    gate = %self.name(),
                    gate_id = %self.id(),
                    "no tokio runtime available; deferred work stays queued"
                );
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, GateState> {
        self.inner.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for Gate {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gate")
            .field("id", self.id())
            .field("name", &self.name())
            .field("snapshot", &self.snapshot())
            .finish()
    }
}

/// Keeps one handle in the active set; removes it exactly once on drop
struct BlockingGuard {
    gate: Gate,
    handle: HandleId,
}

impl Drop for BlockingGuard {
    fn drop(&mut self) {
        self.gate.end(self.handle);
    }
}

#[cfg(test)]
#[path = "gate_tests.rs"]
mod tests;

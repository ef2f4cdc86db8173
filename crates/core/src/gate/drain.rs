// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Drain engine
//!
//! Idle while blocking work is outstanding or nothing is queued. Otherwise,
//! after each settlement window: release the oldest queued response, or if
//! there is none the oldest queued invocation, then settle again. Stops as
//! soon as the active set is non-empty or both queues are exhausted.

use super::queues::Lane;
use super::{Gate, Release};
use tracing::{debug, trace};

enum Step {
    Release(Lane, Release),
    Blocked(usize),
    Drained,
    Superseded,
}

impl Gate {
    pub(super) async fn drain(self, epoch: u64) {
        debug!(gate = %self.name(), gate_id = %self.id(), "drain started");
        let mut released = 0usize;

        loop {
            self.inner.barrier.settle().await;

            let step = {
                let mut state = self.lock();
                if state.epoch != epoch {
                    Step::Superseded
                } else if !state.active.is_empty() {
                    state.draining = false;
                    Step::Blocked(state.active.len())
                } else if let Some((lane, release)) = state.queues.next() {
                    Step::Release(lane, release)
                } else {
                    state.draining = false;
                    Step::Drained
                }
            };

            match step {
                Step::Release(lane, release) => {
                    if release.send(()).is_ok() {
                        released += 1;
                        trace!(gate = %self.name(), gate_id = %self.id(), %lane, "released deferred work");
                    } else {
                        trace!(gate = %self.name(), gate_id = %self.id(), %lane, "deferred caller dropped; skipped");
                    }
                }
                Step::Blocked(active) => {
                    debug!(
                        gate = %self.name(),
                        gate_id = %self.id(),
                        released,
                        active,
                        "drain paused by blocking work"
                    );
                    return;
                }
                Step::Drained => {
                    debug!(gate = %self.name(), gate_id = %self.id(), released, "drain finished");
                    return;
                }
                Step::Superseded => {
                    debug!(gate = %self.name(), gate_id = %self.id(), released, "drain superseded by reset");
                    return;
                }
            }
        }
    }
}

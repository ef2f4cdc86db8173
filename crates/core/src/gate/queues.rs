// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deferral queues
//!
//! Two strict FIFO queues: suspended result deliveries (responses) and
//! suspended calls (invocations). Responses always drain first. Neither queue
//! is capped.

use std::collections::VecDeque;
use std::fmt;

/// Which deferral queue an entry belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Lane {
    Response,
    Invocation,
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lane::Response => f.write_str("response"),
            Lane::Invocation => f.write_str("invocation"),
        }
    }
}

#[derive(Debug)]
pub(crate) struct DeferralQueues<T> {
    responses: VecDeque<T>,
    invocations: VecDeque<T>,
}

impl<T> Default for DeferralQueues<T> {
    fn default() -> Self {
        Self {
            responses: VecDeque::new(),
            invocations: VecDeque::new(),
        }
    }
}

impl<T> DeferralQueues<T> {
    /// Append to the back of a lane, returning that lane's new length
    pub(crate) fn enqueue(&mut self, lane: Lane, entry: T) -> usize {
        let queue = self.lane_mut(lane);
        queue.push_back(entry);
        queue.len()
    }

    /// Put an entry back at the head of its lane
    ///
    /// Used when released work finds the gate blocked again before it could
    /// start; it keeps its place ahead of everything queued after it.
    pub(crate) fn requeue(&mut self, lane: Lane, entry: T) -> usize {
        let queue = self.lane_mut(lane);
        queue.push_front(entry);
        queue.len()
    }

    /// Pop the next entry, responses before invocations
    pub(crate) fn next(&mut self) -> Option<(Lane, T)> {
        if let Some(entry) = self.responses.pop_front() {
            return Some((Lane::Response, entry));
        }
        self.invocations
            .pop_front()
            .map(|entry| (Lane::Invocation, entry))
    }

    pub(crate) fn len(&self, lane: Lane) -> usize {
        match lane {
            Lane::Response => self.responses.len(),
            Lane::Invocation => self.invocations.len(),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.responses.is_empty() && self.invocations.is_empty()
    }

    /// Drop every entry, returning how many were discarded
    pub(crate) fn clear(&mut self) -> usize {
        let discarded = self.responses.len() + self.invocations.len();
        self.responses.clear();
        self.invocations.clear();
        discarded
    }

    fn lane_mut(&mut self, lane: Lane) -> &mut VecDeque<T> {
        match lane {
            Lane::Response => &mut self.responses,
            Lane::Invocation => &mut self.invocations,
        }
    }
}

#[cfg(test)]
#[path = "queues_tests.rs"]
mod tests;

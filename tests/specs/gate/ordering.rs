//! Drain ordering specs
//!
//! Deferred work resumes in FIFO order per queue, responses before
//! invocations, and never while blocking work is outstanding.

use crate::prelude::*;
use crate::prelude::assert_eq;
use tokio::sync::oneshot;

/// Blocking work on `gate` that ends when the returned sender fires
fn hold_open(gate: &Gate) -> (oneshot::Sender<()>, tokio::task::JoinHandle<()>) {
    let (tx, rx) = oneshot::channel::<()>();
    let gate = gate.clone();
    let handle = tokio::spawn(async move {
        gate.blocking(async move {
            let _ = rx.await;
        })
        .await
    });
    (tx, handle)
}

#[tokio::test]
async fn responses_drain_before_invocations() {
    let gate = Gate::new();
    let journal = Journal::new();
    let (release, blocker) = hold_open(&gate);
    yield_many(2).await;

    let invocation = tokio::spawn({
        let (gate, journal) = (gate.clone(), journal.clone());
        async move {
            gate.blockable(|| async move { journal.push("handler started") })
                .await
        }
    });
    let response = tokio::spawn({
        let (gate, journal) = (gate.clone(), journal.clone());
        async move {
            let body = gate.blockable_response(async { "payload" }).await;
            journal.push(format!("response delivered: {body}"));
        }
    });
    yield_many(5).await;

    assert!(journal.entries().is_empty());
    let snapshot = gate.snapshot();
    assert_eq!(snapshot.pending_invocations, 1);
    assert_eq!(snapshot.pending_responses, 1);

    release.send(()).unwrap();
    blocker.await.unwrap();
    invocation.await.unwrap();
    response.await.unwrap();

    assert_eq!(
        journal.entries(),
        vec!["response delivered: payload", "handler started"]
    );
    yield_many(50).await;
    assert!(gate.snapshot().is_idle());
}

#[tokio::test]
async fn invocations_start_in_call_order() {
    let gate = Gate::new();
    let journal = Journal::new();
    let (release, blocker) = hold_open(&gate);
    yield_many(2).await;

    let handles: Vec<_> = ["a", "b", "c", "d"]
        .into_iter()
        .map(|name| {
            let (gate, journal) = (gate.clone(), journal.clone());
            tokio::spawn(async move { gate.blockable(|| async move { journal.push(name) }).await })
        })
        .collect();
    yield_many(5).await;
    assert_eq!(gate.snapshot().pending_invocations, 4);

    release.send(()).unwrap();
    blocker.await.unwrap();
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(journal.entries(), vec!["a", "b", "c", "d"]);
}

#[tokio::test]
async fn new_blocking_work_pauses_the_drain() {
    let gate = Gate::new();
    let journal = Journal::new();
    let (release, blocker) = hold_open(&gate);
    yield_many(2).await;

    // The first handler re-closes the gate with blocking work of its own
    let (inner_release, inner_rx) = oneshot::channel::<()>();
    let first = tokio::spawn({
        let (gate, journal) = (gate.clone(), journal.clone());
        async move {
            gate.blockable(|| {
                let gate = gate.clone();
                async move {
                    journal.push("first started");
                    gate.blocking(async move {
                        let _ = inner_rx.await;
                    })
                    .await;
                    journal.push("first finished");
                }
            })
            .await
        }
    });
    let second = tokio::spawn({
        let (gate, journal) = (gate.clone(), journal.clone());
        async move { gate.blockable(|| async move { journal.push("second started") }).await }
    });
    yield_many(5).await;

    release.send(()).unwrap();
    blocker.await.unwrap();
    yield_many(40).await;

    assert_eq!(journal.entries(), vec!["first started"]);
    assert_eq!(gate.snapshot().pending_invocations, 1);

    inner_release.send(()).unwrap();
    first.await.unwrap();
    second.await.unwrap();

    assert_eq!(
        journal.entries(),
        vec!["first started", "first finished", "second started"]
    );
}

#[tokio::test]
async fn open_gate_runs_handlers_immediately() {
    let gate = Gate::new();
    let journal = Journal::new();

    let log = &journal;
    gate.blockable(|| async move { log.push("ran") }).await;
    let value = gate.blockable_response(async { 7 }).await;

    assert_eq!(journal.entries(), vec!["ran"]);
    assert_eq!(value, 7);
    assert!(gate.snapshot().is_idle());
}

//! Reset specs
//!
//! Reset returns a gate to its initial state and abandons deferred work.

use crate::prelude::*;
use crate::prelude::assert_eq;

#[tokio::test]
async fn reset_abandons_deferred_calls() {
    let gate = Gate::new();
    let journal = Journal::new();
    let (release, rx) = tokio::sync::oneshot::channel::<()>();

    let blocker = tokio::spawn({
        let gate = gate.clone();
        async move {
            gate.blocking(async move {
                let _ = rx.await;
            })
            .await
        }
    });
    yield_many(2).await;

    let deferred = tokio::spawn({
        let (gate, journal) = (gate.clone(), journal.clone());
        async move { gate.blockable(|| async move { journal.push("deferred ran") }).await }
    });
    yield_many(5).await;
    assert_eq!(gate.snapshot().pending_invocations, 1);

    gate.reset();
    assert!(gate.snapshot().is_idle());

    // A call after reset runs at once even though the old blocker is still alive
    let log = &journal;
    gate.blockable(|| async move { log.push("fresh ran") }).await;

    release.send(()).unwrap();
    blocker.await.unwrap();

    let waited = tokio::time::timeout(Duration::from_millis(30), deferred).await;
    assert!(waited.is_err(), "abandoned call must never run");
    assert_eq!(journal.entries(), vec!["fresh ran"]);
    assert!(gate.snapshot().is_idle());
}

#[tokio::test]
async fn reset_on_idle_gate_is_harmless() {
    let gate = Gate::new();
    gate.reset();
    gate.reset();

    assert!(gate.snapshot().is_idle());
    assert_eq!(gate.blockable_response(async { "ok" }).await, "ok");
}

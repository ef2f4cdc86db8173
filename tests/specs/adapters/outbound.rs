//! Outbound fetch specs
//!
//! Fetches go out while storage work is pending, but their results wait.

use crate::prelude::*;
use crate::prelude::assert_eq;

#[tokio::test]
async fn fetch_result_waits_for_pending_write() {
    let gate = Gate::new();
    let storage = GatedStorage::new(
        MemoryStorage::new().with_latency(Duration::from_millis(20)),
        gate.clone(),
    );
    let fake = FakeFetchAdapter::new();
    fake.route("https://rates.test/eur", Ok(FetchResponse::ok("1.08")));
    let fetch = GatedFetch::new(fake.clone(), gate.clone());

    let write = tokio::spawn({
        let storage = storage.clone();
        async move { storage.put("last", json!("pending")).await }
    });
    yield_many(2).await;

    let lookup = tokio::spawn({
        let fetch = fetch.clone();
        async move { fetch.fetch(FetchRequest::get("https://rates.test/eur")).await }
    });
    yield_many(5).await;

    assert_eq!(fake.calls().len(), 1, "request should already be sent");
    assert!(!lookup.is_finished(), "response must wait for the write");

    write.await.unwrap().unwrap();
    let response = lookup.await.unwrap().unwrap();

    assert_eq!(response.body, "1.08");
    assert_eq!(
        storage.get("last").await.unwrap(),
        Some(json!("pending"))
    );
}

#[tokio::test]
async fn handler_combining_fetch_and_storage() {
    let gate = Gate::new();
    let storage = GatedStorage::new(MemoryStorage::new(), gate.clone());
    let fake = FakeFetchAdapter::new();
    fake.route("https://rates.test/eur", Ok(FetchResponse::ok("1.08")));
    let fetch = GatedFetch::new(fake, gate.clone());

    let handler = {
        let (storage, fetch) = (storage.clone(), fetch.clone());
        move || async move {
            let response = fetch
                .fetch(FetchRequest::get("https://rates.test/eur"))
                .await
                .unwrap();
            storage.put("rate", json!(response.body)).await.unwrap();
            response.status
        }
    };

    let status = gate.blockable(handler).await;

    assert_eq!(status, 200);
    assert_eq!(storage.get("rate").await.unwrap(), Some(json!("1.08")));
    assert!(gate.snapshot().is_idle());
}

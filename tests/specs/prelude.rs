//! Shared helpers for the gate specs

#![allow(dead_code)]

pub use ag_adapters::{
    FakeFetchAdapter, FakeStorageAdapter, FetchAdapter, FetchRequest, FetchResponse, GatedFetch,
    GatedStorage, MemoryStorage, StorageAdapter, StorageError,
};
pub use ag_core::{Gate, GateConfig};
pub use serde_json::json;
pub use similar_asserts::assert_eq;
pub use std::sync::{Arc, Mutex};
pub use std::time::Duration;

/// Let spawned tasks run for `n` scheduler turns
pub async fn yield_many(n: usize) {
    for _ in 0..n {
        tokio::task::yield_now().await;
    }
}

/// Ordered record of what happened, shared between tasks
#[derive(Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/// Bank account actor whose balance lives behind gated storage
#[derive(Clone)]
pub struct Account<S> {
    storage: GatedStorage<S>,
}

#[derive(Debug, PartialEq)]
pub enum AccountError {
    Insufficient { balance: u64, requested: u64 },
    Storage(StorageError),
}

impl From<StorageError> for AccountError {
    fn from(e: StorageError) -> Self {
        AccountError::Storage(e)
    }
}

impl<S: StorageAdapter> Account<S> {
    pub fn new(storage: S, gate: Gate) -> Self {
        Self {
            storage: GatedStorage::new(storage, gate),
        }
    }

    pub fn gate(&self) -> &Gate {
        self.storage.gate()
    }

    pub async fn balance(&self) -> u64 {
        self.storage.get_u64("balance").await.unwrap().unwrap_or(0)
    }

    pub async fn deposit(&self, amount: u64) -> Result<u64, AccountError> {
        let storage = self.storage.clone();
        self.gate()
            .blockable(move || async move {
                let balance = storage.get_u64("balance").await?.unwrap_or(0) + amount;
                storage.put("balance", json!(balance)).await?;
                Ok::<_, AccountError>(balance)
            })
            .await
    }

    pub async fn withdraw(&self, amount: u64) -> Result<u64, AccountError> {
        let storage = self.storage.clone();
        self.gate()
            .blockable(move || async move {
                let balance = storage.get_u64("balance").await?.unwrap_or(0);
                if balance < amount {
                    return Err(AccountError::Insufficient {
                        balance,
                        requested: amount,
                    });
                }
                storage.put("balance", json!(balance - amount)).await?;
                Ok(balance - amount)
            })
            .await
    }
}

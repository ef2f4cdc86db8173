//! Account actor specs
//!
//! Read-modify-write handlers on one gate behave as if run one at a time.

use crate::prelude::*;
use crate::prelude::assert_eq;

#[tokio::test]
async fn concurrent_deposits_are_not_lost() {
    let account = Account::new(
        MemoryStorage::new().with_latency(Duration::from_millis(1)),
        Gate::new(),
    );

    let handles: Vec<_> = [10, 20, 30, 40]
        .into_iter()
        .map(|amount| {
            let account = account.clone();
            tokio::spawn(async move { account.deposit(amount).await })
        })
        .collect();

    let mut balances = Vec::new();
    for handle in handles {
        balances.push(handle.await.unwrap().unwrap());
    }

    assert_eq!(balances, vec![10, 30, 60, 100]);
    assert_eq!(account.balance().await, 100);
}

#[tokio::test]
async fn overdraft_check_sees_earlier_withdrawals() {
    let account = Account::new(MemoryStorage::new(), Gate::new());
    account.deposit(50).await.unwrap();

    let first = tokio::spawn({
        let account = account.clone();
        async move { account.withdraw(40).await }
    });
    let second = tokio::spawn({
        let account = account.clone();
        async move { account.withdraw(40).await }
    });

    assert_eq!(first.await.unwrap(), Ok(10));
    assert_eq!(
        second.await.unwrap(),
        Err(AccountError::Insufficient {
            balance: 10,
            requested: 40
        })
    );
    assert_eq!(account.balance().await, 10);
}

#[tokio::test]
async fn storage_failure_surfaces_and_gate_recovers() {
    let fake = FakeStorageAdapter::new();
    let account = Account::new(fake.clone(), Gate::new());
    account.deposit(5).await.unwrap();

    fake.fail_next(StorageError::Backend("disk full".to_string()));
    let err = account.deposit(1).await.unwrap_err();
    assert_eq!(
        err,
        AccountError::Storage(StorageError::Backend("disk full".to_string()))
    );

    assert_eq!(account.deposit(2).await.unwrap(), 7);
    assert!(account.gate().is_quiescent());
}

#[tokio::test]
async fn separate_gates_do_not_serialize_each_other() {
    let slow = Account::new(
        MemoryStorage::new().with_latency(Duration::from_millis(50)),
        Gate::new(),
    );
    let fast = Account::new(MemoryStorage::new(), Gate::new());

    let pending = tokio::spawn({
        let slow = slow.clone();
        async move { slow.deposit(1).await }
    });
    yield_many(2).await;
    assert!(!slow.gate().is_quiescent());

    assert_eq!(fast.deposit(3).await.unwrap(), 3);
    assert!(!pending.is_finished());

    assert_eq!(pending.await.unwrap().unwrap(), 1);
}

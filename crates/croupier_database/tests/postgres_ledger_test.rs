//! Tests for the PostgreSQL ledger.
//!
//! Requires a running PostgreSQL at `DATABASE_URL`:
//! `cargo test -p croupier_database --features postgres-tests`

#![cfg(feature = "postgres-tests")]

use chrono::{Duration, DurationRound, Utc};
use croupier_database::{PostgresLedger, database_url_from_env, establish_pool, run_migrations};
use croupier_interface::LedgerStore;

fn ledger() -> PostgresLedger {
    dotenvy::dotenv().ok();
    let url = database_url_from_env().unwrap();
    let pool = establish_pool(&url, 2).unwrap();
    run_migrations(&pool).unwrap();
    PostgresLedger::new(pool)
}

fn unique_path(label: &str) -> String {
    format!(
        "/croupier-test/{}-{}.png",
        label,
        Utc::now().timestamp_nanos_opt().unwrap_or_default()
    )
}

// Postgres stores microseconds
fn now_micros() -> chrono::DateTime<Utc> {
    Utc::now()
        .duration_trunc(Duration::microseconds(1))
        .unwrap()
}

#[tokio::test]
async fn test_upsert_then_get() {
    let ledger = ledger();
    let path = unique_path("get");
    let now = now_micros();

    assert_eq!(ledger.get(&path).await.unwrap(), None);
    ledger.upsert(&path, now).await.unwrap();
    assert_eq!(ledger.get(&path).await.unwrap(), Some(now));
}

#[tokio::test]
async fn test_upsert_keeps_latest_timestamp() {
    let ledger = ledger();
    let path = unique_path("latest");
    let now = now_micros();

    ledger.upsert(&path, now).await.unwrap();
    ledger.upsert(&path, now - Duration::days(5)).await.unwrap();
    assert_eq!(ledger.get(&path).await.unwrap(), Some(now));

    let later = now + Duration::seconds(1);
    ledger.upsert(&path, later).await.unwrap();
    assert_eq!(ledger.get(&path).await.unwrap(), Some(later));
}

#[tokio::test]
async fn test_get_many_batches_lookup() {
    let ledger = ledger();
    let a = unique_path("many-a");
    let b = unique_path("many-b");
    let now = now_micros();

    ledger.upsert(&a, now).await.unwrap();

    let found = ledger.get_many(&[a.clone(), b.clone()]).await.unwrap();
    assert_eq!(found.get(&a), Some(&now));
    assert!(!found.contains_key(&b));
}

//! In-memory ledger.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use croupier_error::CroupierResult;
use croupier_interface::LedgerStore;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Ledger held in process memory.
///
/// Same upsert rule as [`PostgresLedger`](crate::PostgresLedger): the later
/// timestamp wins. Clones share the same records.
///
/// # Example
///
/// ```
/// use chrono::{Duration, Utc};
/// use croupier_database::MemoryLedger;
/// use croupier_interface::LedgerStore;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let ledger = MemoryLedger::new();
/// let now = Utc::now();
/// ledger.upsert("/pics/dog.png", now).await.unwrap();
/// ledger.upsert("/pics/dog.png", now - Duration::days(1)).await.unwrap();
/// assert_eq!(ledger.get("/pics/dog.png").await.unwrap(), Some(now));
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    records: Arc<Mutex<HashMap<String, DateTime<Utc>>>>,
}

impl MemoryLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a ledger pre-populated with records.
    pub fn with_records(records: impl IntoIterator<Item = (String, DateTime<Utc>)>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records.into_iter().collect())),
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Whether the ledger has no records.
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Copy of all records.
    pub fn snapshot(&self) -> HashMap<String, DateTime<Utc>> {
        self.records.lock().clone()
    }
}

#[async_trait]
impl LedgerStore for MemoryLedger {
    async fn get(&self, path: &str) -> CroupierResult<Option<DateTime<Utc>>> {
        Ok(self.records.lock().get(path).copied())
    }

    async fn upsert(&self, path: &str, posted_at: DateTime<Utc>) -> CroupierResult<()> {
        let mut records = self.records.lock();
        records
            .entry(path.to_string())
            .and_modify(|existing| {
                if posted_at > *existing {
                    *existing = posted_at;
                }
            })
            .or_insert(posted_at);
        Ok(())
    }
}

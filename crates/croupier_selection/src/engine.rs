//! Selection engine combining filtering, weighting and the ledger.

use crate::{DEFAULT_WILDCARDS, filter_items, recency_weight, weighted_pick};
use chrono::Utc;
use croupier_core::{MediaItem, SearchQuery};
use croupier_error::CroupierResult;
use croupier_interface::LedgerStore;
use parking_lot::Mutex;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Picks one image from a listing and records the pick in the ledger.
///
/// The random source is owned by the engine so tests can seed it.
pub struct SelectionEngine {
    ledger: Arc<dyn LedgerStore>,
    wildcards: Vec<String>,
    rng: Mutex<StdRng>,
}

impl SelectionEngine {
    /// Creates an engine with the default wildcards and an entropy-seeded rng.
    pub fn new(ledger: Arc<dyn LedgerStore>) -> Self {
        Self::with_rng(ledger, StdRng::from_entropy())
    }

    /// Creates an engine with an explicit random source.
    pub fn with_rng(ledger: Arc<dyn LedgerStore>, rng: StdRng) -> Self {
        Self {
            ledger,
            wildcards: DEFAULT_WILDCARDS.iter().map(|w| w.to_string()).collect(),
            rng: Mutex::new(rng),
        }
    }

    /// Replaces the wildcard sentinels.
    pub fn with_wildcards(mut self, wildcards: impl IntoIterator<Item = String>) -> Self {
        self.wildcards = wildcards.into_iter().map(|w| w.to_lowercase()).collect();
        self
    }

    /// Configured wildcard sentinels.
    pub fn wildcards(&self) -> &[String] {
        &self.wildcards
    }

    /// Ledger the engine records picks in.
    pub fn ledger(&self) -> &Arc<dyn LedgerStore> {
        &self.ledger
    }

    /// Select one of `items` matching `query`.
    ///
    /// Returns `Ok(None)` when nothing matches. On a successful draw the
    /// ledger is updated with the current time before returning.
    ///
    /// # Errors
    ///
    /// Returns error if the ledger cannot be read or written.
    #[instrument(skip(self, items), fields(listed = items.len(), search = %query))]
    pub async fn select(
        &self,
        items: Vec<MediaItem>,
        query: &SearchQuery,
    ) -> CroupierResult<Option<MediaItem>> {
        let mut candidates = filter_items(items, query, &self.wildcards);
        if candidates.is_empty() {
            info!("No candidates match search");
            return Ok(None);
        }

        let keys: Vec<String> = candidates.iter().map(|i| i.key().clone()).collect();
        let history = self.ledger.get_many(&keys).await?;

        let now = Utc::now();
        let weights: Vec<u64> = keys
            .iter()
            .map(|key| recency_weight(history.get(key).copied(), now))
            .collect();
        debug!(
            candidates = candidates.len(),
            recorded = history.len(),
            total_weight = weights.iter().sum::<u64>(),
            "Weighted candidates"
        );

        let index = {
            let mut rng = self.rng.lock();
            weighted_pick(&weights, &mut *rng)
        };
        let Some(index) = index else {
            return Ok(None);
        };

        let chosen = candidates.swap_remove(index);
        self.ledger.upsert(chosen.key(), now).await?;
        info!(path = %chosen.key(), weight = weights[index], "Selected image");
        Ok(Some(chosen))
    }
}

impl std::fmt::Debug for SelectionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionEngine")
            .field("wildcards", &self.wildcards)
            .finish_non_exhaustive()
    }
}

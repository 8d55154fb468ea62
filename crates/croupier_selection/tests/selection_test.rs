//! Tests for weighting, filtering and the selection engine.

use chrono::{Duration, Utc};
use croupier_core::{ItemLocator, MediaItem, SearchQuery};
use croupier_database::MemoryLedger;
use croupier_interface::LedgerStore;
use croupier_selection::{
    SelectionEngine, cumulative_weights, draw_index, filter_items, recency_weight, weighted_pick,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashMap;
use std::sync::Arc;

fn item(name: &str) -> MediaItem {
    let key = format!("/pics/{}", name.to_lowercase());
    MediaItem::new(name, key.clone(), ItemLocator::Path(key))
}

fn wildcards() -> Vec<String> {
    vec!["any".to_string(), "anybody".to_string(), "anyone".to_string()]
}

#[test]
fn test_unrecorded_item_weight() {
    assert_eq!(recency_weight(None, Utc::now()), 103);
}

#[test]
fn test_weight_grows_with_age() {
    let now = Utc::now();
    assert_eq!(recency_weight(Some(now - Duration::days(10)), now), 3);
    assert_eq!(recency_weight(Some(now - Duration::days(30)), now), 26);
    assert_eq!(recency_weight(Some(now - Duration::days(90)), now), 103);
}

#[test]
fn test_weight_is_never_zero() {
    let now = Utc::now();
    assert_eq!(recency_weight(Some(now), now), 1);
    assert_eq!(recency_weight(Some(now - Duration::hours(23)), now), 1);
    assert_eq!(recency_weight(Some(now + Duration::days(5)), now), 1);
}

#[test]
fn test_filter_keeps_items_containing_all_tokens() {
    let items = vec![item("black_dog.png"), item("dog1.png"), item("cat1.png")];

    let kept = filter_items(items.clone(), &SearchQuery::new("black dog"), &wildcards());
    assert_eq!(kept, vec![item("black_dog.png")]);

    let kept = filter_items(items.clone(), &SearchQuery::new("DOG"), &wildcards());
    assert_eq!(kept, vec![item("black_dog.png"), item("dog1.png")]);

    let kept = filter_items(items, &SearchQuery::new("zzz"), &wildcards());
    assert!(kept.is_empty());
}

#[test]
fn test_empty_and_wildcard_queries_keep_everything() {
    let items = vec![item("dog1.png"), item("cat1.png")];

    assert_eq!(filter_items(items.clone(), &SearchQuery::new(""), &wildcards()).len(), 2);
    assert_eq!(filter_items(items.clone(), &SearchQuery::new("anybody"), &wildcards()).len(), 2);
    // Only the whole search is compared against the sentinels
    assert!(filter_items(items, &SearchQuery::new("any dog"), &wildcards()).is_empty());
}

#[test]
fn test_draw_hits_light_item_once_per_cycle() {
    let cumulative = cumulative_weights(&[1, 103]);
    assert_eq!(cumulative, vec![1, 104]);

    let mut counts = [0usize; 2];
    for roll in 0..104 {
        counts[draw_index(&cumulative, roll)] += 1;
    }
    assert_eq!(counts, [1, 103]);
}

#[test]
fn test_weighted_pick_is_reproducible_with_seed() {
    let weights = [1, 103, 3];
    let picks = |seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..50)
            .map(|_| weighted_pick(&weights, &mut rng).unwrap())
            .collect::<Vec<_>>()
    };
    assert_eq!(picks(7), picks(7));
    assert!(weighted_pick(&[], &mut StdRng::seed_from_u64(7)).is_none());
}

#[test]
fn test_weighted_pick_favors_heavy_items() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut counts: HashMap<usize, usize> = HashMap::new();
    for _ in 0..10_000 {
        *counts.entry(weighted_pick(&[1, 103], &mut rng).unwrap()).or_default() += 1;
    }
    let light = counts.get(&0).copied().unwrap_or(0);
    assert!(light < 300, "light item drawn {} times", light);
}

#[tokio::test]
async fn test_select_matching_item_and_record_it() {
    let ledger = Arc::new(MemoryLedger::new());
    let engine = SelectionEngine::with_rng(ledger.clone(), StdRng::seed_from_u64(1));

    let before = Utc::now();
    let chosen = engine
        .select(vec![item("dog1.png"), item("cat1.png")], &SearchQuery::new("dog"))
        .await
        .unwrap();

    assert_eq!(chosen, Some(item("dog1.png")));
    let recorded = ledger.get("/pics/dog1.png").await.unwrap().unwrap();
    assert!(recorded >= before);
    assert_eq!(ledger.get("/pics/cat1.png").await.unwrap(), None);
}

#[tokio::test]
async fn test_select_without_match_returns_none_and_leaves_ledger() {
    let ledger = Arc::new(MemoryLedger::new());
    let engine = SelectionEngine::new(ledger.clone());

    let chosen = engine
        .select(vec![item("dog1.png")], &SearchQuery::new("zzz"))
        .await
        .unwrap();

    assert_eq!(chosen, None);
    assert!(ledger.is_empty());
}

#[tokio::test]
async fn test_select_from_empty_listing() {
    let engine = SelectionEngine::new(Arc::new(MemoryLedger::new()));
    let chosen = engine.select(Vec::new(), &SearchQuery::new("")).await.unwrap();
    assert_eq!(chosen, None);
}

#[tokio::test]
async fn test_recently_shown_items_are_rarely_repeated() {
    let now = Utc::now();
    let mut records = HashMap::new();
    records.insert("/pics/old.png".to_string(), now);
    let ledger = Arc::new(MemoryLedger::with_records(records));
    let engine = SelectionEngine::with_rng(ledger, StdRng::seed_from_u64(3));

    let mut fresh = 0;
    for _ in 0..20 {
        // Every round offers one never-shown name
        let listing = vec![item("old.png"), item(&format!("new{}.png", fresh))];
        let chosen = engine
            .select(listing, &SearchQuery::new("any"))
            .await
            .unwrap()
            .unwrap();
        if chosen.name().starts_with("new") {
            fresh += 1;
        }
    }
    assert!(fresh >= 15, "fresh picked {} of 20", fresh);
}

#[tokio::test]
async fn test_custom_wildcards() {
    let engine = SelectionEngine::new(Arc::new(MemoryLedger::new()))
        .with_wildcards(vec!["Random".to_string()]);
    assert_eq!(engine.wildcards(), ["random"]);

    let chosen = engine
        .select(vec![item("dog1.png")], &SearchQuery::new("random"))
        .await
        .unwrap();
    assert!(chosen.is_some());
}

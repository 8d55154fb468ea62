//! End-to-end pipeline tests over in-memory fakes.

mod test_utils;

use croupier_bot::{PipelineFailure, PostOutcome};
use croupier_core::{Materialized, PostPayload};
use croupier_interface::LedgerStore;
use test_utils::{BOT_ID, FakeBackend, FakeImageHost, FakeMessenger, Harness, NOT_FOUND_LINK};

#[tokio::test]
async fn test_matching_command_posts_and_records() {
    let harness = Harness::standard();

    let outcome = harness.pipeline.handle("post dog").await;

    let expected = PostPayload::image(BOT_ID, "https://i.groupme.com/1.jpeg");
    assert_eq!(
        outcome,
        PostOutcome::Posted {
            payload: expected.clone(),
            fallback: false,
        }
    );
    assert!(harness.ledger.get("/pics/dog1.png").await.unwrap().is_some());
    assert_eq!(harness.ledger.get("/pics/cat1.png").await.unwrap(), None);
    assert_eq!(*harness.backend.fetched.lock().unwrap(), vec!["/pics/dog1.png"]);
    assert_eq!(
        *harness.image_host.uploads.lock().unwrap(),
        vec![Materialized::Link("https://dl.example.com/pics/dog1.png".to_string())]
    );
    assert_eq!(*harness.messenger.sent.lock().unwrap(), vec![expected]);
    assert!(outcome.response_text().starts_with("Posted: "));
}

#[tokio::test]
async fn test_no_match_posts_fallback_image() {
    let harness = Harness::standard();

    let outcome = harness.pipeline.handle("post zzz").await;

    assert!(outcome.is_fallback());
    assert!(outcome.response_text().starts_with("No result found: "));
    assert!(harness.ledger.is_empty());
    assert!(harness.backend.fetched.lock().unwrap().is_empty());
    assert_eq!(
        *harness.image_host.uploads.lock().unwrap(),
        vec![Materialized::Link(NOT_FOUND_LINK.to_string())]
    );
    assert_eq!(harness.messenger.sent.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_fallback_is_uploaded_on_every_call() {
    let harness = Harness::standard();

    harness.pipeline.handle("post zzz").await;
    harness.pipeline.handle("post zzz").await;

    assert_eq!(harness.image_host.uploads.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_wrong_keyword_returns_guidance() {
    let harness = Harness::standard();

    let outcome = harness.pipeline.handle("go dog").await;

    assert_eq!(
        outcome,
        PostOutcome::Failed(PipelineFailure::KeywordMissing(
            "post keyword not in message".to_string()
        ))
    );
    assert!(outcome.response_text().contains("post"));
    assert!(harness.image_host.uploads.lock().unwrap().is_empty());
    assert!(harness.messenger.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_empty_message_returns_guidance() {
    let harness = Harness::standard();
    let outcome = harness.pipeline.handle("   ").await;
    assert!(matches!(
        outcome,
        PostOutcome::Failed(PipelineFailure::KeywordMissing(_))
    ));
}

#[tokio::test]
async fn test_aliases_apply_before_filtering() {
    let harness = Harness::standard();

    let outcome = harness.pipeline.handle("Post Kitten").await;

    assert!(!outcome.is_fallback());
    assert!(harness.ledger.get("/pics/cat1.png").await.unwrap().is_some());
}

#[tokio::test]
async fn test_backend_failure_is_reported() {
    let backend = FakeBackend {
        fail_list: true,
        ..FakeBackend::with_names(&["dog1.png"])
    };
    let harness = Harness::new(backend, FakeImageHost::default(), FakeMessenger::default(), false);

    let outcome = harness.pipeline.handle("post dog").await;

    match outcome {
        PostOutcome::Failed(PipelineFailure::BackendUnavailable(msg)) => {
            assert!(msg.contains("offline"))
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert!(harness.ledger.is_empty());
}

#[tokio::test]
async fn test_fetch_failure_is_backend_unavailable() {
    let backend = FakeBackend {
        fail_fetch: true,
        ..FakeBackend::with_names(&["dog1.png"])
    };
    let harness = Harness::new(backend, FakeImageHost::default(), FakeMessenger::default(), false);

    let outcome = harness.pipeline.handle("post dog").await;

    assert!(matches!(
        outcome,
        PostOutcome::Failed(PipelineFailure::BackendUnavailable(_))
    ));
    // The draw already happened, so the item counts as shown
    assert!(harness.ledger.get("/pics/dog1.png").await.unwrap().is_some());
}

#[tokio::test]
async fn test_upload_failure_is_reported() {
    let image_host = FakeImageHost {
        fail: true,
        ..FakeImageHost::default()
    };
    let harness = Harness::new(
        FakeBackend::with_names(&["dog1.png"]),
        image_host,
        FakeMessenger::default(),
        false,
    );

    let outcome = harness.pipeline.handle("post dog").await;

    assert!(matches!(
        outcome,
        PostOutcome::Failed(PipelineFailure::UploadFailure(_))
    ));
    assert!(harness.messenger.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_post_failure_is_reported() {
    let messenger = FakeMessenger {
        fail: true,
        ..FakeMessenger::default()
    };
    let harness = Harness::new(
        FakeBackend::with_names(&["dog1.png"]),
        FakeImageHost::default(),
        messenger,
        false,
    );

    let outcome = harness.pipeline.handle("post dog").await;

    match outcome {
        PostOutcome::Failed(PipelineFailure::PostFailure(msg)) => {
            assert!(msg.contains("bot not found"))
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[tokio::test]
async fn test_test_mode_builds_payload_without_sending() {
    let harness = Harness::new(
        FakeBackend::with_names(&["dog1.png"]),
        FakeImageHost::default(),
        FakeMessenger::default(),
        true,
    );

    let outcome = harness.pipeline.handle("post dog").await;

    let payload = outcome.payload().unwrap();
    assert_eq!(payload.bot_id, BOT_ID);
    assert_eq!(payload.image_url(), Some("https://i.groupme.com/1.jpeg"));
    assert!(harness.messenger.sent.lock().unwrap().is_empty());
    assert_eq!(harness.image_host.uploads.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_keyword_only_matches_any_image() {
    let harness = Harness::standard();

    let outcome = harness.pipeline.handle("post").await;

    assert!(!outcome.is_fallback());
    assert_eq!(harness.ledger.len(), 1);
}

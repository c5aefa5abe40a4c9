//! Concurrency and sequencing behaviour of the feed controller, driven
//! through in-memory port doubles.

mod common;

use std::time::Duration;

use common::{harness, harness_with_cache, ids, page_of, photo};
use fg_app::{LoadOutcome, RejectReason};
use fg_core::{FeedError, FeedErrorKind, FeedStatus, LoadMode};

#[tokio::test]
async fn overlapping_append_pages_never_duplicate_ids() {
    let h = harness();
    h.service.script("", 1, Ok(page_of(&["a", "b", "c"], 1, 3)));
    let release = h
        .service
        .script_held("", 2, Ok(page_of(&["c", "d", "a"], 2, 3)));
    h.service.script("", 3, Ok(page_of(&["d", "e"], 3, 3)));

    assert_eq!(h.controller.load("", 1, LoadMode::Initial).await, LoadOutcome::Applied);

    let c = h.controller.clone();
    let first = tokio::spawn(async move { c.load_more().await });
    h.service.wait_for_calls(2).await;

    // A second append while the first is in flight is refused outright.
    assert_eq!(
        h.controller.load_more().await,
        LoadOutcome::Rejected(RejectReason::Busy)
    );
    assert_eq!(h.controller.state().status(), FeedStatus::LoadingMore);

    release.send(()).unwrap();
    assert_eq!(first.await.unwrap(), LoadOutcome::Applied);
    assert_eq!(h.controller.load_more().await, LoadOutcome::Applied);

    let state = h.controller.state();
    assert_eq!(ids(&state), vec!["a", "b", "c", "d", "e"]);
    assert_eq!(state.current_page(), 3);
    assert!(!state.has_more());
    assert_eq!(h.service.call_count(), 3);
}

#[tokio::test]
async fn second_refresh_supersedes_the_first() {
    let h = harness();
    h.service.script("", 1, Ok(page_of(&["a"], 1, 1)));
    let release_first = h.service.script_held("", 1, Ok(page_of(&["old"], 1, 1)));
    h.service.script("", 1, Ok(page_of(&["new"], 1, 1)));

    h.controller.load("", 1, LoadMode::Initial).await;

    let c = h.controller.clone();
    let first = tokio::spawn(async move { c.refresh().await });
    h.service.wait_for_calls(2).await;

    assert_eq!(h.controller.refresh().await, LoadOutcome::Applied);
    assert_eq!(ids(&h.controller.state()), vec!["new"]);

    release_first.send(()).unwrap();
    assert_eq!(first.await.unwrap(), LoadOutcome::Discarded);

    let state = h.controller.state();
    assert_eq!(ids(&state), vec!["new"]);
    assert_eq!(state.status(), FeedStatus::Idle);
    // Refresh never reconciles the cache.
    assert!(h.cache.writes().is_empty());
}

#[tokio::test]
async fn stale_initial_response_does_not_overwrite_refresh() {
    let h = harness();
    let release_dog = h
        .service
        .script_held("dog", 1, Ok(page_of(&["stale-1", "stale-2"], 1, 4)));
    h.service.script("dog", 1, Ok(page_of(&["fresh"], 1, 2)));

    let c = h.controller.clone();
    let initial = tokio::spawn(async move { c.load("dog", 1, LoadMode::Initial).await });
    h.service.wait_for_calls(1).await;

    assert_eq!(h.controller.refresh().await, LoadOutcome::Applied);

    release_dog.send(()).unwrap();
    assert_eq!(initial.await.unwrap(), LoadOutcome::Discarded);

    let state = h.controller.state();
    assert_eq!(state.query().as_str(), "dog");
    assert_eq!(ids(&state), vec!["fresh"]);
    assert_eq!(state.total_pages(), 2);
    assert!(h.cache.writes().is_empty());
}

#[tokio::test(start_paused = true)]
async fn debounced_search_issues_only_the_last_query() {
    let h = harness();
    h.service.script("catfish", 1, Ok(page_of(&["f1", "f2"], 1, 1)));

    h.controller.search_debounced("cat");
    tokio::time::sleep(Duration::from_millis(100)).await;
    h.controller.search_debounced("  catfish ");
    assert_eq!(h.service.call_count(), 0);

    tokio::time::sleep(Duration::from_millis(350)).await;
    h.service.wait_for_calls(1).await;

    tokio::time::sleep(Duration::from_secs(1)).await;
    let calls = h.service.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].query.as_str(), "catfish");
    assert_eq!(calls[0].page, 1);
    assert_eq!(ids(&h.controller.state()), vec!["f1", "f2"]);
}

#[tokio::test(start_paused = true)]
async fn shutdown_cancels_pending_search() {
    let h = harness();
    h.controller.search_debounced("cat");
    h.controller.shutdown();

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(h.service.call_count(), 0);
    assert!(h.controller.is_closed());
}

#[tokio::test]
async fn response_after_shutdown_is_discarded() {
    let h = harness();
    let release = h.service.script_held("", 1, Ok(page_of(&["a"], 1, 1)));

    let c = h.controller.clone();
    let pending = tokio::spawn(async move { c.load("", 1, LoadMode::Initial).await });
    h.service.wait_for_calls(1).await;

    h.controller.shutdown();
    release.send(()).unwrap();

    assert_eq!(pending.await.unwrap(), LoadOutcome::Discarded);
    assert!(h.controller.state().items().is_empty());
    assert!(h.cache.writes().is_empty());
    assert_eq!(
        h.controller.refresh().await,
        LoadOutcome::Rejected(RejectReason::Closed)
    );
}

#[tokio::test]
async fn failed_cold_start_falls_back_to_cached_snapshot() {
    let h = harness_with_cache(vec![photo("a"), photo("b")]);
    // Nothing scripted: every request fails with a transport error.

    let outcome = h.controller.start().await;
    assert!(matches!(
        outcome,
        LoadOutcome::Failed(FeedError::Transport { .. })
    ));

    let state = h.controller.state();
    assert_eq!(state.status(), FeedStatus::Error);
    assert_eq!(ids(&state), vec!["a", "b"]);
    assert_eq!(
        state.last_error().map(FeedError::kind),
        Some(FeedErrorKind::Transport)
    );

    let reports = h.reporter.reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].0, "feed.load.initial");

    // A failed search falls back to the same snapshot.
    h.controller.load("cat", 1, LoadMode::Initial).await;
    assert_eq!(ids(&h.controller.state()), vec!["a", "b"]);
    assert!(h.cache.writes().is_empty());
}

#[tokio::test]
async fn empty_first_page_is_an_error_with_no_items() {
    let h = harness_with_cache(vec![photo("a")]);
    h.service.script("", 1, Ok(page_of(&["a"], 1, 1)));
    h.service.script("zzzz", 1, Ok(page_of(&[], 1, 1)));

    h.controller.start().await;
    let outcome = h.controller.load("zzzz", 1, LoadMode::Initial).await;

    let state = h.controller.state();
    assert!(matches!(
        outcome,
        LoadOutcome::Failed(FeedError::EmptyResult { .. })
    ));
    assert_eq!(state.status(), FeedStatus::Error);
    assert!(state.items().is_empty());
    assert_eq!(state.last_error().unwrap().user_message(), "No photos found");
}

#[tokio::test]
async fn subscribers_observe_loading_then_applied() {
    let h = harness();
    let release = h.service.script_held("", 1, Ok(page_of(&["a"], 1, 2)));
    let mut rx = h.controller.subscribe();

    let c = h.controller.clone();
    let pending = tokio::spawn(async move { c.load("", 1, LoadMode::Initial).await });
    h.service.wait_for_calls(1).await;

    assert!(rx.borrow_and_update().is_fetching());
    assert!(h.controller.is_fetching());

    release.send(()).unwrap();
    pending.await.unwrap();

    rx.changed().await.unwrap();
    let seen = rx.borrow_and_update().clone();
    assert_eq!(seen.status(), FeedStatus::Idle);
    assert_eq!(ids(&seen), vec!["a"]);
    assert!(seen.has_more());
}

#[tokio::test]
async fn retry_after_failed_append_continues_the_same_page() {
    let h = harness();
    h.service.script("", 1, Ok(page_of(&["a", "b"], 1, 3)));
    h.service
        .script("", 2, Err(FeedError::transport("connection reset")));
    h.service.script("", 2, Ok(page_of(&["b", "c"], 2, 3)));

    h.controller.load("", 1, LoadMode::Initial).await;
    let failed = h.controller.load_more().await;
    assert!(matches!(failed, LoadOutcome::Failed(FeedError::Transport { .. })));

    let state = h.controller.state();
    assert_eq!(state.status(), FeedStatus::Error);
    assert_eq!(ids(&state), vec!["a", "b"]);
    assert_eq!(state.current_page(), 1);
    assert_eq!(h.reporter.reports()[0].0, "feed.load.append");

    assert_eq!(h.controller.retry_last().await, LoadOutcome::Applied);

    let state = h.controller.state();
    assert_eq!(ids(&state), vec!["a", "b", "c"]);
    assert_eq!(state.current_page(), 2);
    assert_eq!(state.status(), FeedStatus::Idle);
    let last = h.service.calls().pop().unwrap();
    assert_eq!((last.query.as_str(), last.page), ("", 2));
}

#[tokio::test]
async fn failed_refresh_falls_back_to_last_cached_snapshot() {
    let h = harness_with_cache(vec![photo("old")]);
    h.service.script("", 1, Ok(page_of(&["b", "c"], 1, 3)));
    // Second page-1 request is unscripted and fails.

    assert_eq!(h.controller.start().await, LoadOutcome::Applied);
    assert_eq!(h.cache.writes(), vec![vec![photo("b"), photo("c")]]);

    let outcome = h.controller.refresh().await;
    assert!(matches!(outcome, LoadOutcome::Failed(FeedError::Transport { .. })));

    let state = h.controller.state();
    assert_eq!(state.status(), FeedStatus::Error);
    assert_eq!(ids(&state), vec!["b", "c"]);
    assert_eq!(state.current_page(), 1);
    assert_eq!(state.total_pages(), 1);
    assert!(!state.has_more());
    assert_eq!(
        h.reporter.reports().last().map(|(context, _)| context.as_str()),
        Some("feed.load.refresh")
    );
}

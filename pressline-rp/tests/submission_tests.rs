//! Submission gate tests
//!
//! Authorization, status preconditions, and the checked write that keeps
//! two racing submits from both scheduling a run.

mod helpers;

use helpers::{build_state, seed_release, settle, ScriptedRunner};
use pressline_common::models::{ReleaseStatus, Requester};
use pressline_common::Error;
use pressline_rp::store::CatalogStore;
use std::sync::Arc;
use uuid::Uuid;

#[tokio::test]
async fn receipt_reports_processing_immediately() {
    let runner = Arc::new(ScriptedRunner::new());
    let state = build_state(runner);
    let artist_id = Uuid::new_v4();
    let (release, _) = seed_release(&state.store, artist_id, 1).await;

    let receipt = state
        .submission_gate()
        .submit(release.id, &Requester::artist(artist_id))
        .await
        .unwrap();

    assert_eq!(receipt.release_id, release.id);
    assert_eq!(receipt.status, ReleaseStatus::Processing);
    settle(&state, release.id).await;
}

#[tokio::test]
async fn unknown_release_is_not_found() {
    let state = build_state(Arc::new(ScriptedRunner::new()));
    let err = state
        .submission_gate()
        .submit(Uuid::new_v4(), &Requester::artist(Uuid::new_v4()))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn artist_cannot_submit_someone_elses_release() {
    let state = build_state(Arc::new(ScriptedRunner::new()));
    let owner = Uuid::new_v4();
    let (release, _) = seed_release(&state.store, owner, 1).await;

    let err = state
        .submission_gate()
        .submit(release.id, &Requester::artist(Uuid::new_v4()))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Forbidden(_)));

    // No side effect
    let current = state.store.release(release.id).await.unwrap().unwrap();
    assert_eq!(current.status, ReleaseStatus::Draft);
}

#[tokio::test]
async fn admin_may_submit_any_release() {
    let runner = Arc::new(ScriptedRunner::new());
    let state = build_state(runner);
    let owner = Uuid::new_v4();
    let (release, _) = seed_release(&state.store, owner, 1).await;

    let receipt = state
        .submission_gate()
        .submit(release.id, &Requester::admin(Uuid::new_v4()))
        .await
        .unwrap();
    assert_eq!(receipt.status, ReleaseStatus::Processing);
    settle(&state, release.id).await;
}

#[tokio::test]
async fn submission_is_blocked_outside_draft_and_rejected() {
    let state = build_state(Arc::new(ScriptedRunner::new()));
    let artist_id = Uuid::new_v4();

    for blocked in [
        ReleaseStatus::Processing,
        ReleaseStatus::PendingReview,
        ReleaseStatus::Published,
    ] {
        let (release, _) = seed_release(&state.store, artist_id, 1).await;
        state
            .store
            .set_status(release.id, blocked, None)
            .await
            .unwrap();

        let err = state
            .submission_gate()
            .submit(release.id, &Requester::artist(artist_id))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Conflict(_)), "status {}", blocked);

        // Precondition failures leave the release untouched
        let current = state.store.release(release.id).await.unwrap().unwrap();
        assert_eq!(current.status, blocked);
        assert!(!state.registry.is_running(release.id).await);
    }
}

#[tokio::test]
async fn rejected_release_may_be_resubmitted() {
    let runner = Arc::new(ScriptedRunner::new());
    let state = build_state(runner);
    let artist_id = Uuid::new_v4();
    let (release, _) = seed_release(&state.store, artist_id, 1).await;
    state
        .store
        .set_status(release.id, ReleaseStatus::Rejected, Some("first pass failed"))
        .await
        .unwrap();

    let receipt = state
        .submission_gate()
        .submit(release.id, &Requester::artist(artist_id))
        .await
        .unwrap();
    assert_eq!(receipt.status, ReleaseStatus::Processing);

    // Re-entering the pipeline cleared the old rejection reason
    let current = state.store.release(release.id).await.unwrap().unwrap();
    assert_eq!(current.processing_error_reason, None);
    settle(&state, release.id).await;
}

#[tokio::test]
async fn concurrent_submits_accept_exactly_one() {
    let runner = Arc::new(ScriptedRunner::new());
    let state = build_state(runner);
    let artist_id = Uuid::new_v4();
    let (release, _) = seed_release(&state.store, artist_id, 1).await;

    let gate_a = state.submission_gate();
    let gate_b = state.submission_gate();
    let requester = Requester::artist(artist_id);

    let (a, b) = tokio::join!(
        gate_a.submit(release.id, &requester),
        gate_b.submit(release.id, &requester),
    );

    let accepted = [&a, &b].iter().filter(|r| r.is_ok()).count();
    assert_eq!(accepted, 1, "exactly one submit wins: {:?} / {:?}", a, b);
    for result in [&a, &b] {
        if let Err(err) = result {
            assert!(matches!(err, Error::Conflict(_)));
        }
    }

    let settled = settle(&state, release.id).await;
    assert_eq!(settled.status, ReleaseStatus::PendingReview);
}

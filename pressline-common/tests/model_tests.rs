//! Domain model and state machine unit tests

use pressline_common::models::{Release, ReleaseStatus, ReleaseUpdate, Requester};
use uuid::Uuid;

fn draft_release() -> Release {
    Release::new(
        Uuid::new_v4(),
        "Glass Harbour".to_string(),
        "Indie".to_string(),
    )
}

#[test]
fn statuses_serialize_in_screaming_snake_case() {
    let cases = [
        (ReleaseStatus::Draft, "DRAFT"),
        (ReleaseStatus::Processing, "PROCESSING"),
        (ReleaseStatus::PendingReview, "PENDING_REVIEW"),
        (ReleaseStatus::Published, "PUBLISHED"),
        (ReleaseStatus::Rejected, "REJECTED"),
    ];
    for (status, expected) in cases {
        assert_eq!(serde_json::to_value(status).unwrap(), expected);
        // Display matches the wire form
        assert_eq!(status.to_string(), expected);
        let parsed: ReleaseStatus =
            serde_json::from_value(serde_json::Value::String(expected.to_string())).unwrap();
        assert_eq!(parsed, status);
    }
}

#[test]
fn only_draft_and_rejected_are_submittable() {
    assert!(ReleaseStatus::Draft.is_submittable());
    assert!(ReleaseStatus::Rejected.is_submittable());
    assert!(!ReleaseStatus::Processing.is_submittable());
    assert!(!ReleaseStatus::PendingReview.is_submittable());
    assert!(!ReleaseStatus::Published.is_submittable());
}

#[test]
fn new_releases_start_as_drafts() {
    let release = draft_release();
    assert_eq!(release.status, ReleaseStatus::Draft);
    assert_eq!(release.processing_error_reason, None);
    assert!(!release.is_featured);
    assert_eq!(release.track_count, 0);
}

#[test]
fn set_status_returns_the_transition_record() {
    let mut release = draft_release();

    let transition = release.set_status(ReleaseStatus::Processing, None);
    assert_eq!(transition.release_id, release.id);
    assert_eq!(transition.old_status, ReleaseStatus::Draft);
    assert_eq!(transition.new_status, ReleaseStatus::Processing);
    assert_eq!(release.status, ReleaseStatus::Processing);
    assert_eq!(release.updated_at, transition.transitioned_at);
}

#[test]
fn status_writes_replace_the_error_reason_wholesale() {
    let mut release = draft_release();

    release.set_status(ReleaseStatus::Rejected, Some("mix clipped".to_string()));
    assert_eq!(release.processing_error_reason.as_deref(), Some("mix clipped"));

    // Moving on without an explicit reason clears the old one
    release.set_status(ReleaseStatus::Processing, None);
    assert_eq!(release.processing_error_reason, None);
}

#[test]
fn ownership_checks() {
    let release = draft_release();
    let owner = Requester::artist(release.artist_id);
    let stranger = Requester::artist(Uuid::new_v4());
    let admin = Requester::admin(Uuid::new_v4());

    assert!(owner.may_manage(&release));
    assert!(!stranger.may_manage(&release));
    assert!(admin.may_manage(&release));
    assert!(!owner.is_admin());
    assert!(admin.is_admin());
}

#[test]
fn empty_update_detection() {
    assert!(ReleaseUpdate::default().is_empty());
    let patch = ReleaseUpdate {
        title: Some("New Title".to_string()),
        ..Default::default()
    };
    assert!(!patch.is_empty());
}

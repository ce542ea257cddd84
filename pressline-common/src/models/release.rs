//! Release lifecycle state machine
//!
//! A release moves DRAFT → PROCESSING → PENDING_REVIEW → PUBLISHED or
//! REJECTED. A rejected release may be resubmitted, which takes it back to
//! PROCESSING. PUBLISHED has no further transition.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Release workflow status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReleaseStatus {
    /// Being assembled by the artist, not yet submitted
    Draft,
    /// Background processing pipeline is running
    Processing,
    /// Processing succeeded, waiting for an admin decision
    PendingReview,
    /// Approved and visible in the public catalogue
    Published,
    /// Rejected by processing or by an admin; may be resubmitted
    Rejected,
}

impl ReleaseStatus {
    /// Whether a release in this status may be (re)submitted for processing
    pub fn is_submittable(self) -> bool {
        matches!(self, ReleaseStatus::Draft | ReleaseStatus::Rejected)
    }
}

impl fmt::Display for ReleaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReleaseStatus::Draft => "DRAFT",
            ReleaseStatus::Processing => "PROCESSING",
            ReleaseStatus::PendingReview => "PENDING_REVIEW",
            ReleaseStatus::Published => "PUBLISHED",
            ReleaseStatus::Rejected => "REJECTED",
        };
        f.write_str(s)
    }
}

/// Status transition record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusTransition {
    pub release_id: Uuid,
    pub old_status: ReleaseStatus,
    pub new_status: ReleaseStatus,
    pub transitioned_at: DateTime<Utc>,
}

/// An artist's album or single submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Release {
    /// Unique release identifier
    pub id: Uuid,

    /// Owning artist
    pub artist_id: Uuid,

    pub title: String,

    pub genre: String,

    pub cover_art_url: Option<String>,

    /// Current workflow status
    pub status: ReleaseStatus,

    /// Populated only when rejected (by processing or by an admin)
    pub processing_error_reason: Option<String>,

    /// Highlighted in the public catalogue
    pub is_featured: bool,

    /// Number of tracks, derived by the store at read time
    pub track_count: usize,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Release {
    /// Create a new draft release owned by `artist_id`
    pub fn new(artist_id: Uuid, title: String, genre: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            artist_id,
            title,
            genre,
            cover_art_url: None,
            status: ReleaseStatus::Draft,
            processing_error_reason: None,
            is_featured: false,
            track_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Move to a new status, replacing the error reason wholesale.
    ///
    /// Passing `None` clears any previous reason, which keeps the invariant
    /// that a reason survives only on REJECTED releases (callers set one
    /// explicitly when rejecting).
    pub fn set_status(
        &mut self,
        new_status: ReleaseStatus,
        reason: Option<String>,
    ) -> StatusTransition {
        let transition = StatusTransition {
            release_id: self.id,
            old_status: self.status,
            new_status,
            transitioned_at: Utc::now(),
        };
        self.status = new_status;
        self.processing_error_reason = reason;
        self.updated_at = transition.transitioned_at;
        transition
    }

    pub fn owned_by(&self, user_id: Uuid) -> bool {
        self.artist_id == user_id
    }
}

/// Partial update applied to a release record.
///
/// `None` fields are left untouched. The error reason is cleared when the
/// patch neither supplies one nor moves the release to REJECTED, so stale
/// rejection reasons do not survive ordinary edits.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReleaseUpdate {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub cover_art_url: Option<String>,
    pub status: Option<ReleaseStatus>,
    pub processing_error_reason: Option<String>,
    pub is_featured: Option<bool>,
}

impl ReleaseUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.genre.is_none()
            && self.cover_art_url.is_none()
            && self.status.is_none()
            && self.processing_error_reason.is_none()
            && self.is_featured.is_none()
    }
}

//! Admin review gate
//!
//! Where a PENDING_REVIEW release is finalized. Publishing clears any
//! lingering error reason; rejecting requires one.

use pressline_common::events::{EventBus, ReleaseEvent};
use pressline_common::models::{Release, ReleaseStatus, Requester};
use pressline_common::{Error, Result};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::store::CatalogStore;

/// An admin's verdict on a pending release
#[derive(Debug, Clone)]
pub enum ReviewDecision {
    Publish,
    Reject { reason: String },
}

pub struct ReviewGate {
    store: Arc<dyn CatalogStore>,
    events: EventBus,
}

impl ReviewGate {
    pub fn new(store: Arc<dyn CatalogStore>, events: EventBus) -> Self {
        Self { store, events }
    }

    /// Apply an admin decision to a release in PENDING_REVIEW.
    ///
    /// Admin only. The status write is checked against PENDING_REVIEW at
    /// write time, so a concurrent decision or a stale read cannot publish
    /// a release twice.
    pub async fn decide(
        &self,
        release_id: Uuid,
        decision: ReviewDecision,
        requester: &Requester,
    ) -> Result<Release> {
        if !requester.is_admin() {
            return Err(Error::Forbidden(
                "Only admins can approve or reject releases.".to_string(),
            ));
        }

        let release = self
            .store
            .release(release_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Release not found: {}", release_id)))?;

        if release.status != ReleaseStatus::PendingReview {
            return Err(Error::Conflict(format!(
                "Release is currently in '{}' status and cannot be approved or rejected.",
                release.status
            )));
        }

        let (new_status, reason) = match decision {
            ReviewDecision::Publish => (ReleaseStatus::Published, None),
            ReviewDecision::Reject { reason } => {
                let reason = reason.trim().to_string();
                if reason.is_empty() {
                    return Err(Error::InvalidInput(
                        "A rejection reason is required when rejecting a release.".to_string(),
                    ));
                }
                (ReleaseStatus::Rejected, Some(reason))
            }
        };

        let updated = self
            .store
            .set_status_checked(
                release_id,
                &[ReleaseStatus::PendingReview],
                new_status,
                reason.as_deref(),
            )
            .await?;

        self.events.emit(ReleaseEvent::StatusChanged {
            release_id,
            old_status: ReleaseStatus::PendingReview,
            new_status: updated.status,
            timestamp: chrono::Utc::now(),
        });
        info!(
            release_id = %release_id,
            admin_id = %requester.user_id,
            status = %updated.status,
            "Admin decision applied"
        );

        Ok(updated)
    }
}

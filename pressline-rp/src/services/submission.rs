//! Submission gate
//!
//! Entry point that takes a release from DRAFT or REJECTED into PROCESSING
//! and schedules the background run. The caller gets the PROCESSING
//! receipt back immediately and polls for the eventual outcome; submission
//! latency never includes transcoding time.

use pressline_common::events::{EventBus, ReleaseEvent};
use pressline_common::models::{ReleaseStatus, Requester};
use pressline_common::{Error, Result};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::processing::ReleaseOrchestrator;
use crate::runtime::JobRegistry;
use crate::store::CatalogStore;

/// What the submitter observes: the release is now processing
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReceipt {
    pub release_id: Uuid,
    pub status: ReleaseStatus,
}

pub struct SubmissionGate {
    store: Arc<dyn CatalogStore>,
    registry: Arc<JobRegistry>,
    orchestrator: Arc<ReleaseOrchestrator>,
    events: EventBus,
}

impl SubmissionGate {
    pub fn new(
        store: Arc<dyn CatalogStore>,
        registry: Arc<JobRegistry>,
        orchestrator: Arc<ReleaseOrchestrator>,
        events: EventBus,
    ) -> Self {
        Self {
            store,
            registry,
            orchestrator,
            events,
        }
    }

    /// Submit a release for processing.
    ///
    /// Preconditions, checked in order with no side effect on failure: the
    /// release exists, the requester owns it (or is an admin), and its
    /// status is DRAFT or REJECTED. The flip to PROCESSING is a checked
    /// write, so of two racing submits exactly one schedules a run.
    pub async fn submit(
        &self,
        release_id: Uuid,
        requester: &Requester,
    ) -> Result<SubmissionReceipt> {
        let release = self
            .store
            .release(release_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Release not found: {}", release_id)))?;

        if !requester.may_manage(&release) {
            return Err(Error::Forbidden(
                "You can only submit your own releases for processing.".to_string(),
            ));
        }

        if !release.status.is_submittable() {
            return Err(Error::Conflict(format!(
                "Release is currently in '{}' status and cannot be submitted for processing.",
                release.status
            )));
        }

        let old_status = release.status;
        let updated = match self
            .store
            .set_status_checked(
                release_id,
                &[ReleaseStatus::Draft, ReleaseStatus::Rejected],
                ReleaseStatus::Processing,
                None,
            )
            .await
        {
            Ok(release) => release,
            // Lost the race against a concurrent submit
            Err(Error::Conflict(_)) => {
                return Err(Error::Conflict(format!(
                    "Release {} is already being processed.",
                    release_id
                )));
            }
            Err(e) => return Err(e),
        };

        self.events.emit(ReleaseEvent::StatusChanged {
            release_id,
            old_status,
            new_status: updated.status,
            timestamp: chrono::Utc::now(),
        });
        info!(
            release_id = %release_id,
            user_id = %requester.user_id,
            "Release submitted for processing"
        );

        let orchestrator = Arc::clone(&self.orchestrator);
        self.registry
            .spawn_processing(release_id, async move {
                orchestrator.process_release(release_id).await;
            })
            .await;

        Ok(SubmissionReceipt {
            release_id,
            status: updated.status,
        })
    }
}

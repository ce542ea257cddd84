//! Release-level processing orchestration
//!
//! Drives one release through its background run: load release and tracks,
//! fan out per-track processing, wait for every track to settle, then write
//! the aggregate outcome back to the catalog. Stage failures are absorbed
//! by the track processor and a dead track task is converted to a failed
//! verdict here; whatever still escapes is caught at the top level and
//! turned into a REJECTED write, so a caught error never leaves a release
//! stuck in PROCESSING.

use pressline_common::events::{EventBus, ReleaseEvent};
use pressline_common::models::ReleaseStatus;
use pressline_common::Result;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::store::CatalogStore;

use super::logs::ProcessingLogSink;
use super::stage::StageRunner;
use super::track_processor::TrackProcessor;
use super::verdict::TrackVerdict;

pub struct ReleaseOrchestrator {
    store: Arc<dyn CatalogStore>,
    processor: Arc<TrackProcessor>,
    logs: Arc<dyn ProcessingLogSink>,
    events: EventBus,
}

impl ReleaseOrchestrator {
    pub fn new(
        store: Arc<dyn CatalogStore>,
        runner: Arc<dyn StageRunner>,
        logs: Arc<dyn ProcessingLogSink>,
        events: EventBus,
    ) -> Self {
        Self {
            store,
            processor: Arc::new(TrackProcessor::new(runner)),
            logs,
            events,
        }
    }

    /// Run background processing for `release_id` to completion.
    ///
    /// Never returns an error: every failure path ends in a terminal status
    /// write. Callers fire-and-forget this through the job registry.
    pub async fn process_release(&self, release_id: Uuid) {
        info!(release_id = %release_id, "Starting background processing");
        self.events.emit(ReleaseEvent::ProcessingStarted {
            release_id,
            timestamp: chrono::Utc::now(),
        });

        if let Err(e) = self.run(release_id).await {
            error!(release_id = %release_id, error = %e, "Critical error during release processing");
            self.write_outcome(
                release_id,
                ReleaseStatus::Rejected,
                Some(&format!("Critical processing error: {}", e)),
            )
            .await;
        }
    }

    async fn run(&self, release_id: Uuid) -> Result<()> {
        // Phase 1: load the release
        let Some(_release) = self.store.release(release_id).await? else {
            error!(release_id = %release_id, "Release not found for processing");
            self.write_outcome(
                release_id,
                ReleaseStatus::Rejected,
                Some("Release not found during processing."),
            )
            .await;
            return Ok(());
        };

        // Phase 2: load tracks. A release with nothing to process goes
        // straight to review.
        let tracks = self.store.tracks_for(release_id).await?;
        if tracks.is_empty() {
            warn!(release_id = %release_id, "No tracks to process, setting to PENDING_REVIEW");
            self.write_outcome(release_id, ReleaseStatus::PendingReview, None)
                .await;
            return Ok(());
        }

        info!(
            release_id = %release_id,
            track_count = tracks.len(),
            "Processing tracks"
        );

        // Phase 3: fan out one task per track, then wait for every one to
        // settle. No short-circuit: the release decision needs all
        // verdicts, and one track's death must not abort its siblings.
        let handles: Vec<_> = tracks
            .iter()
            .map(|track| {
                let processor = Arc::clone(&self.processor);
                let track = track.clone();
                tokio::spawn(async move { processor.process(&track).await })
            })
            .collect();
        let settled = futures::future::join_all(handles).await;

        let mut verdicts: Vec<TrackVerdict> = Vec::with_capacity(tracks.len());
        let mut failed_summaries: Vec<String> = Vec::new();
        for (track, result) in tracks.iter().zip(settled) {
            let verdict = match result {
                Ok(verdict) => verdict,
                Err(join_err) => {
                    error!(
                        release_id = %release_id,
                        track_id = %track.id,
                        error = %join_err,
                        "Track processing task died"
                    );
                    TrackVerdict::failed(
                        track.id,
                        format!("Unexpected processing error: {}", join_err),
                    )
                }
            };

            self.events.emit(ReleaseEvent::TrackProcessed {
                release_id,
                track_id: track.id,
                success: verdict.is_success(),
                timestamp: chrono::Utc::now(),
            });

            if !verdict.is_success() {
                failed_summaries.push(format!(
                    "Track {} ({}): {}",
                    track.title, track.id, verdict.message
                ));
            }
            verdicts.push(verdict);
        }

        // Phase 4: persist the diagnostic log, then decide. The reduction
        // is commutative, completion order of the tracks does not matter.
        let succeeded = verdicts.iter().filter(|v| v.is_success()).count();
        let failed = failed_summaries.len();
        self.logs.record(release_id, verdicts).await;

        if failed == 0 {
            info!(
                release_id = %release_id,
                succeeded,
                "All tracks processed successfully, setting to PENDING_REVIEW"
            );
            self.write_outcome(release_id, ReleaseStatus::PendingReview, None)
                .await;
        } else {
            let reason = format!(
                "Failed to process {} track(s): {}",
                failed,
                failed_summaries.join("; ")
            );
            error!(release_id = %release_id, reason = %reason, "Processing failed, setting to REJECTED");
            self.write_outcome(release_id, ReleaseStatus::Rejected, Some(&reason))
                .await;
        }

        self.events.emit(ReleaseEvent::ProcessingCompleted {
            release_id,
            succeeded,
            failed,
            timestamp: chrono::Utc::now(),
        });

        Ok(())
    }

    /// Best-effort terminal status write.
    ///
    /// The orchestrator always moves a release out of PROCESSING, so the
    /// old status in the emitted event is known without re-reading.
    async fn write_outcome(&self, release_id: Uuid, status: ReleaseStatus, reason: Option<&str>) {
        match self.store.set_status(release_id, status, reason).await {
            Ok(Some(_)) => {
                self.events.emit(ReleaseEvent::StatusChanged {
                    release_id,
                    old_status: ReleaseStatus::Processing,
                    new_status: status,
                    timestamp: chrono::Utc::now(),
                });
            }
            Ok(None) => {
                warn!(release_id = %release_id, "Status write skipped, release no longer exists");
            }
            Err(e) => {
                error!(
                    release_id = %release_id,
                    error = %e,
                    "Failed to write release outcome"
                );
            }
        }
    }
}

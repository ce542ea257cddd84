//! Per-track processing
//!
//! Runs both stages for one track and folds their outcomes into a single
//! [`TrackVerdict`]. Error isolation happens here: whatever a stage runner
//! does, the caller gets a verdict back, never an error.

use pressline_common::models::Track;
use std::sync::Arc;
use tracing::error;

use super::stage::{StageKind, StageRunner};
use super::verdict::TrackVerdict;

pub struct TrackProcessor {
    runner: Arc<dyn StageRunner>,
}

impl TrackProcessor {
    pub fn new(runner: Arc<dyn StageRunner>) -> Self {
        Self { runner }
    }

    /// Run transcode then metadata extraction for `track`.
    ///
    /// The stages run in a fixed order but independently: a failed
    /// transcode does not skip metadata extraction, so the verdict message
    /// reports both outcomes. A runner error aborts the remaining stage and
    /// becomes a failed verdict.
    pub async fn process(&self, track: &Track) -> TrackVerdict {
        let mut stage_logs = Vec::new();
        let mut overall_success = true;

        for (kind, prefix) in [
            (StageKind::Transcode, "Transcoding"),
            (StageKind::MetadataExtract, "Metadata"),
        ] {
            match self.runner.run_stage(kind, track).await {
                Ok(outcome) => {
                    stage_logs.push(format!("{}: {}", prefix, outcome.message));
                    if !outcome.success {
                        overall_success = false;
                    }
                }
                Err(e) => {
                    error!(track_id = %track.id, error = %e, "Unexpected error processing track");
                    return TrackVerdict::failed(track.id, format!("Unexpected error: {}", e));
                }
            }
        }

        if overall_success {
            TrackVerdict::success(track.id, "Track processed successfully.")
        } else {
            TrackVerdict::failed(track.id, stage_logs.join("; "))
        }
    }
}

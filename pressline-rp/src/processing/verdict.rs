//! Per-track processing outcomes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outcome of one track's processing run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerdictStatus {
    Success,
    Failed,
}

/// Diagnostic record for one track's run.
///
/// Verdicts live only in the processing log sink for the lifetime of the
/// process; the authoritative outcome is the release status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackVerdict {
    pub track_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub status: VerdictStatus,
    /// Semicolon-joined stage outcomes, or the failure description
    pub message: String,
}

impl TrackVerdict {
    pub fn success(track_id: Uuid, message: impl Into<String>) -> Self {
        Self {
            track_id,
            timestamp: Utc::now(),
            status: VerdictStatus::Success,
            message: message.into(),
        }
    }

    pub fn failed(track_id: Uuid, message: impl Into<String>) -> Self {
        Self {
            track_id,
            timestamp: Utc::now(),
            status: VerdictStatus::Failed,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == VerdictStatus::Success
    }
}

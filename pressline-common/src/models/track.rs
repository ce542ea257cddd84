//! Track records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One audio item belonging to a release.
///
/// A track lives and dies with its release; deleting the release removes
/// its tracks. `track_number` defines playback order and is unique per
/// release, though values need not be contiguous.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: Uuid,

    /// Owning release
    pub release_id: Uuid,

    pub title: String,

    /// International Standard Recording Code, when assigned
    pub isrc: Option<String>,

    pub audio_file_url: Option<String>,

    pub duration_secs: Option<u32>,

    /// Sort key within the release
    pub track_number: u32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Track {
    pub fn new(release_id: Uuid, title: String, track_number: u32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            release_id,
            title,
            isrc: None,
            audio_file_url: None,
            duration_secs: None,
            track_number,
            created_at: now,
            updated_at: now,
        }
    }
}

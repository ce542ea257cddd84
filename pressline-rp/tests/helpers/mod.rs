//! Shared helpers for pressline-rp integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use pressline_common::events::EventBus;
use pressline_common::models::{Release, Track};
use pressline_common::{Error, Result};
use pressline_rp::processing::{StageKind, StageOutcome, StageRunner};
use pressline_rp::store::{CatalogStore, MemoryCatalog};
use pressline_rp::AppState;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Zero-latency stage runner scripted from the outside.
///
/// Failures, errors and panics are keyed by track id, and scripts can be
/// changed between runs to model resubmission after a fix.
#[derive(Default)]
pub struct ScriptedRunner {
    fail_transcode: Mutex<HashSet<Uuid>>,
    fail_metadata: Mutex<HashSet<Uuid>>,
    error_on: Mutex<HashSet<Uuid>>,
    panic_on: Mutex<HashSet<Uuid>>,
    calls: Mutex<usize>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_transcode_for(&self, track_id: Uuid) {
        self.fail_transcode.lock().unwrap().insert(track_id);
    }

    pub fn fail_metadata_for(&self, track_id: Uuid) {
        self.fail_metadata.lock().unwrap().insert(track_id);
    }

    pub fn error_for(&self, track_id: Uuid) {
        self.error_on.lock().unwrap().insert(track_id);
    }

    pub fn panic_for(&self, track_id: Uuid) {
        self.panic_on.lock().unwrap().insert(track_id);
    }

    /// Drop every failure script, making all further runs succeed.
    pub fn clear_scripts(&self) {
        self.fail_transcode.lock().unwrap().clear();
        self.fail_metadata.lock().unwrap().clear();
        self.error_on.lock().unwrap().clear();
        self.panic_on.lock().unwrap().clear();
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl StageRunner for ScriptedRunner {
    async fn run_stage(&self, kind: StageKind, track: &Track) -> Result<StageOutcome> {
        *self.calls.lock().unwrap() += 1;

        if self.panic_on.lock().unwrap().contains(&track.id) {
            panic!("scripted stage panic");
        }
        if self.error_on.lock().unwrap().contains(&track.id) {
            return Err(Error::Internal("scripted stage error".to_string()));
        }

        let (failed, success_message, failure_message) = match kind {
            StageKind::Transcode => (
                self.fail_transcode.lock().unwrap().contains(&track.id),
                "Audio transcoding successful.",
                "Simulated audio transcoding failed.",
            ),
            StageKind::MetadataExtract => (
                self.fail_metadata.lock().unwrap().contains(&track.id),
                "Metadata extraction successful.",
                "Simulated metadata extraction failed.",
            ),
        };

        Ok(StageOutcome {
            success: !failed,
            message: if failed { failure_message } else { success_message }.to_string(),
        })
    }
}

/// Engine wired with a fresh in-memory catalog and the given runner.
pub fn build_state(runner: Arc<dyn StageRunner>) -> AppState {
    AppState::new(
        Arc::new(MemoryCatalog::new()),
        runner,
        EventBus::new(64),
    )
}

/// Insert a draft release with `track_count` tracks.
pub async fn seed_release(
    store: &Arc<dyn CatalogStore>,
    artist_id: Uuid,
    track_count: u32,
) -> (Release, Vec<Track>) {
    let release = store
        .insert_release(Release::new(
            artist_id,
            "Night Drive".to_string(),
            "Synthwave".to_string(),
        ))
        .await
        .unwrap();

    let mut tracks = Vec::new();
    for number in 1..=track_count {
        let track = store
            .insert_track(Track::new(
                release.id,
                format!("Track {:02}", number),
                number,
            ))
            .await
            .unwrap();
        tracks.push(track);
    }
    (release, tracks)
}

/// Drain all in-flight processing runs and return the release's settled
/// state.
pub async fn settle(state: &AppState, release_id: Uuid) -> Release {
    state.registry.shutdown().await;
    state
        .store
        .release(release_id)
        .await
        .unwrap()
        .expect("release should still exist")
}

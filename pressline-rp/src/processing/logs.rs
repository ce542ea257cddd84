//! Per-release processing verdict log
//!
//! The sink is owned by whoever builds the engine and injected into the
//! orchestrator, so tests and multi-instance deployments each get their
//! own. Contents are diagnostic only and are lost on restart; the
//! authoritative outcome is the release status.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::verdict::TrackVerdict;

#[async_trait]
pub trait ProcessingLogSink: Send + Sync {
    /// Store the verdicts of one completed run, replacing any previous
    /// run's entries for that release.
    async fn record(&self, release_id: Uuid, verdicts: Vec<TrackVerdict>);

    /// Verdicts of the most recent run, if any.
    async fn verdicts(&self, release_id: Uuid) -> Option<Vec<TrackVerdict>>;
}

/// In-memory log sink
#[derive(Default)]
pub struct MemoryLogSink {
    inner: RwLock<HashMap<Uuid, Vec<TrackVerdict>>>,
}

impl MemoryLogSink {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProcessingLogSink for MemoryLogSink {
    async fn record(&self, release_id: Uuid, verdicts: Vec<TrackVerdict>) {
        self.inner.write().await.insert(release_id, verdicts);
    }

    async fn verdicts(&self, release_id: Uuid) -> Option<Vec<TrackVerdict>> {
        self.inner.read().await.get(&release_id).cloned()
    }
}

//! Simulated per-track processing stages
//!
//! [`StageRunner`] is the seam where a real media pipeline would plug in:
//! the orchestrator and track processor only ever see the trait. The
//! shipped implementation simulates transcoding and metadata extraction
//! with configurable latency ranges and failure probabilities.

use async_trait::async_trait;
use pressline_common::config::{ProcessingConfig, StageSettings};
use pressline_common::models::Track;
use pressline_common::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{info, warn};

/// The two per-track processing stages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    Transcode,
    MetadataExtract,
}

impl StageKind {
    fn label(self) -> &'static str {
        match self {
            StageKind::Transcode => "audio transcoding",
            StageKind::MetadataExtract => "metadata extraction",
        }
    }

    fn success_message(self) -> &'static str {
        match self {
            StageKind::Transcode => "Audio transcoding successful.",
            StageKind::MetadataExtract => "Metadata extraction successful.",
        }
    }

    fn failure_message(self) -> &'static str {
        match self {
            StageKind::Transcode => "Simulated audio transcoding failed.",
            StageKind::MetadataExtract => "Simulated metadata extraction failed.",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of one stage run
#[derive(Debug, Clone)]
pub struct StageOutcome {
    pub success: bool,
    pub message: String,
}

/// One per-track processing stage.
///
/// Implementations report expected failures through `StageOutcome`; an
/// `Err` means the stage itself blew up and is converted to a failed
/// verdict by the track processor.
#[async_trait]
pub trait StageRunner: Send + Sync {
    async fn run_stage(&self, kind: StageKind, track: &Track) -> Result<StageOutcome>;
}

/// Simulated stage runner.
///
/// Each run sleeps for a uniformly drawn duration within the stage's
/// configured latency range and fails with the stage's configured
/// probability. The RNG is seedable so tests can pin the outcome sequence,
/// and delays go through tokio's clock so paused-time tests control them.
pub struct SimulatedStageRunner {
    config: ProcessingConfig,
    rng: Mutex<StdRng>,
}

impl SimulatedStageRunner {
    pub fn new(config: ProcessingConfig) -> Self {
        Self {
            config,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic runner for tests and reproducible demo runs.
    pub fn with_seed(config: ProcessingConfig, seed: u64) -> Self {
        Self {
            config,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn settings(&self, kind: StageKind) -> &StageSettings {
        match kind {
            StageKind::Transcode => &self.config.transcode,
            StageKind::MetadataExtract => &self.config.metadata_extract,
        }
    }

    /// Draw the delay first, then the failure flag, so a fixed seed yields
    /// a stable outcome sequence independent of scheduling.
    fn draw(&self, settings: &StageSettings) -> (Duration, bool) {
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let delay_ms = if settings.max_latency_ms > settings.min_latency_ms {
            rng.gen_range(settings.min_latency_ms..=settings.max_latency_ms)
        } else {
            settings.min_latency_ms
        };
        let failed = rng.gen_bool(settings.failure_probability);
        (Duration::from_millis(delay_ms), failed)
    }
}

#[async_trait]
impl StageRunner for SimulatedStageRunner {
    async fn run_stage(&self, kind: StageKind, track: &Track) -> Result<StageOutcome> {
        let (delay, failed) = self.draw(self.settings(kind));
        tokio::time::sleep(delay).await;

        if failed {
            warn!(
                track_id = %track.id,
                release_id = %track.release_id,
                "Simulated {} FAILED",
                kind
            );
            Ok(StageOutcome {
                success: false,
                message: kind.failure_message().to_string(),
            })
        } else {
            info!(
                track_id = %track.id,
                release_id = %track.release_id,
                "Simulated {} SUCCESS in {:.1}s",
                kind,
                delay.as_secs_f64()
            );
            Ok(StageOutcome {
                success: true,
                message: kind.success_message().to_string(),
            })
        }
    }
}

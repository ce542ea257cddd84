//! Simulated release processing pipeline
//!
//! The pipeline takes a release that was just flipped to PROCESSING, runs
//! both simulated stages for every track, and writes the aggregate outcome
//! back to the catalog: PENDING_REVIEW when every track passed, REJECTED
//! with a per-track reason string otherwise.

pub mod logs;
pub mod orchestrator;
pub mod stage;
pub mod track_processor;
pub mod verdict;

pub use logs::{MemoryLogSink, ProcessingLogSink};
pub use orchestrator::ReleaseOrchestrator;
pub use stage::{SimulatedStageRunner, StageKind, StageOutcome, StageRunner};
pub use track_processor::TrackProcessor;
pub use verdict::{TrackVerdict, VerdictStatus};

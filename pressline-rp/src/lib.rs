//! pressline-rp - Release Processing service
//!
//! Owns the release lifecycle state machine and the background pipeline
//! that moves a submitted release from PROCESSING to PENDING_REVIEW or
//! REJECTED. The HTTP surface, real file storage and durable persistence
//! live outside this crate; everything here talks to the catalog through
//! the [`store::CatalogStore`] port.

pub mod processing;
pub mod runtime;
pub mod services;
pub mod store;

pub use pressline_common::{Error, Result};

use pressline_common::events::EventBus;
use std::sync::Arc;

use processing::{MemoryLogSink, ProcessingLogSink, ReleaseOrchestrator, StageRunner};
use runtime::JobRegistry;
use services::{CatalogService, ReviewGate, SubmissionGate};
use store::CatalogStore;

/// Engine state shared by the gates and the background pipeline
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CatalogStore>,
    pub logs: Arc<dyn ProcessingLogSink>,
    pub registry: Arc<JobRegistry>,
    pub event_bus: EventBus,
    pub orchestrator: Arc<ReleaseOrchestrator>,
}

impl AppState {
    /// Wire the engine with an in-memory processing log sink.
    pub fn new(
        store: Arc<dyn CatalogStore>,
        runner: Arc<dyn StageRunner>,
        event_bus: EventBus,
    ) -> Self {
        Self::with_log_sink(store, runner, Arc::new(MemoryLogSink::new()), event_bus)
    }

    /// Wire the engine with a caller-owned processing log sink.
    pub fn with_log_sink(
        store: Arc<dyn CatalogStore>,
        runner: Arc<dyn StageRunner>,
        logs: Arc<dyn ProcessingLogSink>,
        event_bus: EventBus,
    ) -> Self {
        let orchestrator = Arc::new(ReleaseOrchestrator::new(
            Arc::clone(&store),
            runner,
            Arc::clone(&logs),
            event_bus.clone(),
        ));
        Self {
            store,
            logs,
            registry: Arc::new(JobRegistry::new()),
            event_bus,
            orchestrator,
        }
    }

    pub fn submission_gate(&self) -> SubmissionGate {
        SubmissionGate::new(
            Arc::clone(&self.store),
            Arc::clone(&self.registry),
            Arc::clone(&self.orchestrator),
            self.event_bus.clone(),
        )
    }

    pub fn review_gate(&self) -> ReviewGate {
        ReviewGate::new(Arc::clone(&self.store), self.event_bus.clone())
    }

    pub fn catalog(&self) -> CatalogService {
        CatalogService::new(Arc::clone(&self.store))
    }
}

//! Background job supervision
//!
//! Processing runs are fire-and-forget from the submitter's point of view,
//! but their task handles are not dropped on the floor: the registry keeps
//! them so shutdown can drain in-flight runs instead of abandoning them.
//! There is no durable ledger behind this; if the process itself dies
//! mid-run, the release stays in PROCESSING until resubmission is made
//! possible by operator intervention.

use std::collections::HashMap;
use std::future::Future;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, info};
use uuid::Uuid;

/// Tracks one in-flight processing run per release
#[derive(Default)]
pub struct JobRegistry {
    jobs: Mutex<HashMap<Uuid, JoinHandle<()>>>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a processing run for `release_id` and keep its handle.
    ///
    /// The submission gate's compare-and-swap guarantees at most one live
    /// run per release, so an existing entry is always a finished handle
    /// from an earlier run.
    pub async fn spawn_processing<F>(&self, release_id: Uuid, job: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut jobs = self.jobs.lock().await;
        jobs.retain(|_, handle| !handle.is_finished());
        jobs.insert(release_id, tokio::spawn(job));
    }

    /// Whether a processing run for `release_id` is still in flight.
    pub async fn is_running(&self, release_id: Uuid) -> bool {
        self.jobs
            .lock()
            .await
            .get(&release_id)
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Await every in-flight run. Panicked runs are logged, not propagated;
    /// the orchestrator has already written a terminal status on every
    /// non-panic path.
    pub async fn shutdown(&self) {
        let jobs: Vec<(Uuid, JoinHandle<()>)> = self.jobs.lock().await.drain().collect();
        if !jobs.is_empty() {
            info!(in_flight = jobs.len(), "Draining in-flight processing runs");
        }
        for (release_id, handle) in jobs {
            if let Err(e) = handle.await {
                error!(release_id = %release_id, error = %e, "Processing run died");
            }
        }
    }
}

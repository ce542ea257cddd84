//! Event types for the Pressline event system
//!
//! Provides shared event definitions and the EventBus used by the release
//! processing pipeline. Events are broadcast fan-out: every subscriber sees
//! every event emitted after it subscribed, and emitting with no
//! subscribers is a no-op, never an error.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::models::ReleaseStatus;

/// Pressline event types
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ReleaseEvent {
    /// Background processing began for a release
    ProcessingStarted {
        release_id: Uuid,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// One track finished its simulated processing run
    TrackProcessed {
        release_id: Uuid,
        track_id: Uuid,
        /// False when any stage failed or the track's task died
        success: bool,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A release's stored status changed
    ///
    /// Emitted by whichever gate or pipeline component performed the write.
    StatusChanged {
        release_id: Uuid,
        old_status: ReleaseStatus,
        new_status: ReleaseStatus,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Background processing finished and the outcome was written
    ProcessingCompleted {
        release_id: Uuid,
        succeeded: usize,
        failed: usize,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

/// Broadcast channel for [`ReleaseEvent`]s.
///
/// Cloning shares the underlying channel; clones and their subscribers all
/// see the same event stream. Slow subscribers that fall more than
/// `capacity` events behind start losing the oldest ones.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<ReleaseEvent>,
}

impl EventBus {
    /// Creates a new EventBus buffering up to `capacity` events per
    /// subscriber.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to all future events.
    pub fn subscribe(&self) -> broadcast::Receiver<ReleaseEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all current subscribers.
    ///
    /// Returns the number of subscribers that received it (zero when nobody
    /// is listening).
    pub fn emit(&self, event: ReleaseEvent) -> usize {
        self.tx.send(event).unwrap_or(0)
    }
}

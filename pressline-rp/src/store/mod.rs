//! Catalog persistence boundary
//!
//! Everything the engine knows about stored releases and tracks goes
//! through [`CatalogStore`]. The port is deliberately narrow: point reads,
//! status writes (plain and compare-and-swap), the CRUD surface the artist
//! and admin workflows need, and the public catalogue queries. Backends
//! must be linearizable per release id, so a status write is fully visible
//! to the next read of that release.

use async_trait::async_trait;
use pressline_common::models::{Release, ReleaseStatus, ReleaseUpdate, Track};
use pressline_common::Result;
use uuid::Uuid;

mod memory;

pub use memory::MemoryCatalog;

/// Filter for public catalogue browsing
#[derive(Debug, Clone, Default)]
pub struct PublishedFilter {
    /// Case-insensitive substring match against title or genre
    pub search: Option<String>,
    /// Restrict to featured releases
    pub featured_only: bool,
}

#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Fetch one release with its derived track count.
    async fn release(&self, id: Uuid) -> Result<Option<Release>>;

    /// Tracks of a release, ordered by track number.
    async fn tracks_for(&self, release_id: Uuid) -> Result<Vec<Track>>;

    /// Unconditional status write, last write wins.
    ///
    /// `reason` replaces the stored error reason wholesale; `None` clears
    /// it. Returns `None` when the release does not exist.
    async fn set_status(
        &self,
        id: Uuid,
        status: ReleaseStatus,
        reason: Option<&str>,
    ) -> Result<Option<Release>>;

    /// Status write conditioned on the current status.
    ///
    /// The read-check-write happens atomically with respect to other store
    /// calls for the same id. A release whose current status is not in
    /// `expected` yields `Error::Conflict` carrying the observed status; an
    /// unknown id yields `Error::NotFound`.
    async fn set_status_checked(
        &self,
        id: Uuid,
        expected: &[ReleaseStatus],
        status: ReleaseStatus,
        reason: Option<&str>,
    ) -> Result<Release>;

    async fn insert_release(&self, release: Release) -> Result<Release>;

    /// Apply a partial update. Returns `None` when the release is unknown.
    async fn update_release(&self, id: Uuid, patch: ReleaseUpdate) -> Result<Option<Release>>;

    /// Delete a release and, cascading, its tracks. Returns whether a
    /// release was actually removed.
    async fn delete_release(&self, id: Uuid) -> Result<bool>;

    /// Add a track to an existing release. Fails on an unknown release or a
    /// duplicate track number.
    async fn insert_track(&self, track: Track) -> Result<Track>;

    /// All releases, newest first.
    async fn list_all(&self) -> Result<Vec<Release>>;

    /// One artist's releases, newest first.
    async fn list_by_artist(&self, artist_id: Uuid) -> Result<Vec<Release>>;

    /// Published releases matching the filter, newest first.
    async fn list_published(&self, filter: &PublishedFilter) -> Result<Vec<Release>>;
}

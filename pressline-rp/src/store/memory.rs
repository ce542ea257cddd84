//! In-memory catalog store
//!
//! Reference [`CatalogStore`] backend. One `RwLock` guards the whole
//! catalog, which makes every operation an atomic read-modify-write and
//! gives the per-id linearizability the port requires.

use async_trait::async_trait;
use pressline_common::models::{Release, ReleaseStatus, ReleaseUpdate, Track};
use pressline_common::{Error, Result};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::{CatalogStore, PublishedFilter};

#[derive(Default)]
struct CatalogMaps {
    releases: HashMap<Uuid, Release>,
    /// Tracks keyed by release id, kept sorted by track number
    tracks: HashMap<Uuid, Vec<Track>>,
}

impl CatalogMaps {
    fn with_track_count(&self, release: &Release) -> Release {
        let mut out = release.clone();
        out.track_count = self.tracks.get(&release.id).map_or(0, Vec::len);
        out
    }
}

/// In-memory catalog, cheap to construct per test or per demo run
#[derive(Default)]
pub struct MemoryCatalog {
    inner: RwLock<CatalogMaps>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
    async fn release(&self, id: Uuid) -> Result<Option<Release>> {
        let maps = self.inner.read().await;
        Ok(maps.releases.get(&id).map(|r| maps.with_track_count(r)))
    }

    async fn tracks_for(&self, release_id: Uuid) -> Result<Vec<Track>> {
        let maps = self.inner.read().await;
        Ok(maps.tracks.get(&release_id).cloned().unwrap_or_default())
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: ReleaseStatus,
        reason: Option<&str>,
    ) -> Result<Option<Release>> {
        let mut maps = self.inner.write().await;
        let Some(release) = maps.releases.get_mut(&id) else {
            return Ok(None);
        };
        let transition = release.set_status(status, reason.map(String::from));
        debug!(
            release_id = %id,
            old_status = %transition.old_status,
            new_status = %transition.new_status,
            "Release status written"
        );
        let release = release.clone();
        Ok(Some(maps.with_track_count(&release)))
    }

    async fn set_status_checked(
        &self,
        id: Uuid,
        expected: &[ReleaseStatus],
        status: ReleaseStatus,
        reason: Option<&str>,
    ) -> Result<Release> {
        let mut maps = self.inner.write().await;
        let Some(release) = maps.releases.get_mut(&id) else {
            return Err(Error::NotFound(format!("Release not found: {}", id)));
        };
        if !expected.contains(&release.status) {
            return Err(Error::Conflict(format!(
                "Release {} is in '{}' status",
                id, release.status
            )));
        }
        let transition = release.set_status(status, reason.map(String::from));
        debug!(
            release_id = %id,
            old_status = %transition.old_status,
            new_status = %transition.new_status,
            "Release status written (checked)"
        );
        let release = release.clone();
        Ok(maps.with_track_count(&release))
    }

    async fn insert_release(&self, release: Release) -> Result<Release> {
        let mut maps = self.inner.write().await;
        let stored = maps.with_track_count(&release);
        maps.releases.insert(release.id, release);
        Ok(stored)
    }

    async fn update_release(&self, id: Uuid, patch: ReleaseUpdate) -> Result<Option<Release>> {
        let mut maps = self.inner.write().await;
        let Some(release) = maps.releases.get_mut(&id) else {
            return Ok(None);
        };

        if !patch.is_empty() {
            if let Some(title) = patch.title {
                release.title = title;
            }
            if let Some(genre) = patch.genre {
                release.genre = genre;
            }
            if let Some(url) = patch.cover_art_url {
                release.cover_art_url = Some(url);
            }
            if let Some(status) = patch.status {
                release.status = status;
            }
            if let Some(featured) = patch.is_featured {
                release.is_featured = featured;
            }
            // A stale rejection reason must not survive an ordinary edit:
            // keep it only when the patch supplies one or moves the release
            // to REJECTED itself.
            if patch.processing_error_reason.is_some() {
                release.processing_error_reason = patch.processing_error_reason;
            } else if patch.status != Some(ReleaseStatus::Rejected) {
                release.processing_error_reason = None;
            }
            release.updated_at = chrono::Utc::now();
        }

        let release = release.clone();
        Ok(Some(maps.with_track_count(&release)))
    }

    async fn delete_release(&self, id: Uuid) -> Result<bool> {
        let mut maps = self.inner.write().await;
        maps.tracks.remove(&id);
        Ok(maps.releases.remove(&id).is_some())
    }

    async fn insert_track(&self, track: Track) -> Result<Track> {
        let mut maps = self.inner.write().await;
        if !maps.releases.contains_key(&track.release_id) {
            return Err(Error::NotFound(format!(
                "Release not found: {}",
                track.release_id
            )));
        }
        let tracks = maps.tracks.entry(track.release_id).or_default();
        if tracks.iter().any(|t| t.track_number == track.track_number) {
            return Err(Error::InvalidInput(format!(
                "Track number {} already exists on release {}",
                track.track_number, track.release_id
            )));
        }
        tracks.push(track.clone());
        tracks.sort_by_key(|t| t.track_number);
        Ok(track)
    }

    async fn list_all(&self) -> Result<Vec<Release>> {
        let maps = self.inner.read().await;
        Ok(newest_first(maps.releases.values().map(|r| maps.with_track_count(r))))
    }

    async fn list_by_artist(&self, artist_id: Uuid) -> Result<Vec<Release>> {
        let maps = self.inner.read().await;
        Ok(newest_first(
            maps.releases
                .values()
                .filter(|r| r.artist_id == artist_id)
                .map(|r| maps.with_track_count(r)),
        ))
    }

    async fn list_published(&self, filter: &PublishedFilter) -> Result<Vec<Release>> {
        let maps = self.inner.read().await;
        let needle = filter.search.as_deref().map(str::to_lowercase);
        Ok(newest_first(
            maps.releases
                .values()
                .filter(|r| r.status == ReleaseStatus::Published)
                .filter(|r| !filter.featured_only || r.is_featured)
                .filter(|r| match &needle {
                    Some(n) => {
                        r.title.to_lowercase().contains(n) || r.genre.to_lowercase().contains(n)
                    }
                    None => true,
                })
                .map(|r| maps.with_track_count(r)),
        ))
    }
}

fn newest_first(releases: impl Iterator<Item = Release>) -> Vec<Release> {
    let mut out: Vec<Release> = releases.collect();
    out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    out
}

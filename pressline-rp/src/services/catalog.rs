//! Read-side catalogue services and release deletion

use pressline_common::models::{Release, ReleaseStatus, Requester, Track};
use pressline_common::{Error, Result};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::store::{CatalogStore, PublishedFilter};

pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub async fn release(&self, id: Uuid) -> Result<Release> {
        self.store
            .release(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Release not found: {}", id)))
    }

    pub async fn tracks(&self, release_id: Uuid) -> Result<Vec<Track>> {
        self.store.tracks_for(release_id).await
    }

    /// The releases a dashboard shows: everything for admins, own releases
    /// for artists.
    pub async fn dashboard(&self, requester: &Requester) -> Result<Vec<Release>> {
        if requester.is_admin() {
            self.store.list_all().await
        } else {
            self.store.list_by_artist(requester.user_id).await
        }
    }

    /// Public catalogue browse, published releases only.
    pub async fn browse_published(&self, filter: &PublishedFilter) -> Result<Vec<Release>> {
        self.store.list_published(filter).await
    }

    /// Published-only point read for public release pages.
    pub async fn published_release(&self, id: Uuid) -> Result<Release> {
        let release = self.release(id).await?;
        if release.status != ReleaseStatus::Published {
            return Err(Error::NotFound(format!("Release not found: {}", id)));
        }
        Ok(release)
    }

    /// Delete a release and its tracks. Owner or admin only.
    pub async fn delete_release(&self, id: Uuid, requester: &Requester) -> Result<()> {
        let release = self.release(id).await?;
        if !requester.may_manage(&release) {
            return Err(Error::Forbidden(
                "You can only delete your own releases.".to_string(),
            ));
        }
        self.store.delete_release(id).await?;
        info!(release_id = %id, user_id = %requester.user_id, "Release deleted");
        Ok(())
    }
}

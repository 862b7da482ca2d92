//! Seam for the external product synchronization job.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("product sync is not configured")]
    NotConfigured,

    #[error("{0}")]
    Failed(String),
}

/// Contract of the external job that pulls products from the upstream source.
#[async_trait]
pub trait ProductSync: Send + Sync {
    /// Pulls upstream products and returns how many records were synced.
    async fn sync_products(&self) -> Result<u64, SyncError>;

    async fn clean_old_images(&self) -> Result<(), SyncError>;
}

/// Used when no sync job is wired in; every run reports a failure.
#[derive(Debug, Default, Clone)]
pub struct UnconfiguredSync;

#[async_trait]
impl ProductSync for UnconfiguredSync {
    async fn sync_products(&self) -> Result<u64, SyncError> {
        Err(SyncError::NotConfigured)
    }

    async fn clean_old_images(&self) -> Result<(), SyncError> {
        Err(SyncError::NotConfigured)
    }
}

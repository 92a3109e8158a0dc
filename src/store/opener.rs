//! Asynchronous store opening.
//!
//! The bootstrap only sees [`StoreOpener`]. Tests swap in spies or gated
//! openers to observe when (and whether) the store is opened.

use std::future::Future;
use std::path::Path;

use crate::store::db::{Store, StoreInitError};

/// Opens the store rooted at a workspace.
pub trait StoreOpener: Send + Sync {
    /// Resolves once the store and all its partitions are ready.
    fn open(&self, workspace: &Path) -> impl Future<Output = Result<Store, StoreInitError>> + Send;
}

/// Opens the sled database on the blocking pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct SledOpener;

impl StoreOpener for SledOpener {
    async fn open(&self, workspace: &Path) -> Result<Store, StoreInitError> {
        let workspace = workspace.to_path_buf();
        tokio::task::spawn_blocking(move || Store::open_blocking(&workspace)).await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sled_opener_opens_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = SledOpener.open(dir.path()).await.unwrap();
        assert!(store.partition("datasets").is_some());
    }
}

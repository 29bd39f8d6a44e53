//! Snapshot store trait and error types

use crate::storage::SnapshotId;
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Snapshot already exists: {0}")]
    SnapshotExists(String),

    #[error("Snapshot not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for store operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for snapshot store backends
///
/// The crawl engine is the sole writer and the replay layer the sole
/// reader, so the interface is split along those lines. Implementations
/// must never overwrite an existing page file; asset files with colliding
/// basenames may be replaced within a single crawl.
pub trait SnapshotStore {
    /// Checks whether the snapshot directory for this identity exists
    fn snapshot_exists(&self, id: &SnapshotId) -> StorageResult<bool>;

    /// Writes a page's final HTML
    ///
    /// `page_rel` is the page path relative to the snapshot's base path
    /// (empty for the seed page). Returns the path of the written index
    /// file. Fails with `SnapshotExists` if the page was already written.
    fn write_page(
        &self,
        id: &SnapshotId,
        page_rel: &[String],
        html: &[u8],
    ) -> StorageResult<PathBuf>;

    /// Writes one fetched asset under the page's assets directory
    ///
    /// A later asset with the same basename replaces the earlier file.
    fn write_asset(
        &self,
        id: &SnapshotId,
        page_rel: &[String],
        filename: &str,
        bytes: &[u8],
    ) -> StorageResult<PathBuf>;

    /// Lists snapshot timestamps under a `"domain"` or `"domain/path"` key
    ///
    /// Returns the sorted timestamp directory names found as immediate
    /// subdirectories; an empty list if the path does not exist.
    fn list_snapshots(&self, key: &str) -> StorageResult<Vec<String>>;

    /// Lists every snapshot in the store, keyed by `"domain[/path]"`
    ///
    /// Any 14-character all-digit directory name is treated as a
    /// timestamp marker; timestamps per key are sorted.
    fn list_all_snapshots(&self) -> StorageResult<BTreeMap<String, Vec<String>>>;

    /// Reads the stored HTML of a snapshot's root page
    fn read_snapshot(
        &self,
        domain: &str,
        path: Option<&str>,
        timestamp: &str,
    ) -> StorageResult<Vec<u8>>;
}

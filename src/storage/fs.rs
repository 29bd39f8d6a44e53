//! Filesystem snapshot store

use crate::storage::layout::{
    asset_path, is_timestamp, page_index_path, read_path, snapshot_dir,
};
use crate::storage::traits::{SnapshotStore, StorageError, StorageResult};
use crate::storage::SnapshotId;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Snapshot store backed by a directory tree on disk
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Creates a store rooted at the given directory
    ///
    /// The directory is created lazily on first write, so constructing a
    /// store never touches the filesystem.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of the store
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a `"domain[/path]"` listing key to an absolute directory
    ///
    /// Empty, `.` and `..` segments are dropped so a key can never escape
    /// the store root.
    fn key_dir(&self, key: &str) -> PathBuf {
        let mut dir = self.root.clone();
        for segment in key
            .split('/')
            .filter(|s| !s.is_empty() && *s != "." && *s != "..")
        {
            dir.push(segment);
        }
        dir
    }

    fn write_file(&self, path: &Path, bytes: &[u8]) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, bytes)?;
        Ok(())
    }
}

impl SnapshotStore for FsStore {
    fn snapshot_exists(&self, id: &SnapshotId) -> StorageResult<bool> {
        Ok(self.root.join(snapshot_dir(id)).is_dir())
    }

    fn write_page(
        &self,
        id: &SnapshotId,
        page_rel: &[String],
        html: &[u8],
    ) -> StorageResult<PathBuf> {
        let path = self.root.join(page_index_path(id, page_rel));
        if path.exists() {
            return Err(StorageError::SnapshotExists(path.display().to_string()));
        }
        self.write_file(&path, html)?;
        Ok(path)
    }

    fn write_asset(
        &self,
        id: &SnapshotId,
        page_rel: &[String],
        filename: &str,
        bytes: &[u8],
    ) -> StorageResult<PathBuf> {
        let path = self.root.join(asset_path(id, page_rel, filename));
        self.write_file(&path, bytes)?;
        Ok(path)
    }

    fn list_snapshots(&self, key: &str) -> StorageResult<Vec<String>> {
        let dir = self.key_dir(key);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            // A key nobody has archived yet is an empty set, not an error
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut timestamps = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if is_timestamp(&name) {
                timestamps.push(name);
            }
        }
        timestamps.sort();
        Ok(timestamps)
    }

    fn list_all_snapshots(&self) -> StorageResult<BTreeMap<String, Vec<String>>> {
        let mut all = BTreeMap::new();
        if self.root.is_dir() {
            let mut key = Vec::new();
            walk_for_timestamps(&self.root, &mut key, &mut all)?;
        }
        for timestamps in all.values_mut() {
            timestamps.sort();
        }
        Ok(all)
    }

    fn read_snapshot(
        &self,
        domain: &str,
        path: Option<&str>,
        timestamp: &str,
    ) -> StorageResult<Vec<u8>> {
        let file = self.root.join(read_path(domain, path, timestamp));
        match fs::read(&file) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(file.display().to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Recursively collects timestamp directories, keyed by their parent path
///
/// Does not descend into timestamp directories themselves, so page
/// subdirectories inside a snapshot are never mistaken for store keys.
fn walk_for_timestamps(
    dir: &Path,
    key: &mut Vec<String>,
    out: &mut BTreeMap<String, Vec<String>>,
) -> StorageResult<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_timestamp(&name) {
            out.entry(key.join("/")).or_default().push(name);
        } else {
            key.push(name);
            walk_for_timestamps(&entry.path(), key, out)?;
            key.pop();
        }
    }
    Ok(())
}

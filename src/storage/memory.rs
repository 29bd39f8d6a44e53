//! In-memory snapshot store
//!
//! Shares the on-disk layout's path computation so the directory shape is
//! identical to `FsStore`, but keeps everything in a map. Used in tests to
//! exercise the crawl engine without touching the filesystem.

use crate::storage::layout::{
    asset_path, is_timestamp, page_index_path, read_path, snapshot_dir,
};
use crate::storage::traits::{SnapshotStore, StorageError, StorageResult};
use crate::storage::SnapshotId;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Snapshot store backed by an in-memory map of path -> bytes
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: Mutex<BTreeMap<PathBuf, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored bytes for a path, if present
    pub fn file(&self, path: &Path) -> Option<Vec<u8>> {
        self.files.lock().unwrap().get(path).cloned()
    }

    /// All stored file paths, in sorted order
    pub fn paths(&self) -> Vec<PathBuf> {
        self.files.lock().unwrap().keys().cloned().collect()
    }

    /// Number of stored files
    pub fn len(&self) -> usize {
        self.files.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.lock().unwrap().is_empty()
    }
}

impl SnapshotStore for MemoryStore {
    fn snapshot_exists(&self, id: &SnapshotId) -> StorageResult<bool> {
        let prefix = snapshot_dir(id);
        let files = self.files.lock().unwrap();
        Ok(files.keys().any(|path| path.starts_with(&prefix)))
    }

    fn write_page(
        &self,
        id: &SnapshotId,
        page_rel: &[String],
        html: &[u8],
    ) -> StorageResult<PathBuf> {
        let path = page_index_path(id, page_rel);
        let mut files = self.files.lock().unwrap();
        if files.contains_key(&path) {
            return Err(StorageError::SnapshotExists(path.display().to_string()));
        }
        files.insert(path.clone(), html.to_vec());
        Ok(path)
    }

    fn write_asset(
        &self,
        id: &SnapshotId,
        page_rel: &[String],
        filename: &str,
        bytes: &[u8],
    ) -> StorageResult<PathBuf> {
        let path = asset_path(id, page_rel, filename);
        self.files
            .lock()
            .unwrap()
            .insert(path.clone(), bytes.to_vec());
        Ok(path)
    }

    fn list_snapshots(&self, key: &str) -> StorageResult<Vec<String>> {
        let key_segments: Vec<&str> = key.split('/').filter(|s| !s.is_empty()).collect();
        let files = self.files.lock().unwrap();

        let mut timestamps: Vec<String> = Vec::new();
        for path in files.keys() {
            let segments: Vec<String> = path
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            if segments.len() <= key_segments.len() {
                continue;
            }
            if !segments
                .iter()
                .zip(&key_segments)
                .all(|(a, b)| a.as_str() == *b)
            {
                continue;
            }
            let candidate = &segments[key_segments.len()];
            if is_timestamp(candidate) && !timestamps.contains(candidate) {
                timestamps.push(candidate.clone());
            }
        }
        timestamps.sort();
        Ok(timestamps)
    }

    fn list_all_snapshots(&self) -> StorageResult<BTreeMap<String, Vec<String>>> {
        let files = self.files.lock().unwrap();
        let mut all: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for path in files.keys() {
            let segments: Vec<String> = path
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            if let Some(pos) = segments.iter().position(|s| is_timestamp(s)) {
                let key = segments[..pos].join("/");
                let entry = all.entry(key).or_default();
                if !entry.contains(&segments[pos]) {
                    entry.push(segments[pos].clone());
                }
            }
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
        let file = read_path(domain, path, timestamp);
        self.files
            .lock()
            .unwrap()
            .get(&file)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(file.display().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(timestamp: &str) -> SnapshotId {
        SnapshotId::new(
            "ex.com".to_string(),
            vec!["blog".to_string()],
            timestamp.to_string(),
        )
    }

    #[test]
    fn test_write_and_read_page() {
        let store = MemoryStore::new();
        store.write_page(&id("20260829120000"), &[], b"<html></html>").unwrap();

        let bytes = store
            .read_snapshot("ex.com", Some("blog"), "20260829120000")
            .unwrap();
        assert_eq!(bytes, b"<html></html>");
    }

    #[test]
    fn test_write_page_refuses_overwrite() {
        let store = MemoryStore::new();
        let id = id("20260829120000");
        store.write_page(&id, &[], b"first").unwrap();
        assert!(matches!(
            store.write_page(&id, &[], b"second"),
            Err(StorageError::SnapshotExists(_))
        ));
    }

    #[test]
    fn test_layout_matches_fs_store() {
        let store = MemoryStore::new();
        let id = id("20260829120000");
        store.write_page(&id, &["post1".to_string()], b"x").unwrap();
        store.write_asset(&id, &[], "logo.png", b"img").unwrap();

        let paths = store.paths();
        assert!(paths.contains(&PathBuf::from(
            "ex.com/blog/20260829120000/post1/index.html"
        )));
        assert!(paths.contains(&PathBuf::from(
            "ex.com/blog/20260829120000/assets/logo.png"
        )));
    }

    #[test]
    fn test_list_snapshots() {
        let store = MemoryStore::new();
        store.write_page(&id("20260829120001"), &[], b"a").unwrap();
        store.write_page(&id("20260829120005"), &[], b"b").unwrap();

        let timestamps = store.list_snapshots("ex.com/blog").unwrap();
        assert_eq!(timestamps, vec!["20260829120001", "20260829120005"]);
        assert!(store.list_snapshots("missing.example").unwrap().is_empty());
    }

    #[test]
    fn test_list_all_snapshots() {
        let store = MemoryStore::new();
        store.write_page(&id("20260829120000"), &[], b"a").unwrap();
        let other = SnapshotId::new("other.com".to_string(), vec![], "20260829130000".to_string());
        store.write_page(&other, &[], b"b").unwrap();

        let all = store.list_all_snapshots().unwrap();
        assert_eq!(all["ex.com/blog"], vec!["20260829120000"]);
        assert_eq!(all["other.com"], vec!["20260829130000"]);
    }

    #[test]
    fn test_read_snapshot_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.read_snapshot("ex.com", None, "20260829120000"),
            Err(StorageError::NotFound(_))
        ));
    }
}

//! Archive service operations
//!
//! The operations a request-handling layer (HTTP endpoints, CLI, ...)
//! calls into. Network plumbing, JSON encoding, and static file serving
//! of archived assets live in that outer layer, not here.

use crate::config::Config;
use crate::crawler::{CrawlEngine, CrawlRequest};
use crate::storage::{generate_timestamp, SnapshotStore};
use crate::{Result, UrlError};
use std::collections::BTreeMap;
use std::path::PathBuf;
use url::Url;

/// Metadata identifying a fully written snapshot
#[derive(Debug, Clone)]
pub struct ArchiveOutcome {
    pub domain: String,
    pub timestamp: String,
    pub root_index_path: PathBuf,
}

/// Runs one full crawl of a seed URL into a fresh snapshot
///
/// Returns once every page and asset of the snapshot has been written.
/// A seed failure surfaces as a single error carrying the original
/// cause's message; no partial-success reporting is produced.
pub async fn start_archive<S: SnapshotStore>(
    config: &Config,
    store: &S,
    seed: &str,
) -> Result<ArchiveOutcome> {
    let seed_url = Url::parse(seed).map_err(|e| UrlError::Parse(e.to_string()))?;
    let request = CrawlRequest::new(seed_url, generate_timestamp())?;
    let domain = request.snapshot.domain.clone();
    let timestamp = request.snapshot.timestamp.clone();

    tracing::info!(
        "Archiving {} as {}/{}",
        seed,
        request.snapshot.store_key(),
        timestamp
    );

    let mut engine = CrawlEngine::new(config, store, request)?;
    let root_index_path = engine.run().await?;

    Ok(ArchiveOutcome {
        domain,
        timestamp,
        root_index_path,
    })
}

/// Lists snapshot timestamps under a `"domain[/path]"` key
pub fn list_snapshots<S: SnapshotStore>(store: &S, key: &str) -> Result<Vec<String>> {
    Ok(store.list_snapshots(key)?)
}

/// Lists every snapshot in the store, keyed by `"domain[/path]"`
pub fn list_all_snapshots<S: SnapshotStore>(store: &S) -> Result<BTreeMap<String, Vec<String>>> {
    Ok(store.list_all_snapshots()?)
}

/// Reads the stored HTML of a snapshot's root page
pub fn read_snapshot<S: SnapshotStore>(
    store: &S,
    domain: &str,
    path: Option<&str>,
    timestamp: &str,
) -> Result<Vec<u8>> {
    Ok(store.read_snapshot(domain, path, timestamp)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[tokio::test]
    async fn test_start_archive_rejects_invalid_seed() {
        let config = Config::default();
        let store = MemoryStore::new();

        assert!(start_archive(&config, &store, "not a url").await.is_err());
        assert!(start_archive(&config, &store, "ftp://ex.com/").await.is_err());
        assert!(store.is_empty());
    }
}

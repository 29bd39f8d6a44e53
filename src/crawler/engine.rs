//! Crawl engine - recursive same-origin traversal
//!
//! Depth-first traversal from a seed URL with a run-scoped VisitedSet.
//! The set is keyed on normalized path segments, not raw URL strings, so
//! every URL variant that lands in the same page directory (trailing
//! slash, duplicate slashes, query string) is a single crawl target and
//! each page directory is written at most once per run.
//! Per page the pipeline is strict: fetch -> extract original anchors ->
//! recurse into same-origin children -> rewrite assets -> rewrite links ->
//! write the final HTML. Recursion always uses the original, pre-rewrite
//! anchors; a page's own write happens after its children were crawled.
//!
//! Scheduling is single-threaded and sequential; nothing is spawned and
//! the crawl future is deliberately not `Send`. Concurrent archive
//! requests are safe because each run owns its VisitedSet and writes to a
//! distinct timestamp directory.

use crate::config::Config;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::parser::extract_anchors;
use crate::rewrite::{rewrite_assets, rewrite_links};
use crate::storage::{SnapshotId, SnapshotStore, StorageError};
use crate::url::{extract_host, is_same_origin, path_segments, relative_to_base};
use crate::{PagevaultError, Result, UrlError};
use std::collections::HashSet;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::time::Duration;
use url::Url;

/// One archive request derived from a seed URL
///
/// The seed's host becomes the snapshot domain and its path the snapshot
/// base path, against which all replay links are relativized.
#[derive(Debug, Clone)]
pub struct CrawlRequest {
    pub seed: Url,
    pub snapshot: SnapshotId,
}

impl CrawlRequest {
    /// Builds a request from an absolute HTTP(S) seed URL
    pub fn new(mut seed: Url, timestamp: String) -> std::result::Result<Self, UrlError> {
        if seed.scheme() != "http" && seed.scheme() != "https" {
            return Err(UrlError::InvalidScheme(seed.scheme().to_string()));
        }
        let domain = extract_host(&seed).ok_or(UrlError::MissingHost)?;
        seed.set_fragment(None);
        let base = path_segments(seed.path());
        Ok(Self {
            seed,
            snapshot: SnapshotId::new(domain, base, timestamp),
        })
    }
}

/// Outcome of visiting one node of the crawl tree
#[derive(Debug)]
pub enum PageOutcome {
    /// Page fetched, rewritten, and written at the given index path
    Archived(PathBuf),

    /// URL was already processed in this run; nothing was fetched
    AlreadyVisited,

    /// Node lies beyond the depth bound; nothing was fetched
    DepthExceeded,
}

/// Recursive crawler writing one snapshot through an injected store
pub struct CrawlEngine<'a, S: SnapshotStore> {
    config: &'a Config,
    store: &'a S,
    fetcher: Fetcher,
    request: CrawlRequest,
    visited: HashSet<String>,
}

impl<'a, S: SnapshotStore> CrawlEngine<'a, S> {
    pub fn new(config: &'a Config, store: &'a S, request: CrawlRequest) -> Result<Self> {
        let fetcher = Fetcher::new(
            &config.user_agent,
            Duration::from_secs(config.archiver.fetch_timeout_secs),
        )?;
        Ok(Self {
            config,
            store,
            fetcher,
            request,
            visited: HashSet::new(),
        })
    }

    /// Runs the crawl to completion
    ///
    /// Returns the path of the seed page's written `index.html`. A seed
    /// failure (fetch error, or a storage error anywhere in the tree)
    /// fails the whole request; if the seed fetch fails, nothing has been
    /// written to the store.
    pub async fn run(&mut self) -> Result<PathBuf> {
        if self.store.snapshot_exists(&self.request.snapshot)? {
            // Second-granularity timestamps can collide; refuse rather
            // than overwrite an existing snapshot.
            return Err(StorageError::SnapshotExists(
                format!(
                    "{}/{}",
                    self.request.snapshot.store_key(),
                    self.request.snapshot.timestamp
                ),
            )
            .into());
        }

        let seed = self.request.seed.clone();
        let outcome = self.crawl_page(seed, 0).await?;
        match outcome {
            PageOutcome::Archived(path) => Ok(path),
            // Unreachable: depth 0 with an empty VisitedSet always crawls
            outcome => Err(PagevaultError::Rewrite {
                url: self.request.seed.to_string(),
                message: format!("seed page was not archived: {:?}", outcome),
            }),
        }
    }

    /// Visits one node of the crawl tree
    ///
    /// Returns `Err` for this page's own fetch failure and for storage
    /// failures. The recursion loop below catches child fetch errors so a
    /// failed subtree never poisons its siblings or parent, while storage
    /// errors propagate and abort the request.
    fn crawl_page(
        &mut self,
        url: Url,
        depth: u32,
    ) -> Pin<Box<dyn Future<Output = Result<PageOutcome>> + '_>> {
        Box::pin(async move {
            if depth > self.config.archiver.max_depth {
                return Ok(PageOutcome::DepthExceeded);
            }
            if !self.visited.insert(visit_key(&url)) {
                tracing::debug!("Already visited, skipping: {}", url);
                return Ok(PageOutcome::AlreadyVisited);
            }

            tracing::debug!("Fetching {} at depth {}", url, depth);
            let body = self.fetcher.fetch_text(&url).await?;

            // Recurse using the original anchors, before any rewriting.
            if depth < self.config.archiver.max_depth {
                let children = self.same_origin_anchors(&body, &url);
                for child in children {
                    match self.crawl_page(child.clone(), depth + 1).await {
                        Ok(_) => {}
                        Err(PagevaultError::Fetch(e)) => {
                            tracing::warn!("Abandoning subtree at {}: {}", child, e);
                        }
                        Err(e) => return Err(e),
                    }
                }
            }

            let page_rel = relative_to_base(url.path(), &self.request.snapshot.path);
            let html = rewrite_assets(
                &body,
                &url,
                &page_rel,
                &self.fetcher,
                self.store,
                &self.request.snapshot,
            )
            .await?;
            let html = rewrite_links(&html, &url, &self.request.snapshot)?;

            let path = self
                .store
                .write_page(&self.request.snapshot, &page_rel, html.as_bytes())?;
            tracing::info!("Archived {} -> {}", url, path.display());
            Ok(PageOutcome::Archived(path))
        })
    }

    /// Same-origin anchors of a page, in document order
    fn same_origin_anchors(&self, html: &str, page_url: &Url) -> Vec<Url> {
        extract_anchors(html, page_url)
            .into_iter()
            .filter(|anchor| is_same_origin(anchor, &self.request.snapshot.domain))
            .collect()
    }
}

/// Key under which a URL is recorded in the VisitedSet
///
/// The key is the URL's normalized path segments. The store addresses a
/// page by those same segments, so any two URLs with the same key would
/// collide on one `index.html`; collapsing them here keeps the store's
/// write-once guarantee intact. `https://x/blog`, `https://x/blog/` and
/// `https://x/blog?page=2` all share a key. The host is not part of the
/// key because traversal never leaves the snapshot domain.
fn visit_key(url: &Url) -> String {
    path_segments(url.path()).join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crawl_request_derives_identity() {
        let seed = Url::parse("https://ex.com/blog/archive#latest").unwrap();
        let request = CrawlRequest::new(seed, "20260829120000".to_string()).unwrap();

        assert_eq!(request.snapshot.domain, "ex.com");
        assert_eq!(request.snapshot.path, vec!["blog", "archive"]);
        assert_eq!(request.snapshot.timestamp, "20260829120000");
        assert_eq!(request.seed.fragment(), None);
    }

    #[test]
    fn test_crawl_request_root_seed_has_empty_base() {
        let seed = Url::parse("https://ex.com/").unwrap();
        let request = CrawlRequest::new(seed, "20260829120000".to_string()).unwrap();
        assert!(request.snapshot.path.is_empty());
        assert_eq!(request.snapshot.store_key(), "ex.com");
    }

    #[test]
    fn test_crawl_request_rejects_non_http_scheme() {
        let seed = Url::parse("ftp://ex.com/").unwrap();
        let result = CrawlRequest::new(seed, "20260829120000".to_string());
        assert!(matches!(result, Err(UrlError::InvalidScheme(_))));
    }

    #[test]
    fn test_visit_key_collapses_page_directory_variants() {
        let plain = Url::parse("https://ex.com/blog").unwrap();
        let slashed = Url::parse("https://ex.com/blog/").unwrap();
        let doubled = Url::parse("https://ex.com//blog").unwrap();
        let queried = Url::parse("https://ex.com/blog?page=2").unwrap();
        let child = Url::parse("https://ex.com/blog/post1").unwrap();

        assert_eq!(visit_key(&plain), visit_key(&slashed));
        assert_eq!(visit_key(&plain), visit_key(&doubled));
        assert_eq!(visit_key(&plain), visit_key(&queried));
        assert_ne!(visit_key(&plain), visit_key(&child));
    }

    // Full traversal behavior (depth bounds, cycle breaking, failure
    // containment) is covered end-to-end in tests/archive_tests.rs.
}

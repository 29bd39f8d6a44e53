//! On-disk snapshot layout
//!
//! The store is a directory tree rooted at the configured path:
//!
//! ```text
//! <root>/<domain>/<optional/nested/path>/<14-digit-timestamp>/index.html
//!                                                            /assets/...
//!                                                            /<child-page>/index.html
//! ```
//!
//! All path computation is a pure function of `(domain, path, timestamp)`
//! so store backends can share it and replay layers can reconstruct it.

use chrono::Utc;
use std::path::PathBuf;

/// File name of a stored page inside its snapshot directory
pub const INDEX_FILE: &str = "index.html";

/// Directory name for a page's fetched assets
pub const ASSETS_DIR: &str = "assets";

/// Length of a snapshot timestamp (`YYYYMMDDHHMMSS`)
pub const TIMESTAMP_LEN: usize = 14;

/// Identity of one snapshot: `(domain, base path, timestamp)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotId {
    /// Host component of the seed URL
    pub domain: String,

    /// Path segments of the seed URL (may be empty)
    pub path: Vec<String>,

    /// 14-digit wall-clock timestamp generated at crawl start
    pub timestamp: String,
}

impl SnapshotId {
    pub fn new(domain: String, path: Vec<String>, timestamp: String) -> Self {
        Self {
            domain,
            path,
            timestamp,
        }
    }

    /// Key under which this snapshot is listed: `"domain"` or `"domain/path"`
    pub fn store_key(&self) -> String {
        if self.path.is_empty() {
            self.domain.clone()
        } else {
            format!("{}/{}", self.domain, self.path.join("/"))
        }
    }
}

/// Generates a snapshot timestamp from the current UTC wall clock
///
/// Seconds granularity means two runs for the same seed within the same
/// second would collide; the store refuses to reuse an existing snapshot
/// directory rather than overwrite it.
pub fn generate_timestamp() -> String {
    Utc::now().format("%Y%m%d%H%M%S").to_string()
}

/// Checks whether a directory name is a snapshot timestamp marker
pub fn is_timestamp(name: &str) -> bool {
    name.len() == TIMESTAMP_LEN && name.bytes().all(|b| b.is_ascii_digit())
}

/// Directory of a snapshot root, relative to the store root
pub fn snapshot_dir(id: &SnapshotId) -> PathBuf {
    let mut dir = PathBuf::from(&id.domain);
    for segment in &id.path {
        dir.push(segment);
    }
    dir.push(&id.timestamp);
    dir
}

/// Directory of one page inside a snapshot
///
/// `page_rel` is the page's path relative to the snapshot's base path;
/// empty for the seed page itself.
pub fn page_dir(id: &SnapshotId, page_rel: &[String]) -> PathBuf {
    let mut dir = snapshot_dir(id);
    for segment in page_rel {
        dir.push(segment);
    }
    dir
}

/// Path of a page's stored HTML file
pub fn page_index_path(id: &SnapshotId, page_rel: &[String]) -> PathBuf {
    page_dir(id, page_rel).join(INDEX_FILE)
}

/// Path of one stored asset in a page's assets directory
pub fn asset_path(id: &SnapshotId, page_rel: &[String], filename: &str) -> PathBuf {
    page_dir(id, page_rel).join(ASSETS_DIR).join(filename)
}

/// Path of the `index.html` read back by `read_snapshot`
pub fn read_path(domain: &str, path: Option<&str>, timestamp: &str) -> PathBuf {
    let mut p = PathBuf::from(domain);
    if let Some(sub) = path {
        for segment in sub.split('/').filter(|s| !s.is_empty()) {
            p.push(segment);
        }
    }
    p.push(timestamp);
    p.join(INDEX_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id() -> SnapshotId {
        SnapshotId::new(
            "ex.com".to_string(),
            vec!["blog".to_string()],
            "20260829120000".to_string(),
        )
    }

    #[test]
    fn test_store_key() {
        assert_eq!(id().store_key(), "ex.com/blog");

        let rootless = SnapshotId::new("ex.com".to_string(), vec![], "20260829120000".to_string());
        assert_eq!(rootless.store_key(), "ex.com");
    }

    #[test]
    fn test_snapshot_dir() {
        assert_eq!(
            snapshot_dir(&id()),
            PathBuf::from("ex.com/blog/20260829120000")
        );
    }

    #[test]
    fn test_page_paths() {
        let rel = vec!["post1".to_string()];
        assert_eq!(
            page_index_path(&id(), &rel),
            PathBuf::from("ex.com/blog/20260829120000/post1/index.html")
        );
        assert_eq!(
            page_index_path(&id(), &[]),
            PathBuf::from("ex.com/blog/20260829120000/index.html")
        );
        assert_eq!(
            asset_path(&id(), &rel, "logo.png"),
            PathBuf::from("ex.com/blog/20260829120000/post1/assets/logo.png")
        );
    }

    #[test]
    fn test_read_path() {
        assert_eq!(
            read_path("ex.com", Some("blog"), "20260829120000"),
            PathBuf::from("ex.com/blog/20260829120000/index.html")
        );
        assert_eq!(
            read_path("ex.com", None, "20260829120000"),
            PathBuf::from("ex.com/20260829120000/index.html")
        );
    }

    #[test]
    fn test_generate_timestamp_shape() {
        let ts = generate_timestamp();
        assert!(is_timestamp(&ts), "unexpected timestamp: {}", ts);
    }

    #[test]
    fn test_is_timestamp() {
        assert!(is_timestamp("20260829120000"));
        assert!(!is_timestamp("2026082912000"));
        assert!(!is_timestamp("202608291200001"));
        assert!(!is_timestamp("2026082912000x"));
        assert!(!is_timestamp("assets"));
    }
}

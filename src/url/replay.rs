//! Replay namespace path math
//!
//! Pure functions mapping live URL paths onto the replay namespace
//! `/archive/{domain}/{basePath}/{timestamp}/{relativePath}`. The same
//! relativization drives the on-disk page directory, so a replay server
//! can resolve any rewritten link by prefix-stripping `/archive/`.

/// Splits a URL path into its non-empty segments
///
/// `"/blog/post1/"` and `"blog//post1"` both yield `["blog", "post1"]`.
pub fn path_segments(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// Computes a page path relative to the seed's base path
///
/// The base prefix is stripped when present; a same-origin page that does
/// not live under the base path keeps its full domain-relative path, so
/// storage and replay stay consistent for out-of-base pages.
pub fn relative_to_base(page_path: &str, base: &[String]) -> Vec<String> {
    let segments = path_segments(page_path);
    if segments.len() >= base.len() && segments[..base.len()] == *base {
        segments[base.len()..].to_vec()
    } else {
        segments
    }
}

/// Builds a replay-namespace URL for a page
///
/// # Examples
///
/// ```
/// use pagevault::url::replay_url;
///
/// let base = vec!["blog".to_string()];
/// assert_eq!(
///     replay_url("ex.com", &base, "20260829120000", &["post1".to_string()]),
///     "/archive/ex.com/blog/20260829120000/post1"
/// );
/// assert_eq!(
///     replay_url("ex.com", &base, "20260829120000", &[]),
///     "/archive/ex.com/blog/20260829120000"
/// );
/// ```
pub fn replay_url(domain: &str, base: &[String], timestamp: &str, rel: &[String]) -> String {
    let mut parts: Vec<&str> = vec!["archive", domain];
    parts.extend(base.iter().map(|s| s.as_str()));
    parts.push(timestamp);
    parts.extend(rel.iter().map(|s| s.as_str()));
    format!("/{}", parts.join("/"))
}

use url::Url;

/// Extracts the host from a URL, lowercased
///
/// Ports are intentionally excluded: two URLs are considered same-origin
/// when their host components match, regardless of port or scheme.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use pagevault::url::extract_host;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_host(&url), Some("example.com".to_string()));
/// ```
pub fn extract_host(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Checks whether a URL belongs to the given origin host
pub fn is_same_origin(url: &Url, host: &str) -> bool {
    extract_host(url).as_deref() == Some(host)
}

/// Resolves an href attribute value against a page URL
///
/// Returns None if the reference should be ignored:
/// - empty or fragment-only hrefs (same-page anchors)
/// - `javascript:`, `mailto:`, `tel:` and `data:` schemes
/// - hrefs that fail to resolve
/// - anything that is not HTTP(S) after resolution
///
/// Fragments are stripped from the resolved URL so that `/page` and
/// `/page#section` identify the same crawl target.
pub fn resolve_href(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    match base.join(href) {
        Ok(mut resolved) => {
            if resolved.scheme() != "http" && resolved.scheme() != "https" {
                return None;
            }
            resolved.set_fragment(None);
            Some(resolved)
        }
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/blog/post").unwrap()
    }

    #[test]
    fn test_extract_host_lowercases() {
        let url = Url::parse("https://Example.COM/").unwrap();
        assert_eq!(extract_host(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_host_ignores_port() {
        let url = Url::parse("http://example.com:8080/").unwrap();
        assert_eq!(extract_host(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_same_origin() {
        let url = Url::parse("https://example.com/other").unwrap();
        assert!(is_same_origin(&url, "example.com"));
        assert!(!is_same_origin(&url, "other.com"));
    }

    #[test]
    fn test_resolve_relative() {
        let resolved = resolve_href(&base(), "/about").unwrap();
        assert_eq!(resolved.as_str(), "https://example.com/about");
    }

    #[test]
    fn test_resolve_sibling() {
        let resolved = resolve_href(&base(), "other").unwrap();
        assert_eq!(resolved.as_str(), "https://example.com/blog/other");
    }

    #[test]
    fn test_resolve_absolute() {
        let resolved = resolve_href(&base(), "https://other.com/page").unwrap();
        assert_eq!(resolved.as_str(), "https://other.com/page");
    }

    #[test]
    fn test_skip_fragment_only() {
        assert!(resolve_href(&base(), "#section").is_none());
    }

    #[test]
    fn test_strip_fragment_from_resolved() {
        let resolved = resolve_href(&base(), "/page#section").unwrap();
        assert_eq!(resolved.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_skip_special_schemes() {
        assert!(resolve_href(&base(), "javascript:void(0)").is_none());
        assert!(resolve_href(&base(), "mailto:a@b.com").is_none());
        assert!(resolve_href(&base(), "tel:+123").is_none());
        assert!(resolve_href(&base(), "data:text/html,hi").is_none());
    }

    #[test]
    fn test_skip_non_http_after_resolution() {
        assert!(resolve_href(&base(), "ftp://example.com/file").is_none());
    }

    #[test]
    fn test_skip_empty() {
        assert!(resolve_href(&base(), "").is_none());
        assert!(resolve_href(&base(), "   ").is_none());
    }
}

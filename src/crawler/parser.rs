//! HTML reference extraction
//!
//! Read-only parsing of fetched pages: anchors drive traversal, asset
//! references drive the asset rewriter. All mutation happens later in the
//! rewrite module; extraction always reads the original document.

use crate::url::resolve_href;
use scraper::{Html, Selector};
use url::Url;

/// Tag/attribute pairs considered asset-bearing
const ASSET_SELECTORS: &[(&str, &str)] = &[
    ("img[src]", "src"),
    ("script[src]", "src"),
    (r#"link[rel="stylesheet"][href]"#, "href"),
];

/// One asset reference discovered in a page
#[derive(Debug, Clone)]
pub struct AssetRef {
    /// The attribute value exactly as written in the page
    pub attr_value: String,

    /// The reference resolved against the page URL
    pub url: Url,

    /// Local filename derived from the last path segment of the URL
    pub filename: String,
}

/// Extracts every anchor reference from a page, in document order
///
/// Each href is resolved against `page_url`; unresolvable and non-HTTP(S)
/// references are dropped. No deduplication happens here; revisit
/// suppression is the crawl engine's VisitedSet job.
pub fn extract_anchors(html: &str, page_url: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);
    let mut anchors = Vec::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(resolved) = resolve_href(page_url, href) {
                    anchors.push(resolved);
                }
            }
        }
    }

    anchors
}

/// Extracts every asset reference from a page, in document order
///
/// References with no derivable filename (resolved path ends in `/`) are
/// skipped entirely; the rewriter will leave those attributes unmodified.
pub fn extract_asset_refs(html: &str, page_url: &Url) -> Vec<AssetRef> {
    let document = Html::parse_document(html);
    let mut refs = Vec::new();

    for (selector_str, attr) in ASSET_SELECTORS {
        let selector = match Selector::parse(selector_str) {
            Ok(s) => s,
            Err(_) => continue,
        };
        for element in document.select(&selector) {
            let Some(value) = element.value().attr(attr) else {
                continue;
            };
            let Some(resolved) = resolve_href(page_url, value) else {
                continue;
            };
            let Some(filename) = asset_filename(&resolved) else {
                continue;
            };
            refs.push(AssetRef {
                attr_value: value.to_string(),
                url: resolved,
                filename,
            });
        }
    }

    refs
}

/// Derives a local filename from the last path segment of a URL
fn asset_filename(url: &Url) -> Option<String> {
    let last = url.path_segments()?.last()?;
    if last.is_empty() {
        None
    } else {
        Some(last.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_url() -> Url {
        Url::parse("https://example.com/blog/").unwrap()
    }

    #[test]
    fn test_extract_anchors_in_document_order() {
        let html = r#"
            <html><body>
                <a href="/blog/post1">One</a>
                <a href="https://other.com/page">External</a>
                <a href="post2">Two</a>
            </body></html>
        "#;
        let anchors = extract_anchors(html, &page_url());
        assert_eq!(anchors.len(), 3);
        assert_eq!(anchors[0].as_str(), "https://example.com/blog/post1");
        assert_eq!(anchors[1].as_str(), "https://other.com/page");
        assert_eq!(anchors[2].as_str(), "https://example.com/blog/post2");
    }

    #[test]
    fn test_extract_anchors_skips_special_schemes() {
        let html = r##"
            <html><body>
                <a href="javascript:void(0)">JS</a>
                <a href="mailto:a@b.com">Mail</a>
                <a href="#top">Anchor</a>
                <a href="/real">Real</a>
            </body></html>
        "##;
        let anchors = extract_anchors(html, &page_url());
        assert_eq!(anchors.len(), 1);
        assert_eq!(anchors[0].as_str(), "https://example.com/real");
    }

    #[test]
    fn test_extract_anchors_keeps_duplicates() {
        let html = r#"<a href="/p">A</a><a href="/p">B</a>"#;
        assert_eq!(extract_anchors(html, &page_url()).len(), 2);
    }

    #[test]
    fn test_extract_asset_refs() {
        let html = r#"
            <html><head>
                <link rel="stylesheet" href="/static/site.css">
                <script src="app.js"></script>
            </head><body>
                <img src="https://example.com/images/logo.png">
            </body></html>
        "#;
        let refs = extract_asset_refs(html, &page_url());
        assert_eq!(refs.len(), 3);

        let filenames: Vec<&str> = refs.iter().map(|r| r.filename.as_str()).collect();
        assert!(filenames.contains(&"logo.png"));
        assert!(filenames.contains(&"app.js"));
        assert!(filenames.contains(&"site.css"));
    }

    #[test]
    fn test_asset_with_no_filename_skipped() {
        let html = r#"<img src="/images/">"#;
        assert!(extract_asset_refs(html, &page_url()).is_empty());
    }

    #[test]
    fn test_non_stylesheet_link_ignored() {
        let html = r#"<link rel="canonical" href="https://example.com/blog/">"#;
        assert!(extract_asset_refs(html, &page_url()).is_empty());
    }

    #[test]
    fn test_asset_ref_keeps_original_attr_value() {
        let html = r#"<img src="../images/logo.png">"#;
        let refs = extract_asset_refs(html, &page_url());
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].attr_value, "../images/logo.png");
        assert_eq!(refs[0].url.as_str(), "https://example.com/images/logo.png");
    }
}

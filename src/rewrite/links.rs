//! Anchor rewriting into the replay namespace
//!
//! Same-origin anchors are mapped onto
//! `/archive/{domain}/{basePath}/{timestamp}[/{relativePath}]` so a replay
//! server resolves them against the stored snapshot. Cross-origin anchors
//! are left byte-identical: external sites are not archived.
//!
//! This pass must run after asset rewriting and exactly once per page. The
//! asset pass never touches `<a href>`, so the values read here are always
//! the original anchors.

use crate::storage::SnapshotId;
use crate::url::{is_same_origin, relative_to_base, replay_url, resolve_href};
use crate::{PagevaultError, Result};
use lol_html::{element, HtmlRewriter, Settings};
use url::Url;

/// Rewrites every same-origin anchor in a page into the replay namespace
pub fn rewrite_links(html: &str, page_url: &Url, snapshot: &SnapshotId) -> Result<String> {
    let mut output = Vec::with_capacity(html.len());

    let mut rewriter = HtmlRewriter::new(
        Settings {
            element_content_handlers: vec![element!("a[href]", |el| {
                if let Some(href) = el.get_attribute("href") {
                    if let Some(target) = replay_target(&href, page_url, snapshot) {
                        el.set_attribute("href", &target)?;
                    }
                }
                Ok(())
            })],
            ..Settings::default()
        },
        |chunk: &[u8]| output.extend_from_slice(chunk),
    );

    rewriter
        .write(html.as_bytes())
        .map_err(|e| rewrite_error(page_url, &e))?;
    rewriter.end().map_err(|e| rewrite_error(page_url, &e))?;

    String::from_utf8(output).map_err(|e| rewrite_error(page_url, &e))
}

/// Computes the replay-namespace target for one anchor, if it qualifies
///
/// Returns None for anchors that must stay untouched: unresolvable hrefs,
/// special schemes, and cross-origin references.
fn replay_target(href: &str, page_url: &Url, snapshot: &SnapshotId) -> Option<String> {
    let resolved = resolve_href(page_url, href)?;
    if !is_same_origin(&resolved, &snapshot.domain) {
        return None;
    }
    let rel = relative_to_base(resolved.path(), &snapshot.path);
    Some(replay_url(
        &snapshot.domain,
        &snapshot.path,
        &snapshot.timestamp,
        &rel,
    ))
}

fn rewrite_error(page_url: &Url, error: &dyn std::fmt::Display) -> PagevaultError {
    PagevaultError::Rewrite {
        url: page_url.to_string(),
        message: error.to_string(),
    }
}

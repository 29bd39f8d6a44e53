//! Asset capture and rewriting
//!
//! Fetches each asset referenced by a page, stores it under the page's
//! `assets/` directory, and rewrites the owning attribute to the local
//! relative path. A failed asset fetch leaves the original live reference
//! in place; the page itself still archives.

use crate::crawler::{extract_asset_refs, Fetcher};
use crate::storage::{SnapshotId, SnapshotStore, ASSETS_DIR};
use crate::{PagevaultError, Result};
use lol_html::html_content::Element;
use lol_html::{element, HtmlRewriter, Settings};
use std::collections::HashMap;
use url::Url;

/// Fetches a page's assets and rewrites their references to local paths
///
/// `page_rel` is the page's path relative to the snapshot base, which is
/// where the assets directory lives. Returns the rewritten HTML; the input
/// is returned unchanged when no asset could be captured.
pub async fn rewrite_assets<S: SnapshotStore>(
    html: &str,
    page_url: &Url,
    page_rel: &[String],
    fetcher: &Fetcher,
    store: &S,
    snapshot: &SnapshotId,
) -> Result<String> {
    let refs = extract_asset_refs(html, page_url);

    // Map of original attribute value -> local relative path. Distinct
    // assets sharing a basename collide here; the later write replaces the
    // earlier file on disk.
    let mut local: HashMap<String, String> = HashMap::new();

    for asset in refs {
        if local.contains_key(&asset.attr_value) {
            continue;
        }
        match fetcher.fetch(&asset.url).await {
            Ok(body) => {
                store.write_asset(snapshot, page_rel, &asset.filename, &body.bytes)?;
                local.insert(
                    asset.attr_value,
                    format!("{}/{}", ASSETS_DIR, asset.filename),
                );
            }
            Err(e) => {
                // The live reference stays in the page, so this snapshot is
                // not fully self-contained for this asset.
                tracing::warn!("Asset fetch failed, keeping live reference: {}", e);
            }
        }
    }

    if local.is_empty() {
        return Ok(html.to_string());
    }

    apply_asset_rewrites(html, page_url, &local)
}

/// Rewrites asset-bearing attributes whose values appear in `local`
fn apply_asset_rewrites(
    html: &str,
    page_url: &Url,
    local: &HashMap<String, String>,
) -> Result<String> {
    let mut output = Vec::with_capacity(html.len());

    let mut rewriter = HtmlRewriter::new(
        Settings {
            element_content_handlers: vec![
                element!("img[src]", |el| {
                    swap_attribute(el, "src", local)?;
                    Ok(())
                }),
                element!("script[src]", |el| {
                    swap_attribute(el, "src", local)?;
                    Ok(())
                }),
                element!(r#"link[rel="stylesheet"][href]"#, |el| {
                    swap_attribute(el, "href", local)?;
                    Ok(())
                }),
            ],
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

/// Replaces an attribute value with its mapped local path, if any
fn swap_attribute(
    el: &mut Element,
    attr: &str,
    local: &HashMap<String, String>,
) -> std::result::Result<(), lol_html::errors::AttributeNameError> {
    if let Some(value) = el.get_attribute(attr) {
        if let Some(path) = local.get(&value) {
            el.set_attribute(attr, path)?;
        }
    }
    Ok(())
}

fn rewrite_error(page_url: &Url, error: &dyn std::fmt::Display) -> PagevaultError {
    PagevaultError::Rewrite {
        url: page_url.to_string(),
        message: error.to_string(),
    }
}

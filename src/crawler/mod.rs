//! Crawler module
//!
//! The crawl-and-archive core: the single-shot HTTP fetcher, read-only
//! HTML reference extraction, and the recursive crawl engine that ties
//! fetching, rewriting, and the snapshot store together.

mod engine;
mod fetcher;
mod parser;

pub use engine::{CrawlEngine, CrawlRequest, PageOutcome};
pub use fetcher::{build_http_client, FetchError, FetchedBody, Fetcher};
pub use parser::{extract_anchors, extract_asset_refs, AssetRef};

//! Pagevault: a point-in-time website archiver
//!
//! This crate crawls a bounded same-origin neighborhood of a seed URL,
//! persists each page's HTML and referenced assets into a timestamped
//! snapshot directory, and rewrites in-page references so a replay layer
//! can serve the snapshot without ever touching the live site.

pub mod config;
pub mod crawler;
pub mod rewrite;
pub mod service;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Pagevault operations
#[derive(Debug, Error)]
pub enum PagevaultError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] crawler::FetchError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("HTML rewrite error for {url}: {message}")]
    Rewrite { url: String, message: String },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for Pagevault operations
pub type Result<T> = std::result::Result<T, PagevaultError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlEngine, CrawlRequest};
pub use service::{start_archive, ArchiveOutcome};
pub use storage::{FsStore, MemoryStore, SnapshotId, SnapshotStore};

//! Snapshot store module
//!
//! The durable side of the archiver: a versioned directory layout keyed by
//! `(domain, path, timestamp)`, a `SnapshotStore` trait so the crawl engine
//! takes an injected store handle, and two backends (filesystem and
//! in-memory). The crawl engine is the sole writer; replay layers only read.

mod fs;
mod layout;
mod memory;
mod traits;

pub use fs::FsStore;
pub use layout::{
    asset_path, generate_timestamp, is_timestamp, page_dir, page_index_path, read_path,
    snapshot_dir, SnapshotId, ASSETS_DIR, INDEX_FILE, TIMESTAMP_LEN,
};
pub use memory::MemoryStore;
pub use traits::{SnapshotStore, StorageError, StorageResult};

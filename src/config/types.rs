use serde::Deserialize;

/// Main configuration structure for Pagevault
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub archiver: ArchiverConfig,
    pub storage: StorageConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArchiverConfig {
    /// Maximum recursion depth from the seed page (depth 0 is the seed)
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Timeout applied to every page and asset fetch, in seconds
    #[serde(rename = "fetch-timeout-secs")]
    pub fetch_timeout_secs: u64,
}

impl Default for ArchiverConfig {
    fn default() -> Self {
        Self {
            max_depth: 1,
            fetch_timeout_secs: 5,
        }
    }
}

/// Snapshot store configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Root directory of the snapshot store
    #[serde(rename = "root-path")]
    pub root_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root_path: "./archives".to_string(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name sent in the User-Agent header
    pub name: String,

    /// Version sent in the User-Agent header
    pub version: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            name: "pagevault".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

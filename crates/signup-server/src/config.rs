//! Configuration for the signup server.

use anyhow::{Context, Result};
use member_store::{DynMemberStore, MemoryStore, SqliteStore, UniquenessStrategy};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Member storage configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Which storage engine holds the members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local maps; data is lost on restart
    Memory,
    /// SQLite, on disk or `:memory:`
    #[default]
    Sqlite,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Storage engine
    #[serde(default)]
    pub backend: StorageBackend,

    /// SQLite database path (`:memory:` for an in-memory database)
    #[serde(default = "default_sqlite_path")]
    pub sqlite_path: PathBuf,

    /// How duplicate members are detected
    #[serde(default)]
    pub strategy: UniquenessStrategy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Form submissions accepted per minute
    #[serde(default = "default_submissions_per_minute")]
    pub submissions_per_minute: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default implementations
impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            port: default_port(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            sqlite_path: default_sqlite_path(),
            strategy: UniquenessStrategy::default(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            submissions_per_minute: default_submissions_per_minute(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// Default value functions
fn default_listen_addr() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    3000
}

fn default_sqlite_path() -> PathBuf {
    PathBuf::from("data/members.db")
}

fn default_submissions_per_minute() -> u32 {
    60
}

fn default_log_level() -> String {
    "info".into()
}

impl StorageConfig {
    /// Construct the configured storage backend.
    pub async fn open_store(&self) -> Result<DynMemberStore> {
        let store: DynMemberStore = match self.backend {
            StorageBackend::Memory => Arc::new(MemoryStore::new(self.strategy)),
            StorageBackend::Sqlite => Arc::new(
                SqliteStore::open(&self.sqlite_path, self.strategy)
                    .await
                    .with_context(|| {
                        format!("Failed to open SQLite store at {:?}", self.sqlite_path)
                    })?,
            ),
        };

        info!(backend = ?self.backend, strategy = %self.strategy, "Member storage initialized");
        Ok(store)
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_source(
            config::Environment::default()
                .separator("__")
                .try_parsing(false),
        )
    }

    fn from_source<S>(source: S) -> Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config = config::Config::builder()
            .add_source(source)
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

//! Configuration management for the MCP server.
//!
//! Configuration is assembled from defaults, an optional `.env` file and
//! environment variables.

use super::transport::TransportConfig;
use crate::domains::fred::request::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};

/// Default upstream request timeout in seconds.
pub const DEFAULT_FRED_TIMEOUT_SECS: u64 = 30;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// FRED API access.
    pub fred: FredConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// FRED API access configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct FredConfig {
    /// API key sent with every request. Get one at
    /// https://fred.stlouisfed.org/docs/api/api_key.html
    pub api_key: Option<String>,

    /// Base URL of the FRED API, without trailing slash.
    pub base_url: String,

    /// Per-request timeout.
    pub timeout_secs: u64,
}

/// Custom Debug implementation to redact the API key from logs.
impl std::fmt::Debug for FredConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FredConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for FredConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_FRED_TIMEOUT_SECS,
        }
    }
}

impl FredConfig {
    /// Load FRED settings from environment variables.
    ///
    /// `FRED_API_KEY` wins over `MCP_FRED_API_KEY`; blank values count as unset.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.api_key = ["FRED_API_KEY", "MCP_FRED_API_KEY"]
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty());

        if let Ok(base_url) = std::env::var("MCP_FRED_BASE_URL") {
            let base_url = base_url.trim().trim_end_matches('/');
            if !base_url.is_empty() {
                config.base_url = base_url.to_string();
            }
        }

        if let Some(timeout) = std::env::var("MCP_FRED_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.trim().parse::<u64>().ok())
            .filter(|t| *t > 0)
        {
            config.timeout_secs = timeout;
        }

        config
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "fred-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
            fred: FredConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is read first if present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(timestamps) = std::env::var("MCP_LOG_TIMESTAMPS") {
            config.logging.with_timestamps =
                timestamps.to_lowercase() != "false" && timestamps != "0";
        }

        config.transport = TransportConfig::from_env();
        config.fred = FredConfig::from_env();

        config
    }
}

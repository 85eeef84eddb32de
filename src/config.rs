//! Process configuration.
//!
//! All values are read once at startup and passed explicitly to the
//! components that need them. Nothing reads the environment after
//! [`Config::from_env`] returns.

use std::env;
use std::time::Duration;

use eyre::{Error, Result};

/// Default seconds between token sync runs.
const DEFAULT_TOKEN_INTERVAL_SECS: u64 = 60;
/// Default seconds between verified-token sync runs.
const DEFAULT_VERIFIED_INTERVAL_SECS: u64 = 300;
/// Default seconds between pool snapshot runs.
const DEFAULT_POOL_INTERVAL_SECS: u64 = 30;
/// Default consecutive-failure tolerance before fatal escalation.
const DEFAULT_ERROR_TOLERANCE: u32 = 10;
/// Default HTTP timeout in seconds for node and registry calls.
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;

/// Per-task scheduling parameters.
#[derive(Debug, Clone, Copy)]
pub struct TaskConfig {
    /// Base delay between runs, also the backoff unit.
    pub interval: Duration,
    /// Consecutive failures tolerated before fatal escalation.
    pub tolerance: u32,
}

/// Everything the process needs, resolved from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Chain id the mirror is scoped to, e.g. `dimension_37-1`.
    pub chain_id: String,
    /// LCD endpoint host of the full node.
    pub node_host: String,
    /// LCD endpoint port.
    pub node_port: u16,
    /// Whether to speak TLS to the node.
    pub node_tls: bool,
    /// Connection URL of the ETL output database (read-only, pairs).
    pub src_database_url: String,
    /// Connection URL of the mirror database (tokens, pools, height).
    pub dst_database_url: String,
    /// Factory contract address identifying the DEX deployment.
    pub factory_address: String,
    /// Timeout applied to every node and registry HTTP call.
    pub http_timeout: Duration,
    /// Token sync task parameters.
    pub token_task: TaskConfig,
    /// Verified-token sync task parameters.
    pub verified_task: TaskConfig,
    /// Pool snapshot task parameters.
    pub pool_task: TaskConfig,
}

impl Config {
    /// Reads the configuration from the environment.
    ///
    /// # Errors
    /// * If a required variable (`CHAIN_ID`, `NODE_HOST`, `SRC_DATABASE_URL`,
    ///   `DATABASE_URL`, `FACTORY_ADDRESS`) is missing
    /// * If a numeric variable fails to parse
    pub fn from_env() -> Result<Self> {
        let tolerance = parse_or("ERROR_TOLERANCE", DEFAULT_ERROR_TOLERANCE)?;

        Ok(Self {
            chain_id: require("CHAIN_ID")?,
            node_host: require("NODE_HOST")?,
            node_port: parse_or("NODE_PORT", 1317)?,
            node_tls: parse_or("NODE_TLS", true)?,
            src_database_url: require("SRC_DATABASE_URL")?,
            dst_database_url: require("DATABASE_URL")?,
            factory_address: require("FACTORY_ADDRESS")?,
            http_timeout: Duration::from_secs(parse_or(
                "HTTP_TIMEOUT_SECS",
                DEFAULT_HTTP_TIMEOUT_SECS,
            )?),
            token_task: TaskConfig {
                interval: Duration::from_secs(parse_or(
                    "TOKEN_SYNC_INTERVAL_SECS",
                    DEFAULT_TOKEN_INTERVAL_SECS,
                )?),
                tolerance,
            },
            verified_task: TaskConfig {
                interval: Duration::from_secs(parse_or(
                    "VERIFIED_SYNC_INTERVAL_SECS",
                    DEFAULT_VERIFIED_INTERVAL_SECS,
                )?),
                tolerance,
            },
            pool_task: TaskConfig {
                interval: Duration::from_secs(parse_or(
                    "POOL_SYNC_INTERVAL_SECS",
                    DEFAULT_POOL_INTERVAL_SECS,
                )?),
                tolerance,
            },
        })
    }

    /// The base URL of the node's LCD endpoint.
    #[must_use]
    pub fn node_url(&self) -> String {
        let scheme = if self.node_tls { "https" } else { "http" };
        format!("{scheme}://{}:{}", self.node_host, self.node_port)
    }
}

/// Reads a required environment variable.
fn require(key: &str) -> Result<String> {
    env::var(key).map_err(|_| Error::msg(format!("{key} must be set")))
}

/// Reads an optional environment variable, parsing it or falling back.
fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> Result<T> {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| Error::msg(format!("{key} has an invalid value: {raw}"))),
        Err(_) => Ok(default),
    }
}

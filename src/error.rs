//! Error taxonomy for the indexer.
//!
//! Every layer below `main` returns [`IndexerError`] so the scheduler can
//! classify failures programmatically instead of string-matching. Repository
//! methods wrap client errors with their operation name via
//! [`IndexerError::context`], preserving the original variant in the source
//! chain.

use thiserror::Error;

/// All failure modes of the indexer core.
#[derive(Debug, Error)]
pub enum IndexerError {
    /// Transport failure talking to the node or an HTTP registry.
    #[error("network request failed: {0}")]
    Network(#[source] reqwest::Error),

    /// The transport gave up waiting; surfaced instead of hanging.
    #[error("network request timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    /// The remote side does not know the requested resource.
    #[error("not found: {0}")]
    NotFound(String),

    /// Malformed or unexpected response payload. Logged distinctly from
    /// [`IndexerError::Network`] since it may indicate a schema regression
    /// rather than transient unavailability.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The chain id does not match any registered network partition.
    #[error("unsupported network for chain id {0}")]
    UnsupportedNetwork(String),

    /// The configured factory address belongs to no registered network.
    #[error("unregistered factory address {0}")]
    UnregisteredFactoryAddress(String),

    /// An address shape with no on-chain metadata source (bare native denom).
    #[error("no metadata source for address {0}")]
    UnsupportedAddressKind(String),

    /// Database read/write failure.
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),

    /// Connection pool construction or checkout failure.
    #[error("connection pool error: {0}")]
    Pool(String),

    /// A lower-layer error wrapped with the operation that hit it.
    #[error("{op}: {source}")]
    Context {
        /// The operation that was being performed.
        op: &'static str,
        /// The underlying error.
        #[source]
        source: Box<IndexerError>,
    },

    /// A scheduled task exhausted its error tolerance. Returned to the
    /// process entry point, which shuts down with a non-zero status.
    #[error("task {task} failed {failures} consecutive times: {source}")]
    Fatal {
        /// Name of the escalating task.
        task: String,
        /// Consecutive failure count at escalation.
        failures: u32,
        /// The last error observed.
        #[source]
        source: Box<IndexerError>,
    },
}

impl IndexerError {
    /// Wraps this error with the name of the operation that produced it.
    #[must_use]
    pub fn context(self, op: &'static str) -> Self {
        Self::Context {
            op,
            source: Box::new(self),
        }
    }

    /// Unwraps any [`IndexerError::Context`] layers down to the root cause.
    #[must_use]
    pub fn root(&self) -> &Self {
        match self {
            Self::Context { source, .. } => source.root(),
            other => other,
        }
    }

    /// Whether the scheduler should retry after this error.
    ///
    /// Configuration and identity errors are permanent and fail fast at
    /// startup; everything coming out of a scheduled run is worth retrying,
    /// including decode errors (the node may catch up or a registry may
    /// republish).
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self.root(),
            Self::UnsupportedNetwork(_)
                | Self::UnregisteredFactoryAddress(_)
                | Self::Fatal { .. }
        )
    }
}

impl From<reqwest::Error> for IndexerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err)
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err)
        }
    }
}

impl From<diesel_async::pooled_connection::deadpool::PoolError> for IndexerError {
    fn from(err: diesel_async::pooled_connection::deadpool::PoolError) -> Self {
        Self::Pool(err.to_string())
    }
}

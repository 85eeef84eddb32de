//! Repository layer: three independently swappable data sources.
//!
//! The orchestrator is constructed over these traits, never over concrete
//! types, so the tests substitute in-memory fakes.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::IndexerError;
use crate::models::{Pair, PoolInfo, Token};

/// Live on-chain metadata resolved through the node.
pub mod node;
/// Externally curated verified-token sets.
pub mod asset;
/// Durable read/write access to the mirrored relational state.
pub mod persist;

pub use asset::{Network, VerifiedAssetRepository};
pub use node::LcdNodeRepository;
pub use persist::DieselPersistRepository;

/// Resolves identifiers into live on-chain state.
#[async_trait]
pub trait NodeRepository: Send + Sync {
    /// The node's current block height.
    ///
    /// # Errors
    /// * Network, timeout, or decode failures from the node
    async fn latest_height(&self) -> Result<u64, IndexerError>;

    /// The pool state of a pair contract as of `height` (`0` = latest).
    ///
    /// # Errors
    /// * Network, timeout, or not-found failures from the node
    /// * [`IndexerError::Decode`] on a malformed contract response
    async fn pool(&self, address: &str, height: u64) -> Result<PoolInfo, IndexerError>;

    /// The metadata of a token, dispatched by address shape.
    ///
    /// # Errors
    /// * Network, timeout, not-found, or decode failures from the node
    /// * [`IndexerError::UnsupportedAddressKind`] for a bare native denom
    async fn token(&self, address: &str) -> Result<Token, IndexerError>;
}

/// Produces the externally attested verified-token set.
#[async_trait]
pub trait AssetRepository: Send + Sync {
    /// The full verified set for a chain, both registries merged.
    ///
    /// # Errors
    /// * [`IndexerError::UnsupportedNetwork`] if the chain id matches no
    ///   registered partition
    /// * Network, timeout, or decode failures from the registries
    async fn verified_tokens(&self, chain_id: &str) -> Result<Vec<Token>, IndexerError>;
}

/// Durable read/write access to the mirrored state.
#[async_trait]
pub trait PersistRepository: Send + Sync {
    /// Keyset-paginated pair listing scoped to the configured chain;
    /// `limit <= 0` means unbounded.
    ///
    /// # Errors
    /// * Database or pool failures
    async fn pairs(&self, since_id: i64, limit: i64, desc: bool)
        -> Result<Vec<Pair>, IndexerError>;

    /// Keyset-paginated token listing, global across chains.
    ///
    /// # Errors
    /// * Database or pool failures
    async fn tokens(
        &self,
        since_id: i64,
        limit: i64,
        desc: bool,
    ) -> Result<Vec<Token>, IndexerError>;

    /// Idempotent upsert keyed by (chain id, address); no-op on empty input.
    ///
    /// # Errors
    /// * Database or pool failures
    async fn save_tokens(&self, tokens: &[Token]) -> Result<(), IndexerError>;

    /// Bulk-inserts pool snapshots tagged with `height`; no-op on empty
    /// input. Prior snapshots are never deleted here.
    ///
    /// # Errors
    /// * Database or pool failures
    async fn save_latest_pools(
        &self,
        pools: &[PoolInfo],
        height: u64,
    ) -> Result<(), IndexerError>;

    /// The stored height for the chain, creating a zero row on first access.
    ///
    /// # Errors
    /// * Database or pool failures
    async fn synced_height(&self) -> Result<u64, IndexerError>;

    /// Records the height of the last successful pool sync.
    ///
    /// # Errors
    /// * Database or pool failures
    async fn save_synced_height(&self, height: u64) -> Result<(), IndexerError>;
}

/// The three repositories the orchestrator delegates to, held as named
/// fields rather than flattened into one type.
#[derive(Clone)]
pub struct Repositories {
    /// Live on-chain state.
    pub node: Arc<dyn NodeRepository>,
    /// Externally curated verified set.
    pub asset: Arc<dyn AssetRepository>,
    /// The mirrored relational state.
    pub persist: Arc<dyn PersistRepository>,
}

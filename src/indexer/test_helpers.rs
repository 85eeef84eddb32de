//! In-memory fakes for the repository interfaces.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bigdecimal::BigDecimal;

use crate::error::IndexerError;
use crate::indexer::Indexer;
use crate::models::{Pair, PoolInfo, Token};
use crate::repo::{AssetRepository, NodeRepository, PersistRepository, Repositories};

/// Chain id used throughout the fixture tests.
pub const CHAIN: &str = "dimension_37-1";

/// Builds a pair on the fixture chain.
pub fn pair(id: i64, contract: &str, asset0: &str, asset1: &str, lp: &str) -> Pair {
    Pair {
        id,
        chain_id: CHAIN.to_string(),
        contract: contract.to_string(),
        asset0: asset0.to_string(),
        asset1: asset1.to_string(),
        lp: lp.to_string(),
    }
}

/// Builds a token on the fixture chain with symbol-derived fields.
pub fn token(address: &str, symbol: &str, verified: bool) -> Token {
    Token {
        chain_id: CHAIN.to_string(),
        address: address.to_string(),
        protocol: String::new(),
        symbol: symbol.to_string(),
        name: format!("{symbol} Token"),
        decimals: 6,
        icon: String::new(),
        verified,
    }
}

/// Builds a pool snapshot from decimal strings; height is filled in by the
/// fake node at query time.
pub fn pool_info(address: &str, asset0: &str, asset1: &str, lp: &str) -> PoolInfo {
    PoolInfo {
        chain_id: CHAIN.to_string(),
        address: address.to_string(),
        height: 0,
        asset0_amount: BigDecimal::from_str(asset0).unwrap(),
        asset1_amount: BigDecimal::from_str(asset1).unwrap(),
        lp_amount: BigDecimal::from_str(lp).unwrap(),
    }
}

/// Fake node repository backed by maps.
#[derive(Default)]
pub struct FakeNode {
    /// Height returned by `latest_height`.
    pub height: Mutex<u64>,
    /// Tokens resolvable by address.
    pub tokens: Mutex<HashMap<String, Token>>,
    /// Pools resolvable by address.
    pub pools: Mutex<HashMap<String, PoolInfo>>,
    /// Addresses treated as bare native denoms.
    pub native_denoms: Mutex<Vec<String>>,
    /// Every address `token` was called with, in order.
    pub token_calls: Mutex<Vec<String>>,
}

#[async_trait]
impl NodeRepository for FakeNode {
    async fn latest_height(&self) -> Result<u64, IndexerError> {
        Ok(*self.height.lock().unwrap())
    }

    async fn pool(&self, address: &str, height: u64) -> Result<PoolInfo, IndexerError> {
        self.pools
            .lock()
            .unwrap()
            .get(address)
            .cloned()
            .map(|mut pool| {
                pool.height = height;
                pool
            })
            .ok_or_else(|| IndexerError::NotFound(address.to_string()))
    }

    async fn token(&self, address: &str) -> Result<Token, IndexerError> {
        self.token_calls.lock().unwrap().push(address.to_string());

        if self.native_denoms.lock().unwrap().iter().any(|d| d == address) {
            return Err(IndexerError::UnsupportedAddressKind(address.to_string()));
        }
        self.tokens
            .lock()
            .unwrap()
            .get(address)
            .cloned()
            .ok_or_else(|| IndexerError::NotFound(address.to_string()))
    }
}

/// Fake asset repository with a fixed verified set.
#[derive(Default)]
pub struct FakeAsset {
    /// The verified set returned for the supported chain.
    pub verified: Mutex<Vec<Token>>,
}

#[async_trait]
impl AssetRepository for FakeAsset {
    async fn verified_tokens(&self, chain_id: &str) -> Result<Vec<Token>, IndexerError> {
        if chain_id != CHAIN {
            return Err(IndexerError::UnsupportedNetwork(chain_id.to_string()));
        }
        Ok(self.verified.lock().unwrap().clone())
    }
}

/// Fake persistence repository recording every write batch.
#[derive(Default)]
pub struct FakePersist {
    /// Pair rows "written by the ETL".
    pub pairs: Mutex<Vec<Pair>>,
    /// Current token storage, upserted by (chain, address).
    pub tokens: Mutex<Vec<Token>>,
    /// Every non-empty token batch passed to `save_tokens`.
    pub saved_token_batches: Mutex<Vec<Vec<Token>>>,
    /// Every pool batch passed to `save_latest_pools`, with its height.
    pub saved_pool_batches: Mutex<Vec<(u64, Vec<PoolInfo>)>>,
    /// The synced-height marker.
    pub synced: Mutex<u64>,
}

#[async_trait]
impl PersistRepository for FakePersist {
    async fn pairs(
        &self,
        since_id: i64,
        limit: i64,
        desc: bool,
    ) -> Result<Vec<Pair>, IndexerError> {
        let mut rows: Vec<Pair> = self
            .pairs
            .lock()
            .unwrap()
            .iter()
            .filter(|p| {
                since_id <= 0 || if desc { p.id < since_id } else { p.id > since_id }
            })
            .cloned()
            .collect();
        rows.sort_by_key(|p| p.id);
        if desc {
            rows.reverse();
        }
        if limit > 0 {
            rows.truncate(usize::try_from(limit).unwrap());
        }
        Ok(rows)
    }

    async fn tokens(
        &self,
        _since_id: i64,
        _limit: i64,
        _desc: bool,
    ) -> Result<Vec<Token>, IndexerError> {
        Ok(self.tokens.lock().unwrap().clone())
    }

    async fn save_tokens(&self, staged: &[Token]) -> Result<(), IndexerError> {
        if staged.is_empty() {
            return Ok(());
        }
        self.saved_token_batches
            .lock()
            .unwrap()
            .push(staged.to_vec());

        let mut storage = self.tokens.lock().unwrap();
        for token in staged {
            match storage
                .iter_mut()
                .find(|t| t.chain_id == token.chain_id && t.address == token.address)
            {
                Some(existing) => *existing = token.clone(),
                None => storage.push(token.clone()),
            }
        }
        Ok(())
    }

    async fn save_latest_pools(
        &self,
        pools: &[PoolInfo],
        height: u64,
    ) -> Result<(), IndexerError> {
        if pools.is_empty() {
            return Ok(());
        }
        self.saved_pool_batches
            .lock()
            .unwrap()
            .push((height, pools.to_vec()));
        Ok(())
    }

    async fn synced_height(&self) -> Result<u64, IndexerError> {
        Ok(*self.synced.lock().unwrap())
    }

    async fn save_synced_height(&self, height: u64) -> Result<(), IndexerError> {
        *self.synced.lock().unwrap() = height;
        Ok(())
    }
}

/// A wired-up set of fakes plus the chain id to index under.
pub struct Fixture {
    /// The fake node, shared with the indexer.
    pub node: Arc<FakeNode>,
    /// The fake asset registry, shared with the indexer.
    pub asset: Arc<FakeAsset>,
    /// The fake persistence, shared with the indexer.
    pub persist: Arc<FakePersist>,
    /// Chain id the indexer is constructed with.
    pub chain_id: String,
}

impl Fixture {
    /// An empty fixture on the default chain.
    pub fn new() -> Self {
        Self {
            node: Arc::new(FakeNode::default()),
            asset: Arc::new(FakeAsset::default()),
            persist: Arc::new(FakePersist::default()),
            chain_id: CHAIN.to_string(),
        }
    }

    /// Overrides the chain id the indexer runs under.
    pub fn with_chain_id(mut self, chain_id: &str) -> Self {
        self.chain_id = chain_id.to_string();
        self
    }

    /// Adds an ETL pair row.
    pub fn with_pair(self, pair: Pair) -> Self {
        self.persist.pairs.lock().unwrap().push(pair);
        self
    }

    /// Adds a token already present in storage.
    pub fn with_stored_token(self, token: Token) -> Self {
        self.persist.tokens.lock().unwrap().push(token);
        self
    }

    /// Makes a token resolvable through the fake node.
    pub fn with_node_token(self, token: Token) -> Self {
        self.node
            .tokens
            .lock()
            .unwrap()
            .insert(token.address.clone(), token);
        self
    }

    /// Marks an address as a bare native denom on the fake node.
    pub fn with_native_denom(self, address: &str) -> Self {
        self.node
            .native_denoms
            .lock()
            .unwrap()
            .push(address.to_string());
        self
    }

    /// Sets the fake node's latest height.
    pub fn with_node_height(self, height: u64) -> Self {
        *self.node.height.lock().unwrap() = height;
        self
    }

    /// Makes a pool resolvable through the fake node.
    pub fn with_node_pool(self, pool: PoolInfo) -> Self {
        self.node
            .pools
            .lock()
            .unwrap()
            .insert(pool.address.clone(), pool);
        self
    }

    /// Adds an entry to the verified registry set.
    pub fn with_verified_token(self, token: Token) -> Self {
        self.asset.verified.lock().unwrap().push(token);
        self
    }

    /// Builds an indexer over the fakes.
    pub fn indexer(&self) -> Indexer {
        Indexer::new(
            &self.chain_id,
            Repositories {
                node: Arc::clone(&self.node) as Arc<dyn NodeRepository>,
                asset: Arc::clone(&self.asset) as Arc<dyn AssetRepository>,
                persist: Arc::clone(&self.persist) as Arc<dyn PersistRepository>,
            },
        )
    }
}

// The fakes carry the same write contracts as the Diesel repository, so the
// contracts are pinned here where no live database is needed.
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_tokens_empty_input_issues_no_write() {
        let persist = FakePersist::default();

        persist.save_tokens(&[]).await.unwrap();

        assert!(persist.saved_token_batches.lock().unwrap().is_empty());
        assert!(persist.tokens.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_latest_pools_empty_input_issues_no_write() {
        let persist = FakePersist::default();

        persist.save_latest_pools(&[], 500).await.unwrap();

        assert!(persist.saved_pool_batches.lock().unwrap().is_empty());
        assert_eq!(persist.synced_height().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_synced_height_starts_at_zero_and_round_trips() {
        let persist = FakePersist::default();

        assert_eq!(persist.synced_height().await.unwrap(), 0);

        persist.save_synced_height(500).await.unwrap();
        assert_eq!(persist.synced_height().await.unwrap(), 500);
    }
}

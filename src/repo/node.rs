use async_trait::async_trait;
use serde_json::json;

use crate::client::NodeClient;
use crate::error::IndexerError;
use crate::mappers;
use crate::models::{PoolInfo, Token};
use crate::repo::{Network, NodeRepository};

/// Prefix of IBC denomination addresses.
const IBC_PREFIX: &str = "ibc/";

/// Node-backed repository resolving domain identifiers through LCD queries.
pub struct LcdNodeRepository {
    /// LCD client.
    client: NodeClient,
    /// Chain id stamped onto produced entities.
    chain_id: String,
    /// Bech32 prefix identifying contract-shaped addresses.
    address_prefix: String,
}

impl LcdNodeRepository {
    /// Creates a repository for `chain_id` on the given network.
    #[must_use]
    pub fn new(client: NodeClient, chain_id: &str, network: &Network) -> Self {
        Self {
            client,
            chain_id: chain_id.to_string(),
            address_prefix: format!("{}1", network.address_prefix),
        }
    }

    /// Whether an address is a cw20 contract for this network.
    fn is_contract(&self, address: &str) -> bool {
        address.starts_with(&self.address_prefix)
    }
}

#[async_trait]
impl NodeRepository for LcdNodeRepository {
    async fn latest_height(&self) -> Result<u64, IndexerError> {
        self.client
            .latest_height()
            .await
            .map_err(|e| e.context("latest height from node"))
    }

    async fn pool(&self, address: &str, height: u64) -> Result<PoolInfo, IndexerError> {
        let data = self
            .client
            .query_contract_state(address, &json!({"pool": {}}), height)
            .await
            .map_err(|e| e.context("pool query"))?;

        mappers::pool_from_response(&self.chain_id, address, height, &data)
    }

    async fn token(&self, address: &str) -> Result<Token, IndexerError> {
        if let Some(hash) = address.strip_prefix(IBC_PREFIX) {
            let trace = self
                .client
                .query_ibc_denom_trace(hash)
                .await
                .map_err(|e| e.context("denom trace query"))?;
            return Ok(mappers::token_from_denom_trace(&self.chain_id, address, &trace));
        }

        if self.is_contract(address) {
            let data = self
                .client
                .query_contract_state(address, &json!({"token_info": {}}), 0)
                .await
                .map_err(|e| e.context("token_info query"))?;
            return mappers::token_from_token_info(&self.chain_id, address, &data);
        }

        // Bare native denoms have no metadata source on-chain.
        Err(IndexerError::UnsupportedAddressKind(address.to_string()))
    }
}

use async_trait::async_trait;

use crate::client::AssetListClient;
use crate::error::IndexerError;
use crate::mappers;
use crate::models::Token;
use crate::repo::AssetRepository;

/// Registry key of the mainnet partition inside an asset list document.
const MAINNET_PARTITION: &str = "mainnet";
/// Registry key of the testnet partition inside an asset list document.
const TESTNET_PARTITION: &str = "testnet";

/// Static metadata for a supported network.
#[derive(Debug)]
pub struct Network {
    /// Human-readable network name.
    pub name: &'static str,
    /// Chain-id prefix of the mainnet partition.
    pub mainnet_chain_prefix: &'static str,
    /// Chain-id prefix of the testnet partition.
    pub testnet_chain_prefix: &'static str,
    /// Bech32 address prefix for accounts and contracts.
    pub address_prefix: &'static str,
    /// Factory contract address on mainnet.
    pub mainnet_factory: &'static str,
    /// Factory contract address on testnet.
    pub testnet_factory: &'static str,
    /// Published cw20 verified-token registry.
    pub cw20_assets_endpoint: &'static str,
    /// Published IBC verified-token registry.
    pub ibc_assets_endpoint: &'static str,
}

/// Networks this indexer knows how to mirror.
static NETWORKS: &[Network] = &[Network {
    name: "xpla",
    mainnet_chain_prefix: "dimension_37",
    testnet_chain_prefix: "cube_47",
    address_prefix: "xpla",
    mainnet_factory: "xpla1j4kgjl6h4rt96uddtzdxdu39h0mhn4vrtydufdrk4uxxnrpsnw2qug2yx2",
    testnet_factory: "xpla1hjc0zpgkgtzkk4y5kxf6q5lrjdqj0zw2kn4xval6v7yyy6jz4n9qh5f0dl",
    cw20_assets_endpoint: "https://assets.xpla.io/cw20/tokens.json",
    ibc_assets_endpoint: "https://assets.xpla.io/ibc/tokens.json",
}];

impl Network {
    /// Looks a network up by one of its factory contract addresses.
    ///
    /// # Errors
    /// * [`IndexerError::UnregisteredFactoryAddress`] if no network claims
    ///   the address
    pub fn find_by_factory(factory_address: &str) -> Result<&'static Self, IndexerError> {
        NETWORKS
            .iter()
            .find(|n| n.mainnet_factory == factory_address || n.testnet_factory == factory_address)
            .ok_or_else(|| IndexerError::UnregisteredFactoryAddress(factory_address.to_string()))
    }

    /// Maps a chain id onto the registry partition it belongs to.
    fn partition(&self, chain_id: &str) -> Option<&'static str> {
        if chain_id.starts_with(self.mainnet_chain_prefix) {
            Some(MAINNET_PARTITION)
        } else if chain_id.starts_with(self.testnet_chain_prefix) {
            Some(TESTNET_PARTITION)
        } else {
            None
        }
    }
}

/// Verified-token sets sourced from the published registries.
pub struct VerifiedAssetRepository {
    /// Registry HTTP client.
    client: AssetListClient,
    /// The registered network this repository serves.
    network: &'static Network,
}

impl VerifiedAssetRepository {
    /// Creates a repository for the DEX deployment identified by
    /// `factory_address`.
    ///
    /// # Errors
    /// * [`IndexerError::UnregisteredFactoryAddress`] if the address belongs
    ///   to no registered network
    pub fn new(client: AssetListClient, factory_address: &str) -> Result<Self, IndexerError> {
        let network = Network::find_by_factory(factory_address)?;
        Ok(Self { client, network })
    }
}

#[async_trait]
impl AssetRepository for VerifiedAssetRepository {
    async fn verified_tokens(&self, chain_id: &str) -> Result<Vec<Token>, IndexerError> {
        let partition = self
            .network
            .partition(chain_id)
            .ok_or_else(|| IndexerError::UnsupportedNetwork(chain_id.to_string()))?;

        let cw20 = self
            .client
            .fetch(self.network.cw20_assets_endpoint)
            .await
            .map_err(|e| e.context("fetch cw20 asset list"))?;
        let ibc = self
            .client
            .fetch(self.network.ibc_assets_endpoint)
            .await
            .map_err(|e| e.context("fetch ibc asset list"))?;

        let mut tokens = Vec::new();
        for payload in [cw20, ibc] {
            if let Some(entries) = payload.0.get(partition) {
                tokens.extend(
                    entries
                        .iter()
                        .map(|(key, entry)| mappers::token_from_asset_entry(chain_id, key, entry)),
                );
            }
        }

        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_by_factory_known() {
        let network =
            Network::find_by_factory(NETWORKS[0].mainnet_factory).unwrap();
        assert_eq!(network.name, "xpla");
    }

    #[test]
    fn test_find_by_factory_unregistered() {
        let err = Network::find_by_factory("xpla1nobody").unwrap_err();
        assert!(matches!(err, IndexerError::UnregisteredFactoryAddress(_)));
    }

    #[test]
    fn test_partition_selection() {
        let network = &NETWORKS[0];
        assert_eq!(network.partition("dimension_37-1"), Some("mainnet"));
        assert_eq!(network.partition("cube_47-5"), Some("testnet"));
        assert_eq!(network.partition("phobos-1"), None);
    }
}

//! Pure translation between wire/storage representations and the domain model.
//!
//! Nothing here performs I/O or holds state; the repositories feed raw
//! payloads in and get domain entities out, keeping the orchestrator blind to
//! RPC and registry schema shapes.

use std::collections::HashMap;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::Deserialize;
use serde_json::Value;

use crate::error::IndexerError;
use crate::models::{PoolInfo, Token};

/// Decimal precision assumed for IBC denoms; no decimals metadata exists
/// on-chain for them.
pub const IBC_DEFAULT_DECIMALS: i32 = 6;

/// Protocol tag recorded for tokens resolved through an IBC denom trace.
const IBC_PROTOCOL: &str = "ibc";

/// Response shape of the `{"pool":{}}` smart query.
#[derive(Deserialize, Debug)]
pub struct PoolResponse {
    /// The two pooled assets with their reserve amounts.
    pub assets: Vec<PoolAssetResponse>,
    /// Total supply of the liquidity-pool token, as a decimal string.
    pub total_share: String,
}

/// One asset entry inside a pool response.
#[derive(Deserialize, Debug)]
pub struct PoolAssetResponse {
    /// Reserve amount as a decimal string.
    pub amount: String,
}

/// Response shape of the `{"token_info":{}}` smart query.
#[derive(Deserialize, Debug)]
pub struct TokenInfoResponse {
    /// Token display name.
    pub name: String,
    /// Token display symbol.
    pub symbol: String,
    /// Decimal precision.
    pub decimals: i32,
}

/// An IBC denomination trace as resolved by the node.
#[derive(Deserialize, Debug, Clone)]
pub struct DenomTrace {
    /// The transfer path, e.g. `transfer/channel-0`.
    pub path: String,
    /// The denomination on the origin chain.
    pub base_denom: String,
}

/// A published verified-asset registry document, keyed by network partition
/// (`mainnet` / `testnet`), then by asset key.
#[derive(Deserialize, Debug, Clone)]
pub struct AssetListPayload(pub HashMap<String, HashMap<String, AssetEntry>>);

/// One registry entry; the cw20 and ibc registries share this shape, with
/// `token` set for contract assets and `denom` for IBC assets.
#[derive(Deserialize, Debug, Clone)]
pub struct AssetEntry {
    /// Protocol/origin tag.
    #[serde(default)]
    pub protocol: String,
    /// Display symbol.
    pub symbol: String,
    /// Display name.
    pub name: String,
    /// Contract address, present in the cw20 registry.
    #[serde(default)]
    pub token: Option<String>,
    /// Full `ibc/` denom, present in the ibc registry.
    #[serde(default)]
    pub denom: Option<String>,
    /// Icon URI.
    #[serde(default)]
    pub icon: String,
    /// Decimal precision; registries omit it for protocol-default assets.
    #[serde(default)]
    pub decimals: Option<i32>,
}

/// Decodes a pool smart-query response into a snapshot at `height`.
///
/// # Errors
/// * [`IndexerError::Decode`] if the payload does not have exactly two assets
///   or an amount is not a decimal string
pub fn pool_from_response(
    chain_id: &str,
    address: &str,
    height: u64,
    data: &Value,
) -> Result<PoolInfo, IndexerError> {
    let response: PoolResponse = serde_json::from_value(data.clone())
        .map_err(|e| IndexerError::Decode(format!("pool response for {address}: {e}")))?;

    if response.assets.len() != 2 {
        return Err(IndexerError::Decode(format!(
            "pool response for {address}: expected 2 assets, got {}",
            response.assets.len()
        )));
    }

    Ok(PoolInfo {
        chain_id: chain_id.to_string(),
        address: address.to_string(),
        height,
        asset0_amount: decimal(&response.assets[0].amount, address)?,
        asset1_amount: decimal(&response.assets[1].amount, address)?,
        lp_amount: decimal(&response.total_share, address)?,
    })
}

/// Decodes a `token_info` smart-query response into an unverified token.
///
/// # Errors
/// * [`IndexerError::Decode`] if the payload does not match the known shape
pub fn token_from_token_info(
    chain_id: &str,
    address: &str,
    data: &Value,
) -> Result<Token, IndexerError> {
    let info: TokenInfoResponse = serde_json::from_value(data.clone())
        .map_err(|e| IndexerError::Decode(format!("token_info response for {address}: {e}")))?;

    Ok(Token {
        chain_id: chain_id.to_string(),
        address: address.to_string(),
        protocol: String::new(),
        symbol: info.symbol,
        name: info.name,
        decimals: info.decimals,
        icon: String::new(),
        verified: false,
    })
}

/// Builds an unverified token from a resolved IBC denom trace.
///
/// The chain carries no display metadata for IBC denoms, so symbol and name
/// fall back to the base denom and decimals to the protocol constant.
#[must_use]
pub fn token_from_denom_trace(chain_id: &str, address: &str, trace: &DenomTrace) -> Token {
    Token {
        chain_id: chain_id.to_string(),
        address: address.to_string(),
        protocol: IBC_PROTOCOL.to_string(),
        symbol: trace.base_denom.clone(),
        name: trace.base_denom.clone(),
        decimals: IBC_DEFAULT_DECIMALS,
        icon: String::new(),
        verified: false,
    }
}

/// Maps a registry entry into a verified token.
///
/// The address is taken from `token` (cw20 registry) or `denom` (ibc
/// registry), falling back to the entry's key in the document.
#[must_use]
pub fn token_from_asset_entry(chain_id: &str, key: &str, entry: &AssetEntry) -> Token {
    let address = entry
        .token
        .clone()
        .or_else(|| entry.denom.clone())
        .unwrap_or_else(|| key.to_string());

    Token {
        chain_id: chain_id.to_string(),
        address,
        protocol: entry.protocol.clone(),
        symbol: entry.symbol.clone(),
        name: entry.name.clone(),
        decimals: entry.decimals.unwrap_or(IBC_DEFAULT_DECIMALS),
        icon: entry.icon.clone(),
        verified: true,
    }
}

/// Parses a decimal string, rejecting anything `BigDecimal` cannot represent.
fn decimal(raw: &str, address: &str) -> Result<BigDecimal, IndexerError> {
    BigDecimal::from_str(raw)
        .map_err(|e| IndexerError::Decode(format!("bad amount {raw:?} for {address}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pool_from_response() {
        let data = json!({
            "assets": [
                {"info": {"token": {"contract_addr": "xpla1aaa"}}, "amount": "1000"},
                {"info": {"native_token": {"denom": "ibc/ABC"}}, "amount": "2000"}
            ],
            "total_share": "1414"
        });

        let pool = pool_from_response("dimension_37-1", "xpla1pair", 500, &data).unwrap();
        assert_eq!(pool.height, 500);
        assert_eq!(pool.asset0_amount.to_string(), "1000");
        assert_eq!(pool.asset1_amount.to_string(), "2000");
        assert_eq!(pool.lp_amount.to_string(), "1414");
    }

    #[test]
    fn test_pool_from_response_wrong_asset_count() {
        let data = json!({"assets": [{"amount": "1"}], "total_share": "1"});
        let err = pool_from_response("dimension_37-1", "xpla1pair", 1, &data).unwrap_err();
        assert!(matches!(err, IndexerError::Decode(_)));
    }

    #[test]
    fn test_pool_from_response_bad_amount() {
        let data = json!({
            "assets": [{"amount": "1000"}, {"amount": "not-a-number"}],
            "total_share": "1"
        });
        let err = pool_from_response("dimension_37-1", "xpla1pair", 1, &data).unwrap_err();
        assert!(matches!(err, IndexerError::Decode(_)));
    }

    #[test]
    fn test_token_from_token_info() {
        let data = json!({
            "name": "Wrapped XPLA",
            "symbol": "WXPLA",
            "decimals": 18,
            "total_supply": "1000000"
        });

        let token = token_from_token_info("dimension_37-1", "xpla1token", &data).unwrap();
        assert_eq!(token.symbol, "WXPLA");
        assert_eq!(token.name, "Wrapped XPLA");
        assert_eq!(token.decimals, 18);
        assert!(!token.verified);
    }

    #[test]
    fn test_token_from_token_info_malformed() {
        let data = json!({"symbol": "X"});
        let err = token_from_token_info("dimension_37-1", "xpla1token", &data).unwrap_err();
        assert!(matches!(err, IndexerError::Decode(_)));
    }

    #[test]
    fn test_token_from_denom_trace() {
        let trace = DenomTrace {
            path: "transfer/channel-0".into(),
            base_denom: "uatom".into(),
        };

        let token = token_from_denom_trace("dimension_37-1", "ibc/ABCDEF", &trace);
        assert_eq!(token.symbol, "uatom");
        assert_eq!(token.decimals, IBC_DEFAULT_DECIMALS);
        assert_eq!(token.protocol, "ibc");
        assert!(!token.verified);
    }

    #[test]
    fn test_token_from_asset_entry_cw20() {
        let entry = AssetEntry {
            protocol: "Dezswap".into(),
            symbol: "DEZ".into(),
            name: "Dezswap Token".into(),
            token: Some("xpla1dez".into()),
            denom: None,
            icon: "https://assets.example/dez.svg".into(),
            decimals: Some(6),
        };

        let token = token_from_asset_entry("dimension_37-1", "xpla1dez", &entry);
        assert_eq!(token.address, "xpla1dez");
        assert!(token.verified);
        assert_eq!(token.protocol, "Dezswap");
    }

    #[test]
    fn test_token_from_asset_entry_ibc_defaults() {
        let entry = AssetEntry {
            protocol: String::new(),
            symbol: "ATOM".into(),
            name: "Cosmos Hub Atom".into(),
            token: None,
            denom: Some("ibc/ABCDEF".into()),
            icon: String::new(),
            decimals: None,
        };

        let token = token_from_asset_entry("dimension_37-1", "ABCDEF", &entry);
        assert_eq!(token.address, "ibc/ABCDEF");
        assert_eq!(token.decimals, IBC_DEFAULT_DECIMALS);
    }

    #[test]
    fn test_asset_list_payload_decode() {
        let raw = json!({
            "mainnet": {
                "xpla1dez": {"symbol": "DEZ", "name": "Dezswap", "token": "xpla1dez"}
            },
            "testnet": {}
        });

        let payload: AssetListPayload = serde_json::from_value(raw).unwrap();
        assert_eq!(payload.0["mainnet"].len(), 1);
        assert!(payload.0["testnet"].is_empty());
    }
}

use std::time::Duration;

use base64::engine::general_purpose::URL_SAFE as BASE64;
use base64::Engine;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::error::IndexerError;
use crate::mappers::DenomTrace;

/// Header pinning a CosmWasm smart query to a historical height.
const BLOCK_HEIGHT_HEADER: &str = "x-cosmos-block-height";

/// Client for a full node's LCD (REST) endpoint.
///
/// Every call is blocking on the transport and bounded by the configured
/// timeout; timeouts surface as [`IndexerError::Timeout`] rather than
/// hanging.
pub struct NodeClient {
    /// Base URL of the LCD endpoint.
    base_url: String,
    /// Shared HTTP client with the timeout applied.
    http: reqwest::Client,
}

/// Envelope of `GET /cosmos/base/tendermint/v1beta1/blocks/latest`.
#[derive(Deserialize)]
struct LatestBlockResponse {
    /// The block payload.
    block: BlockResponse,
}

/// Block payload inside the latest-block envelope.
#[derive(Deserialize)]
struct BlockResponse {
    /// The block header.
    header: BlockHeaderResponse,
}

/// Header fields we care about.
#[derive(Deserialize)]
struct BlockHeaderResponse {
    /// Block height as a decimal string.
    height: String,
}

/// Envelope of a CosmWasm smart query.
#[derive(Deserialize)]
struct SmartQueryResponse {
    /// The contract's response, shape known only to the caller.
    data: Value,
}

/// Envelope of `GET /ibc/apps/transfer/v1/denom_traces/{hash}`.
#[derive(Deserialize)]
struct DenomTraceResponse {
    /// The resolved trace.
    denom_trace: DenomTrace,
}

impl NodeClient {
    /// Creates a client for the given LCD base URL.
    ///
    /// # Errors
    /// * [`IndexerError::Decode`] if the base URL is not a valid absolute URL
    /// * [`IndexerError::Network`] if the underlying HTTP client cannot be
    ///   built
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, IndexerError> {
        let base = Url::parse(base_url)
            .map_err(|err| IndexerError::Decode(format!("invalid node url {base_url}: {err}")))?;

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(IndexerError::Network)?;

        Ok(Self {
            base_url: base.as_str().trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Returns the node's current block height.
    ///
    /// # Errors
    /// * [`IndexerError::Network`] / [`IndexerError::Timeout`] on transport
    ///   failure
    /// * [`IndexerError::Decode`] if the response height is not numeric
    pub async fn latest_height(&self) -> Result<u64, IndexerError> {
        let url = format!("{}/cosmos/base/tendermint/v1beta1/blocks/latest", self.base_url);
        let response: LatestBlockResponse = self.get_json(&url, 0).await?;

        response.block.header.height.parse().map_err(|_| {
            IndexerError::Decode(format!(
                "non-numeric block height {:?}",
                response.block.header.height
            ))
        })
    }

    /// Performs a smart contract-state query as of `height`; `0` means
    /// latest.
    ///
    /// # Errors
    /// * [`IndexerError::NotFound`] if the contract or the query is invalid
    /// * [`IndexerError::Network`] / [`IndexerError::Timeout`] on transport
    ///   failure
    /// * [`IndexerError::Decode`] if the response body is not the expected
    ///   envelope
    pub async fn query_contract_state(
        &self,
        address: &str,
        query: &Value,
        height: u64,
    ) -> Result<Value, IndexerError> {
        let payload = encode_query(query);
        let url = format!(
            "{}/cosmwasm/wasm/v1/contract/{address}/smart/{payload}",
            self.base_url
        );

        let response: SmartQueryResponse = self.get_json(&url, height).await?;
        Ok(response.data)
    }

    /// Resolves an IBC denomination hash to its trace.
    ///
    /// # Errors
    /// * [`IndexerError::NotFound`] if the hash is unregistered
    /// * [`IndexerError::Network`] / [`IndexerError::Timeout`] on transport
    ///   failure
    /// * [`IndexerError::Decode`] on a malformed body
    pub async fn query_ibc_denom_trace(&self, hash: &str) -> Result<DenomTrace, IndexerError> {
        let url = format!("{}/ibc/apps/transfer/v1/denom_traces/{hash}", self.base_url);
        let response: DenomTraceResponse = self.get_json(&url, 0).await?;
        Ok(response.denom_trace)
    }

    /// Issues a GET and decodes the JSON body, attaching the height header
    /// when `height > 0`.
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        height: u64,
    ) -> Result<T, IndexerError> {
        let mut request = self.http.get(url);
        if height > 0 {
            request = request.header(BLOCK_HEIGHT_HEADER, height.to_string());
        }

        let response = request.send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(IndexerError::NotFound(url.to_string()));
        }
        let response = response.error_for_status().map_err(IndexerError::Network)?;

        response
            .json()
            .await
            .map_err(|e| IndexerError::Decode(format!("response from {url}: {e}")))
    }
}

/// Encodes a smart-query payload for embedding in a URL path segment.
///
/// The URL-safe alphabet matters: the standard one emits `/` and `+`, which
/// would corrupt the route for arbitrary payloads.
fn encode_query(query: &Value) -> String {
    BASE64.encode(query.to_string())
}

use std::time::Duration;

use reqwest::StatusCode;

use crate::error::IndexerError;
use crate::mappers::AssetListPayload;

/// Client for externally published verified-asset registries.
pub struct AssetListClient {
    /// Shared HTTP client with the timeout applied.
    http: reqwest::Client,
}

impl AssetListClient {
    /// Creates a registry client.
    ///
    /// # Errors
    /// * If the underlying HTTP client cannot be built
    pub fn new(timeout: Duration) -> Result<Self, IndexerError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(IndexerError::Network)?;

        Ok(Self { http })
    }

    /// Fetches and decodes a registry document.
    ///
    /// Transport failures and decode failures are distinct: a registry that
    /// answers with unparseable JSON is a schema problem, not an outage.
    ///
    /// # Errors
    /// * [`IndexerError::NotFound`] if the endpoint is gone
    /// * [`IndexerError::Network`] / [`IndexerError::Timeout`] on transport
    ///   failure
    /// * [`IndexerError::Decode`] if the body is not a registry document
    pub async fn fetch(&self, endpoint: &str) -> Result<AssetListPayload, IndexerError> {
        let response = self.http.get(endpoint).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(IndexerError::NotFound(endpoint.to_string()));
        }
        let response = response.error_for_status().map_err(IndexerError::Network)?;

        response
            .json()
            .await
            .map_err(|e| IndexerError::Decode(format!("asset list from {endpoint}: {e}")))
    }
}

use std::collections::HashSet;

use log::{info, warn};

use crate::error::IndexerError;
use crate::indexer::Indexer;
use crate::models::Pair;

impl Indexer {
    /// Ensures every asset referenced by any known pair has a token row.
    ///
    /// Existing rows are never touched here; metadata corrections are the
    /// verified-token procedure's job. The first unresolvable fetch aborts
    /// the run with nothing persisted, except bare native denoms, which have
    /// no metadata source and are skipped per asset.
    ///
    /// # Errors
    /// * Repository read/write failures
    /// * The first node fetch failure other than
    ///   [`IndexerError::UnsupportedAddressKind`]
    pub async fn update_tokens(&self) -> Result<(), IndexerError> {
        let pairs = self.repos.persist.pairs(0, 0, false).await?;
        let stored = self.repos.persist.tokens(0, 0, false).await?;

        let known: HashSet<String> = stored
            .into_iter()
            .filter(|t| t.chain_id == self.chain_id)
            .map(|t| t.address)
            .collect();

        let candidates = missing_asset_addresses(&pairs, &known);
        info!(
            "indexer::update_tokens: {} pairs reference {} unknown assets",
            pairs.len(),
            candidates.len()
        );

        let mut staged = Vec::new();
        for address in candidates {
            match self.repos.node.token(&address).await {
                Ok(token) => staged.push(token),
                Err(e) if matches!(e.root(), IndexerError::UnsupportedAddressKind(_)) => {
                    warn!("indexer::update_tokens: no metadata source for {address}, skipping");
                }
                Err(e) => return Err(e.context("update_tokens")),
            }
        }

        if staged.is_empty() {
            info!("indexer::update_tokens: no new tokens, nothing to do");
            return Ok(());
        }

        self.repos.persist.save_tokens(&staged).await?;
        info!("indexer::update_tokens: saved {} new tokens", staged.len());
        Ok(())
    }
}

/// Every asset address referenced by `pairs` and absent from `known`,
/// deduplicated across pairs in first-seen order.
#[must_use]
pub fn missing_asset_addresses(pairs: &[Pair], known: &HashSet<String>) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut missing = Vec::new();

    for pair in pairs {
        for address in pair.asset_addresses() {
            if !known.contains(address) && seen.insert(address) {
                missing.push(address.to_string());
            }
        }
    }

    missing
}

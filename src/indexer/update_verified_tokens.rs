use std::collections::{HashMap, HashSet};

use log::info;

use crate::error::IndexerError;
use crate::indexer::Indexer;
use crate::models::Token;

impl Indexer {
    /// Brings the `verified` flag and metadata in line with the published
    /// registries.
    ///
    /// Verification status tracks the external source of truth exactly:
    /// entries absent or differing from storage are upserted, and stored
    /// tokens marked verified but missing from the current set are demoted
    /// with only the flag flipped.
    ///
    /// # Errors
    /// * Repository read/write failures
    /// * Registry fetch or decode failures
    /// * [`IndexerError::UnsupportedNetwork`] for an unregistered chain id
    pub async fn update_verified_tokens(&self) -> Result<(), IndexerError> {
        let stored: Vec<Token> = self
            .repos
            .persist
            .tokens(0, 0, false)
            .await?
            .into_iter()
            .filter(|t| t.chain_id == self.chain_id)
            .collect();
        let verified = self.repos.asset.verified_tokens(&self.chain_id).await?;

        let staged = diff_verified(&stored, &verified);
        info!(
            "indexer::update_verified_tokens: {} verified entries, {} rows to write",
            verified.len(),
            staged.len()
        );

        if staged.is_empty() {
            return Ok(());
        }

        self.repos.persist.save_tokens(&staged).await?;
        Ok(())
    }
}

/// The minimal write set bringing `stored` in line with `verified`.
///
/// Structural field-wise equality decides whether a stored row needs
/// rewriting; stored tokens verified yesterday but absent from today's set
/// are demoted in place.
#[must_use]
pub fn diff_verified(stored: &[Token], verified: &[Token]) -> Vec<Token> {
    let by_address: HashMap<&str, &Token> =
        stored.iter().map(|t| (t.address.as_str(), t)).collect();

    let mut staged = Vec::new();
    for entry in verified {
        match by_address.get(entry.address.as_str()) {
            Some(existing) if *existing == entry => {}
            _ => staged.push(entry.clone()),
        }
    }

    let current: HashSet<&str> = verified.iter().map(|t| t.address.as_str()).collect();
    for token in stored {
        if token.verified && !current.contains(token.address.as_str()) {
            let mut demoted = token.clone();
            demoted.verified = false;
            staged.push(demoted);
        }
    }

    staged
}

//! Reconciliation orchestrator.
//!
//! Each procedure rebuilds its working set from persisted state, diffs it
//! against the appropriate source, and writes only the changed set. Runs are
//! stateless and idempotent, so a crashed or retried run converges to the
//! same end state.

use crate::repo::Repositories;

/// Pool snapshot refresh.
pub mod update_latest_pools;
/// Token discovery for pair-referenced assets.
pub mod update_tokens;
/// Verified-flag and metadata reconciliation.
pub mod update_verified_tokens;

#[cfg(test)]
pub mod test_helpers;

pub use update_tokens::missing_asset_addresses;
pub use update_verified_tokens::diff_verified;

/// The reconciliation orchestrator.
///
/// Holds no state between invocations; every run starts from the
/// persistence repository.
pub struct Indexer {
    /// Chain id the mirror is scoped to.
    chain_id: String,
    /// The three data sources, accessed through their interfaces.
    repos: Repositories,
}

impl Indexer {
    /// Creates an orchestrator over the given repositories.
    #[must_use]
    pub fn new(chain_id: &str, repos: Repositories) -> Self {
        Self {
            chain_id: chain_id.to_string(),
            repos,
        }
    }
}

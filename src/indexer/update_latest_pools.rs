use log::info;

use crate::error::IndexerError;
use crate::indexer::Indexer;

impl Indexer {
    /// Refreshes the reserve snapshot of every known pool.
    ///
    /// One height is fetched at the start of the run and used for the whole
    /// batch, so all snapshots in a run are comparably "as of" the same
    /// block. Any single pool query failure aborts the run with nothing
    /// persisted; a half-height batch is worse than a delayed, complete one.
    ///
    /// # Errors
    /// * Repository read/write failures
    /// * The first node query failure in the batch
    pub async fn update_latest_pools(&self) -> Result<(), IndexerError> {
        let pairs = self.repos.persist.pairs(0, 0, false).await?;
        if pairs.is_empty() {
            info!("indexer::update_latest_pools: no pairs, nothing to do");
            return Ok(());
        }

        let height = self.repos.node.latest_height().await?;
        info!(
            "indexer::update_latest_pools: snapshotting {} pools at height {height}",
            pairs.len()
        );

        let mut pools = Vec::with_capacity(pairs.len());
        for pair in &pairs {
            let pool = self
                .repos
                .node
                .pool(&pair.contract, height)
                .await
                .map_err(|e| e.context("update_latest_pools"))?;
            pools.push(pool);
        }

        self.repos.persist.save_latest_pools(&pools, height).await?;
        self.repos.persist.save_synced_height(height).await?;
        Ok(())
    }
}

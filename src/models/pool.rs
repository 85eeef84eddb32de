use bigdecimal::BigDecimal;
use diesel::{Insertable, Queryable, Selectable};

/// A point-in-time snapshot of a pool's reserves.
///
/// Amounts are arbitrary-precision decimals parsed from the node's decimal
/// strings; they never pass through floating point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolInfo {
    /// The chain scope of the pool.
    pub chain_id: String,
    /// The pair contract address.
    pub address: String,
    /// The block height the reserves were observed at.
    pub height: u64,
    /// The reserve of the first asset.
    pub asset0_amount: BigDecimal,
    /// The reserve of the second asset.
    pub asset1_amount: BigDecimal,
    /// The total supply of the liquidity-pool token.
    pub lp_amount: BigDecimal,
}

/// A `latest_pools` row to insert.
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schemas::latest_pools)]
pub struct NewPoolRow {
    /// The chain scope of the pool.
    pub chain_id: String,
    /// The pair contract address.
    pub address: String,
    /// The block height of the snapshot.
    pub height: i64,
    /// The reserve of the first asset.
    pub asset0_amount: BigDecimal,
    /// The reserve of the second asset.
    pub asset1_amount: BigDecimal,
    /// The total supply of the liquidity-pool token.
    pub lp_amount: BigDecimal,
}

impl NewPoolRow {
    /// Builds an insertable row from a snapshot, tagged with `height`.
    #[must_use]
    pub fn at_height(pool: &PoolInfo, height: u64) -> Self {
        Self {
            chain_id: pool.chain_id.clone(),
            address: pool.address.clone(),
            height: i64::try_from(height).unwrap_or(i64::MAX),
            asset0_amount: pool.asset0_amount.clone(),
            asset1_amount: pool.asset1_amount.clone(),
            lp_amount: pool.lp_amount.clone(),
        }
    }
}

/// A `synced_height` row as stored.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schemas::synced_height)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SyncedHeightRow {
    /// The row id.
    pub id: i64,
    /// The chain the height belongs to.
    pub chain_id: String,
    /// The stored height.
    pub height: i64,
}

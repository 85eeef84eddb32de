use diesel::{Queryable, Selectable};

/// A registered trading pair linking two assets and a liquidity-pool token.
///
/// Pairs are written by the upstream ETL pipeline and are read-only to this
/// process.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schemas::pairs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Pair {
    /// The row id of the pair.
    pub id: i64,
    /// The chain the pair is registered on.
    pub chain_id: String,
    /// The pair contract address.
    pub contract: String,
    /// The first constituent asset address.
    pub asset0: String,
    /// The second constituent asset address.
    pub asset1: String,
    /// The liquidity-pool token address.
    pub lp: String,
}

impl Pair {
    /// Every asset address this pair references, in stable order.
    #[must_use]
    pub fn asset_addresses(&self) -> [&str; 3] {
        [&self.asset0, &self.asset1, &self.lp]
    }
}

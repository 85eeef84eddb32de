use async_trait::async_trait;
use diesel::upsert::excluded;
use diesel::{ExpressionMethods, OptionalExtension, QueryDsl, SelectableHelper};
use diesel_async::RunQueryDsl;

use crate::error::IndexerError;
use crate::models::pool::{NewPoolRow, SyncedHeightRow};
use crate::models::token::{NewTokenRow, TokenRow};
use crate::models::{Pair, PoolInfo, Token};
use crate::repo::PersistRepository;
use crate::schemas::{latest_pools, pairs, synced_height, tokens};
use crate::utils::db_connect::PgPool;

/// Diesel-backed persistence over two databases: the ETL output (pairs,
/// read-only) and the mirror this process owns.
pub struct DieselPersistRepository {
    /// Chain id scoping pair reads and height bookkeeping.
    chain_id: String,
    /// Pool to the ETL output database.
    src: PgPool,
    /// Pool to the mirror database.
    dst: PgPool,
}

impl DieselPersistRepository {
    /// Creates a repository scoped to `chain_id`.
    #[must_use]
    pub fn new(chain_id: &str, src: PgPool, dst: PgPool) -> Self {
        Self {
            chain_id: chain_id.to_string(),
            src,
            dst,
        }
    }
}

#[async_trait]
impl PersistRepository for DieselPersistRepository {
    async fn pairs(
        &self,
        since_id: i64,
        limit: i64,
        desc: bool,
    ) -> Result<Vec<Pair>, IndexerError> {
        let mut conn = self.src.get().await?;

        let mut query = pairs::table
            .select(Pair::as_select())
            .filter(pairs::chain_id.eq(&self.chain_id))
            .into_boxed();

        if since_id > 0 {
            query = if desc {
                query.filter(pairs::id.lt(since_id))
            } else {
                query.filter(pairs::id.gt(since_id))
            };
        }
        query = if desc {
            query.order(pairs::id.desc())
        } else {
            query.order(pairs::id.asc())
        };
        if limit > 0 {
            query = query.limit(limit);
        }

        Ok(query.load::<Pair>(&mut conn).await?)
    }

    async fn tokens(
        &self,
        since_id: i64,
        limit: i64,
        desc: bool,
    ) -> Result<Vec<Token>, IndexerError> {
        let mut conn = self.dst.get().await?;

        let mut query = tokens::table.select(TokenRow::as_select()).into_boxed();

        if since_id > 0 {
            query = if desc {
                query.filter(tokens::id.lt(since_id))
            } else {
                query.filter(tokens::id.gt(since_id))
            };
        }
        query = if desc {
            query.order(tokens::id.desc())
        } else {
            query.order(tokens::id.asc())
        };
        if limit > 0 {
            query = query.limit(limit);
        }

        let rows = query.load::<TokenRow>(&mut conn).await?;
        Ok(rows.into_iter().map(Token::from).collect())
    }

    async fn save_tokens(&self, staged: &[Token]) -> Result<(), IndexerError> {
        if staged.is_empty() {
            return Ok(());
        }

        let mut conn = self.dst.get().await?;
        let rows: Vec<NewTokenRow> = staged.iter().map(NewTokenRow::from).collect();

        diesel::insert_into(tokens::table)
            .values(&rows)
            .on_conflict((tokens::chain_id, tokens::address))
            .do_update()
            .set((
                tokens::protocol.eq(excluded(tokens::protocol)),
                tokens::symbol.eq(excluded(tokens::symbol)),
                tokens::name.eq(excluded(tokens::name)),
                tokens::decimals.eq(excluded(tokens::decimals)),
                tokens::icon.eq(excluded(tokens::icon)),
                tokens::verified.eq(excluded(tokens::verified)),
            ))
            .execute(&mut conn)
            .await?;

        Ok(())
    }

    async fn save_latest_pools(
        &self,
        pools: &[PoolInfo],
        height: u64,
    ) -> Result<(), IndexerError> {
        if pools.is_empty() {
            return Ok(());
        }

        let mut conn = self.dst.get().await?;
        let rows: Vec<NewPoolRow> = pools
            .iter()
            .map(|pool| NewPoolRow::at_height(pool, height))
            .collect();

        diesel::insert_into(latest_pools::table)
            .values(&rows)
            .execute(&mut conn)
            .await?;

        Ok(())
    }

    async fn synced_height(&self) -> Result<u64, IndexerError> {
        let mut conn = self.dst.get().await?;

        let row = synced_height::table
            .filter(synced_height::chain_id.eq(&self.chain_id))
            .select(SyncedHeightRow::as_select())
            .first::<SyncedHeightRow>(&mut conn)
            .await
            .optional()?;

        if let Some(row) = row {
            return Ok(u64::try_from(row.height).unwrap_or(0));
        }

        // Find-or-create: first access seeds a zero row.
        diesel::insert_into(synced_height::table)
            .values((
                synced_height::chain_id.eq(&self.chain_id),
                synced_height::height.eq(0_i64),
            ))
            .on_conflict(synced_height::chain_id)
            .do_nothing()
            .execute(&mut conn)
            .await?;

        Ok(0)
    }

    async fn save_synced_height(&self, height: u64) -> Result<(), IndexerError> {
        let mut conn = self.dst.get().await?;
        let height = i64::try_from(height).unwrap_or(i64::MAX);

        diesel::insert_into(synced_height::table)
            .values((
                synced_height::chain_id.eq(&self.chain_id),
                synced_height::height.eq(height),
            ))
            .on_conflict(synced_height::chain_id)
            .do_update()
            .set(synced_height::height.eq(height))
            .execute(&mut conn)
            .await?;

        Ok(())
    }
}

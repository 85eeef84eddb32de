use diesel_async::pooled_connection::deadpool::Pool;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::AsyncPgConnection;

use crate::error::IndexerError;

/// An async Postgres connection pool.
pub type PgPool = Pool<AsyncPgConnection>;

/// Maximum connections per pool. The indexer runs three sequential tasks, so
/// contention stays low.
const MAX_POOL_SIZE: usize = 8;

/// Builds a connection pool for the given database URL.
///
/// Pools are constructed once at startup and handed to the repositories that
/// need them; there is no process-global pool.
///
/// # Errors
/// * [`IndexerError::Pool`] if pool construction fails
pub fn new_pool(database_url: &str) -> Result<PgPool, IndexerError> {
    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);
    Pool::builder(manager)
        .max_size(MAX_POOL_SIZE)
        .build()
        .map_err(|e| IndexerError::Pool(e.to_string()))
}

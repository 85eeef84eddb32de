//! Domain entities and their database row types.

/// Trading-pair registrations.
pub mod pair;
/// Pool reserve snapshots and the synced-height marker.
pub mod pool;
/// Fungible-asset metadata.
pub mod token;

pub use pair::Pair;
pub use pool::PoolInfo;
pub use token::Token;

//! Database schema definitions.
//!
//! `pairs` lives in the ETL output database and is read-only here; the other
//! tables live in the mirror database this process owns.

diesel::table! {
    /// Trading-pair registrations written by the upstream ETL pipeline.
    pairs (id) {
        /// Row id, used for keyset pagination.
        id -> Int8,
        /// Chain the pair was registered on.
        chain_id -> Text,
        /// Pair contract address.
        contract -> Text,
        /// First constituent asset address.
        asset0 -> Text,
        /// Second constituent asset address.
        asset1 -> Text,
        /// Liquidity-pool token address.
        lp -> Text,
    }
}

diesel::table! {
    /// Fungible-asset metadata, unique on (chain_id, address).
    tokens (id) {
        /// Row id, used for keyset pagination.
        id -> Int8,
        /// Chain scope of the address.
        chain_id -> Text,
        /// Token address (cw20 contract or ibc/ denom).
        address -> Text,
        /// Protocol/origin tag from the verified registry.
        protocol -> Text,
        /// Display symbol.
        symbol -> Text,
        /// Display name.
        name -> Text,
        /// Decimal precision.
        decimals -> Int4,
        /// Icon URI.
        icon -> Text,
        /// Whether an external registry attests this token.
        verified -> Bool,
    }
}

diesel::table! {
    /// Point-in-time pool reserve snapshots, keyed by (chain, address, height).
    latest_pools (id) {
        /// Row id.
        id -> Int8,
        /// Chain scope of the pool.
        chain_id -> Text,
        /// Pair contract address.
        address -> Text,
        /// Block height the reserves were observed at.
        height -> Int8,
        /// Reserve of the first asset.
        asset0_amount -> Numeric,
        /// Reserve of the second asset.
        asset1_amount -> Numeric,
        /// Total supply of the liquidity-pool token.
        lp_amount -> Numeric,
    }
}

diesel::table! {
    /// Last node height observed at a successful pool sync, one row per chain.
    synced_height (id) {
        /// Row id.
        id -> Int8,
        /// Chain the height belongs to.
        chain_id -> Text,
        /// The stored height.
        height -> Int8,
    }
}

use diesel::{Insertable, Queryable, Selectable};

/// Metadata about a fungible asset, scoped to a chain.
///
/// Equality is structural over every displayed field; the reconciliation diff
/// relies on it to decide whether a stored row needs rewriting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The chain scope of the address.
    pub chain_id: String,
    /// The token address (cw20 contract or `ibc/` denom).
    pub address: String,
    /// Protocol/origin tag.
    pub protocol: String,
    /// Display symbol.
    pub symbol: String,
    /// Display name.
    pub name: String,
    /// Decimal precision.
    pub decimals: i32,
    /// Icon URI.
    pub icon: String,
    /// Whether an external registry attests this token.
    pub verified: bool,
}

/// A `tokens` row as stored.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schemas::tokens)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TokenRow {
    /// The row id, used for keyset pagination.
    pub id: i64,
    /// The chain scope of the address.
    pub chain_id: String,
    /// The token address.
    pub address: String,
    /// Protocol/origin tag.
    pub protocol: String,
    /// Display symbol.
    pub symbol: String,
    /// Display name.
    pub name: String,
    /// Decimal precision.
    pub decimals: i32,
    /// Icon URI.
    pub icon: String,
    /// Whether an external registry attests this token.
    pub verified: bool,
}

impl From<TokenRow> for Token {
    fn from(row: TokenRow) -> Self {
        Self {
            chain_id: row.chain_id,
            address: row.address,
            protocol: row.protocol,
            symbol: row.symbol,
            name: row.name,
            decimals: row.decimals,
            icon: row.icon,
            verified: row.verified,
        }
    }
}

/// A `tokens` row to insert or upsert.
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schemas::tokens)]
pub struct NewTokenRow {
    /// The chain scope of the address.
    pub chain_id: String,
    /// The token address.
    pub address: String,
    /// Protocol/origin tag.
    pub protocol: String,
    /// Display symbol.
    pub symbol: String,
    /// Display name.
    pub name: String,
    /// Decimal precision.
    pub decimals: i32,
    /// Icon URI.
    pub icon: String,
    /// Whether an external registry attests this token.
    pub verified: bool,
}

impl From<&Token> for NewTokenRow {
    fn from(token: &Token) -> Self {
        Self {
            chain_id: token.chain_id.clone(),
            address: token.address.clone(),
            protocol: token.protocol.clone(),
            symbol: token.symbol.clone(),
            name: token.name.clone(),
            decimals: token.decimals,
            icon: token.icon.clone(),
            verified: token.verified,
        }
    }
}

/*!
 * # Dexmirror - DEX State Reconciliation Indexer
 *
 * Dexmirror keeps a relational mirror of decentralized-exchange state
 * (tokens, liquidity pools, verified-asset metadata) synchronized with a
 * slow, unreliable full node and with externally published verified-asset
 * registries.
 *
 * ## Core Features
 *
 * - **Token discovery**: fills in metadata for every asset referenced by a
 *   registered trading pair
 * - **Verified-set reconciliation**: tracks the externally attested token
 *   registries exactly, promotions and demotions alike
 * - **Pool snapshots**: refreshes every pool's reserves at a single block
 *   height per run
 * - **Supervised scheduling**: per-task intervals, backoff, and fatal
 *   escalation after a failure tolerance
 *
 * ## Module Structure
 *
 * - `client`: LCD and registry HTTP clients
 * - `config`: explicit process configuration
 * - `error`: the indexer's error taxonomy
 * - `indexer`: the reconciliation orchestrator
 * - `mappers`: pure wire/storage-to-domain translation
 * - `models`: domain entities and row types
 * - `repo`: swappable repository interfaces and implementations
 * - `scheduler`: interval-driven background task driver
 * - `schemas`: database schema definitions
 * - `utils`: logger and connection-pool plumbing
 */

/// LCD and registry HTTP clients
pub mod client;
/// Process configuration
pub mod config;
/// Error taxonomy
pub mod error;
/// Reconciliation orchestrator
pub mod indexer;
/// Wire/storage-to-domain translation
pub mod mappers;
/// Domain entities and row types
pub mod models;
/// Repository interfaces and implementations
pub mod repo;
/// Background task scheduler
pub mod scheduler;
/// Database schema definitions
pub mod schemas;
/// Logger and connection-pool plumbing
pub mod utils;

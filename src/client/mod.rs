//! Thin clients over the node's LCD endpoint and the published asset
//! registries.
//!
//! Calls here are single-shot: no internal retries, so failure handling stays
//! centralized in the scheduler.

/// Verified-asset registry retrieval.
pub mod assets;
/// Full-node LCD client.
pub mod node;

pub use assets::AssetListClient;
pub use node::NodeClient;

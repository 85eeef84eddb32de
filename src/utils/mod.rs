//! Logger and database plumbing.

/// Database connection pool construction.
pub mod db_connect;
/// Console logger setup.
pub mod logger;

//! SQLite repository implementations.
//!
//! [`SqliteStore`] implements both domain repository traits over a single
//! `sqlx` pool, using runtime-checked queries.

pub mod sqlite_store;

pub use sqlite_store::{PoolSettings, SqliteStore};

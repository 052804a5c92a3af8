//! SQLite storage bootstrap and connection pooling.
//!
//! # Responsibility
//! - Build bounded connection pools over file or in-memory SQLite databases.
//! - Bootstrap the fixed registry schema (`groups`, `courses`, `students`,
//!   `student_course`).
//!
//! # Invariants
//! - Every pooled connection has `foreign_keys=ON`.
//! - Pools returned by `open_pool*` have the schema in place.
//! - In-memory pools hold exactly one long-lived connection, so every checkout
//!   observes the same database.

use r2d2_sqlite::SqliteConnectionManager;
use thiserror::Error;

mod open;
pub mod schema;

pub use open::{open_pool, open_pool_in_memory};
pub use schema::bootstrap_schema;

/// Pool of SQLite connections shared by all repositories.
pub type DbPool = r2d2::Pool<SqliteConnectionManager>;

/// Connection checked out of a [`DbPool`]; returned to the pool on drop.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),
    #[error("invalid pool size {0}; expected at least 1")]
    InvalidPoolSize(u32),
}

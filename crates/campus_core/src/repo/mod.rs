//! Repository layer abstractions and SQLite implementations.
//!
//! # Responsibility
//! - Define the shared CRUD capability contract (`Repository`) and the
//!   entity-specific query contracts layered on top of it.
//! - Isolate SQL details from the orchestration service.
//!
//! # Invariants
//! - Every operation checks out exactly one pooled connection and releases it
//!   before returning. Helpers take `&Connection` and never check out another.
//! - Absence is `Ok(None)`; `StorageError` is reserved for store failures and
//!   for contract-level "no data" results (`EmptyResult`).
//! - Failures are propagated, never swallowed; the service layer logs them.

use crate::db::schema::{table_exists, table_has_column, REQUIRED_TABLES};
use crate::db::{DbError, DbPool, PooledConnection};
use rusqlite::Connection;
use thiserror::Error;

pub mod course_repo;
pub mod group_repo;
pub mod student_repo;

pub type RepoResult<T> = Result<T, StorageError>;

/// Failure at the storage boundary.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Query, constraint or connectivity failure reported by SQLite.
    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),
    /// No connection could be checked out of the pool.
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),
    /// A query whose contract forbids empty results returned no rows.
    #[error("no rows found in `{table}`")]
    EmptyResult { table: &'static str },
    #[error("registry repository requires table `{0}`")]
    MissingRequiredTable(&'static str),
    #[error("registry repository requires column `{column}` in table `{table}`")]
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Persisted rows cannot be assembled into a valid entity.
    #[error("invalid persisted registry data: {0}")]
    InvalidData(String),
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        match value {
            DbError::Sqlite(err) => Self::Sqlite(err),
            DbError::Pool(err) => Self::Pool(err),
            DbError::InvalidPoolSize(size) => {
                Self::InvalidData(format!("invalid pool size {size}"))
            }
        }
    }
}

/// CRUD capability set shared by every entity repository.
///
/// `save` ignores the entity's `id`; the store generates one and it is
/// returned. `update` and `delete` return whether a row was affected; a
/// missing row is a silent no-op.
pub trait Repository {
    type Entity;

    fn save(&self, entity: &Self::Entity) -> RepoResult<i64>;
    fn find_by_id(&self, id: i64) -> RepoResult<Option<Self::Entity>>;
    fn find_all(&self) -> RepoResult<Vec<Self::Entity>>;
    fn update(&self, entity: &Self::Entity) -> RepoResult<bool>;
    fn delete(&self, entity: &Self::Entity) -> RepoResult<bool>;
}

/// Checks out one connection for a single repository operation.
pub(crate) fn checkout(pool: &DbPool) -> RepoResult<PooledConnection> {
    Ok(pool.get()?)
}

/// Verifies that `tables` exist with the columns the repositories use.
pub(crate) fn ensure_tables_ready(pool: &DbPool, tables: &[&'static str]) -> RepoResult<()> {
    let conn = checkout(pool)?;
    ensure_tables_ready_on(&conn, tables)
}

fn ensure_tables_ready_on(conn: &Connection, tables: &[&'static str]) -> RepoResult<()> {
    for &(table, columns) in REQUIRED_TABLES {
        if !tables.contains(&table) {
            continue;
        }
        if !table_exists(conn, table)? {
            return Err(StorageError::MissingRequiredTable(table));
        }
        for &column in columns {
            if !table_has_column(conn, table, column)? {
                return Err(StorageError::MissingRequiredColumn { table, column });
            }
        }
    }
    Ok(())
}

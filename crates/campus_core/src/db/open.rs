//! Pool bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory connection pools.
//! - Configure connection pragmas required by repository behavior.
//! - Apply the schema bootstrap before returning a usable pool.

use super::schema::bootstrap_schema;
use super::{DbError, DbPool, DbResult};
use log::{error, info};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);
const CHECKOUT_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens a bounded pool over a SQLite database file.
///
/// # Side effects
/// - Creates the database file when missing and bootstraps the schema.
/// - Emits `db_open` logging events with duration and status.
///
/// # Errors
/// - `DbError::InvalidPoolSize` when `max_size` is zero.
/// - `DbError::Pool` / `DbError::Sqlite` when connections or bootstrap fail.
pub fn open_pool(path: impl AsRef<Path>, max_size: u32) -> DbResult<DbPool> {
    if max_size == 0 {
        return Err(DbError::InvalidPoolSize(max_size));
    }

    let manager = SqliteConnectionManager::file(path.as_ref()).with_init(configure_connection);
    let builder = r2d2::Pool::builder()
        .max_size(max_size)
        .connection_timeout(CHECKOUT_TIMEOUT);
    build_pool(builder, manager, "file")
}

/// Opens a single-connection pool over a private in-memory database.
///
/// The connection never expires: dropping it would discard the database.
pub fn open_pool_in_memory() -> DbResult<DbPool> {
    let manager = SqliteConnectionManager::memory().with_init(configure_connection);
    let builder = r2d2::Pool::builder()
        .max_size(1)
        .max_lifetime(None)
        .idle_timeout(None)
        .connection_timeout(CHECKOUT_TIMEOUT);
    build_pool(builder, manager, "memory")
}

fn build_pool(
    builder: r2d2::Builder<SqliteConnectionManager>,
    manager: SqliteConnectionManager,
    mode: &'static str,
) -> DbResult<DbPool> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let pool = match builder.build(manager) {
        Ok(pool) => pool,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=pool_build_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    let bootstrap = pool
        .get()
        .map_err(DbError::from)
        .and_then(|conn| bootstrap_schema(&conn));
    match bootstrap {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={mode} max_size={} duration_ms={}",
                pool.max_size(),
                started_at.elapsed().as_millis()
            );
            Ok(pool)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_bootstrap_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn configure_connection(conn: &mut Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    Ok(())
}

//! Fixed registry schema bootstrap and verification helpers.
//!
//! # Invariants
//! - Bootstrap is idempotent (`CREATE ... IF NOT EXISTS` only).
//! - The schema is never altered once created; there is no versioning.

use super::DbResult;
use rusqlite::Connection;

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Tables every registry database must provide, with the columns read or
/// written by the repositories.
pub const REQUIRED_TABLES: &[(&str, &[&str])] = &[
    ("groups", &["group_id", "group_name"]),
    ("courses", &["course_id", "course_name", "course_description"]),
    ("students", &["student_id", "group_id", "first_name", "last_name"]),
    ("student_course", &["student_id", "course_id"]),
];

/// Creates the registry tables when they do not exist yet.
pub fn bootstrap_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

/// Returns whether `table` exists in the connected database.
pub fn table_exists(conn: &Connection, table: &str) -> DbResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

/// Returns whether `table` has a column named `column`.
pub fn table_has_column(conn: &Connection, table: &str, column: &str) -> DbResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}

use campus_core::db::{open_pool, open_pool_in_memory, DbError};
use campus_core::{
    Group, Repository, SqliteCourseRepository, SqliteGroupRepository, SqliteStudentRepository,
    StorageError,
};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;

#[test]
fn open_pool_in_memory_bootstraps_all_tables() {
    let pool = open_pool_in_memory().unwrap();
    let conn = pool.get().unwrap();

    for table in ["groups", "courses", "students", "student_course"] {
        assert_table_exists(&conn, table);
    }
    let foreign_keys: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(foreign_keys, 1);
}

#[test]
fn reopening_file_database_keeps_existing_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("campus.db");

    let first = open_pool(&path, 2).unwrap();
    let groups = SqliteGroupRepository::try_new(&first).unwrap();
    let id = groups.save(&Group::new("AB-01")).unwrap();
    drop(groups);
    drop(first);

    let second = open_pool(&path, 2).unwrap();
    let groups = SqliteGroupRepository::try_new(&second).unwrap();
    let loaded = groups.find_by_id(id).unwrap().unwrap();
    assert_eq!(loaded.name, "AB-01");
}

#[test]
fn open_pool_rejects_zero_size() {
    let dir = tempfile::tempdir().unwrap();
    let err = open_pool(dir.path().join("zero.db"), 0).unwrap_err();
    assert!(matches!(err, DbError::InvalidPoolSize(0)));
}

#[test]
fn repositories_reject_pool_without_schema() {
    let pool = r2d2::Pool::builder()
        .max_size(1)
        .build(SqliteConnectionManager::memory())
        .unwrap();

    match SqliteGroupRepository::try_new(&pool) {
        Err(StorageError::MissingRequiredTable(table)) => assert_eq!(table, "groups"),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("repository must reject a database without tables"),
    }
    assert!(SqliteCourseRepository::try_new(&pool).is_err());
    assert!(SqliteStudentRepository::try_new(&pool).is_err());
}

#[test]
fn repositories_reject_table_missing_a_column() {
    let pool = r2d2::Pool::builder()
        .max_size(1)
        .build(SqliteConnectionManager::memory())
        .unwrap();
    {
        let conn = pool.get().unwrap();
        conn.execute_batch(
            "CREATE TABLE groups (group_id INTEGER PRIMARY KEY);
             CREATE TABLE students (
                student_id INTEGER PRIMARY KEY,
                group_id INTEGER NOT NULL,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL
             );",
        )
        .unwrap();
    }

    match SqliteGroupRepository::try_new(&pool) {
        Err(StorageError::MissingRequiredColumn { table, column }) => {
            assert_eq!(table, "groups");
            assert_eq!(column, "group_name");
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("repository must reject a table without group_name"),
    }
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "expected table `{table_name}` to exist");
}

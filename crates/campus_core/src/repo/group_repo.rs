//! Group repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over the `groups` table.
//! - Own the student-count aggregation used by the group size report.
//!
//! # Invariants
//! - `find_all` treats an empty table as a storage failure
//!   (`StorageError::EmptyResult`), unlike the other repositories.
//! - Student counts come from `COUNT(students.student_id)` over a LEFT JOIN,
//!   so groups without students count as zero and are never dropped.

use crate::db::DbPool;
use crate::model::group::{Group, GroupId};
use crate::repo::{checkout, ensure_tables_ready, RepoResult, Repository, StorageError};
use rusqlite::{params, OptionalExtension, Row};

const GROUP_SELECT_SQL: &str = "SELECT group_id, group_name FROM groups";

const GROUPS_BY_MAX_STUDENT_COUNT_SQL: &str = "SELECT
    g.group_id AS group_id,
    g.group_name AS group_name,
    COUNT(s.student_id) AS student_count
FROM groups g
LEFT JOIN students s ON s.group_id = g.group_id
GROUP BY g.group_id, g.group_name
HAVING COUNT(s.student_id) <= ?1
ORDER BY g.group_id ASC;";

/// Group queries beyond the shared CRUD contract.
pub trait GroupRepository: Repository<Entity = Group> {
    /// Returns groups with at most `max_count` students, including empty ones.
    fn find_with_student_count_at_most(&self, max_count: u32) -> RepoResult<Vec<Group>>;
}

/// SQLite-backed group repository.
#[derive(Clone)]
pub struct SqliteGroupRepository {
    pool: DbPool,
}

impl SqliteGroupRepository {
    /// Constructs a repository over a pool whose schema provides `groups`
    /// and `students`.
    pub fn try_new(pool: &DbPool) -> RepoResult<Self> {
        ensure_tables_ready(pool, &["groups", "students"])?;
        Ok(Self { pool: pool.clone() })
    }
}

impl Repository for SqliteGroupRepository {
    type Entity = Group;

    fn save(&self, group: &Group) -> RepoResult<GroupId> {
        let conn = checkout(&self.pool)?;
        conn.execute(
            "INSERT INTO groups (group_name) VALUES (?1);",
            [group.name.as_str()],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn find_by_id(&self, id: GroupId) -> RepoResult<Option<Group>> {
        let conn = checkout(&self.pool)?;
        let group = conn
            .query_row(
                &format!("{GROUP_SELECT_SQL} WHERE group_id = ?1;"),
                [id],
                parse_group_row,
            )
            .optional()?;
        Ok(group)
    }

    fn find_all(&self) -> RepoResult<Vec<Group>> {
        let conn = checkout(&self.pool)?;
        let mut stmt = conn.prepare(&format!("{GROUP_SELECT_SQL} ORDER BY group_id ASC;"))?;
        let groups = stmt
            .query_map([], parse_group_row)?
            .collect::<Result<Vec<_>, _>>()?;

        if groups.is_empty() {
            return Err(StorageError::EmptyResult { table: "groups" });
        }
        Ok(groups)
    }

    fn update(&self, group: &Group) -> RepoResult<bool> {
        let conn = checkout(&self.pool)?;
        let changed = conn.execute(
            "UPDATE groups SET group_name = ?1 WHERE group_id = ?2;",
            params![group.name.as_str(), group.id],
        )?;
        Ok(changed > 0)
    }

    fn delete(&self, group: &Group) -> RepoResult<bool> {
        let conn = checkout(&self.pool)?;
        let changed = conn.execute("DELETE FROM groups WHERE group_id = ?1;", [group.id])?;
        Ok(changed > 0)
    }
}

impl GroupRepository for SqliteGroupRepository {
    fn find_with_student_count_at_most(&self, max_count: u32) -> RepoResult<Vec<Group>> {
        let conn = checkout(&self.pool)?;
        let mut stmt = conn.prepare(GROUPS_BY_MAX_STUDENT_COUNT_SQL)?;
        let groups = stmt
            .query_map([i64::from(max_count)], parse_group_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(groups)
    }
}

fn parse_group_row(row: &Row<'_>) -> rusqlite::Result<Group> {
    Ok(Group::with_id(
        row.get::<_, GroupId>("group_id")?,
        row.get::<_, String>("group_name")?,
    ))
}

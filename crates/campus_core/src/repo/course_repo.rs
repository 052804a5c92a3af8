//! Course repository contracts and SQLite implementation.
//!
//! # Invariants
//! - `find_all` returns an empty list when no courses exist.
//! - Deleting a course also deletes its enrollment links.

use crate::db::DbPool;
use crate::model::course::{Course, CourseId};
use crate::repo::{checkout, ensure_tables_ready, RepoResult, Repository};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};

const COURSE_SELECT_SQL: &str = "SELECT course_id, course_name, course_description FROM courses";

/// Course repository contract; courses need no queries beyond CRUD.
pub trait CourseRepository: Repository<Entity = Course> {}

/// SQLite-backed course repository.
#[derive(Clone)]
pub struct SqliteCourseRepository {
    pool: DbPool,
}

impl SqliteCourseRepository {
    pub fn try_new(pool: &DbPool) -> RepoResult<Self> {
        ensure_tables_ready(pool, &["courses", "student_course"])?;
        Ok(Self { pool: pool.clone() })
    }
}

impl Repository for SqliteCourseRepository {
    type Entity = Course;

    fn save(&self, course: &Course) -> RepoResult<CourseId> {
        let conn = checkout(&self.pool)?;
        conn.execute(
            "INSERT INTO courses (course_name, course_description) VALUES (?1, ?2);",
            params![course.name.as_str(), course.description.as_str()],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn find_by_id(&self, id: CourseId) -> RepoResult<Option<Course>> {
        let conn = checkout(&self.pool)?;
        Ok(find_course_on(&conn, id)?)
    }

    fn find_all(&self) -> RepoResult<Vec<Course>> {
        let conn = checkout(&self.pool)?;
        let mut stmt = conn.prepare(&format!("{COURSE_SELECT_SQL} ORDER BY course_id ASC;"))?;
        let courses = stmt
            .query_map([], parse_course_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(courses)
    }

    fn update(&self, course: &Course) -> RepoResult<bool> {
        let conn = checkout(&self.pool)?;
        let changed = conn.execute(
            "UPDATE courses
             SET
                course_name = ?1,
                course_description = ?2
             WHERE course_id = ?3;",
            params![course.name.as_str(), course.description.as_str(), course.id],
        )?;
        Ok(changed > 0)
    }

    /// Deletes the course together with its enrollment links.
    fn delete(&self, course: &Course) -> RepoResult<bool> {
        let mut conn = checkout(&self.pool)?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let unlinked = tx.execute(
            "DELETE FROM student_course WHERE course_id = ?1;",
            [course.id],
        )?;
        let changed = tx.execute("DELETE FROM courses WHERE course_id = ?1;", [course.id])?;
        tx.commit()?;

        debug!(
            "event=course_delete module=repo status=ok course_id={} removed_links={}",
            course.id, unlinked
        );
        Ok(changed > 0)
    }
}

impl CourseRepository for SqliteCourseRepository {}

fn find_course_on(conn: &Connection, id: CourseId) -> rusqlite::Result<Option<Course>> {
    conn.query_row(
        &format!("{COURSE_SELECT_SQL} WHERE course_id = ?1;"),
        [id],
        parse_course_row,
    )
    .optional()
}

pub(crate) fn parse_course_row(row: &Row<'_>) -> rusqlite::Result<Course> {
    Ok(Course::with_id(
        row.get::<_, CourseId>("course_id")?,
        row.get::<_, String>("course_name")?,
        row.get::<_, String>("course_description")?,
    ))
}

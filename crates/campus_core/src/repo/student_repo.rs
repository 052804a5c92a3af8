//! Student repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist students and their course links (`student_course`).
//! - Reassemble full `Student` aggregates: student row, owning group and
//!   enrolled courses.
//!
//! # Invariants
//! - Every multi-statement read or write runs inside one transaction on one
//!   pooled connection, so the student row, its group and its course list
//!   come from the same snapshot.
//! - Enrollment links have set semantics; adding an existing link is a no-op.
//! - Deleting a student also deletes its enrollment links.
//! - A student whose group row is missing is reported as
//!   `StorageError::InvalidData`, never returned with a placeholder group.

use crate::db::DbPool;
use crate::model::course::{Course, CourseId};
use crate::model::group::{Group, GroupId};
use crate::model::student::{Student, StudentId};
use crate::repo::course_repo::parse_course_row;
use crate::repo::{checkout, ensure_tables_ready, RepoResult, Repository, StorageError};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};

const STUDENT_SELECT_SQL: &str = "SELECT
    s.student_id AS student_id,
    s.first_name AS first_name,
    s.last_name AS last_name,
    s.group_id AS group_id,
    g.group_name AS group_name
FROM students s
LEFT JOIN groups g ON g.group_id = s.group_id";

const COURSES_FOR_STUDENT_SQL: &str = "SELECT
    c.course_id AS course_id,
    c.course_name AS course_name,
    c.course_description AS course_description
FROM courses c
INNER JOIN student_course sc ON sc.course_id = c.course_id
WHERE sc.student_id = ?1
ORDER BY c.course_id ASC;";

const STUDENT_IDS_BY_COURSE_NAME_SQL: &str = "SELECT DISTINCT s.student_id AS student_id
FROM students s
INNER JOIN student_course sc ON sc.student_id = s.student_id
INNER JOIN courses c ON c.course_id = sc.course_id
WHERE c.course_name = ?1
ORDER BY s.student_id ASC;";

/// Student queries and enrollment relation management.
pub trait StudentRepository: Repository<Entity = Student> {
    /// Links `student` to `course_id`.
    ///
    /// Returns `false` when the link already existed.
    fn add_enrollment(&self, student: &Student, course_id: CourseId) -> RepoResult<bool>;
    /// Unlinks `student` from `course_id`.
    ///
    /// Returns `false` when there was nothing to remove.
    fn remove_enrollment(&self, student: &Student, course_id: CourseId) -> RepoResult<bool>;
    /// Returns fully resolved students enrolled in any course named
    /// `course_name`, ordered by student id.
    fn find_by_course_name(&self, course_name: &str) -> RepoResult<Vec<Student>>;
}

/// SQLite-backed student repository.
#[derive(Clone)]
pub struct SqliteStudentRepository {
    pool: DbPool,
}

impl SqliteStudentRepository {
    /// Constructs a repository over a pool providing all four registry tables.
    pub fn try_new(pool: &DbPool) -> RepoResult<Self> {
        ensure_tables_ready(pool, &["groups", "courses", "students", "student_course"])?;
        Ok(Self { pool: pool.clone() })
    }
}

impl Repository for SqliteStudentRepository {
    type Entity = Student;

    /// Inserts the student and links every course in `student.courses`.
    fn save(&self, student: &Student) -> RepoResult<StudentId> {
        let mut conn = checkout(&self.pool)?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO students (group_id, first_name, last_name) VALUES (?1, ?2, ?3);",
            params![
                student.group.id,
                student.first_name.as_str(),
                student.last_name.as_str(),
            ],
        )?;
        let student_id = tx.last_insert_rowid();

        for course in &student.courses {
            insert_enrollment(&tx, student_id, course.id)?;
        }

        tx.commit()?;
        Ok(student_id)
    }

    fn find_by_id(&self, id: StudentId) -> RepoResult<Option<Student>> {
        let mut conn = checkout(&self.pool)?;
        let tx = conn.transaction()?;
        let student = load_student(&tx, id)?;
        tx.commit()?;
        Ok(student)
    }

    fn find_all(&self) -> RepoResult<Vec<Student>> {
        let mut conn = checkout(&self.pool)?;
        let tx = conn.transaction()?;

        let rows = {
            let mut stmt = tx.prepare(&format!("{STUDENT_SELECT_SQL} ORDER BY s.student_id ASC;"))?;
            let rows = stmt
                .query_map([], StudentRow::from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            rows
        };

        let mut students = Vec::with_capacity(rows.len());
        for row in rows {
            students.push(assemble_student(&tx, row)?);
        }
        tx.commit()?;

        debug!(
            "event=student_find_all module=repo status=ok count={}",
            students.len()
        );
        Ok(students)
    }

    fn update(&self, student: &Student) -> RepoResult<bool> {
        let conn = checkout(&self.pool)?;
        let changed = conn.execute(
            "UPDATE students
             SET
                group_id = ?1,
                first_name = ?2,
                last_name = ?3
             WHERE student_id = ?4;",
            params![
                student.group.id,
                student.first_name.as_str(),
                student.last_name.as_str(),
                student.id,
            ],
        )?;
        Ok(changed > 0)
    }

    /// Deletes the student together with its enrollment links.
    fn delete(&self, student: &Student) -> RepoResult<bool> {
        let mut conn = checkout(&self.pool)?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let unlinked = tx.execute(
            "DELETE FROM student_course WHERE student_id = ?1;",
            [student.id],
        )?;
        let changed = tx.execute("DELETE FROM students WHERE student_id = ?1;", [student.id])?;
        tx.commit()?;

        debug!(
            "event=student_delete module=repo status=ok student_id={} removed_links={}",
            student.id, unlinked
        );
        Ok(changed > 0)
    }
}

impl StudentRepository for SqliteStudentRepository {
    fn add_enrollment(&self, student: &Student, course_id: CourseId) -> RepoResult<bool> {
        let conn = checkout(&self.pool)?;
        insert_enrollment(&conn, student.id, course_id)
    }

    fn remove_enrollment(&self, student: &Student, course_id: CourseId) -> RepoResult<bool> {
        let conn = checkout(&self.pool)?;
        let changed = conn.execute(
            "DELETE FROM student_course WHERE student_id = ?1 AND course_id = ?2;",
            params![student.id, course_id],
        )?;
        Ok(changed > 0)
    }

    fn find_by_course_name(&self, course_name: &str) -> RepoResult<Vec<Student>> {
        let mut conn = checkout(&self.pool)?;
        let tx = conn.transaction()?;

        let ids = {
            let mut stmt = tx.prepare(STUDENT_IDS_BY_COURSE_NAME_SQL)?;
            let ids = stmt
                .query_map([course_name], |row| row.get::<_, StudentId>("student_id"))?
                .collect::<Result<Vec<_>, _>>()?;
            ids
        };

        let mut students = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(student) = load_student(&tx, id)? {
                students.push(student);
            }
        }
        tx.commit()?;
        Ok(students)
    }
}

/// Student row joined with its group name, before course resolution.
struct StudentRow {
    id: StudentId,
    first_name: String,
    last_name: String,
    group_id: GroupId,
    group_name: Option<String>,
}

impl StudentRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("student_id")?,
            first_name: row.get("first_name")?,
            last_name: row.get("last_name")?,
            group_id: row.get("group_id")?,
            group_name: row.get("group_name")?,
        })
    }
}

fn load_student(conn: &Connection, id: StudentId) -> RepoResult<Option<Student>> {
    let row = conn
        .query_row(
            &format!("{STUDENT_SELECT_SQL} WHERE s.student_id = ?1;"),
            [id],
            StudentRow::from_row,
        )
        .optional()?;

    match row {
        Some(row) => Ok(Some(assemble_student(conn, row)?)),
        None => Ok(None),
    }
}

fn assemble_student(conn: &Connection, row: StudentRow) -> RepoResult<Student> {
    let group_name = row.group_name.ok_or_else(|| {
        StorageError::InvalidData(format!(
            "student {} references missing group {}",
            row.id, row.group_id
        ))
    })?;
    let courses = load_courses_for_student(conn, row.id)?;

    Ok(Student {
        id: row.id,
        first_name: row.first_name,
        last_name: row.last_name,
        group: Group::with_id(row.group_id, group_name),
        courses,
    })
}

fn load_courses_for_student(conn: &Connection, student_id: StudentId) -> RepoResult<Vec<Course>> {
    let mut stmt = conn.prepare(COURSES_FOR_STUDENT_SQL)?;
    let courses = stmt
        .query_map([student_id], parse_course_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(courses)
}

fn insert_enrollment(
    conn: &Connection,
    student_id: StudentId,
    course_id: CourseId,
) -> RepoResult<bool> {
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO student_course (student_id, course_id) VALUES (?1, ?2);",
        params![student_id, course_id],
    )?;
    Ok(inserted == 1)
}

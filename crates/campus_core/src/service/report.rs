//! Renderable results of registry operations.
//!
//! Every report implements `Display` with the line format shown to users.

use crate::model::course::CourseId;
use crate::model::group::Group;
use crate::model::student::{Student, StudentId};
use crate::service::registry_service::ValidationFailure;
use std::fmt::{Display, Formatter};

/// Groups whose student count does not exceed `max_count`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCountReport {
    pub max_count: u32,
    pub groups: Vec<Group>,
}

impl Display for GroupCountReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Groups of {} or fewer students:", self.max_count)?;
        for group in &self.groups {
            write!(f, "\n{group}")?;
        }
        Ok(())
    }
}

/// Students enrolled in courses named `course_name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseRosterReport {
    pub course_name: String,
    pub students: Vec<Student>,
}

impl Display for CourseRosterReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.students.is_empty() {
            return write!(
                f,
                "No students found for the course with name: {}",
                self.course_name
            );
        }

        write!(f, "Students related to the course '{}':", self.course_name)?;
        for student in &self.students {
            write!(f, "\n{student}")?;
        }
        Ok(())
    }
}

/// Outcome of deleting a student by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentDeletion {
    /// The student existed and was removed together with its enrollments.
    Deleted(Student),
    NotFound(StudentId),
}

impl Display for StudentDeletion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Deleted(student) => write!(f, "Deleted student with ID: {}", student.id),
            Self::NotFound(id) => write!(f, "Student not found with ID: {id}"),
        }
    }
}

/// Per-student result inside a bulk enrollment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Added,
    /// The link already existed; nothing was written.
    AlreadyEnrolled,
    Rejected(Vec<ValidationFailure>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentAttempt {
    pub student_id: StudentId,
    pub outcome: AttemptOutcome,
}

/// Result of adding a list of students to one course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkEnrollmentReport {
    pub course_id: CourseId,
    /// One entry per requested student id, in request order.
    pub attempts: Vec<EnrollmentAttempt>,
}

impl BulkEnrollmentReport {
    pub fn added_count(&self) -> usize {
        self.count_matching(|outcome| matches!(outcome, AttemptOutcome::Added))
    }

    pub fn rejected_count(&self) -> usize {
        self.count_matching(|outcome| matches!(outcome, AttemptOutcome::Rejected(_)))
    }

    fn count_matching(&self, predicate: impl Fn(&AttemptOutcome) -> bool) -> usize {
        self.attempts
            .iter()
            .filter(|attempt| predicate(&attempt.outcome))
            .count()
    }
}

impl Display for BulkEnrollmentReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for attempt in &self.attempts {
            if !first {
                writeln!(f)?;
            }
            first = false;

            match &attempt.outcome {
                AttemptOutcome::Added => write!(
                    f,
                    "Added student with ID {} to course with ID: {}",
                    attempt.student_id, self.course_id
                )?,
                AttemptOutcome::AlreadyEnrolled => write!(
                    f,
                    "Student with ID {} is already enrolled in course with ID: {}",
                    attempt.student_id, self.course_id
                )?,
                AttemptOutcome::Rejected(failures) => write!(
                    f,
                    "Error: Student or course not found for IDs - StudentID: {}, CourseID: {} ({})",
                    attempt.student_id,
                    self.course_id,
                    join_failures(failures)
                )?,
            }
        }
        Ok(())
    }
}

/// Outcome of removing one student from one course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentRemoval {
    pub student_id: StudentId,
    pub course_id: CourseId,
    /// `false` when the student was not enrolled; the call is then a no-op.
    pub removed: bool,
}

impl Display for EnrollmentRemoval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.removed {
            write!(
                f,
                "Removed student with ID {} from course with ID: {}",
                self.student_id, self.course_id
            )
        } else {
            write!(
                f,
                "Student with ID {} was not enrolled in course with ID: {}",
                self.student_id, self.course_id
            )
        }
    }
}

pub(crate) fn join_failures(failures: &[ValidationFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

//! Registry orchestration service.
//!
//! # Responsibility
//! - Map each user intent (group size report, roster, enroll, delete, bulk
//!   add, remove) onto repository calls.
//! - Validate referenced ids before any write.
//!
//! # Invariants
//! - `enroll_new_student` is validate-all-or-abandon: the group is checked
//!   first, then every course id; any miss means no student row and no links.
//! - `add_students_to_course` validates and commits each student on its own;
//!   one rejected id never blocks the others.
//! - Storage failures are logged and returned to the caller, never retried.

use crate::model::course::{Course, CourseId};
use crate::model::group::GroupId;
use crate::model::student::{Student, StudentId};
use crate::repo::course_repo::CourseRepository;
use crate::repo::group_repo::GroupRepository;
use crate::repo::student_repo::StudentRepository;
use crate::repo::StorageError;
use crate::service::report::{
    join_failures, AttemptOutcome, BulkEnrollmentReport, CourseRosterReport, EnrollmentAttempt,
    EnrollmentRemoval, GroupCountReport, StudentDeletion,
};
use log::{error, info, warn};
use thiserror::Error;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Referenced id that does not resolve to an entity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("Group not found for id: {0}")]
    GroupNotFound(GroupId),
    #[error("Course not found for id: {0}")]
    CourseNotFound(CourseId),
    #[error("Student not found for id: {0}")]
    StudentNotFound(StudentId),
}

/// Service error for registry use-cases.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Persistence-layer failure.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    /// One or more referenced ids are unknown; the operation was abandoned.
    #[error("{}", join_failures(.0))]
    Validation(Vec<ValidationFailure>),
    /// Internal consistency mismatch between write and read-back.
    #[error("inconsistent registry state: {0}")]
    InconsistentState(&'static str),
}

impl ServiceError {
    /// Returns validation failures, or an empty slice for other errors.
    pub fn failures(&self) -> &[ValidationFailure] {
        match self {
            Self::Validation(failures) => failures,
            _ => &[],
        }
    }
}

/// Input for enrolling a brand-new student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudentRequest {
    pub first_name: String,
    pub last_name: String,
    pub group_id: GroupId,
    /// Courses to link on creation. Duplicates are ignored.
    pub course_ids: Vec<CourseId>,
}

/// Registry facade over the three entity repositories.
pub struct RegistryService<G, C, S>
where
    G: GroupRepository,
    C: CourseRepository,
    S: StudentRepository,
{
    groups: G,
    courses: C,
    students: S,
}

impl<G, C, S> RegistryService<G, C, S>
where
    G: GroupRepository,
    C: CourseRepository,
    S: StudentRepository,
{
    pub fn new(groups: G, courses: C, students: S) -> Self {
        Self {
            groups,
            courses,
            students,
        }
    }

    pub fn groups(&self) -> &G {
        &self.groups
    }

    pub fn courses(&self) -> &C {
        &self.courses
    }

    pub fn students(&self) -> &S {
        &self.students
    }

    /// Lists groups with at most `max_count` students.
    pub fn groups_with_student_count_at_most(
        &self,
        max_count: u32,
    ) -> ServiceResult<GroupCountReport> {
        let result = self
            .groups
            .find_with_student_count_at_most(max_count)
            .map(|groups| GroupCountReport { max_count, groups })
            .map_err(ServiceError::from);
        log_outcome("group_count_report", result)
    }

    /// Lists students enrolled in courses named `course_name`.
    pub fn students_by_course_name(&self, course_name: &str) -> ServiceResult<CourseRosterReport> {
        let result = self
            .students
            .find_by_course_name(course_name)
            .map(|students| CourseRosterReport {
                course_name: course_name.to_string(),
                students,
            })
            .map_err(ServiceError::from);
        log_outcome("course_roster_report", result)
    }

    /// Creates a student in an existing group and links it to every requested
    /// course, or does nothing at all.
    ///
    /// # Errors
    /// - `Validation([GroupNotFound])` when the group is unknown; courses are
    ///   not checked in that case.
    /// - `Validation([CourseNotFound, ..])` with one entry per unknown course.
    pub fn enroll_new_student(&self, request: &NewStudentRequest) -> ServiceResult<Student> {
        log_outcome("enroll_new_student", self.try_enroll_new_student(request))
    }

    /// Deletes a student and its enrollments; absence is reported, not failed.
    pub fn delete_student_by_id(&self, student_id: StudentId) -> ServiceResult<StudentDeletion> {
        log_outcome("delete_student", self.try_delete_student_by_id(student_id))
    }

    /// Adds each listed student to `course_id`, validating every item on its
    /// own.
    pub fn add_students_to_course(
        &self,
        student_ids: &[StudentId],
        course_id: CourseId,
    ) -> ServiceResult<BulkEnrollmentReport> {
        log_outcome(
            "add_students_to_course",
            self.try_add_students_to_course(student_ids, course_id),
        )
    }

    /// Removes one student from one course after checking both exist.
    pub fn remove_student_from_course(
        &self,
        student_id: StudentId,
        course_id: CourseId,
    ) -> ServiceResult<EnrollmentRemoval> {
        log_outcome(
            "remove_student_from_course",
            self.try_remove_student_from_course(student_id, course_id),
        )
    }

    fn try_enroll_new_student(&self, request: &NewStudentRequest) -> ServiceResult<Student> {
        let group = self
            .groups
            .find_by_id(request.group_id)?
            .ok_or_else(|| {
                ServiceError::Validation(vec![ValidationFailure::GroupNotFound(request.group_id)])
            })?;

        let mut courses: Vec<Course> = Vec::with_capacity(request.course_ids.len());
        let mut failures = Vec::new();
        for &course_id in &request.course_ids {
            if courses.iter().any(|course| course.id == course_id)
                || failures.contains(&ValidationFailure::CourseNotFound(course_id))
            {
                continue;
            }
            match self.courses.find_by_id(course_id)? {
                Some(course) => courses.push(course),
                None => failures.push(ValidationFailure::CourseNotFound(course_id)),
            }
        }
        if !failures.is_empty() {
            return Err(ServiceError::Validation(failures));
        }

        let student = Student::new(
            request.first_name.as_str(),
            request.last_name.as_str(),
            group,
        )
        .with_courses(courses);
        let student_id = self.students.save(&student)?;

        info!(
            "event=student_save module=service status=ok student_id={} group_id={} course_count={}",
            student_id,
            request.group_id,
            student.courses.len()
        );

        self.students
            .find_by_id(student_id)?
            .ok_or(ServiceError::InconsistentState(
                "created student not found in read-back",
            ))
    }

    fn try_delete_student_by_id(&self, student_id: StudentId) -> ServiceResult<StudentDeletion> {
        let Some(student) = self.students.find_by_id(student_id)? else {
            return Ok(StudentDeletion::NotFound(student_id));
        };

        self.students.delete(&student)?;
        Ok(StudentDeletion::Deleted(student))
    }

    fn try_add_students_to_course(
        &self,
        student_ids: &[StudentId],
        course_id: CourseId,
    ) -> ServiceResult<BulkEnrollmentReport> {
        let mut attempts = Vec::with_capacity(student_ids.len());

        for &student_id in student_ids {
            let student = self.students.find_by_id(student_id)?;
            let course = self.courses.find_by_id(course_id)?;

            let outcome = match (student, course) {
                (Some(student), Some(_)) => {
                    if self.students.add_enrollment(&student, course_id)? {
                        AttemptOutcome::Added
                    } else {
                        AttemptOutcome::AlreadyEnrolled
                    }
                }
                (student, course) => {
                    let failures =
                        pair_failures(student_id, student.is_some(), course_id, course.is_some());
                    warn!(
                        "event=enrollment_rejected module=service status=rejected student_id={} course_id={}",
                        student_id, course_id
                    );
                    AttemptOutcome::Rejected(failures)
                }
            };
            attempts.push(EnrollmentAttempt {
                student_id,
                outcome,
            });
        }

        Ok(BulkEnrollmentReport {
            course_id,
            attempts,
        })
    }

    fn try_remove_student_from_course(
        &self,
        student_id: StudentId,
        course_id: CourseId,
    ) -> ServiceResult<EnrollmentRemoval> {
        let student = self.students.find_by_id(student_id)?;
        let course = self.courses.find_by_id(course_id)?;

        let student = match (student, course) {
            (Some(student), Some(_)) => student,
            (student, course) => {
                return Err(ServiceError::Validation(pair_failures(
                    student_id,
                    student.is_some(),
                    course_id,
                    course.is_some(),
                )));
            }
        };

        let removed = self.students.remove_enrollment(&student, course_id)?;
        Ok(EnrollmentRemoval {
            student_id,
            course_id,
            removed,
        })
    }
}

fn pair_failures(
    student_id: StudentId,
    student_found: bool,
    course_id: CourseId,
    course_found: bool,
) -> Vec<ValidationFailure> {
    let mut failures = Vec::new();
    if !student_found {
        failures.push(ValidationFailure::StudentNotFound(student_id));
    }
    if !course_found {
        failures.push(ValidationFailure::CourseNotFound(course_id));
    }
    failures
}

fn log_outcome<T>(event: &'static str, result: ServiceResult<T>) -> ServiceResult<T> {
    match &result {
        Ok(_) => info!("event={event} module=service status=ok"),
        Err(ServiceError::Validation(failures)) => warn!(
            "event={event} module=service status=rejected failures={}",
            failures.len()
        ),
        Err(err) => error!("event={event} module=service status=error error={err}"),
    }
    result
}

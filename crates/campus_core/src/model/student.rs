//! Student domain model.
//!
//! # Responsibility
//! - Represent a student together with its resolved group and courses.
//!
//! # Invariants
//! - `group` always refers to an existing group when read from storage.
//! - `courses` mirrors the `student_course` relation at read time: no
//!   duplicates, ordered by course id.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use super::course::{Course, CourseId};
use super::group::Group;
use super::UNASSIGNED_ID;

/// Stable identifier of a student row.
pub type StudentId = i64;

/// Student aggregate assembled from `students`, `groups` and `student_course`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub first_name: String,
    pub last_name: String,
    /// Owning group. Only `group.id` is written on save.
    pub group: Group,
    /// Enrolled courses. On save, every course id here is linked.
    pub courses: Vec<Course>,
}

impl Student {
    /// Creates an unsaved student with no courses.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>, group: Group) -> Self {
        Self {
            id: UNASSIGNED_ID,
            first_name: first_name.into(),
            last_name: last_name.into(),
            group,
            courses: Vec::new(),
        }
    }

    /// Replaces the course list, consuming `self` for builder-style setup.
    pub fn with_courses(mut self, courses: Vec<Course>) -> Self {
        self.courses = courses;
        self
    }

    /// Returns `first last`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Returns the ids of enrolled courses in list order.
    pub fn course_ids(&self) -> Vec<CourseId> {
        self.courses.iter().map(|course| course.id).collect()
    }

    /// Returns whether the student is enrolled in `course_id`.
    pub fn is_enrolled_in(&self, course_id: CourseId) -> bool {
        self.courses.iter().any(|course| course.id == course_id)
    }
}

impl Display for Student {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (ID: {})", self.full_name(), self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::Student;
    use crate::model::course::Course;
    use crate::model::group::Group;
    use crate::model::UNASSIGNED_ID;

    #[test]
    fn new_student_is_unsaved_and_has_no_courses() {
        let student = Student::new("Ada", "Lovelace", Group::with_id(3, "AB-01"));
        assert_eq!(student.id, UNASSIGNED_ID);
        assert!(student.courses.is_empty());
        assert_eq!(student.full_name(), "Ada Lovelace");
    }

    #[test]
    fn course_helpers_follow_course_list() {
        let student = Student::new("Alan", "Turing", Group::with_id(1, "XY-10")).with_courses(vec![
            Course::with_id(4, "Logic", "Formal logic"),
            Course::with_id(2, "Math", "Calculus"),
        ]);

        assert_eq!(student.course_ids(), vec![4, 2]);
        assert!(student.is_enrolled_in(2));
        assert!(!student.is_enrolled_in(7));
    }

    #[test]
    fn serializes_with_nested_group_and_courses() {
        let student = Student::new("Edsger", "Dijkstra", Group::with_id(2, "CD-02"))
            .with_courses(vec![Course::with_id(5, "Algorithms", "")]);

        let json = serde_json::to_value(&student).unwrap();
        assert_eq!(json["group"]["name"], "CD-02");
        assert_eq!(json["courses"][0]["id"], 5);

        let back: Student = serde_json::from_value(json).unwrap();
        assert_eq!(back, student);
    }

    #[test]
    fn display_matches_roster_line_format() {
        let mut student = Student::new("Grace", "Hopper", Group::with_id(1, "G1"));
        student.id = 12;
        assert_eq!(student.to_string(), "Grace Hopper (ID: 12)");
    }
}

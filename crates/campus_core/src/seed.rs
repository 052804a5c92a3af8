//! Demo data generation for an empty registry.
//!
//! # Responsibility
//! - Fill groups, courses, students and enrollments through the repositories.
//! - Draw every "random" choice from an injected `SequenceSource`, so a given
//!   seed always produces the same registry.
//!
//! # Invariants
//! - Each generated student gets between 1 and `max_courses_per_student`
//!   distinct courses.
//! - Group names follow the `AB-07` pattern.

use crate::model::course::Course;
use crate::model::group::Group;
use crate::model::student::Student;
use crate::repo::course_repo::CourseRepository;
use crate::repo::group_repo::GroupRepository;
use crate::repo::student_repo::StudentRepository;
use crate::repo::RepoResult;
use log::info;

const FIRST_NAMES: &[&str] = &[
    "Olivia", "Liam", "Emma", "Noah", "Ava", "Elijah", "Sophia", "James", "Mia", "Lucas",
    "Amelia", "Mateo", "Harper", "Levi", "Evelyn", "Ezra", "Aria", "Kai", "Nora", "Leo",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Lopez",
    "Wilson", "Anderson", "Thomas", "Taylor", "Moore", "Jackson", "Martin", "Lee", "Perez",
    "Thompson", "White",
];

const COURSE_NAMES: &[&str] = &[
    "Mathematics",
    "Biology",
    "Chemistry",
    "Physics",
    "History",
    "Literature",
    "Art",
    "Music",
    "Economics",
    "Philosophy",
];

/// Source of bounded indices used for every generated choice.
pub trait SequenceSource {
    /// Returns a value in `0..bound`. `bound` is always at least 1.
    fn next_index(&mut self, bound: usize) -> usize;
}

/// Deterministic linear congruential sequence.
#[derive(Debug, Clone)]
pub struct LcgSequence {
    state: u64,
}

impl LcgSequence {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }
}

impl SequenceSource for LcgSequence {
    fn next_index(&mut self, bound: usize) -> usize {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        ((self.state >> 33) % bound.max(1) as u64) as usize
    }
}

/// Sizes of the generated registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedPlan {
    pub groups: usize,
    pub courses: usize,
    pub students_per_group: usize,
    pub max_courses_per_student: usize,
}

impl Default for SeedPlan {
    fn default() -> Self {
        Self {
            groups: 10,
            courses: 10,
            students_per_group: 30,
            max_courses_per_student: 3,
        }
    }
}

/// Row counts written by [`seed_registry`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub groups: usize,
    pub courses: usize,
    pub students: usize,
    pub enrollments: usize,
}

/// Writes a generated registry through the given repositories.
///
/// Does not check whether the registry already holds data.
pub fn seed_registry<G, C, S>(
    groups: &G,
    courses: &C,
    students: &S,
    plan: &SeedPlan,
    source: &mut impl SequenceSource,
) -> RepoResult<SeedSummary>
where
    G: GroupRepository,
    C: CourseRepository,
    S: StudentRepository,
{
    let mut summary = SeedSummary::default();

    let mut saved_courses = Vec::with_capacity(plan.courses);
    for index in 0..plan.courses {
        let mut course = generate_course(index);
        course.id = courses.save(&course)?;
        saved_courses.push(course);
        summary.courses += 1;
    }

    for _ in 0..plan.groups {
        let mut group = Group::new(generate_group_name(source));
        group.id = groups.save(&group)?;
        summary.groups += 1;

        for _ in 0..plan.students_per_group {
            let first_name = FIRST_NAMES[source.next_index(FIRST_NAMES.len())];
            let last_name = LAST_NAMES[source.next_index(LAST_NAMES.len())];
            let picked = pick_courses(&saved_courses, plan.max_courses_per_student, source);
            summary.enrollments += picked.len();

            let student = Student::new(first_name, last_name, group.clone()).with_courses(picked);
            students.save(&student)?;
            summary.students += 1;
        }
    }

    info!(
        "event=registry_seed module=seed status=ok groups={} courses={} students={} enrollments={}",
        summary.groups, summary.courses, summary.students, summary.enrollments
    );
    Ok(summary)
}

/// Returns a name like `KQ-07`.
pub fn generate_group_name(source: &mut impl SequenceSource) -> String {
    let first = char::from(b'A' + source.next_index(26) as u8);
    let second = char::from(b'A' + source.next_index(26) as u8);
    let number = 1 + source.next_index(98);
    format!("{first}{second}-{number:02}")
}

fn generate_course(index: usize) -> Course {
    let base = COURSE_NAMES[index % COURSE_NAMES.len()];
    let name = match index / COURSE_NAMES.len() {
        0 => base.to_string(),
        round => format!("{base} {}", round + 1),
    };
    let description = format!("Introduction to {name}");
    Course::new(name, description)
}

/// Picks between 1 and `max_per_student` distinct courses.
fn pick_courses(
    courses: &[Course],
    max_per_student: usize,
    source: &mut impl SequenceSource,
) -> Vec<Course> {
    if courses.is_empty() || max_per_student == 0 {
        return Vec::new();
    }

    let wanted = (1 + source.next_index(max_per_student)).min(courses.len());
    let mut pool: Vec<usize> = (0..courses.len()).collect();
    let mut picked = Vec::with_capacity(wanted);
    for _ in 0..wanted {
        let slot = source.next_index(pool.len());
        picked.push(courses[pool.swap_remove(slot)].clone());
    }
    picked.sort_by_key(|course| course.id);
    picked
}

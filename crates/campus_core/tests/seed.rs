use campus_core::db::open_pool_in_memory;
use campus_core::{
    seed_registry, sqlite_registry, GroupRepository, LcgSequence, Repository, SeedPlan,
};

#[test]
fn seed_registry_writes_requested_sizes() {
    let pool = open_pool_in_memory().unwrap();
    let registry = sqlite_registry(&pool).unwrap();
    let plan = SeedPlan {
        groups: 3,
        courses: 4,
        students_per_group: 5,
        max_courses_per_student: 2,
    };

    let summary = seed_registry(
        registry.groups(),
        registry.courses(),
        registry.students(),
        &plan,
        &mut LcgSequence::new(1),
    )
    .unwrap();

    assert_eq!(summary.groups, 3);
    assert_eq!(summary.courses, 4);
    assert_eq!(summary.students, 15);
    assert_eq!(registry.groups().find_all().unwrap().len(), 3);
    assert_eq!(registry.courses().find_all().unwrap().len(), 4);

    let students = registry.students().find_all().unwrap();
    assert_eq!(students.len(), 15);
    let links: usize = students.iter().map(|student| student.courses.len()).sum();
    assert_eq!(links, summary.enrollments);
    assert!(students
        .iter()
        .all(|student| (1..=2).contains(&student.courses.len())));

    let groups = registry.groups().find_with_student_count_at_most(5).unwrap();
    assert_eq!(groups.len(), 3);
}

#[test]
fn seeding_is_deterministic_for_the_same_seed() {
    let names = |seed: u64| {
        let pool = open_pool_in_memory().unwrap();
        let registry = sqlite_registry(&pool).unwrap();
        seed_registry(
            registry.groups(),
            registry.courses(),
            registry.students(),
            &SeedPlan {
                groups: 2,
                courses: 3,
                students_per_group: 4,
                max_courses_per_student: 3,
            },
            &mut LcgSequence::new(seed),
        )
        .unwrap();
        registry
            .students()
            .find_all()
            .unwrap()
            .into_iter()
            .map(|student| {
                let course_ids = student.course_ids();
                (student.full_name(), student.group.name, course_ids)
            })
            .collect::<Vec<_>>()
    };

    assert_eq!(names(9), names(9));
}

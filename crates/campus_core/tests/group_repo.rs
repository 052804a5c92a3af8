use campus_core::db::open_pool_in_memory;
use campus_core::{
    Group, GroupRepository, Repository, SqliteGroupRepository, SqliteStudentRepository,
    StorageError, Student,
};

fn repos() -> (SqliteGroupRepository, SqliteStudentRepository) {
    let pool = open_pool_in_memory().unwrap();
    (
        SqliteGroupRepository::try_new(&pool).unwrap(),
        SqliteStudentRepository::try_new(&pool).unwrap(),
    )
}

fn saved_group(groups: &SqliteGroupRepository, name: &str) -> Group {
    let id = groups.save(&Group::new(name)).unwrap();
    Group::with_id(id, name)
}

#[test]
fn save_and_find_by_id_roundtrip() {
    let (groups, _) = repos();

    let id = groups.save(&Group::new("AB-07")).unwrap();
    let loaded = groups.find_by_id(id).unwrap().unwrap();
    assert_eq!(loaded, Group::with_id(id, "AB-07"));
    assert!(groups.find_by_id(id + 100).unwrap().is_none());
}

#[test]
fn find_all_on_empty_table_is_an_error() {
    let (groups, _) = repos();

    match groups.find_all() {
        Err(StorageError::EmptyResult { table }) => assert_eq!(table, "groups"),
        other => panic!("expected EmptyResult, got {other:?}"),
    }
}

#[test]
fn find_all_returns_every_group_in_id_order() {
    let (groups, _) = repos();
    let first = saved_group(&groups, "AA-01");
    let second = saved_group(&groups, "BB-02");

    assert_eq!(groups.find_all().unwrap(), vec![first, second]);
}

#[test]
fn update_and_delete_missing_group_are_no_ops() {
    let (groups, _) = repos();
    let mut group = saved_group(&groups, "CC-03");

    group.name = "CC-33".to_string();
    assert!(groups.update(&group).unwrap());
    assert_eq!(groups.find_by_id(group.id).unwrap().unwrap().name, "CC-33");

    let ghost = Group::with_id(9_999, "ghost");
    assert!(!groups.update(&ghost).unwrap());
    assert!(!groups.delete(&ghost).unwrap());

    assert!(groups.delete(&group).unwrap());
    assert!(groups.find_by_id(group.id).unwrap().is_none());
}

#[test]
fn student_count_filter_uses_inclusive_bound() {
    let (groups, students) = repos();
    let full = saved_group(&groups, "FF-06");
    for index in 0..6 {
        students
            .save(&Student::new(format!("First{index}"), "Last", full.clone()))
            .unwrap();
    }

    let at_most_six = groups.find_with_student_count_at_most(6).unwrap();
    assert_eq!(at_most_six, vec![full.clone()]);

    let at_most_five = groups.find_with_student_count_at_most(5).unwrap();
    assert!(at_most_five.is_empty());
}

#[test]
fn student_count_filter_includes_empty_groups() {
    let (groups, students) = repos();
    let empty = saved_group(&groups, "EE-00");
    let busy = saved_group(&groups, "BB-01");
    students
        .save(&Student::new("Ada", "Lovelace", busy.clone()))
        .unwrap();

    assert_eq!(groups.find_with_student_count_at_most(0).unwrap(), vec![empty.clone()]);
    assert_eq!(
        groups.find_with_student_count_at_most(1).unwrap(),
        vec![empty, busy]
    );
}

#[test]
fn deleting_group_with_students_is_rejected_by_foreign_key() {
    let (groups, students) = repos();
    let group = saved_group(&groups, "KK-10");
    students
        .save(&Student::new("Alan", "Turing", group.clone()))
        .unwrap();

    let err = groups.delete(&group).unwrap_err();
    assert!(matches!(err, StorageError::Sqlite(_)), "unexpected error: {err}");
    assert!(groups.find_by_id(group.id).unwrap().is_some());
}

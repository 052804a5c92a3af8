//! Core domain logic for the campus registry.
//! Groups, courses and students over SQLite, plus the reports built on them.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;

pub use config::AppConfig;
pub use db::{open_pool, open_pool_in_memory, DbError, DbPool};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::course::{Course, CourseId};
pub use model::group::{Group, GroupId};
pub use model::student::{Student, StudentId};
pub use model::UNASSIGNED_ID;
pub use repo::course_repo::{CourseRepository, SqliteCourseRepository};
pub use repo::group_repo::{GroupRepository, SqliteGroupRepository};
pub use repo::student_repo::{SqliteStudentRepository, StudentRepository};
pub use repo::{RepoResult, Repository, StorageError};
pub use seed::{seed_registry, LcgSequence, SeedPlan, SeedSummary, SequenceSource};
pub use service::registry_service::{
    NewStudentRequest, RegistryService, ServiceError, ServiceResult, ValidationFailure,
};
pub use service::report::{
    AttemptOutcome, BulkEnrollmentReport, CourseRosterReport, EnrollmentAttempt,
    EnrollmentRemoval, GroupCountReport, StudentDeletion,
};

/// Registry service wired to the SQLite repositories.
pub type SqliteRegistry =
    RegistryService<SqliteGroupRepository, SqliteCourseRepository, SqliteStudentRepository>;

/// Builds the SQLite repositories on `pool` and wraps them in a service.
///
/// Fails when the pool's database lacks a required table or column.
pub fn sqlite_registry(pool: &DbPool) -> RepoResult<SqliteRegistry> {
    Ok(RegistryService::new(
        SqliteGroupRepository::try_new(pool)?,
        SqliteCourseRepository::try_new(pool)?,
        SqliteStudentRepository::try_new(pool)?,
    ))
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, open_pool_in_memory, sqlite_registry};

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn sqlite_registry_builds_on_bootstrapped_pool() {
        let pool = open_pool_in_memory().unwrap();
        assert!(sqlite_registry(&pool).is_ok());
    }
}

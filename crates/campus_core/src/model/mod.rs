//! Domain model for the campus registry.
//!
//! # Responsibility
//! - Define the entity shapes shared by repositories and services.
//! - Keep identity types explicit in signatures.
//!
//! # Invariants
//! - Every entity is identified by a store-generated integer id.
//! - Entity values carry fully resolved relations (a `Student` owns its
//!   `Group` and `Course` list), never raw foreign keys.

pub mod course;
pub mod group;
pub mod student;

/// Placeholder id for entities that have not been persisted yet.
///
/// Repositories ignore the `id` field on `save` and return the generated one.
pub const UNASSIGNED_ID: i64 = 0;

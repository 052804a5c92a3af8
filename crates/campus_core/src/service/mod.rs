//! Registry use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into user-facing registry operations.
//! - Own validation ordering (which ids are checked, and when an operation is
//!   abandoned versus narrowed).
//! - Produce renderable report values; printing is left to callers.

pub mod registry_service;
pub mod report;

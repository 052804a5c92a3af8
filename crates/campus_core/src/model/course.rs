//! Course domain model.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use super::UNASSIGNED_ID;

/// Stable identifier of a course row.
pub type CourseId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    pub description: String,
}

impl Course {
    /// Creates an unsaved course.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_id(UNASSIGNED_ID, name, description)
    }

    pub fn with_id(
        id: CourseId,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
        }
    }
}

impl Display for Course {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

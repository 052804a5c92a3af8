//! Group domain model.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use super::UNASSIGNED_ID;

/// Stable identifier of a group row.
pub type GroupId = i64;

/// Study group; owns zero or more students through `students.group_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
}

impl Group {
    /// Creates an unsaved group.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(UNASSIGNED_ID, name)
    }

    /// Creates a group value with a known id, e.g. when read back from storage.
    pub fn with_id(id: GroupId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl Display for Group {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Group {} ({})", self.name, self.id)
    }
}

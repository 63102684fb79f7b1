//! Student entity model, DTOs, and the last-students projection.

use school_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A student row from the `students` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Student {
    pub id: DbId,
    pub name: String,
    pub age: i32,
    pub faculty_id: Option<DbId>,
}

/// DTO for creating a new student. Any `id` in the body is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStudent {
    pub name: String,
    pub age: i32,
    #[serde(default)]
    pub faculty_id: Option<DbId>,
}

/// DTO for replacing an existing student. The `id` selects the row.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStudent {
    pub id: DbId,
    pub name: String,
    pub age: i32,
    #[serde(default)]
    pub faculty_id: Option<DbId>,
}

/// Read-only `(id, name, age)` projection for the last-students report.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct LastStudent {
    pub id: DbId,
    pub name: String,
    pub age: i32,
}

impl From<&Student> for LastStudent {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id,
            name: student.name.clone(),
            age: student.age,
        }
    }
}

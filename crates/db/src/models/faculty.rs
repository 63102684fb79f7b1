//! Faculty entity model and DTOs.

use school_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A faculty row from the `faculties` table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, FromRow, Serialize, Deserialize)]
pub struct Faculty {
    pub id: DbId,
    pub name: String,
    pub color: String,
}

/// DTO for creating a new faculty. Any `id` in the body is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFaculty {
    pub name: String,
    pub color: String,
}

/// DTO for replacing an existing faculty. The `id` selects the row.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateFaculty {
    pub id: DbId,
    pub name: String,
    pub color: String,
}

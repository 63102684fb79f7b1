//! Avatar entity model and upsert DTO.

use school_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// An avatar row from the `avatars` table. One per student.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Avatar {
    pub id: DbId,
    pub student_id: DbId,
    pub file_path: String,
    pub file_size: i64,
    pub media_type: String,
    /// In-row preview bytes. Never serialized.
    #[serde(skip_serializing)]
    pub data: Vec<u8>,
}

/// DTO for inserting or replacing the avatar of `student_id`.
#[derive(Debug, Clone)]
pub struct UpsertAvatar {
    pub student_id: DbId,
    pub file_path: String,
    pub file_size: i64,
    pub media_type: String,
    pub data: Vec<u8>,
}

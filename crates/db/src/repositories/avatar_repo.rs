//! Repository for the `avatars` table.

use sqlx::PgPool;
use school_core::types::DbId;

use crate::models::avatar::{Avatar, UpsertAvatar};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, student_id, file_path, file_size, media_type, data";

/// Provides upsert and lookup for student avatars.
pub struct AvatarRepo;

impl AvatarRepo {
    /// Insert the avatar for `input.student_id`, or replace the existing one.
    pub async fn upsert(pool: &PgPool, input: &UpsertAvatar) -> Result<Avatar, sqlx::Error> {
        let query = format!(
            "INSERT INTO avatars (student_id, file_path, file_size, media_type, data)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (student_id) DO UPDATE SET
                file_path = EXCLUDED.file_path,
                file_size = EXCLUDED.file_size,
                media_type = EXCLUDED.media_type,
                data = EXCLUDED.data
             RETURNING {COLUMNS}"
        );
        let avatar = sqlx::query_as::<_, Avatar>(&query)
            .bind(input.student_id)
            .bind(&input.file_path)
            .bind(input.file_size)
            .bind(&input.media_type)
            .bind(&input.data)
            .fetch_one(pool)
            .await?;

        tracing::debug!(
            student_id = avatar.student_id,
            file_size = avatar.file_size,
            preview_bytes = avatar.data.len(),
            "Avatar row stored"
        );
        Ok(avatar)
    }

    /// Find the avatar belonging to a student.
    pub async fn find_by_student_id(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Option<Avatar>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM avatars WHERE student_id = $1");
        sqlx::query_as::<_, Avatar>(&query)
            .bind(student_id)
            .fetch_optional(pool)
            .await
    }
}

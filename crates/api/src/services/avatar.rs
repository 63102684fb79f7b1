//! Avatar storage: file on disk plus a row with metadata and preview.

use std::path::Path;

use school_core::avatar::{self, DEFAULT_MEDIA_TYPE};
use school_core::types::DbId;
use school_db::models::avatar::{Avatar, UpsertAvatar};
use school_db::store::SchoolStore;

use crate::error::{AppError, AppResult};

/// An uploaded avatar file as received from the multipart form.
#[derive(Debug, Clone)]
pub struct AvatarUpload {
    pub file_name: Option<String>,
    pub media_type: Option<String>,
    pub data: Vec<u8>,
}

pub struct AvatarService;

impl AvatarService {
    /// Store `upload` as the avatar of `student_id`.
    ///
    /// The file is written to `<avatars_dir>/<student_id>.<ext>` first, then
    /// the row is upserted. A failure at either step fails the upload; a
    /// file written before a failed upsert is left in place. Once the row
    /// points at the new file, a previous file under another name is removed.
    ///
    /// The size cap is enforced by the caller before this is reached.
    pub async fn upload(
        store: &dyn SchoolStore,
        avatars_dir: &Path,
        student_id: DbId,
        upload: AvatarUpload,
    ) -> AppResult<Avatar> {
        if store.find_student(student_id).await?.is_none() {
            return Err(AppError::not_found("Student", student_id));
        }
        let previous = store.find_avatar(student_id).await?;

        let media_type = upload
            .media_type
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MEDIA_TYPE.to_string());
        let file_path = avatar::avatar_path(avatars_dir, student_id, upload.file_name.as_deref());

        tokio::fs::create_dir_all(avatars_dir)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;
        tokio::fs::write(&file_path, &upload.data)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        let file_size = upload.data.len() as i64;
        let preview_media_type = media_type.clone();
        let data = tokio::task::spawn_blocking(move || {
            avatar::make_preview(&upload.data, &preview_media_type)
        })
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

        let input = UpsertAvatar {
            student_id,
            file_path: file_path.to_string_lossy().to_string(),
            file_size,
            media_type,
            data,
        };
        let stored = store.upsert_avatar(&input).await?;

        if let Some(old) = previous.filter(|old| old.file_path != stored.file_path) {
            remove_stale_file(&old.file_path).await;
        }

        tracing::info!(
            student_id,
            file_path = %stored.file_path,
            file_size = stored.file_size,
            media_type = %stored.media_type,
            "Avatar uploaded"
        );
        Ok(stored)
    }

    /// The avatar row of a student, or NotFound.
    pub async fn find(store: &dyn SchoolStore, student_id: DbId) -> AppResult<Avatar> {
        store
            .find_avatar(student_id)
            .await?
            .ok_or(AppError::not_found("Avatar", student_id))
    }
}

/// Delete a replaced avatar file. The upload already succeeded, so failures
/// are only logged.
async fn remove_stale_file(path: &str) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => tracing::debug!(file_path = %path, "Removed replaced avatar file"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(file_path = %path, error = %e, "Failed to remove replaced avatar file"),
    }
}

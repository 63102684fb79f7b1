//! Handlers for student avatars under `/student/{id}/avatar`.
//!
//! Uploads arrive as multipart forms with a single `avatar` field. Two
//! download modes exist: the preview stored in the database row, and the
//! original file streamed from disk.

use axum::body::Body;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Path, State};
use axum::http::header;
use axum::http::StatusCode;
use axum::response::Response;
use school_core::avatar;
use school_core::error::CoreError;
use school_core::types::DbId;
use tokio_util::io::ReaderStream;

use crate::error::{AppError, AppResult};
use crate::services::avatar::AvatarUpload;
use crate::services::AvatarService;
use crate::state::AppState;

/// Multipart field carrying the file.
const AVATAR_FIELD: &str = "avatar";

/// Request body limit for uploads: the file cap plus room for multipart
/// boundaries and part headers.
pub const UPLOAD_BODY_LIMIT: usize = avatar::MAX_AVATAR_BYTES + 16 * 1024;

/// POST /student/{id}/avatar
///
/// Rejects files over 300 KiB with 400 before anything is stored. The field
/// is read chunk by chunk so an oversized upload is refused as soon as it
/// crosses the cap.
pub async fn upload(
    State(state): State<AppState>,
    Path(student_id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<StatusCode> {
    let mut upload: Option<AvatarUpload> = None;

    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(AVATAR_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(str::to_owned);
        let media_type = field.content_type().map(str::to_owned);

        let mut data = Vec::new();
        while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
            avatar::check_size(data.len() + chunk.len())?;
            data.extend_from_slice(&chunk);
        }
        upload = Some(AvatarUpload {
            file_name,
            media_type,
            data,
        });
    }

    let upload = upload
        .ok_or_else(|| AppError::BadRequest("Missing required 'avatar' field".into()))?;

    AvatarService::upload(
        state.store.as_ref(),
        &state.config.avatars_dir,
        student_id,
        upload,
    )
    .await?;
    Ok(StatusCode::OK)
}

/// A body over the route's length limit is an oversized upload; anything
/// else is a malformed form.
fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::Core(CoreError::PayloadTooLarge {
            limit: avatar::MAX_AVATAR_BYTES,
        })
    } else {
        AppError::BadRequest(err.body_text())
    }
}

/// GET /student/{id}/avatar/preview
///
/// Serves the preview bytes from the avatar row.
pub async fn preview(
    State(state): State<AppState>,
    Path(student_id): Path<DbId>,
) -> AppResult<Response> {
    let avatar = AvatarService::find(state.store.as_ref(), student_id).await?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, &avatar.media_type)
        .header(header::CONTENT_LENGTH, avatar.data.len())
        .body(Body::from(avatar.data))
        .map_err(|e| AppError::InternalError(e.to_string()))
}

/// GET /student/{id}/avatar
///
/// Streams the original file from disk. The file handle lives inside the
/// body stream and is closed when the stream finishes or is dropped.
pub async fn download(
    State(state): State<AppState>,
    Path(student_id): Path<DbId>,
) -> AppResult<Response> {
    let avatar = AvatarService::find(state.store.as_ref(), student_id).await?;

    let file = tokio::fs::File::open(&avatar.file_path)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;
    let stream = ReaderStream::new(file);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, &avatar.media_type)
        .header(header::CONTENT_LENGTH, avatar.file_size)
        .body(Body::from_stream(stream))
        .map_err(|e| AppError::InternalError(e.to_string()))
}

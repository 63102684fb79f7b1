//! Handlers for the `/faculty` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use school_core::types::DbId;
use school_db::models::faculty::{CreateFaculty, Faculty, UpdateFaculty};
use school_db::models::student::Student;

use crate::error::{AppError, AppResult};
use crate::query::FacultyColorParams;
use crate::services::FacultyService;
use crate::state::AppState;

/// GET /faculty
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Faculty>>> {
    let faculties = FacultyService::list(state.store.as_ref()).await?;
    Ok(Json(faculties))
}

/// GET /faculty/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Faculty>> {
    let faculty = FacultyService::get(state.store.as_ref(), id).await?;
    Ok(Json(faculty))
}

/// POST /faculty
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateFaculty>,
) -> AppResult<Json<Faculty>> {
    let faculty = FacultyService::create(state.store.as_ref(), &input).await?;
    Ok(Json(faculty))
}

/// PUT /faculty
pub async fn update(
    State(state): State<AppState>,
    Json(input): Json<UpdateFaculty>,
) -> AppResult<Json<Faculty>> {
    let faculty = FacultyService::update(state.store.as_ref(), &input).await?;
    Ok(Json(faculty))
}

/// DELETE /faculty/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    FacultyService::delete(state.store.as_ref(), id).await?;
    Ok(StatusCode::OK)
}

/// GET /faculty/color?color=C | ?searchStr=S
///
/// `color` takes precedence when both are given.
pub async fn by_color(
    State(state): State<AppState>,
    Query(params): Query<FacultyColorParams>,
) -> AppResult<Json<Vec<Faculty>>> {
    let store = state.store.as_ref();
    let faculties = match (params.color, params.search_str) {
        (Some(color), _) => FacultyService::by_color(store, &color).await?,
        (None, Some(needle)) => FacultyService::search(store, &needle).await?,
        (None, None) => {
            return Err(AppError::BadRequest(
                "Either 'color' or 'searchStr' is required".into(),
            ))
        }
    };
    Ok(Json(faculties))
}

/// GET /faculty/{id}/students
pub async fn students(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<Student>>> {
    let students = FacultyService::students(state.store.as_ref(), id).await?;
    Ok(Json(students))
}

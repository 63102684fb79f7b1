//! Handlers for the `/student` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use school_core::fanout::EmitMode;
use school_core::types::DbId;
use school_db::models::faculty::Faculty;
use school_db::models::student::{CreateStudent, LastStudent, Student, UpdateStudent};

use crate::error::AppResult;
use crate::query::{AgeParams, AgeRangeParams, LetterParams, LimitParams};
use crate::services::StudentService;
use crate::state::AppState;

/// GET /student/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Student>> {
    let student = StudentService::get(state.store.as_ref(), id).await?;
    Ok(Json(student))
}

/// POST /student
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateStudent>,
) -> AppResult<Json<Student>> {
    let student = StudentService::create(state.store.as_ref(), &input).await?;
    Ok(Json(student))
}

/// PUT /student
pub async fn update(
    State(state): State<AppState>,
    Json(input): Json<UpdateStudent>,
) -> AppResult<Json<Student>> {
    let student = StudentService::update(state.store.as_ref(), &input).await?;
    Ok(Json(student))
}

/// DELETE /student/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    StudentService::delete(state.store.as_ref(), id).await?;
    Ok(StatusCode::OK)
}

/// GET /student/age?age=N
pub async fn by_age(
    State(state): State<AppState>,
    Query(params): Query<AgeParams>,
) -> AppResult<Json<Vec<Student>>> {
    let students = StudentService::by_age(state.store.as_ref(), params.age).await?;
    Ok(Json(students))
}

/// GET /student?min=A&max=B
pub async fn by_age_between(
    State(state): State<AppState>,
    Query(params): Query<AgeRangeParams>,
) -> AppResult<Json<Vec<Student>>> {
    let students =
        StudentService::by_age_between(state.store.as_ref(), params.min, params.max).await?;
    Ok(Json(students))
}

/// GET /student/faculty/{id}
pub async fn faculty(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Faculty>> {
    let faculty = StudentService::faculty(state.store.as_ref(), id).await?;
    Ok(Json(faculty))
}

/// GET /student/all
pub async fn count(State(state): State<AppState>) -> AppResult<Json<i64>> {
    let count = StudentService::count(state.store.as_ref()).await?;
    Ok(Json(count))
}

/// GET /student/average-age-of-students
pub async fn average_age(State(state): State<AppState>) -> AppResult<Json<f64>> {
    let avg = StudentService::average_age(state.store.as_ref()).await?;
    Ok(Json(avg))
}

/// GET /student/average-age-of-students-stream
pub async fn average_age_streamed(State(state): State<AppState>) -> AppResult<Json<f64>> {
    let avg = StudentService::average_age_streamed(state.store.as_ref()).await?;
    Ok(Json(avg))
}

/// GET /student/last-students?limit=N
pub async fn last_students(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> AppResult<Json<Vec<LastStudent>>> {
    let students = StudentService::last_students(state.store.as_ref(), params.limit).await?;
    Ok(Json(students))
}

/// GET /student/name-starts?letter=X
pub async fn name_starts(
    State(state): State<AppState>,
    Query(params): Query<LetterParams>,
) -> AppResult<Json<Vec<String>>> {
    let names =
        StudentService::names_starting_with(state.store.as_ref(), params.letter.as_deref())
            .await?;
    Ok(Json(names))
}

/// GET /student/names-threads
pub async fn names_threads(State(state): State<AppState>) -> AppResult<Json<Vec<String>>> {
    let names = StudentService::emit_names(
        state.store.as_ref(),
        state.config.name_workers,
        EmitMode::Unsynchronized,
    )
    .await?;
    Ok(Json(names))
}

/// GET /student/names-threads-synchronized
pub async fn names_threads_synchronized(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<String>>> {
    let names = StudentService::emit_names(
        state.store.as_ref(),
        state.config.name_workers,
        EmitMode::Synchronized,
    )
    .await?;
    Ok(Json(names))
}

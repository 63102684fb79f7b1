pub mod faculty;
pub mod health;
pub mod student;

use axum::Router;

use crate::state::AppState;

/// Build the resource route tree.
///
/// Route hierarchy:
///
/// ```text
/// /student                                         age-range filter (GET), create (POST), update (PUT)
/// /student/{id}                                    get, delete
/// /student/age                                     exact-age filter
/// /student/all                                     count
/// /student/faculty/{id}                            faculty of a student
/// /student/{id}/avatar                             upload (POST), download from disk (GET)
/// /student/{id}/avatar/preview                     preview from database
/// /student/average-age-of-students                 aggregate average
/// /student/average-age-of-students-stream          in-memory average
/// /student/last-students                           last N projection
/// /student/name-starts                             names by initial
/// /student/names-threads                           unsynchronized fan-out
/// /student/names-threads-synchronized              synchronized fan-out
///
/// /faculty                                         list (GET), create (POST), update (PUT)
/// /faculty/{id}                                    get, delete
/// /faculty/color                                   by color / search
/// /faculty/{id}/students                           students of a faculty
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/student", student::router())
        .nest("/faculty", faculty::router())
}

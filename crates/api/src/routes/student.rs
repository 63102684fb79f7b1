//! Route definitions for the `/student` resource, including avatars.

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;

use crate::handlers::{avatar, student};
use crate::state::AppState;

/// Routes mounted at `/student`.
///
/// ```text
/// GET    /                                   -> by_age_between (?min=&max=)
/// POST   /                                   -> create
/// PUT    /                                   -> update
/// GET    /{id}                               -> get_by_id
/// DELETE /{id}                               -> delete
/// GET    /age                                -> by_age (?age=)
/// GET    /all                                -> count
/// GET    /faculty/{id}                       -> faculty
/// POST   /{id}/avatar                        -> avatar::upload
/// GET    /{id}/avatar                        -> avatar::download
/// GET    /{id}/avatar/preview                -> avatar::preview
/// GET    /average-age-of-students            -> average_age
/// GET    /average-age-of-students-stream     -> average_age_streamed
/// GET    /last-students                      -> last_students (?limit=)
/// GET    /name-starts                        -> name_starts (?letter=)
/// GET    /names-threads                      -> names_threads
/// GET    /names-threads-synchronized         -> names_threads_synchronized
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(student::by_age_between)
                .post(student::create)
                .put(student::update),
        )
        .route("/{id}", get(student::get_by_id).delete(student::delete))
        .route("/age", get(student::by_age))
        .route("/all", get(student::count))
        .route("/faculty/{id}", get(student::faculty))
        .route(
            "/{id}/avatar",
            get(avatar::download)
                .post(avatar::upload)
                .layer(DefaultBodyLimit::max(avatar::UPLOAD_BODY_LIMIT)),
        )
        .route("/{id}/avatar/preview", get(avatar::preview))
        .route("/average-age-of-students", get(student::average_age))
        .route(
            "/average-age-of-students-stream",
            get(student::average_age_streamed),
        )
        .route("/last-students", get(student::last_students))
        .route("/name-starts", get(student::name_starts))
        .route("/names-threads", get(student::names_threads))
        .route(
            "/names-threads-synchronized",
            get(student::names_threads_synchronized),
        )
}

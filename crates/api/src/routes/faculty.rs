//! Route definitions for the `/faculty` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::faculty;
use crate::state::AppState;

/// Routes mounted at `/faculty`.
///
/// ```text
/// GET    /                 -> list
/// POST   /                 -> create
/// PUT    /                 -> update
/// GET    /{id}             -> get_by_id
/// DELETE /{id}             -> delete
/// GET    /color            -> by_color (?color= | ?searchStr=)
/// GET    /{id}/students    -> students
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(faculty::list).post(faculty::create).put(faculty::update),
        )
        .route("/{id}", get(faculty::get_by_id).delete(faculty::delete))
        .route("/color", get(faculty::by_color))
        .route("/{id}/students", get(faculty::students))
}

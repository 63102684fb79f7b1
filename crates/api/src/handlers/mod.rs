//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers extract input, delegate to the matching service in
//! [`crate::services`], and map errors via [`AppError`](crate::error::AppError).

pub mod avatar;
pub mod faculty;
pub mod student;

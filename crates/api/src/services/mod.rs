//! Service layer.
//!
//! Each service is a zero-sized struct whose associated functions take the
//! store as `&dyn SchoolStore`, apply the business rules from
//! `school_core`, and return [`AppResult`](crate::error::AppResult) values
//! the handlers pass straight through.

pub mod avatar;
pub mod faculty;
pub mod student;

pub use avatar::AvatarService;
pub use faculty::FacultyService;
pub use student::StudentService;

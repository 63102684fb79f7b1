//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod avatar_repo;
pub mod faculty_repo;
pub mod student_repo;

pub use avatar_repo::AvatarRepo;
pub use faculty_repo::FacultyRepo;
pub use student_repo::StudentRepo;

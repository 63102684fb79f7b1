//! Storage traits used by the service layer.
//!
//! Services depend on these traits rather than on the concrete repos so a
//! store can be swapped (Postgres in production, an in-memory map in the
//! API tests). [`PgStore`] implements every trait by delegating to the
//! repositories.
//!
//! Method names carry the entity prefix so calls stay unambiguous on a
//! `dyn SchoolStore`.

use async_trait::async_trait;
use school_core::types::DbId;

use crate::models::avatar::{Avatar, UpsertAvatar};
use crate::models::faculty::{CreateFaculty, Faculty, UpdateFaculty};
use crate::models::student::{CreateStudent, LastStudent, Student, UpdateStudent};
use crate::repositories::{AvatarRepo, FacultyRepo, StudentRepo};
use crate::DbPool;

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// Student persistence and report queries.
#[async_trait]
pub trait StudentStore: Send + Sync {
    async fn find_student(&self, id: DbId) -> Result<Option<Student>, sqlx::Error>;
    async fn create_student(&self, input: &CreateStudent) -> Result<Student, sqlx::Error>;
    /// `None` when no student has `input.id`.
    async fn update_student(&self, input: &UpdateStudent) -> Result<Option<Student>, sqlx::Error>;
    /// `true` when a row was removed.
    async fn delete_student(&self, id: DbId) -> Result<bool, sqlx::Error>;
    /// All students ordered by ID.
    async fn list_students(&self) -> Result<Vec<Student>, sqlx::Error>;
    async fn students_by_age(&self, age: i32) -> Result<Vec<Student>, sqlx::Error>;
    /// Inclusive on both ends.
    async fn students_by_age_between(&self, min: i32, max: i32)
        -> Result<Vec<Student>, sqlx::Error>;
    async fn students_by_faculty(&self, faculty_id: DbId) -> Result<Vec<Student>, sqlx::Error>;
    async fn count_students(&self) -> Result<i64, sqlx::Error>;
    /// Aggregate mean age; `0.0` with no students.
    async fn average_student_age(&self) -> Result<f64, sqlx::Error>;
    /// Highest IDs first.
    async fn last_students(&self, limit: i64) -> Result<Vec<LastStudent>, sqlx::Error>;
}

/// Faculty persistence and lookups.
#[async_trait]
pub trait FacultyStore: Send + Sync {
    async fn find_faculty(&self, id: DbId) -> Result<Option<Faculty>, sqlx::Error>;
    async fn create_faculty(&self, input: &CreateFaculty) -> Result<Faculty, sqlx::Error>;
    async fn update_faculty(&self, input: &UpdateFaculty) -> Result<Option<Faculty>, sqlx::Error>;
    async fn delete_faculty(&self, id: DbId) -> Result<bool, sqlx::Error>;
    async fn list_faculties(&self) -> Result<Vec<Faculty>, sqlx::Error>;
    /// Exact color match.
    async fn faculties_by_color(&self, color: &str) -> Result<Vec<Faculty>, sqlx::Error>;
    /// Case-insensitive substring match on name or color, no duplicates.
    async fn search_faculties(&self, needle: &str) -> Result<Vec<Faculty>, sqlx::Error>;
    async fn faculty_of_student(&self, student_id: DbId) -> Result<Option<Faculty>, sqlx::Error>;
}

/// Avatar row persistence.
#[async_trait]
pub trait AvatarStore: Send + Sync {
    async fn find_avatar(&self, student_id: DbId) -> Result<Option<Avatar>, sqlx::Error>;
    async fn upsert_avatar(&self, input: &UpsertAvatar) -> Result<Avatar, sqlx::Error>;
}

/// Everything the API needs from storage.
#[async_trait]
pub trait SchoolStore: StudentStore + FacultyStore + AvatarStore {
    async fn health_check(&self) -> Result<(), sqlx::Error>;
}

// ---------------------------------------------------------------------------
// Postgres implementation
// ---------------------------------------------------------------------------

/// [`SchoolStore`] backed by a Postgres pool.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudentStore for PgStore {
    async fn find_student(&self, id: DbId) -> Result<Option<Student>, sqlx::Error> {
        StudentRepo::find_by_id(&self.pool, id).await
    }

    async fn create_student(&self, input: &CreateStudent) -> Result<Student, sqlx::Error> {
        StudentRepo::create(&self.pool, input).await
    }

    async fn update_student(&self, input: &UpdateStudent) -> Result<Option<Student>, sqlx::Error> {
        StudentRepo::update(&self.pool, input).await
    }

    async fn delete_student(&self, id: DbId) -> Result<bool, sqlx::Error> {
        StudentRepo::delete(&self.pool, id).await
    }

    async fn list_students(&self) -> Result<Vec<Student>, sqlx::Error> {
        StudentRepo::list(&self.pool).await
    }

    async fn students_by_age(&self, age: i32) -> Result<Vec<Student>, sqlx::Error> {
        StudentRepo::find_by_age(&self.pool, age).await
    }

    async fn students_by_age_between(
        &self,
        min: i32,
        max: i32,
    ) -> Result<Vec<Student>, sqlx::Error> {
        StudentRepo::find_by_age_between(&self.pool, min, max).await
    }

    async fn students_by_faculty(&self, faculty_id: DbId) -> Result<Vec<Student>, sqlx::Error> {
        StudentRepo::list_by_faculty(&self.pool, faculty_id).await
    }

    async fn count_students(&self) -> Result<i64, sqlx::Error> {
        StudentRepo::count(&self.pool).await
    }

    async fn average_student_age(&self) -> Result<f64, sqlx::Error> {
        StudentRepo::average_age(&self.pool).await
    }

    async fn last_students(&self, limit: i64) -> Result<Vec<LastStudent>, sqlx::Error> {
        StudentRepo::last_students(&self.pool, limit).await
    }
}

#[async_trait]
impl FacultyStore for PgStore {
    async fn find_faculty(&self, id: DbId) -> Result<Option<Faculty>, sqlx::Error> {
        FacultyRepo::find_by_id(&self.pool, id).await
    }

    async fn create_faculty(&self, input: &CreateFaculty) -> Result<Faculty, sqlx::Error> {
        FacultyRepo::create(&self.pool, input).await
    }

    async fn update_faculty(&self, input: &UpdateFaculty) -> Result<Option<Faculty>, sqlx::Error> {
        FacultyRepo::update(&self.pool, input).await
    }

    async fn delete_faculty(&self, id: DbId) -> Result<bool, sqlx::Error> {
        FacultyRepo::delete(&self.pool, id).await
    }

    async fn list_faculties(&self) -> Result<Vec<Faculty>, sqlx::Error> {
        FacultyRepo::list(&self.pool).await
    }

    async fn faculties_by_color(&self, color: &str) -> Result<Vec<Faculty>, sqlx::Error> {
        FacultyRepo::find_by_color(&self.pool, color).await
    }

    async fn search_faculties(&self, needle: &str) -> Result<Vec<Faculty>, sqlx::Error> {
        FacultyRepo::search_name_or_color(&self.pool, needle).await
    }

    async fn faculty_of_student(&self, student_id: DbId) -> Result<Option<Faculty>, sqlx::Error> {
        FacultyRepo::find_by_student_id(&self.pool, student_id).await
    }
}

#[async_trait]
impl AvatarStore for PgStore {
    async fn find_avatar(&self, student_id: DbId) -> Result<Option<Avatar>, sqlx::Error> {
        AvatarRepo::find_by_student_id(&self.pool, student_id).await
    }

    async fn upsert_avatar(&self, input: &UpsertAvatar) -> Result<Avatar, sqlx::Error> {
        AvatarRepo::upsert(&self.pool, input).await
    }
}

#[async_trait]
impl SchoolStore for PgStore {
    async fn health_check(&self) -> Result<(), sqlx::Error> {
        crate::health_check(&self.pool).await
    }
}

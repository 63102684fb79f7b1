//! Repository for the `students` table.

use sqlx::PgPool;
use school_core::types::DbId;

use crate::models::student::{CreateStudent, LastStudent, Student, UpdateStudent};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, age, faculty_id";

/// Provides CRUD operations and report queries for students.
pub struct StudentRepo;

impl StudentRepo {
    /// Insert a new student, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateStudent) -> Result<Student, sqlx::Error> {
        let query = format!(
            "INSERT INTO students (name, age, faculty_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(&input.name)
            .bind(input.age)
            .bind(input.faculty_id)
            .fetch_one(pool)
            .await
    }

    /// Find a student by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE id = $1");
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all students ordered by ID.
    pub async fn list(pool: &PgPool) -> Result<Vec<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students ORDER BY id");
        sqlx::query_as::<_, Student>(&query).fetch_all(pool).await
    }

    /// Replace every field of a student.
    ///
    /// Returns `None` if no row with `input.id` exists.
    pub async fn update(
        pool: &PgPool,
        input: &UpdateStudent,
    ) -> Result<Option<Student>, sqlx::Error> {
        let query = format!(
            "UPDATE students SET name = $2, age = $3, faculty_id = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(input.id)
            .bind(&input.name)
            .bind(input.age)
            .bind(input.faculty_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a student by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Students whose age equals `age`, ordered by ID.
    pub async fn find_by_age(pool: &PgPool, age: i32) -> Result<Vec<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE age = $1 ORDER BY id");
        sqlx::query_as::<_, Student>(&query)
            .bind(age)
            .fetch_all(pool)
            .await
    }

    /// Students with `min <= age <= max`, ordered by ID.
    pub async fn find_by_age_between(
        pool: &PgPool,
        min: i32,
        max: i32,
    ) -> Result<Vec<Student>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM students WHERE age BETWEEN $1 AND $2 ORDER BY id");
        sqlx::query_as::<_, Student>(&query)
            .bind(min)
            .bind(max)
            .fetch_all(pool)
            .await
    }

    /// Students assigned to a faculty, ordered by ID.
    pub async fn list_by_faculty(
        pool: &PgPool,
        faculty_id: DbId,
    ) -> Result<Vec<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE faculty_id = $1 ORDER BY id");
        sqlx::query_as::<_, Student>(&query)
            .bind(faculty_id)
            .fetch_all(pool)
            .await
    }

    /// Total number of students.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM students")
            .fetch_one(pool)
            .await
    }

    /// Mean age computed by the database. `0.0` when there are no students.
    pub async fn average_age(pool: &PgPool) -> Result<f64, sqlx::Error> {
        sqlx::query_scalar("SELECT COALESCE(AVG(age), 0)::float8 FROM students")
            .fetch_one(pool)
            .await
    }

    /// The `limit` most recently created students, highest ID first.
    pub async fn last_students(pool: &PgPool, limit: i64) -> Result<Vec<LastStudent>, sqlx::Error> {
        sqlx::query_as::<_, LastStudent>(
            "SELECT id, name, age FROM students ORDER BY id DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}

//! Repository for the `faculties` table.

use sqlx::PgPool;
use school_core::types::DbId;

use crate::models::faculty::{CreateFaculty, Faculty, UpdateFaculty};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, color";

/// Provides CRUD operations and lookups for faculties.
pub struct FacultyRepo;

impl FacultyRepo {
    /// Insert a new faculty, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateFaculty) -> Result<Faculty, sqlx::Error> {
        let query = format!(
            "INSERT INTO faculties (name, color)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Faculty>(&query)
            .bind(&input.name)
            .bind(&input.color)
            .fetch_one(pool)
            .await
    }

    /// Find a faculty by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Faculty>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM faculties WHERE id = $1");
        sqlx::query_as::<_, Faculty>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all faculties ordered by ID.
    pub async fn list(pool: &PgPool) -> Result<Vec<Faculty>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM faculties ORDER BY id");
        sqlx::query_as::<_, Faculty>(&query).fetch_all(pool).await
    }

    /// Replace name and color of a faculty.
    ///
    /// Returns `None` if no row with `input.id` exists.
    pub async fn update(
        pool: &PgPool,
        input: &UpdateFaculty,
    ) -> Result<Option<Faculty>, sqlx::Error> {
        let query = format!(
            "UPDATE faculties SET name = $2, color = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Faculty>(&query)
            .bind(input.id)
            .bind(&input.name)
            .bind(&input.color)
            .fetch_optional(pool)
            .await
    }

    /// Delete a faculty by ID. Returns `true` if a row was removed.
    ///
    /// Students of the faculty keep existing with `faculty_id` cleared.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM faculties WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Faculties whose color equals `color` exactly.
    pub async fn find_by_color(pool: &PgPool, color: &str) -> Result<Vec<Faculty>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM faculties WHERE color = $1 ORDER BY id");
        sqlx::query_as::<_, Faculty>(&query)
            .bind(color)
            .fetch_all(pool)
            .await
    }

    /// Faculties whose name or color contains `needle`, ignoring case.
    ///
    /// Each faculty appears at most once, ordered by ID.
    pub async fn search_name_or_color(
        pool: &PgPool,
        needle: &str,
    ) -> Result<Vec<Faculty>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM faculties
             WHERE name ILIKE $1 ESCAPE '\\' OR color ILIKE $1 ESCAPE '\\'
             ORDER BY id"
        );
        sqlx::query_as::<_, Faculty>(&query)
            .bind(contains_pattern(needle))
            .fetch_all(pool)
            .await
    }

    /// The faculty a student belongs to, if the student exists and has one.
    pub async fn find_by_student_id(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Option<Faculty>, sqlx::Error> {
        sqlx::query_as::<_, Faculty>(
            "SELECT f.id, f.name, f.color
             FROM faculties f
             JOIN students s ON s.faculty_id = f.id
             WHERE s.id = $1",
        )
        .bind(student_id)
        .fetch_optional(pool)
        .await
    }
}

/// Build a `%needle%` LIKE pattern with `%`, `_` and `\` escaped.
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

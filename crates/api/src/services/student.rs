//! Student operations and reports.

use school_core::fanout::{self, EmitMode};
use school_core::students;
use school_core::types::DbId;
use school_core::validation::{validate_age, validate_age_range, validate_limit, validate_text};
use school_db::models::faculty::Faculty;
use school_db::models::student::{CreateStudent, LastStudent, Student, UpdateStudent};
use school_db::store::SchoolStore;

use crate::error::{AppError, AppResult};

pub struct StudentService;

impl StudentService {
    pub async fn get(store: &dyn SchoolStore, id: DbId) -> AppResult<Student> {
        store
            .find_student(id)
            .await?
            .ok_or(AppError::not_found("Student", id))
    }

    pub async fn create(store: &dyn SchoolStore, input: &CreateStudent) -> AppResult<Student> {
        validate_text("name", &input.name)?;
        validate_age(input.age)?;
        ensure_faculty(store, input.faculty_id).await?;

        let student = store.create_student(input).await?;
        tracing::info!(student_id = student.id, "Student created");
        Ok(student)
    }

    /// Replace a student. Missing students yield NotFound and nothing is written.
    pub async fn update(store: &dyn SchoolStore, input: &UpdateStudent) -> AppResult<Student> {
        validate_text("name", &input.name)?;
        validate_age(input.age)?;
        ensure_faculty(store, input.faculty_id).await?;

        store
            .update_student(input)
            .await?
            .ok_or(AppError::not_found("Student", input.id))
    }

    /// Delete by id. Deleting an absent student is not an error.
    pub async fn delete(store: &dyn SchoolStore, id: DbId) -> AppResult<()> {
        let removed = store.delete_student(id).await?;
        tracing::info!(student_id = id, removed, "Student delete requested");
        Ok(())
    }

    pub async fn by_age(store: &dyn SchoolStore, age: i32) -> AppResult<Vec<Student>> {
        Ok(store.students_by_age(age).await?)
    }

    pub async fn by_age_between(
        store: &dyn SchoolStore,
        min: i32,
        max: i32,
    ) -> AppResult<Vec<Student>> {
        validate_age_range(min, max)?;
        Ok(store.students_by_age_between(min, max).await?)
    }

    /// The faculty of a student. NotFound if the student is missing or has none.
    pub async fn faculty(store: &dyn SchoolStore, id: DbId) -> AppResult<Faculty> {
        Self::get(store, id).await?;
        store
            .faculty_of_student(id)
            .await?
            .ok_or(AppError::not_found("Faculty", id))
    }

    pub async fn count(store: &dyn SchoolStore) -> AppResult<i64> {
        Ok(store.count_students().await?)
    }

    /// Mean age from the store's aggregate query.
    pub async fn average_age(store: &dyn SchoolStore) -> AppResult<f64> {
        Ok(store.average_student_age().await?)
    }

    /// Mean age folded in memory over the ages of all students.
    pub async fn average_age_streamed(store: &dyn SchoolStore) -> AppResult<f64> {
        let all = store.list_students().await?;
        Ok(students::average_age(all.iter().map(|s| s.age)))
    }

    /// Uppercased, sorted names starting with `letter` (default `A`).
    pub async fn names_starting_with(
        store: &dyn SchoolStore,
        letter: Option<&str>,
    ) -> AppResult<Vec<String>> {
        let initial = students::parse_initial(letter);
        let all = store.list_students().await?;
        Ok(students::names_starting_with(
            all.iter().map(|s| s.name.as_str()),
            initial,
        ))
    }

    pub async fn last_students(store: &dyn SchoolStore, limit: i64) -> AppResult<Vec<LastStudent>> {
        validate_limit(limit)?;
        Ok(store.last_students(limit).await?)
    }

    /// Emit every student name from `workers` threads and return the names in
    /// the order they were emitted. Each emission is logged.
    pub async fn emit_names(
        store: &dyn SchoolStore,
        workers: usize,
        mode: EmitMode,
    ) -> AppResult<Vec<String>> {
        let names: Vec<String> = store
            .list_students()
            .await?
            .into_iter()
            .map(|s| s.name)
            .collect();

        tokio::task::spawn_blocking(move || {
            fanout::emit_names(&names, workers, mode, |worker, name| {
                tracing::info!(worker, name, ?mode, "Student name");
            })
        })
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))
    }
}

/// Reject a `faculty_id` that does not reference an existing faculty.
async fn ensure_faculty(store: &dyn SchoolStore, faculty_id: Option<DbId>) -> AppResult<()> {
    if let Some(id) = faculty_id {
        if store.find_faculty(id).await?.is_none() {
            return Err(AppError::not_found("Faculty", id));
        }
    }
    Ok(())
}

//! Faculty operations and lookups.

use std::collections::BTreeMap;

use school_core::types::DbId;
use school_core::validation::validate_text;
use school_db::models::faculty::{CreateFaculty, Faculty, UpdateFaculty};
use school_db::models::student::Student;
use school_db::store::SchoolStore;

use crate::error::{AppError, AppResult};

pub struct FacultyService;

impl FacultyService {
    pub async fn get(store: &dyn SchoolStore, id: DbId) -> AppResult<Faculty> {
        store
            .find_faculty(id)
            .await?
            .ok_or(AppError::not_found("Faculty", id))
    }

    pub async fn list(store: &dyn SchoolStore) -> AppResult<Vec<Faculty>> {
        Ok(store.list_faculties().await?)
    }

    pub async fn create(store: &dyn SchoolStore, input: &CreateFaculty) -> AppResult<Faculty> {
        validate_text("name", &input.name)?;
        validate_text("color", &input.color)?;

        let faculty = store.create_faculty(input).await?;
        tracing::info!(faculty_id = faculty.id, "Faculty created");
        Ok(faculty)
    }

    pub async fn update(store: &dyn SchoolStore, input: &UpdateFaculty) -> AppResult<Faculty> {
        validate_text("name", &input.name)?;
        validate_text("color", &input.color)?;

        store
            .update_faculty(input)
            .await?
            .ok_or(AppError::not_found("Faculty", input.id))
    }

    /// Delete by id. Deleting an absent faculty is not an error.
    pub async fn delete(store: &dyn SchoolStore, id: DbId) -> AppResult<()> {
        let removed = store.delete_faculty(id).await?;
        tracing::info!(faculty_id = id, removed, "Faculty delete requested");
        Ok(())
    }

    pub async fn by_color(store: &dyn SchoolStore, color: &str) -> AppResult<Vec<Faculty>> {
        Ok(store.faculties_by_color(color).await?)
    }

    /// Faculties whose name or color contains `needle`, ignoring case.
    ///
    /// The result is a set: one entry per faculty id, ordered by id.
    pub async fn search(store: &dyn SchoolStore, needle: &str) -> AppResult<Vec<Faculty>> {
        let found = store.search_faculties(needle).await?;
        let unique: BTreeMap<DbId, Faculty> = found.into_iter().map(|f| (f.id, f)).collect();
        Ok(unique.into_values().collect())
    }

    /// Students of a faculty. NotFound if the faculty does not exist.
    pub async fn students(store: &dyn SchoolStore, id: DbId) -> AppResult<Vec<Student>> {
        Self::get(store, id).await?;
        Ok(store.students_by_faculty(id).await?)
    }
}

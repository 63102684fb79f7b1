#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use school_api::config::ServerConfig;
use school_api::router::build_app_router;
use school_api::state::AppState;
use school_core::types::DbId;
use school_db::models::avatar::{Avatar, UpsertAvatar};
use school_db::models::faculty::{CreateFaculty, Faculty, UpdateFaculty};
use school_db::models::student::{CreateStudent, LastStudent, Student, UpdateStudent};
use school_db::store::{AvatarStore, FacultyStore, SchoolStore, StudentStore};

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Tables {
    next_id: DbId,
    students: BTreeMap<DbId, Student>,
    faculties: BTreeMap<DbId, Faculty>,
    avatars: BTreeMap<DbId, Avatar>,
    deleted_students: Vec<DbId>,
    deleted_faculties: Vec<DbId>,
    db_down: bool,
}

impl Tables {
    fn next_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }
}

/// [`SchoolStore`] over ordered maps, mirroring the SQL semantics of the
/// Postgres repositories. Records every delete call so tests can check the
/// underlying delete was invoked.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Insert a faculty with a fixed id, bypassing the API.
    pub fn put_faculty(&self, id: DbId, name: &str, color: &str) -> Faculty {
        let mut t = self.tables.lock().unwrap();
        let faculty = Faculty {
            id,
            name: name.to_string(),
            color: color.to_string(),
        };
        t.faculties.insert(id, faculty.clone());
        t.next_id = t.next_id.max(id);
        faculty
    }

    /// Insert a student with a generated id, bypassing the API.
    pub fn put_student(&self, name: &str, age: i32, faculty_id: Option<DbId>) -> Student {
        let mut t = self.tables.lock().unwrap();
        let id = t.next_id();
        let student = Student {
            id,
            name: name.to_string(),
            age,
            faculty_id,
        };
        t.students.insert(id, student.clone());
        student
    }

    pub fn student(&self, id: DbId) -> Option<Student> {
        self.tables.lock().unwrap().students.get(&id).cloned()
    }

    pub fn faculty(&self, id: DbId) -> Option<Faculty> {
        self.tables.lock().unwrap().faculties.get(&id).cloned()
    }

    pub fn avatar(&self, student_id: DbId) -> Option<Avatar> {
        self.tables.lock().unwrap().avatars.get(&student_id).cloned()
    }

    pub fn student_count(&self) -> usize {
        self.tables.lock().unwrap().students.len()
    }

    pub fn deleted_students(&self) -> Vec<DbId> {
        self.tables.lock().unwrap().deleted_students.clone()
    }

    pub fn deleted_faculties(&self) -> Vec<DbId> {
        self.tables.lock().unwrap().deleted_faculties.clone()
    }

    /// Make `health_check` fail as if the database were unreachable.
    pub fn set_db_down(&self, down: bool) {
        self.tables.lock().unwrap().db_down = down;
    }
}

#[async_trait]
impl StudentStore for MemoryStore {
    async fn find_student(&self, id: DbId) -> Result<Option<Student>, sqlx::Error> {
        Ok(self.student(id))
    }

    async fn create_student(&self, input: &CreateStudent) -> Result<Student, sqlx::Error> {
        Ok(self.put_student(&input.name, input.age, input.faculty_id))
    }

    async fn update_student(&self, input: &UpdateStudent) -> Result<Option<Student>, sqlx::Error> {
        let mut t = self.tables.lock().unwrap();
        Ok(t.students.get_mut(&input.id).map(|s| {
            s.name = input.name.clone();
            s.age = input.age;
            s.faculty_id = input.faculty_id;
            s.clone()
        }))
    }

    async fn delete_student(&self, id: DbId) -> Result<bool, sqlx::Error> {
        let mut t = self.tables.lock().unwrap();
        t.deleted_students.push(id);
        t.avatars.remove(&id);
        Ok(t.students.remove(&id).is_some())
    }

    async fn list_students(&self) -> Result<Vec<Student>, sqlx::Error> {
        Ok(self.tables.lock().unwrap().students.values().cloned().collect())
    }

    async fn students_by_age(&self, age: i32) -> Result<Vec<Student>, sqlx::Error> {
        self.students_by_age_between(age, age).await
    }

    async fn students_by_age_between(
        &self,
        min: i32,
        max: i32,
    ) -> Result<Vec<Student>, sqlx::Error> {
        let t = self.tables.lock().unwrap();
        Ok(t.students
            .values()
            .filter(|s| (min..=max).contains(&s.age))
            .cloned()
            .collect())
    }

    async fn students_by_faculty(&self, faculty_id: DbId) -> Result<Vec<Student>, sqlx::Error> {
        let t = self.tables.lock().unwrap();
        Ok(t.students
            .values()
            .filter(|s| s.faculty_id == Some(faculty_id))
            .cloned()
            .collect())
    }

    async fn count_students(&self) -> Result<i64, sqlx::Error> {
        Ok(self.student_count() as i64)
    }

    async fn average_student_age(&self) -> Result<f64, sqlx::Error> {
        let t = self.tables.lock().unwrap();
        if t.students.is_empty() {
            return Ok(0.0);
        }
        let sum: i64 = t.students.values().map(|s| i64::from(s.age)).sum();
        Ok(sum as f64 / t.students.len() as f64)
    }

    async fn last_students(&self, limit: i64) -> Result<Vec<LastStudent>, sqlx::Error> {
        let t = self.tables.lock().unwrap();
        Ok(t.students
            .values()
            .rev()
            .take(limit as usize)
            .map(LastStudent::from)
            .collect())
    }
}

#[async_trait]
impl FacultyStore for MemoryStore {
    async fn find_faculty(&self, id: DbId) -> Result<Option<Faculty>, sqlx::Error> {
        Ok(self.faculty(id))
    }

    async fn create_faculty(&self, input: &CreateFaculty) -> Result<Faculty, sqlx::Error> {
        let id = self.tables.lock().unwrap().next_id();
        Ok(self.put_faculty(id, &input.name, &input.color))
    }

    async fn update_faculty(&self, input: &UpdateFaculty) -> Result<Option<Faculty>, sqlx::Error> {
        let mut t = self.tables.lock().unwrap();
        Ok(t.faculties.get_mut(&input.id).map(|f| {
            f.name = input.name.clone();
            f.color = input.color.clone();
            f.clone()
        }))
    }

    async fn delete_faculty(&self, id: DbId) -> Result<bool, sqlx::Error> {
        let mut t = self.tables.lock().unwrap();
        t.deleted_faculties.push(id);
        for s in t.students.values_mut() {
            if s.faculty_id == Some(id) {
                s.faculty_id = None;
            }
        }
        Ok(t.faculties.remove(&id).is_some())
    }

    async fn list_faculties(&self) -> Result<Vec<Faculty>, sqlx::Error> {
        Ok(self.tables.lock().unwrap().faculties.values().cloned().collect())
    }

    async fn faculties_by_color(&self, color: &str) -> Result<Vec<Faculty>, sqlx::Error> {
        let t = self.tables.lock().unwrap();
        Ok(t.faculties
            .values()
            .filter(|f| f.color == color)
            .cloned()
            .collect())
    }

    async fn search_faculties(&self, needle: &str) -> Result<Vec<Faculty>, sqlx::Error> {
        let needle = needle.to_lowercase();
        let t = self.tables.lock().unwrap();
        Ok(t.faculties
            .values()
            .filter(|f| {
                f.name.to_lowercase().contains(&needle) || f.color.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }

    async fn faculty_of_student(&self, student_id: DbId) -> Result<Option<Faculty>, sqlx::Error> {
        let t = self.tables.lock().unwrap();
        Ok(t.students
            .get(&student_id)
            .and_then(|s| s.faculty_id)
            .and_then(|fid| t.faculties.get(&fid).cloned()))
    }
}

#[async_trait]
impl AvatarStore for MemoryStore {
    async fn find_avatar(&self, student_id: DbId) -> Result<Option<Avatar>, sqlx::Error> {
        Ok(self.avatar(student_id))
    }

    async fn upsert_avatar(&self, input: &UpsertAvatar) -> Result<Avatar, sqlx::Error> {
        let mut t = self.tables.lock().unwrap();
        let existing = t.avatars.get(&input.student_id).map(|a| a.id);
        let id = match existing {
            Some(id) => id,
            None => t.next_id(),
        };
        let avatar = Avatar {
            id,
            student_id: input.student_id,
            file_path: input.file_path.clone(),
            file_size: input.file_size,
            media_type: input.media_type.clone(),
            data: input.data.clone(),
        };
        t.avatars.insert(input.student_id, avatar.clone());
        Ok(avatar)
    }
}

#[async_trait]
impl SchoolStore for MemoryStore {
    async fn health_check(&self) -> Result<(), sqlx::Error> {
        if self.tables.lock().unwrap().db_down {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(avatars_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        avatars_dir: avatars_dir.to_path_buf(),
        name_workers: 3,
    }
}

/// Build the full application router over `store`, writing avatars under
/// `avatars_dir`. Uses the same middleware stack as production.
pub fn build_test_app(store: Arc<MemoryStore>, avatars_dir: &Path) -> Router {
    let config = test_config(avatars_dir);
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn send_json(app: Router, method: Method, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send_json(app, Method::PUT, uri, body).await
}

/// POST a multipart form with a single file field.
pub async fn post_file(
    app: Router,
    uri: &str,
    field: &str,
    file_name: &str,
    content_type: &str,
    data: &[u8],
) -> Response {
    let boundary = "school-test-boundary";
    let mut body = Vec::with_capacity(data.len() + 256);
    body.extend_from_slice(
        format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
             Content-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

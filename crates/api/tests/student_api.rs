//! HTTP-level integration tests for the `/student` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json, MemoryStore};
use serde_json::json;
use tempfile::TempDir;

fn setup() -> (std::sync::Arc<MemoryStore>, TempDir) {
    (MemoryStore::new(), TempDir::new().unwrap())
}

fn ids(json: &serde_json::Value) -> Vec<i64> {
    json.as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_i64().unwrap())
        .collect()
}

fn strings(json: &serde_json::Value) -> Vec<String> {
    json.as_array()
        .unwrap()
        .iter()
        .map(|s| s.as_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_then_get_returns_equal_student() {
    let (store, dir) = setup();
    let app = common::build_test_app(store.clone(), dir.path());

    let response = post_json(app, "/student", json!({"name": "Harry", "age": 17})).await;
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    assert_eq!(created["name"], "Harry");
    assert_eq!(created["age"], 17);
    assert!(created["faculty_id"].is_null());

    let id = created["id"].as_i64().unwrap();
    let app = common::build_test_app(store, dir.path());
    let response = get(app, &format!("/student/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, created);
}

#[tokio::test]
async fn test_get_nonexistent_student_returns_404() {
    let (store, dir) = setup();
    let app = common::build_test_app(store, dir.path());

    let response = get(app, "/student/12345").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_with_unknown_faculty_returns_404() {
    let (store, dir) = setup();
    let app = common::build_test_app(store.clone(), dir.path());

    let response = post_json(
        app,
        "/student",
        json!({"name": "Draco", "age": 17, "faculty_id": 77}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(store.student_count(), 0);
}

#[tokio::test]
async fn test_create_with_invalid_age_returns_400() {
    let (store, dir) = setup();
    let app = common::build_test_app(store.clone(), dir.path());

    let response = post_json(app, "/student", json!({"name": "Old", "age": -3})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(store.student_count(), 0);
}

#[tokio::test]
async fn test_update_student() {
    let (store, dir) = setup();
    let s = store.put_student("Ron", 16, None);
    let app = common::build_test_app(store.clone(), dir.path());

    let response = put_json(
        app,
        "/student",
        json!({"id": s.id, "name": "Ronald", "age": 17}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Ronald");
    assert_eq!(store.student(s.id).unwrap().age, 17);
}

#[tokio::test]
async fn test_update_nonexistent_student_returns_404_and_leaves_store_unchanged() {
    let (store, dir) = setup();
    let s = store.put_student("Neville", 16, None);
    let app = common::build_test_app(store.clone(), dir.path());

    let response = put_json(
        app,
        "/student",
        json!({"id": s.id + 100, "name": "Ghost", "age": 30}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(store.student_count(), 1);
    assert_eq!(store.student(s.id), Some(s));
}

#[tokio::test]
async fn test_delete_student_twice_is_idempotent() {
    let (store, dir) = setup();
    let s = store.put_student("Ginny", 15, None);

    for _ in 0..2 {
        let app = common::build_test_app(store.clone(), dir.path());
        let response = delete(app, &format!("/student/{}", s.id)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
    assert!(store.deleted_students().contains(&s.id));
    assert!(store.student(s.id).is_none());
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_students_by_exact_age() {
    let (store, dir) = setup();
    let a = store.put_student("A", 11, None);
    store.put_student("B", 12, None);
    let c = store.put_student("C", 11, None);
    let app = common::build_test_app(store, dir.path());

    let json = body_json(get(app, "/student/age?age=11").await).await;
    assert_eq!(ids(&json), vec![a.id, c.id]);
}

#[tokio::test]
async fn test_students_by_age_range_is_inclusive() {
    let (store, dir) = setup();
    store.put_student("A", 10, None);
    let b = store.put_student("B", 11, None);
    let c = store.put_student("C", 13, None);
    store.put_student("D", 14, None);
    let app = common::build_test_app(store, dir.path());

    let response = get(app, "/student?min=11&max=13").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(ids(&body_json(response).await), vec![b.id, c.id]);
}

#[tokio::test]
async fn test_inverted_age_range_returns_400() {
    let (store, dir) = setup();
    let app = common::build_test_app(store, dir.path());

    let response = get(app, "/student?min=20&max=10").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_age_range_params_returns_400() {
    let (store, dir) = setup();
    let app = common::build_test_app(store, dir.path());

    let response = get(app, "/student?min=20").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Faculty association
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_student_faculty() {
    let (store, dir) = setup();
    store.put_faculty(1, "Gryffindor", "Red");
    let s = store.put_student("Harry", 17, Some(1));
    let app = common::build_test_app(store, dir.path());

    let response = get(app, &format!("/student/faculty/{}", s.id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json, json!({"id": 1, "name": "Gryffindor", "color": "Red"}));
}

#[tokio::test]
async fn test_student_without_faculty_returns_404() {
    let (store, dir) = setup();
    let s = store.put_student("Muggle", 30, None);
    let app = common::build_test_app(store, dir.path());

    let response = get(app, &format!("/student/faculty/{}", s.id)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_count_students() {
    let (store, dir) = setup();
    for name in ["A", "B", "C"] {
        store.put_student(name, 12, None);
    }
    let app = common::build_test_app(store, dir.path());

    let json = body_json(get(app, "/student/all").await).await;
    assert_eq!(json, 3);
}

#[tokio::test]
async fn test_average_age_computations_agree() {
    let (store, dir) = setup();
    for (name, age) in [("A", 11), ("B", 12), ("C", 14), ("D", 17), ("E", 16)] {
        store.put_student(name, age, None);
    }

    let app = common::build_test_app(store.clone(), dir.path());
    let aggregate = body_json(get(app, "/student/average-age-of-students").await).await;
    let app = common::build_test_app(store, dir.path());
    let folded = body_json(get(app, "/student/average-age-of-students-stream").await).await;

    assert_eq!(aggregate.as_f64().unwrap(), 14.0);
    assert_eq!(aggregate, folded);
}

#[tokio::test]
async fn test_average_age_of_no_students_is_zero() {
    let (store, dir) = setup();

    let app = common::build_test_app(store.clone(), dir.path());
    let aggregate = body_json(get(app, "/student/average-age-of-students").await).await;
    let app = common::build_test_app(store, dir.path());
    let folded = body_json(get(app, "/student/average-age-of-students-stream").await).await;

    assert_eq!(aggregate.as_f64().unwrap(), 0.0);
    assert_eq!(folded.as_f64().unwrap(), 0.0);
}

#[tokio::test]
async fn test_last_students_ordered_by_id_desc() {
    let (store, dir) = setup();
    store.put_student("One", 11, None);
    let two = store.put_student("Two", 12, None);
    let three = store.put_student("Three", 13, None);
    let app = common::build_test_app(store, dir.path());

    let response = get(app, "/student/last-students?limit=2").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(ids(&json), vec![three.id, two.id]);
    assert_eq!(json[0], json!({"id": three.id, "name": "Three", "age": 13}));
}

#[tokio::test]
async fn test_last_students_negative_limit_returns_400() {
    let (store, dir) = setup();
    let app = common::build_test_app(store, dir.path());

    let response = get(app, "/student/last-students?limit=-1").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_name_starts_defaults_to_a() {
    let (store, dir) = setup();
    for name in ["anna", "Bob", "Alex", "aaron"] {
        store.put_student(name, 12, None);
    }
    let app = common::build_test_app(store, dir.path());

    let json = body_json(get(app, "/student/name-starts").await).await;
    assert_eq!(strings(&json), vec!["AARON", "ALEX", "ANNA"]);
}

#[tokio::test]
async fn test_name_starts_with_given_letter() {
    let (store, dir) = setup();
    for name in ["harry", "Hermione", "Ron"] {
        store.put_student(name, 12, None);
    }
    let app = common::build_test_app(store, dir.path());

    let json = body_json(get(app, "/student/name-starts?letter=h").await).await;
    assert_eq!(strings(&json), vec!["HARRY", "HERMIONE"]);
}

// ---------------------------------------------------------------------------
// Names fan-out
// ---------------------------------------------------------------------------

const NINE: [&str; 9] = [
    "Harry", "Ron", "Hermione", "Ginny", "Neville", "Luna", "Draco", "Cedric", "Cho",
];

#[tokio::test]
async fn test_names_threads_emits_every_name() {
    let (store, dir) = setup();
    for name in NINE {
        store.put_student(name, 15, None);
    }
    let app = common::build_test_app(store, dir.path());

    let response = get(app, "/student/names-threads").await;
    assert_eq!(response.status(), StatusCode::OK);

    let mut emitted = strings(&body_json(response).await);
    emitted.sort();
    let mut expected: Vec<String> = NINE.iter().map(|n| n.to_string()).collect();
    expected.sort();
    assert_eq!(emitted, expected);
}

#[tokio::test]
async fn test_names_threads_synchronized_emits_every_name() {
    let (store, dir) = setup();
    for name in NINE.iter().chain(["Fred", "George"].iter()) {
        store.put_student(name, 15, None);
    }
    let app = common::build_test_app(store, dir.path());

    let response = get(app, "/student/names-threads-synchronized").await;
    assert_eq!(response.status(), StatusCode::OK);

    let emitted = strings(&body_json(response).await);
    assert_eq!(emitted.len(), 11);
    assert!(emitted.contains(&"George".to_string()));
}

#[tokio::test]
async fn test_names_threads_with_no_students() {
    let (store, dir) = setup();
    let app = common::build_test_app(store, dir.path());

    let json = body_json(get(app, "/student/names-threads").await).await;
    assert_eq!(json, json!([]));
}

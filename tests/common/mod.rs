#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use coursehub::api::router;
use coursehub::notify::{Notifier, RecordingNotifier};
use coursehub::state::AppState;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tempfile::TempDir;

pub struct TestApp {
    pub pool: SqlitePool,
    pub notifier: Arc<RecordingNotifier>,
    pub app: Router,
    // Held so the upload directory outlives the test.
    pub upload_dir: TempDir,
}

pub async fn spawn_app() -> TestApp {
    // A single connection keeps every query on the same in-memory database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to apply schema");

    let notifier = Arc::new(RecordingNotifier::new());
    let notifier_dyn: Arc<dyn Notifier> = notifier.clone();
    let upload_dir = TempDir::new().expect("Failed to create upload dir");

    let state = AppState {
        db: pool.clone(),
        notifier: notifier_dyn,
        admin_email: "admin@coursehub.local".to_string(),
        upload_dir: upload_dir.path().to_string_lossy().into_owned(),
    };

    TestApp {
        pool,
        notifier,
        app: router(state),
        upload_dir,
    }
}

pub async fn insert_course(pool: &SqlitePool, title: &str, syllabus: Option<&str>) -> i64 {
    sqlx::query(
        "INSERT INTO courses (title, description, instructor, syllabus, created_at) \
         VALUES (?, 'desc', 'instructor', ?, '2026-01-01T00:00:00Z')",
    )
    .bind(title)
    .bind(syllabus)
    .execute(pool)
    .await
    .expect("Failed to insert course")
    .last_insert_rowid()
}

pub async fn read_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&body).expect("Failed to parse JSON body")
}

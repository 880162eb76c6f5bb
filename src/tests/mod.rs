//! Integration and unit tests for the Warenkorb application.
//!
//! ## Test Modules
//!
//! - **auth_api_tests**: Registration and login endpoints
//! - **category_api_tests**: Category listing and creation
//! - **product_api_tests**: Product CRUD and the dashboard count
//! - **health_api_tests**: Health check endpoints
//! - **db_tests**: Schema bootstrap and constraint behavior
//! - **config_tests**: Configuration defaults and helpers
//! - **error_tests**: Error-to-status mapping

mod auth_api_tests;

use axum::body::Body;
use axum::http::{header, Request};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::SqlitePoolOptions;
use tempfile::{NamedTempFile, TempDir};
use tower::ServiceExt;

use crate::config::{AppConfig, DatabaseConfig, ServerConfig, UploadsConfig};
use crate::state::AppState;

/// Everything a test needs: the router, the state (for direct DB asserts),
/// and the temp resources that must outlive the test body.
pub(crate) struct TestApp {
    pub app: axum::Router,
    pub state: AppState,
    _db_file: NamedTempFile,
    _uploads_dir: TempDir,
}

pub(crate) async fn setup_test_app() -> TestApp {
    let temp_db = NamedTempFile::new().unwrap();
    let db_url = format!("sqlite:{}", temp_db.path().display());
    sqlx::Sqlite::create_database(&db_url).await.unwrap();

    let pool = SqlitePoolOptions::new().max_connections(1).connect(&db_url).await.unwrap();
    crate::db::init_db(&pool).await.unwrap();

    let uploads_dir = tempfile::tempdir().unwrap();
    let config = AppConfig {
        server: ServerConfig { host: "127.0.0.1".to_string(), port: 5000 },
        database: DatabaseConfig { url: db_url },
        uploads: UploadsConfig { dir: uploads_dir.path().display().to_string() },
    };

    let state = AppState::new(pool, config);
    let app = crate::router::build_router(state.clone());

    TestApp { app, state, _db_file: temp_db, _uploads_dir: uploads_dir }
}

impl TestApp {
    pub(crate) async fn get(&self, uri: &str) -> axum::response::Response {
        self.app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    pub(crate) async fn post_json(&self, uri: &str, body: Value) -> axum::response::Response {
        self.app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    pub(crate) async fn send_multipart(
        &self,
        method: &str,
        uri: &str,
        fields: &[(&str, &str)],
        file: Option<(&str, &str, &[u8])>,
    ) -> axum::response::Response {
        let (content_type, body) = multipart_body(fields, file);
        self.app
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header(header::CONTENT_TYPE, content_type)
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    pub(crate) async fn delete(&self, uri: &str) -> axum::response::Response {
        self.app
            .clone()
            .oneshot(Request::builder().method("DELETE").uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }
}

/// Hand-rolled multipart encoding: text fields plus an optional
/// `(field_name, filename, bytes)` file part.
pub(crate) fn multipart_body(
    fields: &[(&str, &str)],
    file: Option<(&str, &str, &[u8])>,
) -> (String, Vec<u8>) {
    const BOUNDARY: &str = "warenkorb-test-boundary";
    let mut body: Vec<u8> = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    if let Some((name, filename, bytes)) = file {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                name, filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    (format!("multipart/form-data; boundary={}", BOUNDARY), body)
}

pub(crate) async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

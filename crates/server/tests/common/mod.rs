#![allow(dead_code)]

use std::path::PathBuf;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use migration::MigratorTrait;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use server::state::ServerState;

pub const BOUNDARY: &str = "adminapp-test-boundary";

pub struct TestApp {
    pub router: Router,
    pub state: ServerState,
    pub upload_dir: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.upload_dir);
    }
}

/// Router over a private migrated in-memory database and a temp upload dir.
pub async fn spawn_app() -> anyhow::Result<TestApp> {
    let db = models::db::connect_in_memory().await?;
    migration::Migrator::up(&db, None).await?;

    let upload_dir = std::env::temp_dir().join(format!("adminapp_uploads_{}", Uuid::new_v4()));
    let upload = configs::UploadConfig { dir: upload_dir.to_string_lossy().into_owned(), max_bytes: 1024 * 1024 };
    let state = ServerState::new(db, &upload);
    let router = server::startup::build_app(state.clone());
    Ok(TestApp { router, state, upload_dir })
}

impl TestApp {
    pub async fn send(&self, req: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
        let resp = self.router.clone().oneshot(req).await?;
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
        Ok((status, body))
    }

    pub async fn get(&self, uri: &str) -> anyhow::Result<(StatusCode, Value)> {
        self.send(Request::builder().method("GET").uri(uri).body(Body::empty())?).await
    }

    pub async fn delete(&self, uri: &str) -> anyhow::Result<(StatusCode, Value)> {
        self.send(Request::builder().method("DELETE").uri(uri).body(Body::empty())?).await
    }

    pub async fn json(&self, method: &str, uri: &str, body: Value) -> anyhow::Result<(StatusCode, Value)> {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body)?))?;
        self.send(req).await
    }

    pub async fn upload(&self, uri: &str, field: &str, filename: Option<&str>, data: &[u8]) -> anyhow::Result<(StatusCode, Value)> {
        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", format!("multipart/form-data; boundary={BOUNDARY}"))
            .body(Body::from(multipart_body(field, filename, data)))?;
        self.send(req).await
    }
}

/// Single-part multipart body; `filename: None` produces a plain form field.
pub fn multipart_body(field: &str, filename: Option<&str>, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    match filename {
        Some(f) => {
            body.extend_from_slice(format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"{f}\"\r\n").as_bytes());
            body.extend_from_slice(b"Content-Type: application/octet-stream\r\n");
        }
        None => {
            body.extend_from_slice(format!("Content-Disposition: form-data; name=\"{field}\"\r\n").as_bytes());
        }
    }
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

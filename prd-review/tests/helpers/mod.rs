//! Shared helpers for prd-review integration tests

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tower::util::ServiceExt;

use prd_review::config::ServiceConfig;
use prd_review::services::{FixtureCatalog, ProgressSource};
use prd_review::AppState;

pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const BOUNDARY: &str = "prd-review-test-boundary";

/// App wired to a throwaway root folder, ticking every millisecond
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub root: TempDir,
}

pub fn create_test_app() -> TestApp {
    create_test_app_with(|_| {})
}

pub fn create_test_app_with(adjust: impl FnOnce(&mut ServiceConfig)) -> TestApp {
    let root = TempDir::new().unwrap();
    let mut config = test_config(&root);
    adjust(&mut config);

    TestApp::from_state(AppState::new(config), root)
}

/// App polling upload progress from `progress` instead of the simulated store
pub fn create_test_app_with_progress(progress: Arc<dyn ProgressSource>) -> TestApp {
    let root = TempDir::new().unwrap();
    let config = test_config(&root);

    TestApp::from_state(
        AppState::with_providers(config, progress, Arc::new(FixtureCatalog)),
        root,
    )
}

fn test_config(root: &TempDir) -> ServiceConfig {
    let mut config = ServiceConfig::with_root(root.path().to_path_buf());
    config.tick_interval = Duration::from_millis(1);
    config
}

impl TestApp {
    pub fn from_state(state: AppState, root: TempDir) -> Self {
        let router = prd_review::build_router(state.clone());
        TestApp {
            router,
            state,
            root,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap_or_else(|e| {
                panic!("{} body is not JSON ({}): {}", status, e, String::from_utf8_lossy(&body))
            })
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post(&self, uri: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn post_raw(&self, uri: &str, content_type: &str, body: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", content_type)
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method("DELETE")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// POST a multipart form holding one part named `field`
    pub async fn upload(
        &self,
        field: &str,
        file_name: &str,
        content_type: &str,
        contents: &[u8],
    ) -> (StatusCode, Value) {
        self.send(multipart_request(
            "/api/documents/upload",
            field,
            file_name,
            content_type,
            contents,
        ))
        .await
    }

    /// Create a session (optionally bound to a document), returning its id
    pub async fn create_session(&self, document_id: Option<&str>) -> String {
        let body = match document_id {
            Some(id) => serde_json::json!({ "documentId": id }),
            None => serde_json::json!({}),
        };
        let (status, json) = self.post_json("/api/sessions", body).await;
        assert_eq!(status, StatusCode::CREATED, "create session: {}", json);
        json["data"]["id"].as_str().unwrap().to_string()
    }

    /// Poll the session until its analysis phase is `finished`
    pub async fn wait_for_analysis(&self, session_id: &str) -> Value {
        let uri = format!("/api/sessions/{}", session_id);
        for _ in 0..500 {
            let (_, json) = self.get(&uri).await;
            if json["data"]["analysis"]["phase"] == "finished" {
                return json["data"].clone();
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("analysis for session {} did not finish", session_id);
    }

    /// Wait until the session's runner has published its last events and exited
    pub async fn wait_for_runner_exit(&self, session_id: &str) {
        let id = session_id.parse().unwrap();
        for _ in 0..200 {
            if !self.state.sessions.has_runner(id).await {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("runner for session {} is still registered", session_id);
    }

    pub fn uploaded_files(&self) -> Vec<String> {
        let dir = &self.state.config.uploads_dir;
        if !dir.exists() {
            return Vec::new();
        }
        std::fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect()
    }
}

pub fn multipart_request(
    uri: &str,
    field: &str,
    file_name: &str,
    content_type: &str,
    contents: &[u8],
) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

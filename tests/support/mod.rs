#![allow(dead_code)]

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, header::CONTENT_TYPE};
use http_body_util::BodyExt;
use tempfile::NamedTempFile;
use uuid::Uuid;

use letterpress::application::repos::{RepoError, StoredTemplate, TemplatesRepo};
use letterpress::application::templates::TemplateService;
use letterpress::config::ServerSettings;
use letterpress::domain::document::Document;
use letterpress::infra::http::{HttpState, build_router};
use letterpress::infra::layout::FileLayoutSource;
use letterpress::infra::memory::InMemoryTemplates;

pub const LAYOUT: &str = "<h1>{{title}}</h1>\n<p>{{content}}</p>\n{{#each sections}}\n  <tr>{{this}}</tr>\n{{/each}}\n<footer>{{title}}</footer>";

/// Router over the given store and a layout file that lives as long as the
/// returned guard.
pub struct TestApp {
    pub router: Router,
    pub layout: NamedTempFile,
}

pub fn server_settings(max_body_bytes: usize) -> ServerSettings {
    ServerSettings {
        addr: "127.0.0.1:0".parse().expect("loopback address"),
        graceful_shutdown: Duration::from_secs(1),
        max_body_bytes,
    }
}

pub fn layout_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp layout");
    file.write_all(contents.as_bytes()).expect("write layout");
    file
}

pub fn app_with_store(store: Arc<dyn TemplatesRepo>) -> TestApp {
    app_with(store, LAYOUT, 10 * 1024 * 1024)
}

pub fn app_with(store: Arc<dyn TemplatesRepo>, layout: &str, max_body_bytes: usize) -> TestApp {
    let layout = layout_file(layout);
    let templates = TemplateService::new(
        store,
        Arc::new(FileLayoutSource::new(layout.path().to_path_buf())),
    );
    let router = build_router(HttpState::new(templates), &server_settings(max_body_bytes));
    TestApp { router, layout }
}

pub fn app() -> TestApp {
    app_with_store(Arc::new(InMemoryTemplates::new()))
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .expect("request should build")
}

pub fn post_json(uri: &str, body: impl Into<String>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.into()))
        .expect("request should build")
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = body.collect().await.expect("collect body").to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

pub async fn body_to_json(body: Body) -> serde_json::Value {
    let bytes = body.collect().await.expect("collect body").to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}

/// A store whose backend is unreachable.
pub struct UnavailableStore;

#[async_trait]
impl TemplatesRepo for UnavailableStore {
    async fn persist(&self, _document: &Document) -> Result<Uuid, RepoError> {
        Err(RepoError::from_persistence("connection refused"))
    }

    async fn list_history(&self) -> Result<Vec<StoredTemplate>, RepoError> {
        Err(RepoError::Timeout)
    }

    async fn health_check(&self) -> Result<(), RepoError> {
        Err(RepoError::Timeout)
    }
}

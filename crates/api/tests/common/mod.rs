#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

use sideludi_api::auth::jwt::JwtConfig;
use sideludi_api::auth::password::hash_password;
use sideludi_api::config::ServerConfig;
use sideludi_api::router::build_app_router;
use sideludi_api::session::{build_store, SessionBackend, SessionConfig};
use sideludi_api::state::AppState;
use sideludi_api::storage::{UploadConfig, UploadStorage};
use sideludi_db::models::user::{CreateUser, User};
use sideludi_db::repositories::UserRepo;

pub const TEST_PASSWORD: &str = "correct horse battery staple";

/// Build a test `ServerConfig` with safe defaults and the given upload dir.
pub fn test_config(upload_dir: &TempDir) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:8080".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            expiry_hours: 24,
        },
        session: SessionConfig {
            backend: SessionBackend::Postgres,
            ttl_hours: 24,
            cookie_secure: false,
        },
        uploads: UploadConfig {
            dir: upload_dir.path().to_path_buf(),
            public_prefix: "/uploads".to_string(),
        },
        relationship_start: Utc.with_ymd_and_hms(2025, 5, 10, 18, 42, 0).unwrap(),
    }
}

/// Build the full application router with all middleware layers, backed by
/// the Postgres session store.
///
/// The returned [`TempDir`] holds uploaded files; keep it alive for the
/// duration of the test.
pub fn build_test_app(pool: PgPool) -> (Router, TempDir) {
    build_test_app_with(pool, SessionBackend::Postgres)
}

/// Like [`build_test_app`], choosing the session backend.
pub fn build_test_app_with(pool: PgPool, backend: SessionBackend) -> (Router, TempDir) {
    let upload_dir = tempfile::tempdir().expect("tempdir should be created");
    let mut config = test_config(&upload_dir);
    config.session.backend = backend;

    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
        sessions: build_store(&config.session, pool),
        uploads: Arc::new(UploadStorage::new(config.uploads.clone())),
    };

    (build_app_router(state, &config), upload_dir)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert a user with [`TEST_PASSWORD`].
pub async fn create_test_user(pool: &PgPool, username: &str) -> User {
    let input = CreateUser {
        username: username.to_string(),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// Credentials handed out by a successful login.
pub struct LoginCredentials {
    /// Bearer token from the response body.
    pub token: String,
    /// `sid=<id>` pair ready to send back in a `Cookie` header.
    pub cookie: String,
    pub body: serde_json::Value,
}

/// Log in through the API and collect both credentials.
pub async fn login(app: Router, username: &str, password: &str) -> LoginCredentials {
    let body = serde_json::json!({ "username": username, "password": password });
    let response = post_json(app, "/api/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = session_cookie_pair(&response).expect("login must set the session cookie");
    let body = body_json(response).await;
    let token = body["token"]
        .as_str()
        .expect("login must return a token")
        .to_string();

    LoginCredentials {
        token,
        cookie,
        body,
    }
}

/// Extract `sid=<value>` from the response's `Set-Cookie` headers.
pub fn session_cookie_pair(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("sid="))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

/// Full `Set-Cookie` header for the session cookie, attributes included.
pub fn session_set_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("sid="))
        .map(str::to_string)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// How a request authenticates.
#[derive(Clone, Copy)]
pub enum Auth<'a> {
    None,
    Bearer(&'a str),
    Cookie(&'a str),
    /// Raw `Authorization` header value.
    Header(&'a str),
}

fn request(method: Method, uri: &str, auth: Auth<'_>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match auth {
        Auth::None => builder,
        Auth::Bearer(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
        Auth::Cookie(cookie) => builder.header(COOKIE, cookie),
        Auth::Header(value) => builder.header(AUTHORIZATION, value),
    }
}

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.expect("request should complete")
}

pub async fn get(app: Router, uri: &str) -> Response {
    send_empty(app, Method::GET, uri, Auth::None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send_empty(app, Method::GET, uri, Auth::Bearer(token)).await
}

pub async fn send_empty(app: Router, method: Method, uri: &str, auth: Auth<'_>) -> Response {
    let req = request(method, uri, auth)
        .body(Body::empty())
        .expect("request should build");
    send(app, req).await
}

pub async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    auth: Auth<'_>,
    body: serde_json::Value,
) -> Response {
    let req = request(method, uri, auth)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build");
    send(app, req).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send_json(app, Method::POST, uri, Auth::None, body).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send_json(app, Method::POST, uri, Auth::Bearer(token), body).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send_json(app, Method::PUT, uri, Auth::Bearer(token), body).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send_empty(app, Method::DELETE, uri, Auth::Bearer(token)).await
}

/// One part of a hand-built multipart body.
pub struct Part<'a> {
    pub name: &'a str,
    pub file_name: Option<&'a str>,
    pub content_type: Option<&'a str>,
    pub data: &'a [u8],
}

impl<'a> Part<'a> {
    pub fn file(name: &'a str, file_name: &'a str, content_type: &'a str, data: &'a [u8]) -> Self {
        Self {
            name,
            file_name: Some(file_name),
            content_type: Some(content_type),
            data,
        }
    }
}

const BOUNDARY: &str = "sideludi-test-boundary";

/// Encode parts as `multipart/form-data`.
pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        let mut disposition = format!("Content-Disposition: form-data; name=\"{}\"", part.name);
        if let Some(file_name) = part.file_name {
            disposition.push_str(&format!("; filename=\"{file_name}\""));
        }
        body.extend_from_slice(disposition.as_bytes());
        body.extend_from_slice(b"\r\n");
        if let Some(content_type) = part.content_type {
            body.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn post_multipart(
    app: Router,
    uri: &str,
    auth: Auth<'_>,
    parts: &[Part<'_>],
) -> Response {
    let req = request(Method::POST, uri, auth)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .expect("request should build");
    send(app, req).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes()
        .to_vec()
}

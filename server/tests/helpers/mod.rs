//! Reusable test helpers for HTTP integration tests.
//!
//! Provides `TestApp` for building and sending requests through the full
//! axum router, plus utilities for user creation and role grants. Each
//! `TestApp` owns a private in-memory database and a temporary upload dir.
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{self, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tower::ServiceExt;

use aula_server::api::{create_router, AppState};
use aula_server::config::Config;
use aula_server::files::FileStore;
use aula_server::permissions::Role;

/// A portal instance wired to an in-memory database.
pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    _upload_dir: tempfile::TempDir,
}

impl TestApp {
    /// Spawn with the default test configuration.
    pub async fn spawn() -> Self {
        Self::spawn_with(Config::default_for_test()).await
    }

    /// Spawn with a customized configuration.
    pub async fn spawn_with(mut config: Config) -> Self {
        let upload_dir = tempfile::tempdir().expect("Failed to create upload dir");
        config.upload_dir = upload_dir.path().to_path_buf();

        // One connection: an in-memory database exists per connection.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory database");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        let files = FileStore::new(&config.upload_dir).expect("Failed to open file store");
        let state = AppState::new(pool.clone(), config, files);

        Self {
            router: create_router(state),
            pool,
            _upload_dir: upload_dir,
        }
    }

    /// Send a request through the router, returning status and JSON body.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(http::header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(json) => builder
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .expect("Failed to build request"),
            None => builder.body(Body::empty()).expect("Failed to build request"),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };

        (status, json)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, serde_json::Value) {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(
        &self,
        uri: &str,
        token: Option<&str>,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(
        &self,
        uri: &str,
        token: Option<&str>,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        self.request(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, serde_json::Value) {
        self.request(Method::DELETE, uri, token, None).await
    }

    /// Register a user and return their access token.
    pub async fn register(&self, username: &str, password: &str) -> String {
        let (status, body) = self
            .post(
                "/auth/register",
                None,
                serde_json::json!({ "username": username, "password": password }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "registration failed: {body}");
        body["access_token"]
            .as_str()
            .expect("registration returned no token")
            .to_string()
    }

    /// Login, returning the raw response for error-path assertions.
    pub async fn login(&self, username: &str, secret: &str) -> (StatusCode, serde_json::Value) {
        self.post(
            "/auth/login",
            None,
            serde_json::json!({ "username": username, "secret": secret }),
        )
        .await
    }

    /// Login and unwrap the access token.
    pub async fn login_token(&self, username: &str, secret: &str) -> String {
        let (status, body) = self.login(username, secret).await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["access_token"]
            .as_str()
            .expect("login returned no token")
            .to_string()
    }

    /// Obtain a guest token.
    pub async fn guest_token(&self) -> String {
        let (status, body) = self.post("/auth/guest", None, serde_json::json!({})).await;
        assert_eq!(status, StatusCode::OK, "guest login failed: {body}");
        body["access_token"]
            .as_str()
            .expect("guest login returned no token")
            .to_string()
    }

    /// Grant a role directly in the store.
    pub async fn grant_role(&self, username: &str, role: Role) {
        sqlx::query("UPDATE users SET role = ? WHERE username = ?")
            .bind(role)
            .bind(username)
            .execute(&self.pool)
            .await
            .expect("Failed to grant role");
    }

    /// Register a user, grant the role, and return a token carrying it.
    pub async fn register_with_role(&self, username: &str, password: &str, role: Role) -> String {
        self.register(username, password).await;
        self.grant_role(username, role).await;
        self.login_token(username, password).await
    }
}

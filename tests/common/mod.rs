#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tower::ServiceExt;

use gymflow::{
    api,
    auth::TokenIssuer,
    notifications::NotificationManager,
    service::ServiceContext,
};

pub async fn test_pool() -> anyhow::Result<SqlitePool> {
    // A single connection that never recycles keeps the in-memory database alive
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    Ok(pool)
}

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
}

impl TestApp {
    pub async fn new() -> anyhow::Result<Self> {
        let pool = test_pool().await?;
        let services = Arc::new(ServiceContext::new(
            pool.clone(),
            Arc::new(TokenIssuer::new("integration-secret", 72)),
            Arc::new(NotificationManager::new()),
        ));
        Ok(Self {
            router: api::create_app(services),
            pool,
        })
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> anyhow::Result<(StatusCode, Value)> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };
        Ok((status, value))
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> anyhow::Result<(StatusCode, Value)> {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(
        &self,
        uri: &str,
        token: Option<&str>,
        body: Value,
    ) -> anyhow::Result<(StatusCode, Value)> {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    /// Registers a user and returns its bearer token.
    pub async fn register(&self, email: &str, role: &str) -> anyhow::Result<String> {
        let (status, body) = self
            .post(
                "/api/v1/auth/register",
                None,
                json!({
                    "name": "Test User",
                    "email": email,
                    "password": "password123",
                    "role": role,
                }),
            )
            .await?;
        assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);

        let token = body["token"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("missing token in {}", body))?;
        Ok(token.to_string())
    }

    /// Creates a class starting tomorrow as the given staff token, returning its id.
    pub async fn create_class(&self, token: &str, capacity: i32) -> anyhow::Result<String> {
        let start = chrono::Utc::now() + chrono::Duration::days(1);
        let end = start + chrono::Duration::hours(1);
        let (status, body) = self
            .post(
                "/api/v1/classes",
                Some(token),
                json!({
                    "name": "Yoga Class",
                    "description": "Morning yoga session",
                    "capacity": capacity,
                    "start_time": start,
                    "end_time": end,
                    "price": 50.0,
                }),
            )
            .await?;
        assert_eq!(status, StatusCode::CREATED, "create class failed: {}", body);

        let id = body["id"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("missing id in {}", body))?;
        Ok(id.to_string())
    }
}

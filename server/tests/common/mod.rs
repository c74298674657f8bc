use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use migration::{Migrator, MigratorTrait};
use platform_db::{EmployeeStore, connect_url};
use serde_json::Value;
use server::{
    config::ApiVariant,
    http::{AppState, build_router},
};
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub store: EmployeeStore,
}

impl TestApp {
    pub async fn new(variant: ApiVariant) -> Self {
        let pool = connect_url("sqlite::memory:", Some(1)).await.unwrap();
        Migrator::up(&pool, None).await.unwrap();
        let store = EmployeeStore::new(Arc::new(pool));
        let router = build_router(AppState {
            store: store.clone(),
            variant,
        });
        Self { router, store }
    }

    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();
        self.dispatch(request).await
    }

    pub async fn send_raw(&self, method: Method, uri: &str, raw: &'static str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(raw))
            .unwrap();
        self.dispatch(request).await
    }

    async fn dispatch(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    /// Insert `count` employees through the API, returning their ids.
    pub async fn seed(&self, count: usize) -> Vec<i64> {
        let mut ids = Vec::with_capacity(count);
        for n in 0..count {
            let (status, body) = self
                .send(
                    Method::POST,
                    "/api/employees",
                    Some(serde_json::json!({
                        "name": format!("Seed {n}"),
                        "salary": 1000 + n,
                        "age": 20 + n,
                    })),
                )
                .await;
            assert_eq!(status, StatusCode::CREATED);
            ids.push(body["id"].as_i64().unwrap());
        }
        ids
    }
}

//! Drives the assembled router in-process.
#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use biblio_db::MemoryStore;
use biblio_kernel::{settings::Settings, InitCtx};
use serde_json::Value;
use tower::ServiceExt;

pub struct TestApp {
    router: Router,
    pub store: Arc<MemoryStore>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Option<Value>,
    pub raw: Vec<u8>,
}

impl TestApp {
    /// Application with default settings: built-in categories, no customers.
    pub async fn spawn() -> Self {
        let store = Arc::new(MemoryStore::new());
        let registry = biblio_app::build_registry(store.clone());
        let settings = Settings::default();
        registry
            .init_all(&InitCtx {
                settings: &settings,
            })
            .await
            .unwrap();
        let router = biblio_http::build_router(&registry, &settings);
        Self { router, store }
    }

    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let raw = to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec();
        let body = serde_json::from_slice(&raw).ok();
        TestResponse { status, body, raw }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(Method::DELETE, uri, None).await
    }

    /// Store a book and return its generated id.
    pub async fn add_book(&self, isbn: &str, title: &str) -> i64 {
        let response = self
            .post(
                "/rest/book/api/addBook",
                serde_json::json!({ "isbn": isbn, "title": title }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
        response.body.unwrap()["id"].as_i64().unwrap()
    }

    /// Register a customer and return the generated id.
    pub async fn add_customer(&self, first: &str, last: &str, email: &str) -> i64 {
        let response = self
            .post(
                "/rest/customer/api/addCustomer",
                serde_json::json!({ "firstName": first, "lastName": last, "email": email }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
        response.body.unwrap()["id"].as_i64().unwrap()
    }
}

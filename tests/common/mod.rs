#![allow(dead_code)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use fake_gateway::application::gateway::{Gateway, SaleRequest};
use fake_gateway::domain::transaction::Transaction;
use fake_gateway::interfaces::http::{AppState, router};
use rust_decimal::Decimal;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const MERCHANT: &str = "test-merchant";
pub const CC_TOKEN: &str = "cc-token";

/// Creates an authorized sale and returns the stored transaction.
pub async fn create_transaction(gateway: &Gateway, amount: Decimal) -> Transaction {
    gateway
        .sale(SaleRequest::new(CC_TOKEN, amount))
        .await
        .expect("sale failed")
        .transaction
        .expect("sale produced no transaction")
}

pub fn app() -> (Arc<Gateway>, Router) {
    let gateway = Arc::new(Gateway::in_memory());
    let app = router(AppState::new(gateway.clone(), MERCHANT));
    (gateway, app)
}

/// Sends one request through the router and returns the status and JSON body
/// (`Value::Null` for an empty body).
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request");

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

pub fn merchant_path(rest: &str) -> String {
    format!("/merchants/{MERCHANT}{rest}")
}

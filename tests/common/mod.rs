#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;
use uuid::Uuid;
use vacancy_tracker::{
    database::MemoryVacancyStore, middleware::auth::Claims, routes, AppState,
};

pub const JWT_SECRET: &str = "test_secret_key";

pub fn setup_app() -> (Router, MemoryVacancyStore) {
    let store = MemoryVacancyStore::new();
    let state = AppState::new(Arc::new(store.clone()), JWT_SECRET);
    (routes::router(state), store)
}

pub fn bearer(user_id: Uuid) -> String {
    let claims = Claims {
        sub: user_id.to_string(),
        exp: (chrono::Utc::now().timestamp() + 3600) as usize,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("encode token");
    format!("Bearer {}", token)
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    user: Option<Uuid>,
    body: Option<JsonValue>,
) -> (StatusCode, JsonValue) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user_id) = user {
        builder = builder.header("authorization", bearer(user_id));
    }
    let req = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null)
    };
    (status, body)
}

pub fn vacancy_body() -> JsonValue {
    json!({
        "link": "https://x.com/job",
        "vacancy": "Dev",
        "company": "Acme",
        "location": "Remote",
        "work_type": "remote"
    })
}

/// Creates a vacancy for `owner` and returns its id.
pub async fn create_vacancy(app: &Router, owner: Uuid) -> String {
    let (status, body) = send(app, "POST", "/api/vacancies", Some(owner), Some(vacancy_body())).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {}", body);
    body["id"].as_str().expect("vacancy id").to_string()
}

pub fn statuses(body: &JsonValue) -> Vec<JsonValue> {
    body["statuses"].as_array().cloned().unwrap_or_default()
}

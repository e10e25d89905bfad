use std::time::Duration;

use argon2::{password_hash::SaltString, Argon2, PasswordHasher};
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request},
};
use rand::{rngs::OsRng, RngCore};
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;
use tradeledger_server::{api::app_router, auth::AuthConfig, build_state, config::Config};

fn hash_password(password: &str) -> String {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .unwrap()
        .to_string()
}

async fn build_test_router(admin: &str, viewer: &str) -> (axum::Router, TempDir) {
    let tmp = tempdir().unwrap();
    let mut secret = vec![0u8; 32];
    OsRng.fill_bytes(&mut secret);

    let mut config = Config::local(tmp.path().join("test.db").to_string_lossy());
    config.auth = Some(AuthConfig {
        admin_password_hash: hash_password(admin),
        viewer_password_hash: Some(hash_password(viewer)),
        jwt_secret: secret,
        access_token_ttl: Duration::from_secs(600),
    });

    let state = build_state(&config).await.unwrap();
    (app_router(state, &config), tmp)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn login(app: &axum::Router, password: &str) -> (u16, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/v1/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({ "password": password }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status().as_u16();
    (status, body_json(response).await)
}

fn create_request(token: &str) -> Request<Body> {
    let payload = json!({
        "projectName": "Rice shipment",
        "projectNo": "P-100",
        "projectDate": "2024-05-01",
        "costing": { "supplierInvoiceAmount": 1000, "twlInvoiceAmount": 900 }
    });
    Request::builder()
        .method(Method::POST)
        .uri("/api/v1/projects")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from(payload.to_string()))
        .unwrap()
}

#[tokio::test]
async fn login_and_access_protected_route() {
    let (app, _tmp) = build_test_router("admin-secret", "viewer-secret").await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/projects")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 401);

    let status_response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/auth/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(status_response.status(), 200);
    assert_eq!(body_json(status_response).await["requiresPassword"], true);

    let (status, body) = login(&app, "wrong").await;
    assert_eq!(status, 401);
    assert_eq!(body["message"], "Invalid password");

    let (status, body) = login(&app, "admin-secret").await;
    assert_eq!(status, 200);
    assert_eq!(body["role"], "admin");
    assert_eq!(body["tokenType"], "Bearer");
    let token = body["accessToken"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/projects")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let response = app.clone().oneshot(create_request(&token)).await.unwrap();
    assert_eq!(response.status(), 201);
}

#[tokio::test]
async fn viewer_can_read_but_not_write() {
    let (app, _tmp) = build_test_router("admin-secret", "viewer-secret").await;

    let (status, body) = login(&app, "viewer-secret").await;
    assert_eq!(status, 200);
    assert_eq!(body["role"], "viewer");
    let token = body["accessToken"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/reports/summary")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let response = app.clone().oneshot(create_request(&token)).await.unwrap();
    assert_eq!(response.status(), 403);
}

#[tokio::test]
async fn malformed_tokens_are_rejected() {
    let (app, _tmp) = build_test_router("admin-secret", "viewer-secret").await;

    for value in ["Bearer not-a-jwt", "Basic abc", "Bearer "] {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/projects")
                    .header(header::AUTHORIZATION, value)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), 401, "header {:?}", value);
    }
}

//! Router smoke tests. The pool is lazy and never connects: every request
//! here is answered before a query would run. Anything past the token check
//! reads the employee row and lives in `postgres.rs`.

use axum::Router;
use axum::body::{Body, to_bytes};
use http::{Request, StatusCode, header};
use hr_server::api::create_router;
use hr_server::auth::jwt::create_token;
use hr_server::crypto::SalaryCipher;
use hr_server::state::AppState;
use shared::models::Role;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

const JWT_SECRET: &str = "router-test-secret";

fn app() -> Router {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://hr:hr@127.0.0.1:1/hr_test")
        .unwrap();
    let cipher = SalaryCipher::new("0123456789abcdef0123456789abcdef").unwrap();
    create_router(AppState::from_parts(pool, cipher, JWT_SECRET.to_string()))
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health() {
    let response = app()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "hr-server");
}

#[tokio::test]
async fn test_missing_token_is_401() {
    let response = app()
        .oneshot(Request::get("/api/employees").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await["code"], 1001);
}

#[tokio::test]
async fn test_bad_token_is_401() {
    let response = app()
        .oneshot(
            Request::get("/api/employees/me")
                .header(header::AUTHORIZATION, "Bearer not.a.jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await["code"], 1004);
}

#[tokio::test]
async fn test_token_from_other_secret_is_401() {
    let token = create_token(7, "staff@example.com", Role::Admin, "someone-else").unwrap();
    let response = app()
        .oneshot(
            Request::get("/api/notifications")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_rate_limited_per_ip() {
    let app = app();
    let attempt = |ip: &'static str| {
        Request::post("/api/auth/register")
            .header("x-forwarded-for", ip)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"name":"","email":"x@example.com","password":"long-enough"}"#))
            .unwrap()
    };

    // Blank name fails validation, so nothing reaches the database.
    for _ in 0..3 {
        let response = app.clone().oneshot(attempt("198.51.100.4")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
    let response = app.clone().oneshot(attempt("198.51.100.4")).await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(json_body(response).await["code"], 9);

    let response = app.oneshot(attempt("198.51.100.5")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

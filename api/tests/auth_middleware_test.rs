//! Tests for the bearer-token gate in front of `/api`

mod common;

use actix_web::{http::StatusCode, test};
use chrono::Duration;
use serde_json::Value;

use common::{bearer, credentials, test_state, test_state_with, test_state_with_keys, JSON_LIMIT};
use ks_api::create_app;
use ks_core::services::{SigningKeys, TokenServiceConfig};

macro_rules! login_tokens {
    ($app:expr) => {{
        let resp = test::call_service(
            &$app,
            test::TestRequest::post()
                .uri("/register")
                .set_json(credentials("alice", "wonderland-42"))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let resp = test::call_service(
            &$app,
            test::TestRequest::post()
                .uri("/login")
                .set_json(credentials("alice", "wonderland-42"))
                .to_request(),
        )
        .await;
        let body: Value = test::read_body_json(resp).await;

        (
            body["access_token"].as_str().unwrap().to_string(),
            body["refresh_token"].as_str().unwrap().to_string(),
        )
    }};
}

#[actix_web::test]
async fn test_valid_access_token_reaches_handler() {
    let app = test::init_service(create_app(test_state(), JSON_LIMIT)).await;
    let (access, _) = login_tokens!(app);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/data")
            .insert_header(bearer(&access))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "This is a protected route");
    assert_eq!(body["subject"], 1);
}

#[actix_web::test]
async fn test_missing_or_malformed_header_rejected() {
    let app = test::init_service(create_app(test_state(), JSON_LIMIT)).await;

    let no_header =
        test::call_service(&app, test::TestRequest::get().uri("/api/data").to_request()).await;
    assert_eq!(no_header.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(no_header).await;
    assert_eq!(body["error"], "UNAUTHORIZED");
    assert_eq!(body["message"], "Invalid credentials");

    for value in ["Basic dXNlcjpwYXNz", "Bearer", "Bearer not-a-jwt"] {
        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/data")
                .insert_header(("Authorization", value))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "header {:?}", value);
    }
}

#[actix_web::test]
async fn test_refresh_token_is_not_an_access_token() {
    let app = test::init_service(create_app(test_state(), JSON_LIMIT)).await;
    let (_, refresh) = login_tokens!(app);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/data")
            .insert_header(bearer(&refresh))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_token_from_another_key_rejected() {
    let app = test::init_service(create_app(test_state(), JSON_LIMIT)).await;
    let foreign_keys = SigningKeys::hs256(b"a-completely-different-secret").unwrap();
    let other = test::init_service(create_app(
        test_state_with_keys(foreign_keys, TokenServiceConfig::default()),
        JSON_LIMIT,
    ))
    .await;
    let (foreign_access, _) = login_tokens!(other);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/data")
            .insert_header(bearer(&foreign_access))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_expired_access_token_rejected_then_refresh_recovers() {
    let config = TokenServiceConfig::default().with_access_ttl(Duration::seconds(1));
    let app = test::init_service(create_app(test_state_with(config), JSON_LIMIT)).await;
    let (access, refresh) = login_tokens!(app);

    actix_web::rt::time::sleep(std::time::Duration::from_millis(2100)).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/data")
            .insert_header(bearer(&access))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/token/refresh")
            .set_json(serde_json::json!({ "refresh_token": refresh }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/data")
            .insert_header(bearer(body["access_token"].as_str().unwrap()))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
}

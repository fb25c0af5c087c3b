//! End-to-end tests of registration, login, rotation and logout over HTTP

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

use common::{bearer, credentials, test_state, JSON_LIMIT};
use ks_api::create_app;

macro_rules! app {
    () => {
        test::init_service(create_app(test_state(), JSON_LIMIT)).await
    };
}

macro_rules! post_json {
    ($app:expr, $uri:expr, $body:expr) => {
        test::call_service(
            &$app,
            test::TestRequest::post()
                .uri($uri)
                .set_json($body)
                .to_request(),
        )
        .await
    };
}

macro_rules! register_and_login {
    ($app:expr, $username:expr, $password:expr) => {{
        let resp = post_json!($app, "/register", credentials($username, $password));
        assert_eq!(resp.status(), StatusCode::CREATED);

        let resp = post_json!($app, "/login", credentials($username, $password));
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        body
    }};
}

#[actix_web::test]
async fn test_register_returns_created() {
    let app = app!();

    let resp = post_json!(
        app,
        "/register",
        json!({
            "username": "alice",
            "password": "wonderland-42",
            "first_name": "Alice",
            "birth_date": "1990-04-01"
        })
    );

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "User registered successfully");
}

#[actix_web::test]
async fn test_register_duplicate_username_conflicts() {
    let app = app!();

    let first = post_json!(app, "/register", credentials("alice", "wonderland-42"));
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post_json!(app, "/register", credentials("alice", "another-password"));
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn test_register_invalid_input_is_unprocessable() {
    let app = app!();

    let short = post_json!(app, "/register", credentials("al", "short"));
    assert_eq!(short.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(short).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"]["username"].is_array());

    let bad_date = post_json!(
        app,
        "/register",
        json!({ "username": "alice", "password": "wonderland-42", "birth_date": "01/04/1990" })
    );
    assert_eq!(bad_date.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let garbage = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/register")
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{not json")
            .to_request(),
    )
    .await;
    assert_eq!(garbage.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[actix_web::test]
async fn test_login_returns_token_pair() {
    let app = app!();

    let body = register_and_login!(app, "alice", "wonderland-42");

    assert!(body["access_token"].is_string());
    assert!(body["refresh_token"].is_string());
    assert!(body["access_expires_at"].is_string());
    assert!(body["refresh_expires_at"].is_string());
    assert_ne!(body["access_token"], body["refresh_token"]);
}

#[actix_web::test]
async fn test_login_failures_are_indistinguishable() {
    let app = app!();
    register_and_login!(app, "alice", "wonderland-42");

    let wrong_password = post_json!(app, "/login", credentials("alice", "looking-glass"));
    let unknown_user = post_json!(app, "/login", credentials("mallory", "wonderland-42"));

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);

    let a: Value = test::read_body_json(wrong_password).await;
    let b: Value = test::read_body_json(unknown_user).await;
    assert_eq!(a["error"], b["error"]);
    assert_eq!(a["message"], b["message"]);
    assert_eq!(a["message"], "Invalid credentials");
}

#[actix_web::test]
async fn test_refresh_rotates_once() {
    let app = app!();
    let pair = register_and_login!(app, "alice", "wonderland-42");
    let refresh_request = json!({ "refresh_token": pair["refresh_token"] });

    let rotated = post_json!(app, "/token/refresh", refresh_request.clone());
    assert_eq!(rotated.status(), StatusCode::OK);
    let new_pair: Value = test::read_body_json(rotated).await;
    assert_ne!(new_pair["refresh_token"], pair["refresh_token"]);
    assert_ne!(new_pair["access_token"], pair["access_token"]);

    let reused = post_json!(app, "/token/refresh", refresh_request);
    assert_eq!(reused.status(), StatusCode::UNAUTHORIZED);

    let chained = post_json!(
        app,
        "/token/refresh",
        json!({ "refresh_token": new_pair["refresh_token"] })
    );
    assert_eq!(chained.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_refresh_rejects_access_token_and_garbage() {
    let app = app!();
    let pair = register_and_login!(app, "alice", "wonderland-42");

    let with_access = post_json!(
        app,
        "/token/refresh",
        json!({ "refresh_token": pair["access_token"] })
    );
    assert_eq!(with_access.status(), StatusCode::UNAUTHORIZED);

    let garbage = post_json!(app, "/token/refresh", json!({ "refresh_token": "not.a.token" }));
    assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);

    let missing_field = post_json!(app, "/token/refresh", json!({}));
    assert_eq!(missing_field.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[actix_web::test]
async fn test_empty_refresh_token_is_unauthorized() {
    let app = app!();
    let empty = json!({ "refresh_token": "" });

    let refreshed = post_json!(app, "/token/refresh", empty.clone());
    assert_eq!(refreshed.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(refreshed).await;
    assert_eq!(body["error"], "UNAUTHORIZED");

    let logged_out = post_json!(app, "/logout", empty);
    assert_eq!(logged_out.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_logout_then_refresh_fails() {
    let app = app!();
    let pair = register_and_login!(app, "alice", "wonderland-42");
    let request = json!({ "refresh_token": pair["refresh_token"] });

    let first = post_json!(app, "/logout", request.clone());
    assert_eq!(first.status(), StatusCode::OK);

    let second = post_json!(app, "/logout", request.clone());
    assert_eq!(second.status(), StatusCode::OK);

    let refreshed = post_json!(app, "/token/refresh", request);
    assert_eq!(refreshed.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_access_token_outlives_logout() {
    let app = app!();
    let pair = register_and_login!(app, "alice", "wonderland-42");
    let access = pair["access_token"].as_str().unwrap().to_string();

    let resp = post_json!(app, "/logout", json!({ "refresh_token": pair["refresh_token"] }));
    assert_eq!(resp.status(), StatusCode::OK);

    // Access tokens are never checked against the ledger
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/data")
            .insert_header(bearer(&access))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_health_and_not_found() {
    let app = app!();

    let health =
        test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(health.status(), StatusCode::OK);
    let body: Value = test::read_body_json(health).await;
    assert_eq!(body["status"], "healthy");

    let missing =
        test::call_service(&app, test::TestRequest::get().uri("/nope").to_request()).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

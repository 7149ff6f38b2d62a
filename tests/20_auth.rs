mod common;

use axum::http::StatusCode;
use common::TestClient;
use flavor_api::auth::{generate_jwt, Claims};
use flavor_api::config::AppConfig;

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let res = TestClient::anonymous().get("/api/flavor/123").await;
    res.assert_status(StatusCode::UNAUTHORIZED);

    let body = res.json();
    assert_eq!(body["error"], true);
    assert_eq!(body["code"], "UNAUTHORIZED");
    assert_eq!(body["message"], "Missing Authorization header");
}

#[tokio::test]
async fn gate_runs_before_validation() {
    // a malformed id must not leak a 400 to an unauthenticated caller
    TestClient::anonymous()
        .get("/api/flavor/ham")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_signed_with_other_secret_is_rejected() {
    let token = generate_jwt(&Claims::new("mixer", 1, 1), "not-the-dev-secret").unwrap();
    TestClient::anonymous()
        .with_token(token)
        .get("/api/ingredient/count")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn garbage_token_is_rejected() {
    TestClient::anonymous()
        .with_token("abc.def.ghi")
        .get("/api/vendor")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unconfigured_secret_is_server_error() {
    let mut config = AppConfig::development();
    config.security.jwt_secret = String::new();

    let res = TestClient::with_config(config).with_token("abc.def.ghi").get("/api/vendor").await;
    res.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.json()["code"], "INTERNAL_SERVER_ERROR");
}

#[tokio::test]
async fn public_routes_ignore_bad_tokens() {
    TestClient::anonymous()
        .with_token("abc.def.ghi")
        .get("/health")
        .await
        .assert_status(StatusCode::OK);
}

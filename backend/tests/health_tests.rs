mod common;

use std::sync::Arc;

use common::*;

use http::StatusCode;
use upload_issuer::{middleware::ApiKeyGate, types::Environment};

#[tokio::test]
async fn test_health_endpoint() {
    let setup = TestSetup::protected();

    let response = setup
        .send_get_request("/health")
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["message"], "Server is healthy");
    assert_eq!(body["semver"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_openapi_document_lists_routes() {
    let setup = TestSetup::protected();

    let response = setup
        .send_get_request("/openapi.json")
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert!(body["paths"]["/get-presigned-url"]["post"].is_object());
    assert!(body["paths"]["/health"]["get"].is_object());
}

#[tokio::test]
async fn test_openapi_document_hidden_in_production() {
    let setup = TestSetup::with_signer(
        Arc::new(FailingSigner),
        ApiKeyGate::Disabled,
        Environment::Production,
    );

    let response = setup
        .send_get_request("/openapi.json")
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let setup = TestSetup::protected();

    let response = setup
        .send_get_request("/does-not-exist")
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_route_is_not_found_with_unconfigured_api_key() {
    let setup = TestSetup::new(ApiKeyGate::Enabled { api_key: None });

    for route in ["/does-not-exist", "/favicon.ico"] {
        let response = setup
            .send_get_request(route)
            .await
            .expect("Failed to send request");

        assert_eq!(response.status(), StatusCode::NOT_FOUND, "route {route}");
    }
}

#[tokio::test]
async fn test_unknown_post_route_does_not_require_api_key() {
    let setup = TestSetup::protected();

    let response = setup
        .send_post_request(
            "/get-presigned-url/extra",
            create_upload_request("photo.png", "image/png"),
            None,
        )
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

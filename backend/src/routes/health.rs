use aide::axum::IntoApiResponse;
use axum::Json;
use schemars::JsonSchema;
use serde::Serialize;

#[derive(Debug, Serialize, JsonSchema)]
pub struct HealthResponse {
    status: &'static str,
    message: &'static str,
    /// Current version of the application
    semver: &'static str,
}

/// Health check endpoint
///
/// Always answers 200 and never requires the API key.
pub async fn handler() -> impl IntoApiResponse {
    Json(HealthResponse {
        status: "ok",
        message: "Server is healthy",
        semver: env!("CARGO_PKG_VERSION"),
    })
}

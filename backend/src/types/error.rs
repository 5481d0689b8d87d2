//! Universal error handling for the API

use aide::OperationOutput;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use schemars::JsonSchema;
use serde::Serialize;

use crate::uploads::IssueError;

/// Error body returned to callers
#[derive(Debug, Serialize, JsonSchema)]
pub struct ApiErrorResponse {
    /// Human-readable error message
    pub error: &'static str,
}

/// Application error type that wraps the API error response
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    inner: ApiErrorResponse,
}

impl AppError {
    /// Create a new application error
    #[must_use]
    pub const fn new(status: StatusCode, msg: &'static str) -> Self {
        Self {
            status,
            inner: ApiErrorResponse { error: msg },
        }
    }

    /// HTTP status code of the error
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Message returned to the caller
    #[must_use]
    pub const fn message(&self) -> &'static str {
        self.inner.error
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Server errors are logged with their cause in `From<IssueError>`
        if self.status.is_client_error() {
            tracing::warn!("Client error: {} - {}", self.status, self.inner.error);
        }

        (self.status, Json(self.inner)).into_response()
    }
}

/// Convert issuing errors to application errors. Provider detail is logged, never returned.
impl From<IssueError> for AppError {
    fn from(err: IssueError) -> Self {
        match err {
            IssueError::Unauthorized => Self::new(StatusCode::UNAUTHORIZED, "Unauthorized"),
            IssueError::ServerMisconfigured => {
                tracing::error!("API key gate is enabled but API_KEY is not configured");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            IssueError::BadRequest(detail) => {
                tracing::debug!("Rejected upload request: {detail}");
                Self::new(StatusCode::BAD_REQUEST, "Missing filename or contentType")
            }
            IssueError::UpstreamError(signer_err) => {
                tracing::error!("Failed to sign upload URL: {signer_err}");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to generate upload URL",
                )
            }
        }
    }
}

impl OperationOutput for AppError {
    type Inner = ApiErrorResponse;

    fn operation_response(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Option<aide::openapi::Response> {
        Json::<ApiErrorResponse>::operation_response(ctx, operation)
    }
}

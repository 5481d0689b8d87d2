//! Shared-secret gate for the upload route

use std::sync::Arc;

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response, Extension};

use crate::{
    types::{AppError, ServiceConfig},
    uploads::{IssueError, IssueResult},
};

/// Header carrying the shared secret
pub const API_KEY_HEADER: &str = "x-api-key";

/// Shared-secret gate in front of the upload route
#[derive(Clone, PartialEq, Eq)]
pub enum ApiKeyGate {
    /// Every request passes
    Disabled,
    /// Requests must present the configured key; `None` means the server was deployed
    /// without one and must refuse everything
    Enabled {
        /// Expected `x-api-key` value
        api_key: Option<String>,
    },
}

impl ApiKeyGate {
    /// Builds the gate from the service configuration
    #[must_use]
    pub fn from_config(config: &ServiceConfig) -> Self {
        if config.require_api_key {
            Self::Enabled {
                api_key: config.api_key.clone(),
            }
        } else {
            Self::Disabled
        }
    }

    /// Checks the presented header value against the configured key
    ///
    /// # Errors
    ///
    /// Returns `IssueError::ServerMisconfigured` if the gate has no key, whatever was presented
    /// Returns `IssueError::Unauthorized` if the header is absent or differs from the key
    pub fn check(&self, presented: Option<&[u8]>) -> IssueResult<()> {
        match self {
            Self::Disabled => Ok(()),
            Self::Enabled { api_key: None } => Err(IssueError::ServerMisconfigured),
            Self::Enabled {
                api_key: Some(expected),
            } => match presented {
                Some(presented) if presented == expected.as_bytes() => Ok(()),
                _ => Err(IssueError::Unauthorized),
            },
        }
    }
}

impl std::fmt::Debug for ApiKeyGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disabled => f.write_str("Disabled"),
            Self::Enabled { api_key } => f
                .debug_struct("Enabled")
                .field("api_key_configured", &api_key.is_some())
                .finish(),
        }
    }
}

/// API key middleware
///
/// Rejects the request before its body is read when the gate refuses it.
///
/// # Errors
///
/// - `AppError` - 401 for a missing/incorrect key, 500 when no key is configured
pub async fn api_key_middleware(
    Extension(gate): Extension<Arc<ApiKeyGate>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let presented = request
        .headers()
        .get(API_KEY_HEADER)
        .map(HeaderValue::as_bytes);

    gate.check(presented)?;

    Ok(next.run(request).await)
}

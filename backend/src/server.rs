use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use aide::openapi::{Info, OpenApi};
use axum::{http::StatusCode, Extension, Router};
use tokio::{net::TcpListener, signal};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::{
    middleware::ApiKeyGate,
    routes,
    types::{Environment, ServiceConfig},
    uploads::UploadIssuer,
};

/// Upper bound on handling a single request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Builds the application router with all shared components attached
#[must_use]
pub fn build_router(
    environment: Environment,
    issuer: Arc<UploadIssuer>,
    api_key_gate: Arc<ApiKeyGate>,
) -> Router {
    let mut openapi = OpenApi {
        info: Info {
            title: "Upload Issuer".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            ..Info::default()
        },
        ..OpenApi::default()
    };

    routes::handler()
        .finish_api(&mut openapi)
        .layer(Extension(Arc::new(openapi)))
        .layer(Extension(environment))
        .layer(Extension(issuer))
        .layer(Extension(api_key_gate))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            REQUEST_TIMEOUT,
        ))
}

/// Starts the server with the given configuration and issuer
///
/// # Errors
///
/// Returns an error if the server fails to start or bind to the port
pub async fn start(config: ServiceConfig, issuer: Arc<UploadIssuer>) -> anyhow::Result<()> {
    let api_key_gate = ApiKeyGate::from_config(&config);
    match &api_key_gate {
        ApiKeyGate::Disabled => {
            tracing::warn!("API key gate disabled, upload URLs are issued to any caller");
        }
        ApiKeyGate::Enabled { api_key: None } => {
            tracing::error!(
                "REQUIRE_API_KEY is set but API_KEY is empty, upload requests will fail with 500"
            );
        }
        ApiKeyGate::Enabled { api_key: Some(_) } => {}
    }

    let router = build_router(config.environment, issuer, Arc::new(api_key_gate));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(
        bucket = %config.bucket_name,
        url_ttl_secs = config.url_ttl_secs,
        "Upload issuer started on http://{addr}"
    );

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(anyhow::Error::from)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}

mod docs;
mod health;
/// Upload URL handlers
pub mod uploads;

use aide::axum::{
    routing::{get, post},
    ApiRouter,
};
use axum::middleware;

use crate::middleware::api_key_middleware;

/// Creates the router with all handler routes
pub fn handler() -> ApiRouter {
    let public_routes = ApiRouter::new()
        .merge(docs::handler())
        .api_route("/health", get(health::handler));

    let protected_routes = ApiRouter::new()
        .api_route(
            "/get-presigned-url",
            post(uploads::create_presigned_upload_url),
        )
        .route_layer(middleware::from_fn(api_key_middleware));

    public_routes.merge(protected_routes)
}

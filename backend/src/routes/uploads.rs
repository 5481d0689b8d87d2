use std::sync::Arc;

use axum::{Extension, Json};
use tracing::instrument;

use crate::{
    types::{ApiJson, AppError},
    uploads::{SignedUploadGrant, UploadIssuer, UploadRequest},
};

/// Issues a presigned PUT URL for a new object
///
/// 1. Validates that `filename` and `contentType` are non-empty
/// 2. Generates `uploads/<32 random hex>-<filename>` as the object key
/// 3. Signs a PUT URL for that key with the requested content type
///
/// The API key check runs in [`crate::middleware::api_key_middleware`] before this handler.
///
/// # Errors
///
/// - 400 if `filename` or `contentType` is missing, or the body is not JSON
/// - 500 if the storage provider fails to sign the URL
#[instrument(skip(issuer, payload))]
pub async fn create_presigned_upload_url(
    Extension(issuer): Extension<Arc<UploadIssuer>>,
    ApiJson(payload): ApiJson<UploadRequest>,
) -> Result<Json<SignedUploadGrant>, AppError> {
    let grant = issuer.issue(&payload).await?;

    tracing::info!(
        key = %grant.key,
        content_type = %payload.content_type,
        "Issued presigned upload URL"
    );

    Ok(Json(grant))
}

//! Issuing presigned upload URLs
mod error;
mod key;
mod signer;

use std::sync::Arc;
use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

pub use error::{IssueError, IssueResult, SignerError};
pub use key::{generate_object_key, KEY_PREFIX};
pub use signer::{S3UploadSigner, UploadSigner};

/// Description of the file a client wants to upload
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    /// Name of the file; appended verbatim to the generated object key
    #[serde(default)]
    #[validate(length(min = 1))]
    pub filename: String,
    /// MIME type that will be attached to the uploaded object
    #[serde(default)]
    #[validate(length(min = 1))]
    pub content_type: String,
}

/// Time-bounded permission to PUT a single object
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignedUploadGrant {
    /// Presigned URL to upload the object to
    pub upload_url: String,
    /// Object key the upload will be stored under
    pub key: String,
}

/// Issues signed upload grants for a single bucket
pub struct UploadIssuer {
    signer: Arc<dyn UploadSigner>,
    bucket_name: String,
    url_ttl: Duration,
}

impl UploadIssuer {
    /// Creates a new issuer
    ///
    /// # Arguments
    ///
    /// * `signer` - Provider used to sign PUT URLs
    /// * `bucket_name` - Bucket every upload is stored in
    /// * `url_ttl_secs` - Lifetime of issued URLs in seconds
    #[must_use]
    pub const fn new(signer: Arc<dyn UploadSigner>, bucket_name: String, url_ttl_secs: u64) -> Self {
        Self {
            signer,
            bucket_name,
            url_ttl: Duration::from_secs(url_ttl_secs),
        }
    }

    /// Lifetime of issued URLs
    #[must_use]
    pub const fn url_ttl(&self) -> Duration {
        self.url_ttl
    }

    /// Validates the request, generates a unique object key and signs a PUT URL for it
    ///
    /// # Errors
    ///
    /// Returns `IssueError::BadRequest` if `filename` or `contentType` is empty
    /// Returns `IssueError::UpstreamError` if the signer fails
    pub async fn issue(&self, request: &UploadRequest) -> IssueResult<SignedUploadGrant> {
        request
            .validate()
            .map_err(|errors| IssueError::BadRequest(errors.to_string()))?;

        let key = generate_object_key(&request.filename);

        let upload_url = self
            .signer
            .create_signed_put_url(&self.bucket_name, &key, &request.content_type, self.url_ttl)
            .await?;

        Ok(SignedUploadGrant { upload_url, key })
    }
}

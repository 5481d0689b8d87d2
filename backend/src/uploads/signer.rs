//! Signed URL providers

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::{presigning::PresigningConfig, Client as S3Client};

use super::SignerError;

/// Storage provider capability used to mint signed PUT URLs
#[async_trait]
pub trait UploadSigner: Send + Sync {
    /// Returns a URL permitting a single PUT of `key` into `bucket` with the given
    /// `Content-Type`, valid for `expires_in`.
    ///
    /// # Errors
    ///
    /// Returns `SignerError` if the provider cannot sign the request
    async fn create_signed_put_url(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> Result<String, SignerError>;
}

/// [`UploadSigner`] backed by the AWS S3 SDK presigner
pub struct S3UploadSigner {
    s3_client: Arc<S3Client>,
}

impl S3UploadSigner {
    /// Creates a signer around a pre-configured S3 client
    #[must_use]
    pub const fn new(s3_client: Arc<S3Client>) -> Self {
        Self { s3_client }
    }
}

#[async_trait]
impl UploadSigner for S3UploadSigner {
    async fn create_signed_put_url(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> Result<String, SignerError> {
        let presigning_config = PresigningConfig::expires_in(expires_in).map_err(|e| {
            SignerError::ConfigError(format!("Failed to create presigning config: {e}"))
        })?;

        let presigned_request = self
            .s3_client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .presigned(presigning_config)
            .await?;

        Ok(presigned_request.uri().to_string())
    }
}

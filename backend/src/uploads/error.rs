//! Error types for issuing upload URLs

use aws_sdk_s3::{
    error::{DisplayErrorContext, SdkError},
    operation::put_object::PutObjectError,
};
use thiserror::Error;

/// Result type for upload issuing operations
pub type IssueResult<T> = Result<T, IssueError>;

/// Errors that terminate an upload URL request
#[derive(Error, Debug)]
pub enum IssueError {
    /// Missing or incorrect API key
    #[error("Missing or incorrect API key")]
    Unauthorized,

    /// The API key gate is enabled but the server has no key to compare against
    #[error("API key gate is enabled but no API key is configured")]
    ServerMisconfigured,

    /// Caller supplied an incomplete upload request
    #[error("Invalid upload request: {0}")]
    BadRequest(String),

    /// The storage provider failed to sign the upload URL
    #[error("Storage provider error: {0}")]
    UpstreamError(#[from] SignerError),
}

/// Errors raised by an [`UploadSigner`](super::UploadSigner)
#[derive(Error, Debug)]
pub enum SignerError {
    /// Presigning configuration was rejected (e.g. expiry out of range)
    #[error("Presigning configuration error: {0}")]
    ConfigError(String),

    /// S3 SDK failed to produce a presigned request
    #[error("S3 presigning error: {0}")]
    S3Error(String),
}

impl From<SdkError<PutObjectError>> for SignerError {
    fn from(error: SdkError<PutObjectError>) -> Self {
        Self::S3Error(DisplayErrorContext(&error).to_string())
    }
}

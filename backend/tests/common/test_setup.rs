use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::{
    config::{BehaviorVersion, Credentials, Region},
    Client as S3Client,
};
use axum::{body::Body, http::Request, response::Response, Router};
use tower::ServiceExt;
use upload_issuer::{
    middleware::{ApiKeyGate, API_KEY_HEADER},
    server,
    types::Environment,
    uploads::{S3UploadSigner, SignerError, UploadIssuer, UploadSigner},
};

pub const TEST_BUCKET: &str = "test-uploads";
pub const TEST_API_KEY: &str = "test-api-key-123";
pub const TEST_URL_TTL_SECS: u64 = 300;

/// Setup test logging
pub fn setup_test_env() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .ok();
}

/// S3 client with static credentials; presigning needs no network access
pub fn offline_s3_client() -> Arc<S3Client> {
    let config = aws_sdk_s3::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(Credentials::new(
            "AKIDEXAMPLE",
            "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY",
            None,
            None,
            "integration-test",
        ))
        .build();
    Arc::new(S3Client::from_conf(config))
}

/// Signer that always fails with a provider-specific message
pub struct FailingSigner;

pub const PROVIDER_ERROR_TEXT: &str = "InvalidAccessKeyId: AKIDEXAMPLE does not exist";

#[async_trait]
impl UploadSigner for FailingSigner {
    async fn create_signed_put_url(
        &self,
        _bucket: &str,
        _key: &str,
        _content_type: &str,
        _expires_in: Duration,
    ) -> Result<String, SignerError> {
        Err(SignerError::S3Error(PROVIDER_ERROR_TEXT.to_string()))
    }
}

/// Signer that never finishes within the request timeout
pub struct StalledSigner;

#[async_trait]
impl UploadSigner for StalledSigner {
    async fn create_signed_put_url(
        &self,
        _bucket: &str,
        _key: &str,
        _content_type: &str,
        _expires_in: Duration,
    ) -> Result<String, SignerError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok("https://example.com/too-late".to_string())
    }
}

pub struct TestSetup {
    pub router: Router,
}

impl TestSetup {
    /// Router backed by the real S3 presigner and the given gate
    pub fn new(api_key_gate: ApiKeyGate) -> Self {
        Self::with_signer(
            Arc::new(S3UploadSigner::new(offline_s3_client())),
            api_key_gate,
            Environment::Development,
        )
    }

    /// Router with a gate expecting [`TEST_API_KEY`]
    pub fn protected() -> Self {
        Self::new(ApiKeyGate::Enabled {
            api_key: Some(TEST_API_KEY.to_string()),
        })
    }

    pub fn with_signer(
        signer: Arc<dyn UploadSigner>,
        api_key_gate: ApiKeyGate,
        environment: Environment,
    ) -> Self {
        setup_test_env();

        let issuer = Arc::new(UploadIssuer::new(
            signer,
            TEST_BUCKET.to_string(),
            TEST_URL_TTL_SECS,
        ));

        let router = server::build_router(environment, issuer, Arc::new(api_key_gate));

        Self { router }
    }

    pub async fn send_post_request(
        &self,
        route: &str,
        payload: serde_json::Value,
        api_key: Option<&str>,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let mut builder = Request::builder()
            .uri(route)
            .method("POST")
            .header("Content-Type", "application/json");

        if let Some(api_key) = api_key {
            builder = builder.header(API_KEY_HEADER, api_key);
        }

        let request = builder.body(Body::from(payload.to_string()))?;

        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    pub async fn send_raw_post_request(
        &self,
        route: &str,
        content_type: Option<&str>,
        body: &'static str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let mut builder = Request::builder()
            .uri(route)
            .method("POST")
            .header(API_KEY_HEADER, TEST_API_KEY);

        if let Some(content_type) = content_type {
            builder = builder.header("Content-Type", content_type);
        }

        let request = builder.body(Body::from(body))?;
        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    pub async fn send_get_request(
        &self,
        route: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("GET")
            .body(Body::empty())?;
        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }
}

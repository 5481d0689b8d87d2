//! Service configuration, built once at startup

use std::env;
use std::fmt;
use std::time::Duration;

use anyhow::{bail, ensure, Context};
use aws_config::{timeout::TimeoutConfig, BehaviorVersion, Region};
use aws_credential_types::Credentials;

use super::Environment;

/// Port the server listens on when `PORT` is unset
pub const DEFAULT_PORT: u16 = 3000;

/// Presigned URL lifetime when `PRESIGNED_URL_EXPIRY_SECS` is unset
pub const DEFAULT_URL_TTL_SECS: u64 = 5 * 60;

/// Longest lifetime S3 accepts for a SigV4 presigned URL
const MAX_URL_TTL_SECS: u64 = 7 * 24 * 60 * 60;

const DEVELOPMENT_REGION: &str = "us-east-1";
const DEVELOPMENT_BUCKET: &str = "uploads";

/// Static access credential pair
#[derive(Clone, PartialEq, Eq)]
pub struct StaticCredentials {
    /// Access key ID
    pub access_key_id: String,
    /// Secret access key
    pub secret_access_key: String,
}

impl fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .finish()
    }
}

/// Immutable service configuration
#[derive(Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Deployment stage
    pub environment: Environment,
    /// Storage region
    pub region: String,
    /// Static credentials; `None` defers to the SDK default credential chain
    pub credentials: Option<StaticCredentials>,
    /// Bucket that receives uploads
    pub bucket_name: String,
    /// Custom S3 endpoint (LocalStack, S3-compatible stores)
    pub endpoint_url: Option<String>,
    /// HTTP listen port
    pub port: u16,
    /// Shared secret expected in the `x-api-key` header
    pub api_key: Option<String>,
    /// Whether the upload route is gated by the API key
    pub require_api_key: bool,
    /// Lifetime of presigned URLs in seconds
    pub url_ttl_secs: u64,
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("environment", &self.environment)
            .field("region", &self.region)
            .field("credentials", &self.credentials)
            .field("bucket_name", &self.bucket_name)
            .field("endpoint_url", &self.endpoint_url)
            .field("port", &self.port)
            .field("api_key", &self.api_key.as_ref().map(|_| "** redacted **"))
            .field("require_api_key", &self.require_api_key)
            .field("url_ttl_secs", &self.url_ttl_secs)
            .finish()
    }
}

impl ServiceConfig {
    /// Loads the configuration from process environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value fails to parse
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads the configuration through an arbitrary variable lookup
    ///
    /// Empty values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value fails to parse
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let environment = Environment::from_name(var("APP_ENV").as_deref())?;
        let is_development = environment == Environment::Development;

        let region = match var("AWS_REGION") {
            Some(region) => region,
            None if is_development => DEVELOPMENT_REGION.to_string(),
            None => bail!("AWS_REGION environment variable is not set"),
        };

        let credentials = match (var("AWS_ACCESS_KEY_ID"), var("AWS_SECRET_ACCESS_KEY")) {
            (Some(access_key_id), Some(secret_access_key)) => Some(StaticCredentials {
                access_key_id,
                secret_access_key,
            }),
            (None, None) => None,
            _ => bail!("AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY must be set together"),
        };

        let bucket_name = match var("S3_BUCKET_NAME") {
            Some(bucket) => bucket,
            None if is_development => DEVELOPMENT_BUCKET.to_string(),
            None => bail!("S3_BUCKET_NAME environment variable is not set"),
        };

        let endpoint_url = var("S3_ENDPOINT_URL")
            .or_else(|| environment.default_endpoint_url().map(ToString::to_string));

        let port = var("PORT")
            .map(|port| port.parse::<u16>().with_context(|| format!("Invalid PORT: {port}")))
            .transpose()?
            .unwrap_or(DEFAULT_PORT);

        // The secret is compared byte-for-byte, so it is not trimmed
        let api_key = lookup("API_KEY").filter(|key| !key.is_empty());

        let require_api_key = var("REQUIRE_API_KEY")
            .map(|value| parse_bool(&value).context("Invalid REQUIRE_API_KEY"))
            .transpose()?
            .unwrap_or(true);

        let url_ttl_secs = var("PRESIGNED_URL_EXPIRY_SECS")
            .map(|value| {
                value
                    .parse::<u64>()
                    .with_context(|| format!("Invalid PRESIGNED_URL_EXPIRY_SECS: {value}"))
            })
            .transpose()?
            .unwrap_or(DEFAULT_URL_TTL_SECS);
        ensure!(
            (1..=MAX_URL_TTL_SECS).contains(&url_ttl_secs),
            "PRESIGNED_URL_EXPIRY_SECS must be between 1 and {MAX_URL_TTL_SECS}, got {url_ttl_secs}"
        );

        Ok(Self {
            environment,
            region,
            credentials,
            bucket_name,
            endpoint_url,
            port,
            api_key,
            require_api_key,
            url_ttl_secs,
        })
    }

    /// AWS configuration for the configured region, credentials and endpoint
    pub async fn aws_config(&self) -> aws_config::SdkConfig {
        let timeout_config = TimeoutConfig::builder()
            .operation_timeout(Duration::from_secs(30))
            .build();

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(self.region.clone()))
            .timeout_config(timeout_config);

        if let Some(credentials) = &self.credentials {
            loader = loader.credentials_provider(Credentials::new(
                credentials.access_key_id.clone(),
                credentials.secret_access_key.clone(),
                None,
                None,
                "service-config",
            ));
        }

        if let Some(endpoint_url) = &self.endpoint_url {
            loader = loader.endpoint_url(endpoint_url);
        }

        loader.load().await
    }

    /// AWS S3 service configuration
    pub async fn s3_client_config(&self) -> aws_sdk_s3::Config {
        let aws_config = self.aws_config().await;
        let s3_config: aws_sdk_s3::Config = (&aws_config).into();
        let mut builder = s3_config.to_builder();

        // Custom endpoints (LocalStack, MinIO) don't resolve virtual-hosted bucket names
        if self.endpoint_url.is_some() {
            builder.set_force_path_style(Some(true));
        }

        builder.build()
    }
}

fn parse_bool(value: &str) -> anyhow::Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => bail!("expected a boolean, got {value}"),
    }
}

//! Deployment stage selection

use anyhow::bail;
use tracing::Level;

/// LocalStack edge endpoint used during local development
const LOCALSTACK_ENDPOINT_URL: &str = "http://localhost:4566";

/// Application environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Production environment
    Production,
    /// Staging environment
    Staging,
    /// Development environment (uses `LocalStack`)
    Development,
}

impl Environment {
    /// Parses the `APP_ENV` value, defaulting to development when unset
    ///
    /// # Errors
    ///
    /// Returns an error if the value names an unknown environment
    pub fn from_name(name: Option<&str>) -> anyhow::Result<Self> {
        let name = name.unwrap_or("development").trim().to_lowercase();

        match name.as_str() {
            "production" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" => Ok(Self::Development),
            _ => bail!("Invalid environment: {name}"),
        }
    }

    /// Whether to serve the OpenAPI document
    #[must_use]
    pub const fn show_api_docs(self) -> bool {
        matches!(self, Self::Development | Self::Staging)
    }

    /// Whether logs should be emitted as JSON
    #[must_use]
    pub const fn json_logs(self) -> bool {
        matches!(self, Self::Production | Self::Staging)
    }

    /// S3 endpoint used when no explicit override is configured
    #[must_use]
    pub const fn default_endpoint_url(self) -> Option<&'static str> {
        match self {
            Self::Production | Self::Staging => None,
            Self::Development => Some(LOCALSTACK_ENDPOINT_URL),
        }
    }

    /// Log level used when `RUST_LOG` is not set
    #[must_use]
    pub const fn default_log_level(self) -> Level {
        match self {
            Self::Production | Self::Staging => Level::INFO,
            Self::Development => Level::DEBUG,
        }
    }
}

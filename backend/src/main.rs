use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use tracing_subscriber::{filter::LevelFilter, fmt, EnvFilter};

use upload_issuer::{
    server,
    types::ServiceConfig,
    uploads::{S3UploadSigner, UploadIssuer},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ServiceConfig::from_env()?;

    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(config.environment.default_log_level()).into())
        .from_env_lossy();

    // JSON logs for deployed environments, human-readable locally
    if config.environment.json_logs() {
        fmt().json().with_env_filter(env_filter).init();
    } else {
        fmt().with_env_filter(env_filter).init();
    }

    tracing::debug!(?config, "Loaded configuration");

    let s3_client = Arc::new(S3Client::from_conf(config.s3_client_config().await));
    let issuer = Arc::new(UploadIssuer::new(
        Arc::new(S3UploadSigner::new(s3_client)),
        config.bucket_name.clone(),
        config.url_ttl_secs,
    ));

    server::start(config, issuer).await
}

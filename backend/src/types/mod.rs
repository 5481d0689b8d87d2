mod config;
mod environment;
mod error;
mod extractors;

pub use config::{ServiceConfig, StaticCredentials, DEFAULT_PORT, DEFAULT_URL_TTL_SECS};
pub use environment::Environment;
pub use error::{ApiErrorResponse, AppError};
pub use extractors::ApiJson;

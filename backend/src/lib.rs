//! Upload URL issuer service
//!
//! Hands out short-lived presigned S3 PUT URLs under randomly prefixed object keys,
//! optionally gated by a shared API key.

#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs
)]

/// Request middleware
pub mod middleware;

/// HTTP routes
pub mod routes;

/// Server bootstrap
pub mod server;

/// Configuration, errors and extractors
pub mod types;

/// Object key generation and URL signing
pub mod uploads;

/// API key gate
pub mod api_key;

pub use api_key::{api_key_middleware, ApiKeyGate, API_KEY_HEADER};

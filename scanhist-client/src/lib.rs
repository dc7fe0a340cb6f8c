//! HTTP client for the paged `GET /api/scans` endpoint.

mod api;
mod config;
mod error;

pub use api::HttpPageSource;
pub use config::{ClientConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT};
pub use error::ClientError;

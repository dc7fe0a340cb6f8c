//! `PageSource` backed by the scan history REST API.

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use scanhist_core::{FetchError, PageSource};
use scanhist_types::{Cursor, Page, ScanRecord};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::ClientError;

/// Error body returned by the API on non-success statuses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Fetches pages from `GET {base}/api/scans[?cursor=<token>]`.
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    client: reqwest::Client,
    endpoint: Url,
    page_size: Option<usize>,
}

impl HttpPageSource {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let endpoint = config.scans_endpoint()?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("scanhist/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            endpoint,
            page_size: config.page_size,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    type Item = ScanRecord;

    async fn fetch_page(&self, cursor: Option<&Cursor>) -> Result<Page<ScanRecord>, FetchError> {
        let mut req = self.client.get(self.endpoint.clone());
        if let Some(cursor) = cursor {
            req = req.query(&[("cursor", cursor.as_str())]);
        }
        if let Some(limit) = self.page_size {
            req = req.query(&[("limit", limit)]);
        }

        let resp = req.send().await.map_err(|e| {
            warn!(error = %e, endpoint = %self.endpoint, "scan list request failed");
            FetchError::new(e.to_string())
        })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_else(|e| {
                debug!(error = %e, "could not read error body");
                String::new()
            });
            warn!(status = %status, "scan list API returned error");
            return Err(FetchError::new(error_message(status, &body)));
        }

        let page: Page<ScanRecord> = resp.json().await.map_err(|e| {
            warn!(error = %e, "scan list response parse failed");
            FetchError::new(format!("malformed response: {e}"))
        })?;

        debug!(
            items = page.items.len(),
            has_next = page.has_next(),
            "scan list page received"
        );
        Ok(page)
    }
}

/// Human-readable message for a non-success response: the body's `message`
/// (or `error`) field when the server sent one, else the status line.
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.message.or(b.error))
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("request failed with status {status}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_body_message() {
        let body = r#"{"error":"not_found","message":"scan store unavailable"}"#;
        assert_eq!(
            error_message(StatusCode::SERVICE_UNAVAILABLE, body),
            "scan store unavailable"
        );
    }

    #[test]
    fn error_message_falls_back_to_error_key() {
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, r#"{"error":"bad cursor"}"#),
            "bad cursor"
        );
    }

    #[test]
    fn error_message_falls_back_to_status() {
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, "<html>upstream down</html>"),
            "request failed with status 502 Bad Gateway"
        );
        // An unreadable body arrives here as an empty string.
        assert_eq!(
            error_message(StatusCode::SERVICE_UNAVAILABLE, ""),
            "request failed with status 503 Service Unavailable"
        );
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, r#"{"message":"  "}"#),
            "request failed with status 500 Internal Server Error"
        );
    }
}

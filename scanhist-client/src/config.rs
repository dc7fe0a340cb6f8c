use std::time::Duration;

use reqwest::Url;

use crate::error::ClientError;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8080";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for [`HttpPageSource`](crate::HttpPageSource).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server root; `/api/scans` is resolved against it.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Page size hint sent as `limit`. `None` leaves it to the server.
    pub page_size: Option<usize>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.into(),
            timeout: DEFAULT_TIMEOUT,
            page_size: None,
        }
    }
}

impl ClientConfig {
    /// Absolute URL of the scan listing endpoint.
    pub fn scans_endpoint(&self) -> Result<Url, ClientError> {
        let invalid = |reason: String| ClientError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason,
        };

        let mut base = Url::parse(self.base_url.trim()).map_err(|e| invalid(e.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", base.scheme())));
        }
        if base.cannot_be_a_base() {
            return Err(invalid("not a base URL".into()));
        }
        // Keep any path prefix: "http://host/prefix" -> "http://host/prefix/api/scans"
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.set_query(None);
        base.join("api/scans").map_err(|e| invalid(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(base: &str) -> Result<String, ClientError> {
        ClientConfig {
            base_url: base.into(),
            ..ClientConfig::default()
        }
        .scans_endpoint()
        .map(|u| u.to_string())
    }

    #[test]
    fn default_endpoint() {
        assert_eq!(
            ClientConfig::default().scans_endpoint().unwrap().as_str(),
            "http://127.0.0.1:8080/api/scans"
        );
    }

    #[test]
    fn keeps_path_prefix() {
        assert_eq!(
            endpoint("https://scanner.example.com/backend").unwrap(),
            "https://scanner.example.com/backend/api/scans"
        );
        assert_eq!(
            endpoint("https://scanner.example.com/backend/").unwrap(),
            "https://scanner.example.com/backend/api/scans"
        );
    }

    #[test]
    fn rejects_bad_urls() {
        let err = endpoint("not a url").unwrap_err();
        assert!(err.to_string().contains("invalid API base URL"), "got: {err}");

        let err = endpoint("ftp://files.example.com").unwrap_err();
        assert!(err.to_string().contains("unsupported scheme"), "got: {err}");
    }
}

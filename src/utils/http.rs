//! HTTP utilities for talking to the search API

use crate::error::{FetchError, FetchResult};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

const DEFAULT_TIMEOUT_MS: u64 = 15_000;

/// Thin wrapper around `reqwest::Client` that turns non-success responses
/// into [`FetchError::Http`] values carrying the status, the requested URL,
/// and the response body.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    default_timeout: Duration,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT_MS)
    }

    /// Create a new HTTP client with a custom timeout
    pub fn with_timeout(timeout_ms: u64) -> Self {
        Self {
            client: Client::builder()
                .user_agent(concat!("bizsearch/", env!("CARGO_PKG_VERSION")))
                .build()
                .expect("Failed to create HTTP client"),
            default_timeout: Duration::from_millis(timeout_ms),
        }
    }

    /// GET a URL with a bearer token and deserialize the JSON response.
    pub async fn get_json_bearer<T>(&self, url: &str, token: &str) -> FetchResult<T>
    where
        T: DeserializeOwned,
    {
        let response = self
            .client
            .get(url)
            .timeout(self.default_timeout)
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        self.handle_response_json(url, response).await
    }

    /// Handle an HTTP response and deserialize it as JSON
    async fn handle_response_json<T>(&self, url: &str, response: Response) -> FetchResult<T>
    where
        T: DeserializeOwned,
    {
        let status = response.status();

        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| FetchError::Parse(format!("Decoding response from {url} failed: {e}")))
        } else {
            let body = response.text().await.unwrap_or_default();

            Err(FetchError::Http {
                status: status.as_u16(),
                url: url.to_string(),
                body,
            })
        }
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a URL with query parameters, form-encoded (spaces become `+`).
pub fn build_url(base_url: &str, params: &[(&str, String)]) -> FetchResult<String> {
    let mut url = Url::parse(base_url)?;

    for (key, value) in params {
        url.query_pairs_mut().append_pair(key, value);
    }

    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_url_appends_params_in_order() {
        let url = build_url(
            "https://api.example.com/v3/businesses/search",
            &[("term", "tacos".to_string()), ("limit", "50".to_string())],
        )
        .unwrap();
        assert_eq!(
            url,
            "https://api.example.com/v3/businesses/search?term=tacos&limit=50"
        );
    }

    #[test]
    fn build_url_encodes_spaces_as_plus() {
        let url = build_url(
            "https://api.example.com/search",
            &[("location", "silver spring, md".to_string())],
        )
        .unwrap();
        assert!(url.contains("location=silver+spring%2C+md"));
    }

    #[test]
    fn build_url_rejects_relative_base() {
        assert!(build_url("/v3/businesses/search", &[]).is_err());
    }
}

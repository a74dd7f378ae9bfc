//! Client for the Yelp Fusion business-search endpoint

use crate::{
    error::{FetchError, FetchResult},
    types::{SearchPage, SearchQuery, API_HOST, PAGE_SIZE, SEARCH_PATH},
    utils::http::{build_url, HttpClient},
};

/// Connection settings for the search API
#[derive(Debug, Clone)]
pub struct FusionConfig {
    /// Bearer token for the Authorization header
    pub api_key: String,
    /// Host of the API, without the endpoint path
    pub base_url: String,
}

impl FusionConfig {
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            base_url: API_HOST.to_string(),
        }
    }

    pub fn validate(&self) -> FetchResult<()> {
        if self.api_key.is_empty() {
            return Err(FetchError::Config("An API key is required".to_string()));
        }
        Ok(())
    }
}

/// Client issuing authenticated GETs against the search endpoint, one call
/// per result page.
#[derive(Debug, Clone)]
pub struct FusionClient {
    config: FusionConfig,
    http_client: HttpClient,
}

impl FusionClient {
    /// Create a client for the production API host.
    pub fn new(api_key: &str) -> FetchResult<Self> {
        Self::with_config(FusionConfig::new(api_key))
    }

    /// Create a client with custom connection settings.
    pub fn with_config(config: FusionConfig) -> FetchResult<Self> {
        config.validate()?;

        Ok(Self {
            config,
            http_client: HttpClient::new(),
        })
    }

    /// Point the client at a different host (for testing against a mock
    /// server or a proxy).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.config.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Build the endpoint URL with the per-page query parameters.
    fn build_search_url(&self, query: &SearchQuery) -> FetchResult<String> {
        let base = format!("{}{}", self.config.base_url, SEARCH_PATH);
        let params = [
            ("term", query.term.clone()),
            ("location", query.location.clone()),
            ("limit", PAGE_SIZE.to_string()),
            ("radius", query.radius.to_string()),
            ("offset", query.offset.to_string()),
        ];

        build_url(&base, &params)
    }

    /// Fetch one page of results. Any non-success status or transport
    /// failure is fatal and surfaces with the status, URL, and body intact.
    pub async fn search(&self, query: &SearchQuery) -> FetchResult<SearchPage> {
        let url = self.build_search_url(query)?;

        log::info!("Querying {url} ...");

        self.http_client
            .get_json_bearer(&url, &self.config.api_key)
            .await
    }
}

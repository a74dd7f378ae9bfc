//! Error types for the business-search fetcher

use thiserror::Error;

/// Result type alias for fetch operations
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Error types for querying the search API and persisting results
#[derive(Error, Debug, Clone)]
pub enum FetchError {
    /// The API answered with a non-success status. Fatal to the run.
    #[error("Encountered HTTP error {status} on {url}: {body}")]
    Http {
        status: u16,
        url: String,
        body: String,
    },

    /// The request never produced a response (DNS, TLS, timeout, ...)
    #[error("Transport error on {url}: {message}")]
    Transport { url: String, message: String },

    /// Invalid input parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Parsing error (JSON body, config file)
    #[error("Parsing error: {0}")]
    Parse(String),

    /// CSV serialization error
    #[error("CSV error: {0}")]
    Csv(String),

    /// File system error
    #[error("IO error: {0}")]
    Io(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(error: serde_json::Error) -> Self {
        FetchError::Parse(format!("JSON parsing failed: {error}"))
    }
}

impl From<url::ParseError> for FetchError {
    fn from(error: url::ParseError) -> Self {
        FetchError::InvalidInput(format!("Invalid URL: {error}"))
    }
}

impl From<std::io::Error> for FetchError {
    fn from(error: std::io::Error) -> Self {
        FetchError::Io(error.to_string())
    }
}

impl From<csv::Error> for FetchError {
    fn from(error: csv::Error) -> Self {
        FetchError::Csv(error.to_string())
    }
}

impl From<toml::de::Error> for FetchError {
    fn from(error: toml::de::Error) -> Self {
        FetchError::Parse(format!("Config parsing failed: {error}"))
    }
}

//! Startup configuration: credentials file and batch list

use crate::error::{FetchError, FetchResult};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Application configuration, read once at process start.
///
/// ```toml
/// [creds]
/// api_key = "..."
///
/// [search]
/// search_term = "restaurants"
/// zip_code = "20910"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub creds: Creds,
    #[serde(default)]
    pub search: SearchDefaults,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Creds {
    pub api_key: String,
}

/// Optional fallback search parameters from the config file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchDefaults {
    pub search_term: Option<String>,
    pub zip_code: Option<String>,
}

impl AppConfig {
    /// Load and parse the config file.
    pub fn load<P: AsRef<Path>>(path: P) -> FetchResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            FetchError::Config(format!("Cannot read {}: {e}", path.display()))
        })?;
        let config: AppConfig = toml::from_str(&raw)?;

        if config.creds.api_key.is_empty() {
            return Err(FetchError::Config(format!(
                "{} has an empty creds.api_key",
                path.display()
            )));
        }

        Ok(config)
    }
}

/// Read a batch list of `term|location` pairs, one per line. The first line
/// is a header and is skipped; blank lines are ignored.
pub fn read_batch_pairs<P: AsRef<Path>>(path: P) -> FetchResult<Vec<(String, String)>> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .map_err(|e| FetchError::Config(format!("Cannot read {}: {e}", path.display())))?;

    let mut pairs = Vec::new();
    for (number, line) in raw.lines().enumerate().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match line.split_once('|') {
            Some((term, location)) => {
                pairs.push((term.trim().to_string(), location.trim().to_string()));
            }
            None => {
                return Err(FetchError::Parse(format!(
                    "{}:{}: expected `term|location`, got {line:?}",
                    path.display(),
                    number + 1
                )));
            }
        }
    }

    Ok(pairs)
}

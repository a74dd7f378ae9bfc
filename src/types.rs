//! Core types for the business-search fetcher: the per-page query, the wire
//! schema of the search endpoint, and the flattened CSV-ready row.

use crate::error::{FetchError, FetchResult};
use serde::{Deserialize, Serialize};

/// Default host of the search API.
pub const API_HOST: &str = "https://api.yelp.com";

/// Path of the business-search endpoint under [`API_HOST`].
pub const SEARCH_PATH: &str = "/v3/businesses/search";

/// Results per page; also the offset stride between pages.
pub const PAGE_SIZE: u32 = 50;

/// Practical pagination ceiling of the API. The endpoint stops serving
/// results past offset 1000, so more pages never yield data.
pub const MAX_PAGES: u32 = 20;

/// Largest search radius the API accepts, in meters.
pub const MAX_RADIUS_METERS: u32 = 40_000;

/// Rounded meters per statute mile, matching the hosted-function contract.
pub const METERS_PER_MILE: u32 = 1_609;

/// One page worth of search parameters. Immutable per request; a new offset
/// produces a new query via [`SearchQuery::with_offset`].
#[derive(Debug, Clone)]
pub struct SearchQuery {
    /// Search term, e.g. "restaurants"
    pub term: String,
    /// Free-form location, e.g. "silver spring, md" or a zip code
    pub location: String,
    /// Search radius in meters, at most [`MAX_RADIUS_METERS`]
    pub radius: u32,
    /// Zero-based offset into the full result set, a multiple of [`PAGE_SIZE`]
    pub offset: u32,
}

impl SearchQuery {
    /// Create a query at offset 0, validating the radius bound.
    pub fn new(term: &str, location: &str, radius: u32) -> FetchResult<Self> {
        if term.is_empty() {
            return Err(FetchError::InvalidInput(
                "A search term is required".to_string(),
            ));
        }
        if location.is_empty() {
            return Err(FetchError::InvalidInput(
                "A search location is required".to_string(),
            ));
        }
        if radius > MAX_RADIUS_METERS {
            return Err(FetchError::InvalidInput(format!(
                "Radius {radius} m exceeds the API maximum of {MAX_RADIUS_METERS} m"
            )));
        }

        Ok(Self {
            term: term.to_string(),
            location: location.to_string(),
            radius,
            offset: 0,
        })
    }

    /// Derive the query for another page of the same search.
    pub fn with_offset(&self, offset: u32) -> Self {
        Self {
            offset,
            ..self.clone()
        }
    }
}

/// One business category label as returned by the API.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Category {
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// Nested location object of a business record. Every field is optional on
/// the wire; `null` and absent both collapse to `None`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BusinessLocation {
    #[serde(default)]
    pub address1: Option<String>,
    #[serde(default)]
    pub address2: Option<String>,
    #[serde(default)]
    pub address3: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub display_address: Vec<String>,
}

impl BusinessLocation {
    /// The full display address as a single line, space-joined from the
    /// `display_address` parts.
    pub fn full_address(&self) -> String {
        self.display_address.join(" ")
    }
}

/// One raw business record from the search response.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Business {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub location: BusinessLocation,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub review_count: Option<u64>,
    #[serde(default)]
    pub display_phone: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Decoded body of one search call. Transient; discarded after flattening.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchPage {
    /// Total matches across all pages, not just this one
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub businesses: Vec<Business>,
}

/// Column header of the CSV output, in the exact order of
/// [`FlatRow::fields`].
pub const CSV_COLUMNS: [&str; 11] = [
    "name",
    "categories",
    "address 1",
    "address 2",
    "city",
    "state",
    "zip code",
    "phone #",
    "rating",
    "# of reviews",
    "url",
];

/// The flattened, CSV-ready representation of one business record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatRow {
    pub name: String,
    /// Category titles joined with ", "
    pub categories: String,
    pub address1: String,
    pub address2: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone: String,
    pub rating: f64,
    pub review_count: u64,
    pub url: String,
}

impl FlatRow {
    /// The row as ordered cells matching [`CSV_COLUMNS`].
    pub fn fields(&self) -> [String; 11] {
        [
            self.name.clone(),
            self.categories.clone(),
            self.address1.clone(),
            self.address2.clone(),
            self.city.clone(),
            self.state.clone(),
            self.zip_code.clone(),
            self.phone.clone(),
            self.rating.to_string(),
            self.review_count.to_string(),
            self.url.clone(),
        ]
    }
}

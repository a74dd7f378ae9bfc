//! # bizsearch
//!
//! Client and CSV exporter for the Yelp Fusion business-search API.
//!
//! A run is one linear flow: probe the endpoint for the result total, walk
//! every page at offsets 0, 50, 100, ... (at most [`types::MAX_PAGES`]
//! pages), flatten each raw business record into a fixed 11-field row, and
//! hand the rows to a sink. The CLI streams rows into a dated CSV file; the
//! hosted-function entry collects them in memory and returns them wrapped
//! in a status envelope.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bizsearch::search_to_rows;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let rows = search_to_rows("YOUR_API_KEY", "restaurants", "silver spring, md", 10_000).await?;
//!
//!     for row in rows {
//!         println!("{}: {}", row.name, row.url);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod event;
pub mod flatten;
pub mod pagination;
pub mod sink;
pub mod types;
pub mod utils;

// Re-export common types
pub use client::{FusionClient, FusionConfig};
pub use error::{FetchError, FetchResult as Result};
pub use pagination::{pages_for_total, Paginator};
pub use sink::{CsvFileSink, MemorySink, RowSink};
pub use types::{Business, FlatRow, SearchPage, SearchQuery};

/// Run a complete paginated search and return the flattened rows in page
/// order.
///
/// Convenience wrapper over [`FusionClient`], [`Paginator`], and
/// [`MemorySink`] for callers that just want the data.
pub async fn search_to_rows(
    api_key: &str,
    term: &str,
    location: &str,
    radius: u32,
) -> Result<Vec<FlatRow>> {
    let client = FusionClient::new(api_key)?;
    let query = SearchQuery::new(term, location, radius)?;

    let mut sink = MemorySink::new();
    Paginator::new(&client).run(&query, &mut sink).await?;

    Ok(sink.into_rows())
}

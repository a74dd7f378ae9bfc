//! Pagination across the full result set
//!
//! The endpoint serves at most [`PAGE_SIZE`] results per call and stops
//! serving past [`MAX_PAGES`] pages, so a run is: one probe for the total,
//! then one fetch per page at offsets 0, 50, 100, ...

use crate::{
    client::FusionClient,
    error::FetchResult,
    flatten::flatten,
    sink::RowSink,
    types::{FlatRow, SearchPage, SearchQuery, MAX_PAGES, PAGE_SIZE},
};
use futures::{stream, StreamExt, TryStreamExt};

/// Number of pages needed for `total` results, capped at [`MAX_PAGES`].
/// Zero results mean zero pages.
pub fn pages_for_total(total: u64) -> u32 {
    capped_pages(total, MAX_PAGES)
}

fn capped_pages(total: u64, cap: u32) -> u32 {
    let pages = total.div_ceil(PAGE_SIZE as u64);
    pages.min(cap as u64) as u32
}

/// Drives the client across every page of one search.
#[derive(Debug)]
pub struct Paginator<'a> {
    client: &'a FusionClient,
    max_pages: u32,
}

impl<'a> Paginator<'a> {
    pub fn new(client: &'a FusionClient) -> Self {
        Self {
            client,
            max_pages: MAX_PAGES,
        }
    }

    /// Override the page ceiling for this run.
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Probe the API once at offset 0 and compute how many pages exist.
    pub async fn page_count(&self, query: &SearchQuery) -> FetchResult<u32> {
        let page = self.client.search(&query.with_offset(0)).await?;
        Ok(capped_pages(page.total, self.max_pages))
    }

    /// Fetch every page in sequence, flatten each, and hand the rows to the
    /// sink. An empty page is logged and skipped; the loop continues.
    /// Returns the number of rows written.
    pub async fn run<S: RowSink>(&self, query: &SearchQuery, sink: &mut S) -> FetchResult<u64> {
        let page_count = self.page_count(query).await?;
        let mut written = 0u64;

        for index in 0..page_count {
            let offset = index * PAGE_SIZE;
            let page = self.client.search(&query.with_offset(offset)).await?;

            if page.businesses.is_empty() {
                log::warn!("No businesses for {} in {} found.", query.term, query.location);
                continue;
            }

            let rows = flatten(&page.businesses);
            written += rows.len() as u64;
            sink.write_rows(&rows, offset == 0)?;
        }

        Ok(written)
    }

    /// Fetch up to `concurrency` pages in flight at once and return the
    /// flattened rows. `buffered` yields pages in offset order, so the
    /// output matches what the sequential path produces.
    pub async fn collect_concurrent(
        &self,
        query: &SearchQuery,
        concurrency: usize,
    ) -> FetchResult<Vec<FlatRow>> {
        let page_count = self.page_count(query).await?;

        let pages: Vec<SearchPage> = stream::iter(0..page_count)
            .map(|index| {
                let client = self.client;
                let page_query = query.with_offset(index * PAGE_SIZE);
                async move { client.search(&page_query).await }
            })
            .buffered(concurrency.max(1))
            .try_collect()
            .await?;

        let mut rows = Vec::new();
        for page in &pages {
            if page.businesses.is_empty() {
                log::warn!("No businesses for {} in {} found.", query.term, query.location);
                continue;
            }
            rows.extend(flatten(&page.businesses));
        }

        Ok(rows)
    }
}

//! Hosted-function entry: event payload in, status envelope out
//!
//! Mirrors the wire contract of the original deployment: the event carries
//! the search inputs plus the API key, the radius is given in miles, and the
//! response wraps the flattened rows in `{"statusCode": 200, "body": [...]}`.

use crate::{
    client::FusionClient,
    error::FetchResult,
    pagination::Paginator,
    sink::MemorySink,
    types::{FlatRow, SearchQuery, MAX_RADIUS_METERS, METERS_PER_MILE},
};
use serde::{Deserialize, Serialize};

/// Incoming event payload.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchEvent {
    /// Search term
    pub query: String,
    /// Zip code or free-form location
    pub zip: String,
    /// Bearer token for the API
    pub yelp_key: String,
    /// Search radius in miles
    pub radius: u32,
}

/// Response envelope returned to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct SearchEventResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: Vec<FlatRow>,
}

/// Convert a radius in miles to meters, capped at the API maximum.
pub fn radius_meters_from_miles(miles: u32) -> u32 {
    miles.saturating_mul(METERS_PER_MILE).min(MAX_RADIUS_METERS)
}

/// Run the full paginated search for one event and wrap the rows in a
/// status envelope. Errors propagate to the caller unhandled, matching the
/// hosted-function contract.
pub async fn handle_search_event(event: SearchEvent) -> FetchResult<SearchEventResponse> {
    handle_search_event_with(event, None).await
}

/// Same as [`handle_search_event`] but against an alternate API host
/// (used by tests).
pub async fn handle_search_event_with(
    event: SearchEvent,
    base_url: Option<&str>,
) -> FetchResult<SearchEventResponse> {
    let mut client = FusionClient::new(&event.yelp_key)?;
    if let Some(base_url) = base_url {
        client = client.with_base_url(base_url);
    }

    let radius = radius_meters_from_miles(event.radius);
    let query = SearchQuery::new(&event.query, &event.zip, radius)?;

    let mut sink = MemorySink::new();
    let paginator = Paginator::new(&client);
    let written = paginator.run(&query, &mut sink).await?;

    log::info!(
        "Collected {written} rows for {} in {}",
        event.query,
        event.zip
    );

    Ok(SearchEventResponse {
        status_code: 200,
        body: sink.into_rows(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn miles_convert_and_cap_at_forty_kilometers() {
        assert_eq!(radius_meters_from_miles(0), 0);
        assert_eq!(radius_meters_from_miles(1), 1_609);
        assert_eq!(radius_meters_from_miles(10), 16_090);
        assert_eq!(radius_meters_from_miles(24), 38_616);
        assert_eq!(radius_meters_from_miles(25), 40_000);
        assert_eq!(radius_meters_from_miles(500), 40_000);
    }

    #[test]
    fn event_deserializes_from_raw_payload() {
        let event: SearchEvent = serde_json::from_str(
            r#"{"query": "tacos", "zip": "78701", "yelp_key": "secret", "radius": 5}"#,
        )
        .unwrap();
        assert_eq!(event.query, "tacos");
        assert_eq!(event.zip, "78701");
        assert_eq!(event.radius, 5);
    }

    #[test]
    fn response_envelope_uses_camel_case_status() {
        let response = SearchEventResponse {
            status_code: 200,
            body: vec![],
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["statusCode"], 200);
        assert!(json["body"].as_array().unwrap().is_empty());
    }
}

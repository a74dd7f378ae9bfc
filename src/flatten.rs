//! Flattening of raw business records into fixed 11-field rows

use crate::types::{Business, FlatRow};

/// Flatten raw business records into CSV-ready rows, preserving input order.
///
/// A record missing any field never fails the run: absent values become
/// empty strings (or zero for the numeric columns).
pub fn flatten(businesses: &[Business]) -> Vec<FlatRow> {
    businesses.iter().map(flatten_one).collect()
}

fn flatten_one(business: &Business) -> FlatRow {
    FlatRow {
        name: business.name.clone().unwrap_or_default(),
        categories: join_category_titles(business),
        address1: business.location.address1.clone().unwrap_or_default(),
        address2: business.location.address2.clone().unwrap_or_default(),
        city: business.location.city.clone().unwrap_or_default(),
        state: business.location.state.clone().unwrap_or_default(),
        zip_code: business.location.zip_code.clone().unwrap_or_default(),
        phone: business.display_phone.clone().unwrap_or_default(),
        rating: business.rating.unwrap_or_default(),
        review_count: business.review_count.unwrap_or_default(),
        url: business.url.clone().unwrap_or_default(),
    }
}

fn join_category_titles(business: &Business) -> String {
    business
        .categories
        .iter()
        .filter_map(|category| category.title.as_deref())
        .collect::<Vec<_>>()
        .join(", ")
}

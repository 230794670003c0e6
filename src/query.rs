//! Read-only lookups over a [`RecordStore`].

use std::cmp::Reverse;

use log::debug;

use crate::data::filter::{filtered_indices, SearchFilter};
use crate::data::model::{BookRecord, RecordStore};
use crate::error::{CatalogError, Result};

/// Full listing in store order.
pub fn all(store: &RecordStore) -> Vec<&BookRecord> {
    store.records().iter().collect()
}

/// The record at `index` in load order.
pub fn get_by_id(store: &RecordStore, index: usize) -> Result<&BookRecord> {
    store
        .get(index)
        .ok_or_else(|| CatalogError::NotFound(format!("no book with id {index}")))
}

/// Case-insensitive substring search on title and category.
///
/// With no active filter the full listing is returned. With at least one
/// active filter an empty result is `NotFound`.
pub fn search<'a>(store: &'a RecordStore, filter: &SearchFilter) -> Result<Vec<&'a BookRecord>> {
    if !filter.is_active() {
        return Ok(all(store));
    }

    let hits: Vec<&BookRecord> = filtered_indices(store, filter)
        .into_iter()
        .filter_map(|i| store.get(i))
        .collect();
    debug!("search {filter:?} matched {} records", hits.len());

    if hits.is_empty() {
        return Err(CatalogError::NotFound(
            "no books match the given filters".to_string(),
        ));
    }
    Ok(hits)
}

/// Distinct categories in ordinal (byte-wise, case-sensitive) order.
pub fn list_categories(store: &RecordStore) -> Vec<&str> {
    store.categories().iter().map(String::as_str).collect()
}

/// Parse a caller-supplied price bound, falling back to `default` when absent.
pub fn parse_price_bound(raw: Option<&str>, default: f64) -> Result<f64> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| !v.is_nan())
        .ok_or_else(|| CatalogError::InvalidArgument(format!("price bound '{raw}' is not numeric")))
}

/// Records whose normalized price lies in `[min, max]`.
///
/// Records with an unparsable price are never returned. `min > max` simply
/// matches nothing.
pub fn price_range(store: &RecordStore, min: f64, max: f64) -> Vec<&BookRecord> {
    store
        .price_valid()
        .filter(|(_, price)| (min..=max).contains(price))
        .map(|(n, _)| n.record)
        .collect()
}

/// Up to `n` records ordered by rating, best first.
///
/// Unknown ratings sort after every known one; equal ratings keep store order.
pub fn top_rated(store: &RecordStore, n: usize) -> Vec<&BookRecord> {
    let mut ranked: Vec<_> = store.normalized().collect();
    // `None < Some(_)`, so reversing puts unknown ratings last.
    ranked.sort_by_key(|r| Reverse(r.rating_value));
    ranked.into_iter().take(n).map(|r| r.record).collect()
}

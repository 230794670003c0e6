//! Aggregates computed over the price-valid part of a [`RecordStore`].
//!
//! A record is price-valid when its price text normalizes to a number.
//! Every average reported here is rounded half away from zero to two
//! decimals.

use std::collections::BTreeMap;

use log::debug;
use serde::Serialize;

use crate::data::model::RecordStore;
use crate::data::normalize::round2;
use crate::error::{CatalogError, Result};

/// Catalog-wide figures. `total_books` counts price-valid records only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub total_books: usize,
    pub average_price: f64,
    pub available: usize,
    pub unavailable: usize,
}

/// Count and mean price of one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStats {
    /// `None` groups the records that have no category.
    pub category: Option<String>,
    pub total_books: usize,
    #[serde(rename = "avg_price")]
    pub average_price: f64,
}

/// Numeric projection of a record for model training.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRow {
    pub price_value: f64,
    #[serde(rename = "rating_num")]
    pub rating_value: Option<u8>,
    pub availability: String,
    pub category: Option<String>,
}

/// Running sum for a mean.
#[derive(Debug, Default, Clone, Copy)]
struct Accumulator {
    count: usize,
    sum: f64,
}

impl Accumulator {
    fn push(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
    }

    fn mean(&self) -> f64 {
        round2(self.sum / self.count as f64)
    }
}

pub fn overview(store: &RecordStore) -> Result<Overview> {
    let mut prices = Accumulator::default();
    let mut available = 0;

    for (n, price) in store.price_valid() {
        prices.push(price);
        if n.record.in_stock() {
            available += 1;
        }
    }

    if prices.count == 0 {
        return Err(CatalogError::EmptyDataset);
    }
    debug!(
        "overview over {} of {} records",
        prices.count,
        store.len()
    );

    Ok(Overview {
        total_books: prices.count,
        average_price: prices.mean(),
        available,
        unavailable: prices.count - available,
    })
}

/// Per-category counts and mean prices, in ordinal category order with the
/// uncategorised group (if any) first.
pub fn by_category(store: &RecordStore) -> Vec<CategoryStats> {
    let mut groups: BTreeMap<Option<&str>, Accumulator> = BTreeMap::new();
    for (n, price) in store.price_valid() {
        groups
            .entry(n.record.category.as_deref())
            .or_default()
            .push(price);
    }

    groups
        .into_iter()
        .map(|(category, acc)| CategoryStats {
            category: category.map(str::to_string),
            total_books: acc.count,
            average_price: acc.mean(),
        })
        .collect()
}

/// Price-valid records projected to model features. A missing rating is
/// passed through, not filtered.
pub fn ml_features(store: &RecordStore) -> Vec<FeatureRow> {
    store
        .price_valid()
        .map(|(n, price)| FeatureRow {
            price_value: price,
            rating_value: n.rating_value,
            availability: n.record.availability.clone(),
            category: n.record.category.clone(),
        })
        .collect()
}

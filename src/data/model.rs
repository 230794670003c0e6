use std::collections::BTreeSet;
use std::path::Path;

use serde::Serialize;

use super::loader;
use super::normalize::{normalize_price, normalize_rating};
use crate::error::LoadError;

/// Column names of the dataset source, in the order the crawler writes them.
pub const COLUMNS: [&str; 6] = ["title", "price", "availability", "rating", "category", "image"];

// ---------------------------------------------------------------------------
// BookRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single catalog entry, exactly as it appeared in the source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookRecord {
    pub title: String,
    /// Raw price text, kept verbatim for display (may read `"Â£51.77"`).
    pub price: String,
    pub availability: String,
    /// Rating word, `"One"` to `"Five"`.
    pub rating: String,
    /// `None` when the source cell was blank or null.
    pub category: Option<String>,
    pub image: String,
}

impl BookRecord {
    /// Whether the availability text advertises stock.
    pub fn in_stock(&self) -> bool {
        self.availability.contains("In stock")
    }
}

// ---------------------------------------------------------------------------
// NormalizedRecord – per-query numeric view of a record
// ---------------------------------------------------------------------------

/// A record paired with its normalized price and rating. Built on demand,
/// never stored.
#[derive(Debug, Clone, Copy)]
pub struct NormalizedRecord<'a> {
    /// Position in the store, which is also the record's id.
    pub index: usize,
    pub record: &'a BookRecord,
    pub price_value: Option<f64>,
    pub rating_value: Option<u8>,
}

impl<'a> NormalizedRecord<'a> {
    fn new(index: usize, record: &'a BookRecord) -> Self {
        NormalizedRecord {
            index,
            record,
            price_value: normalize_price(&record.price),
            rating_value: normalize_rating(&record.rating),
        }
    }
}

// ---------------------------------------------------------------------------
// RecordStore – the complete loaded catalog
// ---------------------------------------------------------------------------

/// The loaded catalog, immutable after construction.
///
/// Position is identity: `get(i)` is the i-th record in load order.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<BookRecord>,
    /// Sorted set of distinct, present category strings.
    categories: BTreeSet<String>,
}

impl RecordStore {
    /// Build the derived indices from loaded records.
    pub fn from_records(records: Vec<BookRecord>) -> Self {
        let categories = records
            .iter()
            .filter_map(|r| r.category.clone())
            .collect();
        RecordStore {
            records,
            categories,
        }
    }

    /// Load a dataset file and build a store from it.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        loader::load_file(path).map(Self::from_records)
    }

    pub fn records(&self) -> &[BookRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&BookRecord> {
        self.records.get(index)
    }

    pub fn categories(&self) -> &BTreeSet<String> {
        &self.categories
    }

    /// Every record with its normalized fields, in store order.
    pub fn normalized(&self) -> impl Iterator<Item = NormalizedRecord<'_>> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, r)| NormalizedRecord::new(i, r))
    }

    /// Records whose price normalizes, in store order.
    pub fn price_valid(&self) -> impl Iterator<Item = (NormalizedRecord<'_>, f64)> {
        self.normalized()
            .filter_map(|n| n.price_value.map(|price| (n, price)))
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

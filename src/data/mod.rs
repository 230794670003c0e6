/// Data layer: record types, loading, normalization and filtering.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<BookRecord>
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ RecordStore  │  records in load order, category index
///   └─────────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ normalize │  price text → f64, rating word → 1..=5
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  title / category predicates → matching indices
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;

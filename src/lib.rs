//! In-memory book catalog: load a crawled dataset once, then answer lookups
//! and aggregate queries over it.

pub mod config;
pub mod data;
pub mod error;
pub mod query;
pub mod state;
pub mod stats;

pub use data::filter::SearchFilter;
pub use data::model::{BookRecord, RecordStore};
pub use error::{CatalogError, LoadError, Result};
pub use state::CatalogState;

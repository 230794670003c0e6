use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn a dataset source into records. Always fatal: no partial
/// store is ever built.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("header mismatch: expected columns [{expected}], found [{found}]")]
    SchemaMismatch { expected: String, found: String },

    /// `row` is the 1-based file line for delimited sources and the
    /// 0-based array index for JSON.
    #[error("row {row}: {message}")]
    Malformed { row: usize, message: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Dataset has no price-valid records")]
    EmptyDataset,
}

pub type Result<T> = std::result::Result<T, CatalogError>;

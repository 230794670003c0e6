use std::path::PathBuf;

/// Environment variable naming the dataset file.
pub const DATA_PATH_ENV: &str = "BOOKS_DATA_PATH";

/// Dataset location when neither a flag nor the environment names one.
pub const DEFAULT_DATA_PATH: &str = "data/books.csv";

/// Default lower bound for price-range queries.
pub const DEFAULT_MIN_PRICE: f64 = 0.0;

/// Default upper bound for price-range queries.
pub const DEFAULT_MAX_PRICE: f64 = 1000.0;

/// Default length of the top-rated listing.
pub const DEFAULT_TOP_RATED: usize = 10;

/// Runtime settings for the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_path: PathBuf,
}

impl Config {
    /// Resolve settings: explicit path, then `BOOKS_DATA_PATH`, then the default.
    pub fn resolve(data_path: Option<PathBuf>) -> Self {
        Self::resolve_with(data_path, std::env::var_os(DATA_PATH_ENV).map(PathBuf::from))
    }

    fn resolve_with(explicit: Option<PathBuf>, from_env: Option<PathBuf>) -> Self {
        let data_path = explicit
            .or(from_env)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));
        Config { data_path }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::resolve_with(None, None)
    }
}

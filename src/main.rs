use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;

use book_catalog::config::{self, Config};
use book_catalog::{query, stats, CatalogState, SearchFilter};

/// Query a crawled book catalog
#[derive(Parser)]
#[command(name = "book-catalog")]
#[command(version)]
#[command(about = "Query and aggregate a crawled book catalog")]
struct Cli {
    /// Dataset file (.csv, .tsv, .json or .parquet); defaults to $BOOKS_DATA_PATH, then data/books.csv
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report whether the catalog loads, and its size
    Health,

    /// List every book
    Books,

    /// Show one book by position
    Book {
        /// Zero-based position in the dataset
        id: usize,
    },

    /// Search by title and/or category (case-insensitive substrings)
    Search {
        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        category: Option<String>,
    },

    /// List distinct categories
    Categories,

    /// Books priced within [min, max]
    PriceRange {
        #[arg(long, allow_negative_numbers = true)]
        min: Option<String>,

        #[arg(long, allow_negative_numbers = true)]
        max: Option<String>,
    },

    /// Highest rated books
    TopRated {
        #[arg(short = 'n', long, default_value_t = config::DEFAULT_TOP_RATED)]
        limit: usize,
    },

    /// Catalog-wide price and stock figures
    Overview,

    /// Count and mean price per category
    ByCategory,

    /// Numeric feature rows for model training
    MlFeatures,
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("serializing output")?;
    println!("{out}");
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let cfg = Config::resolve(cli.data);

    let state = CatalogState::load(&cfg.data_path)
        .with_context(|| format!("loading catalog from {}", cfg.data_path.display()))?;
    let store = state.snapshot();

    match cli.command {
        Commands::Health => print_json(&json!({
            "status": "online",
            "source": state.source().display().to_string(),
            "books": store.len(),
        })),
        Commands::Books => print_json(&query::all(&store)),
        Commands::Book { id } => print_json(query::get_by_id(&store, id)?),
        Commands::Search { title, category } => {
            let filter = SearchFilter { title, category };
            print_json(&query::search(&store, &filter)?)
        }
        Commands::Categories => print_json(&query::list_categories(&store)),
        Commands::PriceRange { min, max } => {
            let min = query::parse_price_bound(min.as_deref(), config::DEFAULT_MIN_PRICE)?;
            let max = query::parse_price_bound(max.as_deref(), config::DEFAULT_MAX_PRICE)?;
            print_json(&query::price_range(&store, min, max))
        }
        Commands::TopRated { limit } => print_json(&query::top_rated(&store, limit)),
        Commands::Overview => print_json(&stats::overview(&store)?),
        Commands::ByCategory => print_json(&stats::by_category(&store)),
        Commands::MlFeatures => print_json(&stats::ml_features(&store)),
    }
}

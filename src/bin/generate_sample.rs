//! Write a deterministic synthetic catalog in the crawler's output schema.
//!
//! Usage: `generate_sample [OUTPUT] [COUNT]` where OUTPUT ends in `.csv`
//! (default `data/books.csv`) or `.parquet`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use log::info;
use parquet::arrow::ArrowWriter;

use book_catalog::config::DEFAULT_DATA_PATH;
use book_catalog::data::model::{BookRecord, COLUMNS};

const CATEGORIES: [&str; 8] = [
    "Poetry",
    "Historical Fiction",
    "Science Fiction",
    "Mystery",
    "Travel",
    "Philosophy",
    "Young Adult",
    "Default",
];

const RATINGS: [&str; 5] = ["One", "Two", "Three", "Four", "Five"];

const ADJECTIVES: [&str; 8] = [
    "Silent", "Crimson", "Hidden", "Last", "Broken", "Golden", "Endless", "Quiet",
];

const NOUNS: [&str; 8] = [
    "Attic", "Harbor", "Garden", "Empire", "Letter", "River", "Orchard", "Lantern",
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// One synthetic book. Roughly one in five prices carries the `Â` left by a
/// mis-decoded pound sign, one in fifty is unparsable and one in forty books
/// has no category, as in real crawls.
fn generate_book(i: usize, rng: &mut SimpleRng) -> BookRecord {
    let title = format!("The {} {} {}", rng.pick(&ADJECTIVES), rng.pick(&NOUNS), i + 1);

    let pounds = 10.0 + rng.next_f64() * 50.0;
    let roll = rng.next_f64();
    let price = if roll < 0.02 {
        String::new()
    } else if roll < 0.2 {
        format!("Â£{pounds:.2}")
    } else {
        format!("£{pounds:.2}")
    };

    let availability = if rng.next_f64() < 0.9 {
        "In stock"
    } else {
        "Out of stock"
    };

    let category = (rng.next_f64() >= 0.025).then(|| rng.pick(&CATEGORIES).to_string());

    BookRecord {
        title,
        price,
        availability: availability.to_string(),
        rating: rng.pick(&RATINGS).to_string(),
        category,
        image: format!("https://books.toscrape.com/media/cache/{:016x}.jpg", rng.next_u64()),
    }
}

fn write_csv(path: &Path, books: &[BookRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for book in books {
        writer.serialize(book).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(path: &Path, books: &[BookRecord]) -> Result<()> {
    let column = |get: fn(&BookRecord) -> Option<&str>| -> ArrayRef {
        Arc::new(books.iter().map(get).collect::<StringArray>())
    };

    let schema = Arc::new(Schema::new(
        COLUMNS
            .iter()
            .map(|name| Field::new(*name, DataType::Utf8, *name == "category"))
            .collect::<Vec<_>>(),
    ));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            column(|b| Some(b.title.as_str())),
            column(|b| Some(b.price.as_str())),
            column(|b| Some(b.availability.as_str())),
            column(|b| Some(b.rating.as_str())),
            column(|b| b.category.as_deref()),
            column(|b| Some(b.image.as_str())),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating Parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating Parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing Parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let output = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));
    let count: usize = match args.next() {
        Some(n) => n.parse().with_context(|| format!("invalid count '{n}'"))?,
        None => 1000,
    };

    let mut rng = SimpleRng::new(42);
    let books: Vec<BookRecord> = (0..count).map(|i| generate_book(i, &mut rng)).collect();

    if let Some(dir) = output.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    match output.extension().and_then(|e| e.to_str()) {
        Some("csv") => write_csv(&output, &books)?,
        Some("parquet") => write_parquet(&output, &books)?,
        _ => bail!("output must end in .csv or .parquet: {}", output.display()),
    }

    info!("Wrote {} books to {}", books.len(), output.display());
    println!("Wrote {} books to {}", books.len(), output.display());
    Ok(())
}

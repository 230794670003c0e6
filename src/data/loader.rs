use std::fs::File;
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray, StringArray};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use log::{debug, info, log_enabled, Level};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{BookRecord, COLUMNS};
use super::normalize::normalize_price;
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load book records from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` / `.tsv` – header row `title,price,availability,rating,category,image`
/// * `.json`         – `[{ "title": ..., "price": ..., ... }, ...]`
/// * `.parquet`      – the same six columns, any type castable to text
///
/// Column order is free but the column set must match exactly. Cell contents
/// are not validated; the load either yields every row or fails.
pub fn load_file(path: &Path) -> Result<Vec<BookRecord>, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_delimited(path, b',')?,
        "tsv" => load_delimited(path, b'\t')?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    info!("Loaded {} records from {}", records.len(), path.display());
    if log_enabled!(Level::Debug) {
        let unpriced = records
            .iter()
            .filter(|r| normalize_price(&r.price).is_none())
            .count();
        debug!("{unpriced} records have an unparsable price");
    }

    Ok(records)
}

// ---------------------------------------------------------------------------
// Schema check shared by all formats
// ---------------------------------------------------------------------------

/// Resolve where each expected column sits in `found`.
///
/// Result index `k` holds the position of `COLUMNS[k]`.
fn column_positions(found: &[String]) -> Result<[usize; 6], LoadError> {
    let mismatch = || LoadError::SchemaMismatch {
        expected: COLUMNS.join(","),
        found: found.join(","),
    };

    if found.len() != COLUMNS.len() {
        return Err(mismatch());
    }
    let mut positions = [0usize; 6];
    for (slot, name) in positions.iter_mut().zip(COLUMNS) {
        *slot = found.iter().position(|h| h == name).ok_or_else(mismatch)?;
    }
    Ok(positions)
}

/// Assemble a record from cells given in `COLUMNS` order.
fn build_record(mut cell: impl FnMut(usize) -> String) -> BookRecord {
    let category = cell(4);
    BookRecord {
        title: cell(0),
        price: cell(1),
        availability: cell(2),
        rating: cell(3),
        category: (!category.trim().is_empty()).then_some(category),
        image: cell(5),
    }
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// CSV / TSV loader
// ---------------------------------------------------------------------------

/// Delimited layout: one header row, one book per row.
///
/// Cells are decoded lossily (see [`decode_cell`]), so stray non-UTF-8 bytes
/// never abort the load. Errors report the 1-based line in the file.
fn load_delimited(path: &Path, delimiter: u8) -> Result<Vec<BookRecord>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_reader(open(path)?);

    let headers: Vec<String> = reader
        .byte_headers()?
        .iter()
        .map(|h| {
            String::from_utf8_lossy(h)
                .trim_start_matches('\u{feff}')
                .trim()
                .to_string()
        })
        .collect();
    let positions = column_positions(&headers)?;

    let mut records = Vec::new();
    for (row_no, result) in reader.byte_records().enumerate() {
        let row = result.map_err(|e| LoadError::Malformed {
            // Header is line 1.
            row: e
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(row_no + 2),
            message: e.to_string(),
        })?;
        records.push(build_record(|k| decode_cell(row.get(positions[k]).unwrap_or_default())));
    }

    Ok(records)
}

/// Decode a cell as UTF-8, replacing invalid sequences with U+FFFD.
///
/// A lone `0xA3` byte is the Latin-1 pound sign and decodes to `£`, so a
/// price written by a Latin-1 tool still normalizes.
fn decode_cell(bytes: &[u8]) -> String {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return text.to_string();
    }
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
        match chunk.invalid() {
            [] => {}
            [0xA3] => out.push('£'),
            _ => out.push(char::REPLACEMENT_CHARACTER),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "title": "A Light in the Attic",
///     "price": "£51.77",
///     "availability": "In stock",
///     "rating": "Three",
///     "category": "Poetry",
///     "image": "https://books.toscrape.com/media/cache/2c/da/2cdad67c.jpg"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<BookRecord>, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let root: JsonValue = serde_json::from_str(&text)?;

    let rows = root.as_array().ok_or_else(|| LoadError::Malformed {
        row: 0,
        message: "expected a top-level JSON array".to_string(),
    })?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let obj = row.as_object().ok_or_else(|| LoadError::Malformed {
            row: i,
            message: "not a JSON object".to_string(),
        })?;

        let keys: Vec<String> = obj.keys().cloned().collect();
        column_positions(&keys)?;

        records.push(build_record(|k| json_to_text(&obj[COLUMNS[k]])));
    }

    Ok(records)
}

fn json_to_text(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file holding the six catalog columns.
///
/// Columns of any Arrow type are cast to Utf8, so a file written by Pandas
/// with, say, an integer column still loads. Nulls become empty text.
fn load_parquet(path: &Path) -> Result<Vec<BookRecord>, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;

    let names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let positions = column_positions(&names)?;

    let reader = builder.build()?;
    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;

        let columns: Vec<ArrayRef> = positions
            .iter()
            .map(|&p| cast(batch.column(p), &DataType::Utf8))
            .collect::<Result<_, _>>()?;
        let strings: Vec<&StringArray> = columns
            .iter()
            .map(|c| {
                c.as_string_opt::<i32>().ok_or_else(|| LoadError::Malformed {
                    row: records.len(),
                    message: format!("column is {:?}, not text", c.data_type()),
                })
            })
            .collect::<Result<_, _>>()?;

        for row in 0..batch.num_rows() {
            records.push(build_record(|k| {
                let col = strings[k];
                if col.is_null(row) {
                    String::new()
                } else {
                    col.value(row).to_string()
                }
            }));
        }
    }

    Ok(records)
}

//! Tests for loading catalog files in every supported format.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use arrow::array::{ArrayRef, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use book_catalog::data::loader::load_file;
use book_catalog::data::normalize::normalize_price;
use book_catalog::{LoadError, RecordStore};
use parquet::arrow::ArrowWriter;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(bytes).unwrap();
    path
}

const CSV: &str = "title,price,availability,rating,category,image
A Light in the Attic,Â£51.77,In stock,Three,Poetry,https://example.com/a.jpg
Tipping the Velvet,£53.74,In stock,One,Historical Fiction,https://example.com/b.jpg
\"Sapiens: A Brief History, Abridged\",£54.23,Out of stock,Five,,https://example.com/c.jpg
";

#[test]
fn test_csv_loads_in_order() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "books.csv", CSV.as_bytes());

    let records = load_file(&path).unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].title, "A Light in the Attic");
    assert_eq!(records[0].price, "Â£51.77");
    assert_eq!(records[0].category.as_deref(), Some("Poetry"));
    assert_eq!(records[1].rating, "One");
    assert_eq!(records[2].title, "Sapiens: A Brief History, Abridged");
    assert_eq!(records[2].category, None);
}

#[test]
fn test_csv_with_bom_header() {
    let dir = TempDir::new().unwrap();
    let mut bytes = "\u{feff}".as_bytes().to_vec();
    bytes.extend_from_slice(CSV.as_bytes());
    let path = write_file(&dir, "books.csv", &bytes);

    let store = RecordStore::load(&path).unwrap();
    assert_eq!(store.len(), 3);
    assert_eq!(store.get(0).unwrap().title, "A Light in the Attic");
}

#[test]
fn test_csv_columns_in_any_order() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "books.csv",
        b"image,category,rating,availability,price,title\nimg.jpg,Travel,Two,In stock,\xc2\xa310.00,Walk\n",
    );

    let records = load_file(&path).unwrap();
    assert_eq!(records[0].title, "Walk");
    assert_eq!(records[0].price, "£10.00");
    assert_eq!(records[0].image, "img.jpg");
    assert_eq!(records[0].category.as_deref(), Some("Travel"));
}

#[test]
fn test_tsv_loads() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "books.tsv",
        b"title\tprice\tavailability\trating\tcategory\timage\nWalk\t\xc2\xa310.00\tIn stock\tTwo\tTravel\timg.jpg\n",
    );

    let records = load_file(&path).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].availability, "In stock");
}

#[test]
fn test_latin1_pound_byte_normalizes() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "books.csv",
        b"title,price,availability,rating,category,image\nLatin,\xa312.00,In stock,Two,Travel,img.jpg\n",
    );

    let records = load_file(&path).unwrap();
    assert_eq!(records[0].price, "£12.00");
    assert_eq!(normalize_price(&records[0].price), Some(12.0));

    let store = RecordStore::from_records(records);
    assert_eq!(book_catalog::query::price_range(&store, 0.0, 1000.0).len(), 1);
}

#[test]
fn test_invalid_utf8_price_is_kept_not_fatal() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "books.csv",
        b"title,price,availability,rating,category,image\nOdd,\xff12.00,In stock,Two,Travel,img.jpg\n",
    );

    let records = load_file(&path).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].price, "\u{fffd}12.00");
    assert_eq!(normalize_price(&records[0].price), None);
}

#[test]
fn test_header_missing_column() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "books.csv",
        b"title,price,availability,rating,image\nA,1,In stock,One,x\n",
    );

    match load_file(&path) {
        Err(LoadError::SchemaMismatch { found, .. }) => {
            assert_eq!(found, "title,price,availability,rating,image");
        }
        other => panic!("Expected SchemaMismatch, got: {:?}", other),
    }
}

#[test]
fn test_header_extra_column() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "books.csv",
        b"title,price,availability,rating,category,image,upc\nA,1,In stock,One,Poetry,x,123\n",
    );

    assert!(matches!(load_file(&path), Err(LoadError::SchemaMismatch { .. })));
}

#[test]
fn test_empty_file_is_schema_mismatch() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "books.csv", b"");

    assert!(matches!(load_file(&path), Err(LoadError::SchemaMismatch { .. })));
}

#[test]
fn test_ragged_row_is_malformed() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "books.csv",
        b"title,price,availability,rating,category,image\nA,1,In stock,One,Poetry,x\nB,2,In stock\n",
    );

    match load_file(&path) {
        // Header is line 1, so the short record sits on line 3.
        Err(LoadError::Malformed { row, .. }) => assert_eq!(row, 3),
        other => panic!("Expected Malformed, got: {:?}", other),
    }
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nope.csv");

    assert!(matches!(load_file(&path), Err(LoadError::Io { .. })));
}

#[test]
fn test_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "books.xlsx", b"");

    match load_file(&path) {
        Err(LoadError::UnsupportedFormat(ext)) => assert_eq!(ext, "xlsx"),
        other => panic!("Expected UnsupportedFormat, got: {:?}", other),
    }
}

#[test]
fn test_json_records() {
    let dir = TempDir::new().unwrap();
    let json = r#"[
        {"title": "Walk", "price": "£10.00", "availability": "In stock",
         "rating": "Two", "category": "Travel", "image": "a.jpg"},
        {"title": "Numbers", "price": 12.5, "availability": "Out of stock",
         "rating": "Five", "category": null, "image": "b.jpg"}
    ]"#;
    let path = write_file(&dir, "books.json", json.as_bytes());

    let records = load_file(&path).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].category.as_deref(), Some("Travel"));
    assert_eq!(records[1].price, "12.5");
    assert_eq!(records[1].category, None);
}

#[test]
fn test_json_missing_key() {
    let dir = TempDir::new().unwrap();
    let json = r#"[{"title": "Walk", "price": "£10.00"}]"#;
    let path = write_file(&dir, "books.json", json.as_bytes());

    assert!(matches!(load_file(&path), Err(LoadError::SchemaMismatch { .. })));
}

#[test]
fn test_json_not_an_array() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "books.json", br#"{"title": "Walk"}"#);

    assert!(matches!(load_file(&path), Err(LoadError::Malformed { row: 0, .. })));
}

#[test]
fn test_parquet_with_mixed_types_and_nulls() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("books.parquet");

    let utf8 = |name: &str| Field::new(name, DataType::Utf8, true);
    let schema = Arc::new(Schema::new(vec![
        utf8("title"),
        utf8("price"),
        utf8("availability"),
        Field::new("rating", DataType::Int64, true),
        utf8("category"),
        utf8("image"),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(vec!["Walk", "Run"])),
        Arc::new(StringArray::from(vec!["£10.00", "£20.00"])),
        Arc::new(StringArray::from(vec!["In stock", "In stock"])),
        Arc::new(Int64Array::from(vec![Some(4), None])),
        Arc::new(StringArray::from(vec![Some("Travel"), None])),
        Arc::new(StringArray::from(vec!["a.jpg", "b.jpg"])),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();

    let file = std::fs::File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let records = load_file(&path).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].title, "Walk");
    assert_eq!(records[0].rating, "4");
    assert_eq!(records[1].rating, "");
    assert_eq!(records[0].category.as_deref(), Some("Travel"));
    assert_eq!(records[1].category, None);
}

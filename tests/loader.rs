use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use npdb_dashboard::data::error::LoadError;
use npdb_dashboard::data::loader::load_file;
use npdb_dashboard::data::model::YearRange;
use parquet::arrow::ArrowWriter;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write file");
    path
}

#[test]
fn loads_csv_with_currency_and_year_coercion() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(
        &dir,
        "npdb.csv",
        "SEQNO,ORIGYEAR,PRACTNUM,WORKSTAT,TOTALPMT,AALENGTH,ALGNNATR,OUTCOME,LICNFEAT\n\
         1,2004,10,CA,\"$1,234.50\",,1,3,x\n\
         2,2006,11,NY,,1.5,,,y\n",
    );
    let dataset = load_file(&path).expect("load");
    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.year_span(), Some(YearRange::new(2004, 2006)));
    assert_eq!(dataset.source(), Some(path.as_path()));

    let first = &dataset.records()[0];
    assert_eq!(first.payment, Some(1234.50));
    assert_eq!(first.year, 2004);
}

#[test]
fn malformed_currency_aborts_the_load() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(
        &dir,
        "bad.csv",
        "SEQNO,ORIGYEAR,PRACTNUM,WORKSTAT,TOTALPMT,AALENGTH,ALGNNATR,OUTCOME\n\
         1,2004,10,CA,$100.00,,1,3\n\
         2,2004,10,CA,$1O0.00,,1,3\n",
    );
    let err = load_file(&path).unwrap_err();
    assert!(err.is_parse_error());
    assert!(matches!(err, LoadError::Parse { row: 2, column: "TOTALPMT", .. }));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = load_file(Path::new("/definitely/not/here.csv")).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}

#[test]
fn loads_records_oriented_json() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(
        &dir,
        "npdb.json",
        r#"[
            {"SEQNO": 1, "ORIGYEAR": 2004, "PRACTNUM": 7, "WORKSTAT": "TX",
             "TOTALPMT": "$2,000", "AALENGTH": null, "ALGNNATR": 20, "OUTCOME": 9},
            {"SEQNO": 2, "ORIGYEAR": "2005", "PRACTNUM": 8, "WORKSTAT": null,
             "TOTALPMT": null, "AALENGTH": 0.5, "ALGNNATR": null, "OUTCOME": null}
        ]"#,
    );
    let dataset = load_file(&path).expect("load");
    let records = dataset.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].payment, Some(2000.0));
    assert_eq!(records[0].allegation, Some(20));
    assert_eq!(records[1].year, 2005);
    assert_eq!(records[1].work_state, None);
    assert_eq!(records[1].aa_length, Some(0.5));
}

#[test]
fn json_row_without_a_required_key_is_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(&dir, "short.json", r#"[{"SEQNO": 1, "ORIGYEAR": 2004}]"#);
    let err = load_file(&path).unwrap_err();
    assert!(matches!(err, LoadError::MissingColumn { column: "PRACTNUM", .. }));
}

#[test]
fn loads_parquet_with_string_payments() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("npdb.parquet");

    let schema = Arc::new(Schema::new(vec![
        Field::new("SEQNO", DataType::Int64, false),
        Field::new("ORIGYEAR", DataType::Int64, false),
        Field::new("PRACTNUM", DataType::Int64, false),
        Field::new("WORKSTAT", DataType::Utf8, true),
        Field::new("TOTALPMT", DataType::Utf8, true),
        Field::new("AALENGTH", DataType::Float64, true),
        Field::new("ALGNNATR", DataType::Int64, true),
        Field::new("OUTCOME", DataType::Int64, true),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from(vec![1, 2])),
        Arc::new(Int64Array::from(vec![2004, 2007])),
        Arc::new(Int64Array::from(vec![5, 6])),
        Arc::new(StringArray::from(vec![Some("CA"), None])),
        Arc::new(StringArray::from(vec![Some("$1,234.50"), None])),
        Arc::new(Float64Array::from(vec![None, Some(3.0)])),
        Arc::new(Int64Array::from(vec![Some(1), None])),
        Arc::new(Int64Array::from(vec![Some(9), None])),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).expect("batch");
    let file = fs::File::create(&path).expect("create");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("writer");
    writer.write(&batch).expect("write");
    writer.close().expect("close");

    let dataset = load_file(&path).expect("load");
    let records = dataset.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].payment, Some(1234.50));
    assert_eq!(records[0].work_state.as_deref(), Some("CA"));
    assert_eq!(records[0].outcome, Some(9));
    assert_eq!(records[1].year, 2007);
    assert_eq!(records[1].payment, None);
    assert_eq!(records[1].aa_length, Some(3.0));
    assert_eq!(records[1].allegation, None);
}

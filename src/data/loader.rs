use std::fs::File;
use std::io::Read;
use std::path::Path;

use arrow::util::display::{ArrayFormatter, FormatOptions};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use super::error::{FieldKind, LoadError};
use super::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// Source columns
// ---------------------------------------------------------------------------

/// The NPDB public-use columns the dashboard reads. Any other column in the
/// file is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    ClaimId,
    Year,
    Practitioner,
    WorkState,
    Payment,
    AaLength,
    Allegation,
    Outcome,
}

const COLUMN_COUNT: usize = 8;

impl Column {
    /// Discriminant order, so `column as usize` indexes a row of cells.
    pub const ALL: [Column; COLUMN_COUNT] = [
        Column::ClaimId,
        Column::Year,
        Column::Practitioner,
        Column::WorkState,
        Column::Payment,
        Column::AaLength,
        Column::Allegation,
        Column::Outcome,
    ];

    /// Header name in the source file.
    pub fn header(self) -> &'static str {
        match self {
            Column::ClaimId => "SEQNO",
            Column::Year => "ORIGYEAR",
            Column::Practitioner => "PRACTNUM",
            Column::WorkState => "WORKSTAT",
            Column::Payment => "TOTALPMT",
            Column::AaLength => "AALENGTH",
            Column::Allegation => "ALGNNATR",
            Column::Outcome => "OUTCOME",
        }
    }
}

/// Raw text of one row, indexed by [`Column`].
type Cells<'a> = [&'a str; COLUMN_COUNT];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – the NPDB public-use layout (recommended)
/// * `.parquet` – same columns, any of string/integer/float cell types
/// * `.json`    – `[{ "SEQNO": 1, "ORIGYEAR": 2004, ... }, ...]`
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_csv(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        "json" => load_json(path)?,
        other => return Err(LoadError::UnsupportedExtension(other.to_string())),
    };

    let dataset = Dataset::from_records(records).with_source(path);
    match dataset.year_span() {
        Some(span) => log::info!(
            "Loaded {} records spanning {span} from {}",
            dataset.len(),
            path.display()
        ),
        None => log::warn!("{} contains no records", path.display()),
    }
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Field coercion
// ---------------------------------------------------------------------------

/// Parse a currency amount such as `"$1,234.50"`.
///
/// One leading `$` is stripped. `,` is only accepted as a thousands separator
/// in the whole-dollar part (`1,234,567`). Signs, exponents and anything
/// other than digits and one `.` are rejected, as payments are non-negative.
pub fn parse_currency(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let amount = trimmed.strip_prefix('$').unwrap_or(trimmed);
    let (whole, cents) = match amount.split_once('.') {
        Some((whole, cents)) if is_digits(cents) => (whole, Some(cents)),
        Some(_) => return None,
        None => (amount, None),
    };
    let whole = if whole.contains(',') {
        ungroup_thousands(whole)?
    } else {
        whole.to_string()
    };
    if !(whole.is_empty() || is_digits(&whole)) || (whole.is_empty() && cents.is_none()) {
        return None;
    }

    let plain = match cents {
        Some(cents) => format!("{whole}.{cents}"),
        None => whole,
    };
    plain.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// `"1,234,567"` → `"1234567"`. The first group has 1–3 digits, every later
/// group exactly 3.
fn ungroup_thousands(whole: &str) -> Option<String> {
    let mut groups = whole.split(',');
    let lead = groups.next().filter(|g| (1..=3).contains(&g.len()))?;
    let mut out = lead.to_string();
    for group in groups {
        if group.len() != 3 {
            return None;
        }
        out.push_str(group);
    }
    is_digits(&out).then_some(out)
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Strip an all-zero fraction (`"2004.0"` → `"2004"`) and require plain
/// digits. pandas writes integer columns containing nulls as floats.
fn integral_digits(raw: &str) -> Option<&str> {
    let raw = raw.trim();
    let digits = match raw.split_once('.') {
        Some((whole, zeros)) if !zeros.is_empty() && zeros.bytes().all(|b| b == b'0') => whole,
        Some(_) => return None,
        None => raw,
    };
    is_digits(digits).then_some(digits)
}

/// Parse a report year, either `"2004"` or the integral float `"2004.0"`.
pub fn parse_year(raw: &str) -> Option<i32> {
    integral_digits(raw)?.parse().ok()
}

fn parse_integer(raw: &str) -> Option<i64> {
    integral_digits(raw)?.parse().ok()
}

fn parse_id(raw: &str) -> Option<u64> {
    parse_integer(raw).and_then(|v| u64::try_from(v).ok())
}

fn parse_decimal(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Blank → `Some(None)`, parsed → `Some(Some(v))`, malformed → `None`.
fn parse_optional<T>(raw: &str, parse: fn(&str) -> Option<T>) -> Option<Option<T>> {
    if raw.is_empty() {
        Some(None)
    } else {
        parse(raw).map(Some)
    }
}

/// Coerce one row of raw cells into a [`Record`]. `row` is 1-based and only
/// used for error reporting.
fn parse_record(row: usize, cells: &Cells<'_>) -> Result<Record, LoadError> {
    let cell = |c: Column| cells[c as usize].trim();
    let fail = |c: Column, expected: FieldKind| LoadError::Parse {
        row,
        column: c.header(),
        value: cell(c).to_string(),
        expected,
    };

    let work_state = cell(Column::WorkState);

    Ok(Record {
        claim_id: parse_id(cell(Column::ClaimId))
            .ok_or_else(|| fail(Column::ClaimId, FieldKind::Integer))?,
        year: parse_year(cell(Column::Year)).ok_or_else(|| fail(Column::Year, FieldKind::Year))?,
        practitioner_id: parse_id(cell(Column::Practitioner))
            .ok_or_else(|| fail(Column::Practitioner, FieldKind::Integer))?,
        work_state: (!work_state.is_empty()).then(|| work_state.to_string()),
        payment: parse_optional(cell(Column::Payment), parse_currency)
            .ok_or_else(|| fail(Column::Payment, FieldKind::Currency))?,
        aa_length: parse_optional(cell(Column::AaLength), parse_decimal)
            .ok_or_else(|| fail(Column::AaLength, FieldKind::Decimal))?,
        allegation: parse_optional(cell(Column::Allegation), parse_integer)
            .ok_or_else(|| fail(Column::Allegation, FieldKind::Integer))?,
        outcome: parse_optional(cell(Column::Outcome), parse_integer)
            .ok_or_else(|| fail(Column::Outcome, FieldKind::Integer))?,
    })
}

fn missing_column(column: Column, path: &Path) -> LoadError {
    LoadError::MissingColumn {
        column: column.header(),
        path: path.to_path_buf(),
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> LoadError + '_ {
    move |source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<Record>, LoadError> {
    let file = File::open(path).map_err(io_error(path))?;
    read_csv(file, path)
}

/// CSV layout: header row with column names, one report per line.
/// `path` is only used for error messages.
pub fn read_csv<R: Read>(reader: R, path: &Path) -> Result<Vec<Record>, LoadError> {
    let csv_error = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = reader.headers().map_err(csv_error)?.clone();

    let mut index = [0usize; COLUMN_COUNT];
    for (slot, column) in index.iter_mut().zip(Column::ALL) {
        *slot = headers
            .iter()
            .position(|h| h == column.header())
            .ok_or_else(|| missing_column(column, path))?;
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(csv_error)?;
        let cells: Cells<'_> = index.map(|i| record.get(i).unwrap_or(""));
        records.push(parse_record(row_no + 1, &cells)?);
    }

    Ok(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "SEQNO": 1, "ORIGYEAR": 2004, "PRACTNUM": 17, "WORKSTAT": "CA",
///     "TOTALPMT": "$12,500", "AALENGTH": null, "ALGNNATR": 1, "OUTCOME": 3 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<Record>, LoadError> {
    let text = std::fs::read_to_string(path).map_err(io_error(path))?;
    let rows: Vec<Map<String, JsonValue>> =
        serde_json::from_str(&text).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, obj) in rows.iter().enumerate() {
        let mut owned: [String; COLUMN_COUNT] = Default::default();
        for (slot, column) in owned.iter_mut().zip(Column::ALL) {
            let value = obj
                .get(column.header())
                .ok_or_else(|| missing_column(column, path))?;
            *slot = json_to_text(value);
        }
        let cells: Cells<'_> = owned.each_ref().map(String::as_str);
        records.push(parse_record(i + 1, &cells)?);
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

/// Load a Parquet file with the same columns as the CSV layout.
///
/// Cells are rendered to text with Arrow's display formatter and then go
/// through the same coercion as CSV cells, so `TOTALPMT` may be either a
/// `"$…"` string or a plain float column.
fn load_parquet(path: &Path) -> Result<Vec<Record>, LoadError> {
    let parquet_error = |message: String| LoadError::Parquet {
        path: path.to_path_buf(),
        message,
    };

    let file = File::open(path).map_err(io_error(path))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| parquet_error(format!("reading metadata: {e}")))?;
    let reader = builder
        .build()
        .map_err(|e| parquet_error(format!("building reader: {e}")))?;

    let options = FormatOptions::default();
    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.map_err(|e| parquet_error(format!("reading record batch: {e}")))?;
        let schema = batch.schema();

        let mut formatters = Vec::with_capacity(COLUMN_COUNT);
        for column in Column::ALL {
            let idx = schema
                .index_of(column.header())
                .map_err(|_| missing_column(column, path))?;
            let formatter = ArrayFormatter::try_new(batch.column(idx).as_ref(), &options)
                .map_err(|e| parquet_error(format!("column {}: {e}", column.header())))?;
            formatters.push(formatter);
        }

        for row in 0..batch.num_rows() {
            let mut owned: [String; COLUMN_COUNT] = Default::default();
            for (slot, formatter) in owned.iter_mut().zip(&formatters) {
                *slot = formatter
                    .value(row)
                    .try_to_string()
                    .map_err(|e| parquet_error(format!("row {row}: {e}")))?;
            }
            let cells: Cells<'_> = owned.each_ref().map(String::as_str);
            records.push(parse_record(records.len() + 1, &cells)?);
        }
    }

    Ok(records)
}

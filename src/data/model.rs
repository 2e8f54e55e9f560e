use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

// ---------------------------------------------------------------------------
// Record – one row of the NPDB extract
// ---------------------------------------------------------------------------

/// A single malpractice / adverse action report (one row of the source file).
///
/// Optional fields are blank in the public-use file for some report types
/// (adverse actions carry no payment, payments carry no action length).
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Report sequence number (`SEQNO`), unique per claim.
    pub claim_id: u64,
    /// Year the report was filed (`ORIGYEAR`).
    pub year: i32,
    /// Practitioner number (`PRACTNUM`); one practitioner may have many claims.
    pub practitioner_id: u64,
    /// Two-letter work state (`WORKSTAT`).
    pub work_state: Option<String>,
    /// Total payment in dollars (`TOTALPMT`).
    pub payment: Option<f64>,
    /// Adverse action length in years (`AALENGTH`).
    pub aa_length: Option<f64>,
    /// Allegation group code (`ALGNNATR`).
    pub allegation: Option<i64>,
    /// Outcome severity code (`OUTCOME`).
    pub outcome: Option<i64>,
}

// ---------------------------------------------------------------------------
// YearRange – the filter criteria
// ---------------------------------------------------------------------------

/// Inclusive range of report years. A range with `start > end` is valid and
/// simply selects nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    /// Range covering exactly one year.
    pub fn single(year: i32) -> Self {
        Self::new(year, year)
    }

    pub fn contains(&self, year: i32) -> bool {
        self.start <= year && year <= self.end
    }

    /// Whether the range is inverted and therefore selects nothing.
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}–{}", self.start, self.end)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded extract
// ---------------------------------------------------------------------------

/// The full parsed dataset. Immutable once built.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<Record>,
    year_span: Option<YearRange>,
    source: Option<PathBuf>,
}

impl Dataset {
    /// Build the dataset and its year span from loaded records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let year_span = records
            .iter()
            .map(|r| r.year)
            .fold(None, |span: Option<YearRange>, year| match span {
                None => Some(YearRange::single(year)),
                Some(s) => Some(YearRange::new(s.start.min(year), s.end.max(year))),
            });
        Dataset {
            records,
            year_span,
            source: None,
        }
    }

    pub fn with_source(mut self, path: &Path) -> Self {
        self.source = Some(path.to_path_buf());
        self
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Smallest and largest report year present, the default filter range.
    pub fn year_span(&self) -> Option<YearRange> {
        self.year_span
    }

    /// File the dataset was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

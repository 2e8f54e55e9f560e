//! Errors raised while loading a dataset.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// The type a field was expected to coerce to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// `$`-prefixed amount with optional thousands separators.
    Currency,
    Year,
    Integer,
    Decimal,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Currency => "a currency amount",
            FieldKind::Year => "a year",
            FieldKind::Integer => "an integer",
            FieldKind::Decimal => "a decimal number",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while loading the source extract.
///
/// Every variant is fatal: a dataset is either loaded completely with all
/// fields typed, or not at all.
#[derive(Debug, Error)]
pub enum LoadError {
    // === File System Errors ===
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    // === Format Errors ===
    #[error("failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to parse JSON {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read parquet {path}: {message}")]
    Parquet { path: PathBuf, message: String },

    #[error("required column '{column}' not found in {path}")]
    MissingColumn { column: &'static str, path: PathBuf },

    // === Coercion Errors ===
    /// A field could not be coerced to its expected type.
    #[error("row {row}, column {column}: cannot parse '{value}' as {expected}")]
    Parse {
        row: usize,
        column: &'static str,
        value: String,
        expected: FieldKind,
    },
}

impl LoadError {
    /// Whether this is a field coercion failure rather than an I/O or format
    /// problem.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, LoadError::Parse { .. })
    }
}

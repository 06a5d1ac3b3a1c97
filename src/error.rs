//! Error types for loading and parsing student records.
//!
//! Every variant is fatal to the run: the pipeline never skips a bad row or
//! returns partial results.

use thiserror::Error;

/// Failure while loading or parsing an input source.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read {source_name}: {source}")]
    Io {
        source_name: String,
        source: std::io::Error,
    },

    #[error("failed to fetch {url}: {source}")]
    Fetch { url: String, source: reqwest::Error },

    #[error("malformed row at line {line}: {defect}")]
    MalformedRow { line: u64, defect: RowDefect },
}

/// What was wrong with a rejected row.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RowDefect {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("score column '{column}' is not an integer: {value:?}")]
    InvalidScore { column: &'static str, value: String },

    #[error("{0}")]
    Unreadable(String),
}

impl IngestError {
    /// Maps a `csv` reader failure onto the ingest taxonomy.
    ///
    /// I/O failures stay I/O failures; everything else the reader rejects
    /// (invalid UTF-8, broken quoting) is a malformed row.
    pub(crate) fn from_csv(err: csv::Error, source_name: &str) -> Self {
        let line = err.position().map(|pos| pos.line()).unwrap_or(0);
        let message = err.to_string();

        match err.into_kind() {
            csv::ErrorKind::Io(source) => IngestError::Io {
                source_name: source_name.to_string(),
                source,
            },
            _ => IngestError::MalformedRow {
                line,
                defect: RowDefect::Unreadable(message),
            },
        }
    }

    /// Line number of the offending row, if this is a row-level failure.
    pub fn line(&self) -> Option<u64> {
        match self {
            IngestError::MalformedRow { line, .. } => Some(*line),
            _ => None,
        }
    }
}

//! CSV parser for student test records.
//!
//! Input rows are `firstName,lastName,university,test1,test2,test3,test4`
//! after a single header row, which is discarded unchecked. The first bad row
//! aborts the whole parse.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use flate2::read::GzDecoder;
use tracing::{debug, warn};

use crate::analyzers::types::{SCORE_COUNT, StudentRecord};
use crate::error::{IngestError, RowDefect};

/// Number of fields every data row must carry.
pub const FIELD_COUNT: usize = 3 + SCORE_COUNT;

const SCORE_COLUMNS: [&str; SCORE_COUNT] = ["test1", "test2", "test3", "test4"];

/// Parses the student file at `path`, gunzipping it if the name ends in `.gz`.
///
/// # Errors
///
/// Returns [`IngestError::Io`] if the file cannot be opened or read, and
/// [`IngestError::MalformedRow`] for the first row that fails validation.
#[tracing::instrument(skip(path), fields(path = %path.display()))]
pub fn parse_file(path: &Path) -> Result<Vec<StudentRecord>, IngestError> {
    let source_name = path.display().to_string();
    let file = File::open(path).map_err(|source| IngestError::Io {
        source_name: source_name.clone(),
        source,
    })?;

    read_records(maybe_gunzip(file, is_gzip_name(&source_name)), &source_name)
}

/// Parses student records from any reader; `source_name` labels errors.
pub fn read_records<R: Read>(
    reader: R,
    source_name: &str,
) -> Result<Vec<StudentRecord>, IngestError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut students = Vec::new();

    for result in rdr.records() {
        let row = result.map_err(|e| IngestError::from_csv(e, source_name))?;
        let line = row.position().map(|pos| pos.line()).unwrap_or(0);

        let student = student_from_row(&row).map_err(|defect| {
            warn!(line, %defect, "Rejecting input");
            IngestError::MalformedRow { line, defect }
        })?;
        students.push(student);
    }

    debug!(records = students.len(), source = source_name, "Parsed student records");
    Ok(students)
}

/// Builds a [`StudentRecord`] from one data row.
pub fn student_from_row(row: &StringRecord) -> Result<StudentRecord, RowDefect> {
    if row.len() != FIELD_COUNT {
        return Err(RowDefect::FieldCount {
            expected: FIELD_COUNT,
            found: row.len(),
        });
    }

    let mut scores = [0i64; SCORE_COUNT];
    for (i, column) in SCORE_COLUMNS.into_iter().enumerate() {
        let value = &row[3 + i];
        scores[i] = value.parse().map_err(|_| RowDefect::InvalidScore {
            column,
            value: value.to_string(),
        })?;
    }

    Ok(StudentRecord::new(&row[0], &row[1], &row[2], scores))
}

pub(crate) fn is_gzip_name(name: &str) -> bool {
    name.ends_with(".gz")
}

pub(crate) fn maybe_gunzip<'a, R: Read + 'a>(reader: R, gzipped: bool) -> Box<dyn Read + 'a> {
    if gzipped {
        Box::new(GzDecoder::new(reader))
    } else {
        Box::new(reader)
    }
}

//! Output formatting and persistence for grading results.
//!
//! Supports debug logging, plain-text and JSON reports, and graded CSV export.

use anyhow::Result;
use serde::Serialize;
use std::fmt::Write as _;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::debug;

use crate::analyzers::types::{GradedRecord, GradedRow, TopperReport};
use csv::WriterBuilder;
use flate2::Compression;
use flate2::write::GzEncoder;

/// Logs a report using Rust's debug pretty-print format.
pub fn print_pretty(report: &TopperReport) {
    debug!("{:#?}", report);
}

/// Renders a report as pretty-printed JSON.
pub fn render_json(report: &TopperReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Writes any serializable value to `path` as pretty-printed JSON.
pub fn write_json(path: &Path, value: &impl Serialize) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, value)?;
    debug!(path = %path.display(), "JSON written");
    Ok(())
}

fn describe(record: &GradedRecord) -> String {
    format!(
        "{} ({}) average {:.2} grade {}",
        record.student.full_name(),
        record.student.institution,
        record.average,
        record.grade
    )
}

/// Renders a human-readable summary of a report.
pub fn render_text(report: &TopperReport) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Student toppers for {}", report.source);
    let _ = writeln!(output, "Records: {}", report.total_records);

    let Some(overall) = &report.overall else {
        let _ = writeln!(output, "No student records found.");
        return output;
    };

    let distribution: Vec<String> = report
        .grade_counts
        .iter()
        .map(|(grade, count)| format!("{grade}={count}"))
        .collect();
    let _ = writeln!(output, "Grades: {}", distribution.join(" "));
    let _ = writeln!(output);
    let _ = writeln!(output, "Overall topper: {}", describe(overall));
    let _ = writeln!(output);
    let _ = writeln!(output, "Toppers per institution:");

    for (institution, top) in &report.per_institution {
        let _ = writeln!(
            output,
            "- {}: {} (average {:.2}, grade {})",
            institution,
            top.student.full_name(),
            top.average,
            top.grade
        );
    }

    output
}

/// Writes graded records to `path` as CSV, one header line followed by one
/// row per record. The file is gzip-compressed when `gzip` is set.
pub fn write_graded_csv(path: &Path, records: &[GradedRecord], gzip: bool) -> Result<()> {
    debug!(path = %path.display(), gzip, records = records.len(), "Writing graded CSV");

    let file = File::create(path)?;
    if gzip {
        let encoder = GzEncoder::new(file, Compression::default());
        let encoder = write_rows(encoder, records)?;
        encoder.finish()?;
    } else {
        write_rows(file, records)?;
    }

    Ok(())
}

fn write_rows<W: Write>(sink: W, records: &[GradedRecord]) -> Result<W> {
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(sink);

    for record in records {
        writer.serialize(GradedRow::from(record))?;
    }
    writer.flush()?;

    Ok(writer.into_inner().map_err(|e| e.into_error())?)
}

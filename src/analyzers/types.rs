//! Data types used by the grading pipeline.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Number of test scores carried by every student row.
pub const SCORE_COUNT: usize = 4;

/// A single student row as read from the input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentRecord {
    pub first_name: String,
    pub last_name: String,
    pub institution: String,
    pub scores: [i64; SCORE_COUNT],
}

impl StudentRecord {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        institution: impl Into<String>,
        scores: [i64; SCORE_COUNT],
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            institution: institution.into(),
            scores,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Letter grade derived from an average score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Grade {
    A,
    B,
    C,
    F,
}

impl Grade {
    pub const ALL: [Grade; 4] = [Grade::A, Grade::B, Grade::C, Grade::F];

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A [`StudentRecord`] together with its average score and grade.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradedRecord {
    #[serde(flatten)]
    pub student: StudentRecord,
    pub average: f64,
    pub grade: Grade,
}

/// Flat CSV row for a [`GradedRecord`]; the csv writer cannot serialize
/// nested structs.
#[derive(Debug, Serialize)]
pub struct GradedRow<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub institution: &'a str,
    pub test1: i64,
    pub test2: i64,
    pub test3: i64,
    pub test4: i64,
    pub average: f64,
    pub grade: Grade,
}

impl<'a> From<&'a GradedRecord> for GradedRow<'a> {
    fn from(record: &'a GradedRecord) -> Self {
        let [test1, test2, test3, test4] = record.student.scores;
        GradedRow {
            first_name: &record.student.first_name,
            last_name: &record.student.last_name,
            institution: &record.student.institution,
            test1,
            test2,
            test3,
            test4,
            average: record.average,
            grade: record.grade,
        }
    }
}

/// Complete result of a run: both topper scopes plus summary counts.
#[derive(Debug, Serialize)]
pub struct TopperReport {
    pub source: String,
    pub generated_at: DateTime<Utc>,
    pub total_records: usize,
    pub grade_counts: BTreeMap<Grade, usize>,
    /// `None` only when the input held no records.
    pub overall: Option<GradedRecord>,
    pub per_institution: BTreeMap<String, GradedRecord>,
}

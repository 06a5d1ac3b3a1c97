use crate::analyzers::types::{Grade, GradedRecord, StudentRecord};
use crate::analyzers::utility::average;

/// Lowest average that still earns an A.
pub const A_THRESHOLD: f64 = 70.0;
/// Lowest average that still earns a B.
pub const B_THRESHOLD: f64 = 50.0;
/// Lowest average that still earns a C.
pub const C_THRESHOLD: f64 = 35.0;

/// Converts an average score into a letter grade.
///
/// | Range        | Grade |
/// |--------------|-------|
/// | >= 70        | A     |
/// | >= 50        | B     |
/// | >= 35        | C     |
/// | < 35         | F     |
pub fn grade(avg: f64) -> Grade {
    match avg {
        a if a >= A_THRESHOLD => Grade::A,
        a if a >= B_THRESHOLD => Grade::B,
        a if a >= C_THRESHOLD => Grade::C,
        _ => Grade::F,
    }
}

pub fn grade_record(student: StudentRecord) -> GradedRecord {
    let avg = average(&student.scores);
    GradedRecord {
        student,
        average: avg,
        grade: grade(avg),
    }
}

/// Grades every record, keeping input order.
pub fn grade_records(students: Vec<StudentRecord>) -> Vec<GradedRecord> {
    students.into_iter().map(grade_record).collect()
}

use crate::analyzers::aggregate::build_report;
use crate::analyzers::grade::grade_records;
use crate::analyzers::types::{GradedRecord, TopperReport};
use crate::error::IngestError;
use crate::fetch::{HttpClient, Source, load_records};
use tracing::info;

/// Loads and grades every record from `source`.
///
/// Nothing is graded unless the whole source parsed cleanly.
#[tracing::instrument(skip(source, client), fields(source = %source))]
pub fn grade_source<C: HttpClient>(
    source: &Source,
    client: &C,
) -> Result<Vec<GradedRecord>, IngestError> {
    let students = load_records(source, client)?;
    let graded = grade_records(students);

    info!(records = graded.len(), "Records graded");
    Ok(graded)
}

/// Runs the full pipeline (parse, grade, aggregate) over `source`.
#[tracing::instrument(skip(source, client), fields(source = %source))]
pub fn analyze<C: HttpClient>(source: &Source, client: &C) -> Result<TopperReport, IngestError> {
    let graded = grade_source(source, client)?;
    let report = build_report(&source.to_string(), &graded);

    match &report.overall {
        Some(top) => info!(
            name = %top.student.full_name(),
            institution = %top.student.institution,
            average = top.average,
            institutions = report.per_institution.len(),
            "Overall topper found"
        ),
        None => info!("No records in source, no topper"),
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::types::Grade;

    struct NoNetwork;

    impl HttpClient for NoNetwork {
        fn get_bytes(&self, url: &str) -> reqwest::Result<Vec<u8>> {
            panic!("unexpected fetch of {url}");
        }
    }

    fn write_source(body: &str) -> (tempfile::TempDir, Source) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.csv");
        std::fs::write(&path, body).unwrap();
        (dir, Source::File(path))
    }

    #[test]
    fn test_analyze_worked_example() {
        let (_dir, source) = write_source(
            "firstName,lastName,university,test1,test2,test3,test4\n\
             A,X,Uni1,70,70,70,70\n\
             B,Y,Uni1,100,100,100,100\n\
             C,Z,Uni2,40,40,40,40\n",
        );

        let report = analyze(&source, &NoNetwork).unwrap();

        assert_eq!(report.total_records, 3);
        let overall = report.overall.unwrap();
        assert_eq!(overall.student.full_name(), "B Y");
        assert_eq!(overall.grade, Grade::A);
        assert_eq!(report.per_institution["Uni1"].student.full_name(), "B Y");
        assert_eq!(report.per_institution["Uni2"].student.full_name(), "C Z");
        assert_eq!(report.per_institution["Uni2"].grade, Grade::C);
    }

    #[test]
    fn test_grade_source_rejects_whole_file_on_bad_row() {
        let (_dir, source) = write_source(
            "firstName,lastName,university,test1,test2,test3,test4\n\
             A,X,Uni1,70,70,70,70\n\
             B,Y,Uni1,100,100,100\n",
        );

        let err = grade_source(&source, &NoNetwork).unwrap_err();
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn test_analyze_header_only() {
        let (_dir, source) = write_source("firstName,lastName,university,test1,test2,test3,test4\n");

        let report = analyze(&source, &NoNetwork).unwrap();
        assert_eq!(report.total_records, 0);
        assert!(report.overall.is_none());
    }
}

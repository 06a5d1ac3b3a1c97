use crate::analyzers::types::{Grade, GradedRecord, TopperReport};
use chrono::Utc;
use std::collections::BTreeMap;
use tracing::debug;

/// Returns the record with the strictly greatest average.
///
/// The running maximum is only replaced on a strictly greater average, so the
/// earliest of several tied records wins. Empty input yields `None`.
pub fn find_overall_topper<'a, I>(records: I) -> Option<&'a GradedRecord>
where
    I: IntoIterator<Item = &'a GradedRecord>,
{
    records.into_iter().fold(None, |best, curr| match best {
        Some(top) if curr.average > top.average => Some(curr),
        Some(top) => Some(top),
        None => Some(curr),
    })
}

/// Partitions records by exact institution name, preserving input order
/// within each group.
pub fn group_by_institution(records: &[GradedRecord]) -> BTreeMap<&str, Vec<&GradedRecord>> {
    let mut groups: BTreeMap<&str, Vec<&GradedRecord>> = BTreeMap::new();

    for record in records {
        groups
            .entry(record.student.institution.as_str())
            .or_default()
            .push(record);
    }

    groups
}

/// Applies [`find_overall_topper`] independently to each institution.
pub fn find_topper_per_institution(records: &[GradedRecord]) -> BTreeMap<String, GradedRecord> {
    group_by_institution(records)
        .into_iter()
        .filter_map(|(institution, group)| {
            find_overall_topper(group).map(|top| (institution.to_string(), top.clone()))
        })
        .collect()
}

/// Counts records per grade; every grade is present, possibly with zero.
pub fn count_grades(records: &[GradedRecord]) -> BTreeMap<Grade, usize> {
    let mut counts: BTreeMap<Grade, usize> = Grade::ALL.iter().map(|&g| (g, 0)).collect();

    for record in records {
        *counts.entry(record.grade).or_insert(0) += 1;
    }

    counts
}

/// Aggregates graded records into a single [`TopperReport`].
pub fn build_report(source: &str, records: &[GradedRecord]) -> TopperReport {
    let overall = find_overall_topper(records).cloned();
    let per_institution = find_topper_per_institution(records);

    debug!(
        records = records.len(),
        institutions = per_institution.len(),
        "Report aggregated"
    );

    TopperReport {
        source: source.to_string(),
        generated_at: Utc::now(),
        total_records: records.len(),
        grade_counts: count_grades(records),
        overall,
        per_institution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::grade::grade_record;
    use crate::analyzers::types::StudentRecord;

    fn graded(first: &str, last: &str, institution: &str, score: i64) -> GradedRecord {
        grade_record(StudentRecord::new(
            first,
            last,
            institution,
            [score, score, score, score],
        ))
    }

    fn sample() -> Vec<GradedRecord> {
        vec![
            graded("A", "X", "Uni1", 70),
            graded("B", "Y", "Uni1", 100),
            graded("C", "Z", "Uni2", 40),
        ]
    }

    #[test]
    fn test_overall_topper_is_highest_average() {
        let records = sample();
        let top = find_overall_topper(&records).unwrap();
        assert_eq!(top.student.full_name(), "B Y");
        assert!(records.iter().all(|r| top.average >= r.average));
    }

    #[test]
    fn test_overall_topper_first_tie_wins() {
        let records = vec![
            graded("Early", "One", "Uni1", 80),
            graded("Mid", "Two", "Uni2", 90),
            graded("Late", "Three", "Uni1", 90),
        ];

        let top = find_overall_topper(&records).unwrap();
        assert_eq!(top.student.first_name, "Mid");
    }

    #[test]
    fn test_overall_topper_empty_input() {
        let records: Vec<GradedRecord> = Vec::new();
        assert!(find_overall_topper(&records).is_none());
    }

    #[test]
    fn test_overall_topper_all_zero_returns_first_record() {
        let records = vec![graded("Zed", "Zero", "Uni1", 0), graded("Nil", "Zero", "Uni2", 0)];
        let top = find_overall_topper(&records).unwrap();
        assert_eq!(top.student.first_name, "Zed");
    }

    #[test]
    fn test_overall_topper_all_negative() {
        let records = vec![graded("Low", "One", "Uni1", -20), graded("Less", "Low", "Uni1", -5)];
        let top = find_overall_topper(&records).unwrap();
        assert_eq!(top.student.first_name, "Less");
        assert_eq!(top.average, -5.0);
    }

    #[test]
    fn test_group_by_institution_partitions_all_records() {
        let records = vec![
            graded("A", "X", "Uni1", 70),
            graded("B", "Y", "Uni2", 60),
            graded("C", "Z", "Uni1", 50),
            graded("D", "W", "uni1", 40),
        ];

        let groups = group_by_institution(&records);

        assert_eq!(groups.len(), 3);
        let total: usize = groups.values().map(Vec::len).sum();
        assert_eq!(total, records.len());

        let uni1: Vec<_> = groups["Uni1"]
            .iter()
            .map(|r| r.student.first_name.as_str())
            .collect();
        assert_eq!(uni1, vec!["A", "C"]);
        assert_eq!(groups["uni1"].len(), 1);
    }

    #[test]
    fn test_topper_per_institution() {
        let toppers = find_topper_per_institution(&sample());

        assert_eq!(toppers.len(), 2);
        assert_eq!(toppers["Uni1"].student.full_name(), "B Y");
        assert_eq!(toppers["Uni2"].student.full_name(), "C Z");
    }

    #[test]
    fn test_topper_per_institution_tie_keeps_first_in_group() {
        let records = vec![
            graded("Other", "Uni", "Uni2", 95),
            graded("First", "Tie", "Uni1", 88),
            graded("Second", "Tie", "Uni1", 88),
        ];

        let toppers = find_topper_per_institution(&records);
        assert_eq!(toppers["Uni1"].student.first_name, "First");
    }

    #[test]
    fn test_count_grades_includes_empty_bands() {
        let counts = count_grades(&sample());
        assert_eq!(counts[&Grade::A], 2);
        assert_eq!(counts[&Grade::B], 0);
        assert_eq!(counts[&Grade::C], 1);
        assert_eq!(counts[&Grade::F], 0);
    }

    #[test]
    fn test_build_report() {
        let report = build_report("students.csv", &sample());

        assert_eq!(report.source, "students.csv");
        assert_eq!(report.total_records, 3);
        assert_eq!(report.overall.as_ref().unwrap().student.full_name(), "B Y");
        assert_eq!(report.per_institution.len(), 2);
    }

    #[test]
    fn test_build_report_empty() {
        let report = build_report("empty.csv", &[]);

        assert_eq!(report.total_records, 0);
        assert!(report.overall.is_none());
        assert!(report.per_institution.is_empty());
        assert!(report.grade_counts.values().all(|&c| c == 0));
    }
}

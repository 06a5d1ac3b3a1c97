use crate::analyzers::types::SCORE_COUNT;

/// Arithmetic mean of a student's test scores.
///
/// The divisor is always [`SCORE_COUNT`]; the sum is taken in `i128` so scores
/// anywhere in the `i64` range cannot overflow.
pub fn average(scores: &[i64; SCORE_COUNT]) -> f64 {
    let total: i128 = scores.iter().map(|&s| i128::from(s)).sum();
    total as f64 / SCORE_COUNT as f64
}

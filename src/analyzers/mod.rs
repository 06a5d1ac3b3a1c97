//! Grading and topper aggregation.
//!
//! This module turns parsed student rows into graded records, assigns letter
//! grades from the fixed threshold table, and reduces the graded set to the
//! top student overall and per institution.

pub mod aggregate;
pub mod analyzer;
pub mod grade;
pub mod types;
pub mod utility;

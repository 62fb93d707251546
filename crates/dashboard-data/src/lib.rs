//! Data layer for the job dashboard.
//!
//! Parses the job postings CSV, filters the records and computes the
//! summaries (skills, salaries, industries, education, remote work) shown
//! by the presentation layer.

pub mod aggregator;
pub mod analysis;
pub mod filters;
pub mod reader;

pub use dashboard_core as core;

//! Shared types for the job dashboard: the typed job record, summary rows,
//! errors, display formatting and command-line settings.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;

pub use error::{DashboardError, Result};
pub use models::{JobField, JobRecord};

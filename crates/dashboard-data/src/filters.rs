//! Equality filters over job records and the option lists that feed them.

use dashboard_core::models::{JobField, JobRecord};
use dashboard_core::settings::ALL;
use serde::{Deserialize, Serialize};

use crate::aggregator::{experience_label, unique_values};

// ── JobFilter ─────────────────────────────────────────────────────────────────

/// Active filter selections. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// `"all"` (or an empty selection) clears the filter.
fn selection(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    if value.is_empty() || value == ALL {
        None
    } else {
        Some(value)
    }
}

impl JobFilter {
    pub fn with_experience_level(mut self, value: impl Into<String>) -> Self {
        self.experience_level = selection(value);
        self
    }

    pub fn with_location(mut self, value: impl Into<String>) -> Self {
        self.location = selection(value);
        self
    }

    pub fn with_industry(mut self, value: impl Into<String>) -> Self {
        self.industry = selection(value);
        self
    }

    pub fn with_role(mut self, value: impl Into<String>) -> Self {
        self.role = selection(value);
        self
    }

    /// Whether any selection differs from "all".
    pub fn has_active_filters(&self) -> bool {
        self.experience_level.is_some()
            || self.location.is_some()
            || self.industry.is_some()
            || self.role.is_some()
    }

    /// Clear every selection.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// `true` when `record` equals every active selection.
    pub fn matches(&self, record: &JobRecord) -> bool {
        fn accepts(selected: &Option<String>, value: &str) -> bool {
            selected.as_deref().map_or(true, |s| s == value)
        }

        accepts(&self.experience_level, &record.experience_level)
            && accepts(&self.location, &record.company_location)
            && accepts(&self.industry, &record.industry)
            && accepts(&self.role, &record.job_title)
    }

    /// Matching records, in input order.
    pub fn apply(&self, records: &[JobRecord]) -> Vec<JobRecord> {
        records.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}

// ── FilterOptions ─────────────────────────────────────────────────────────────

/// An experience code paired with its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceOption {
    pub code: String,
    pub label: String,
}

/// Sorted choices for every filter, computed from the full dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub experience_levels: Vec<ExperienceOption>,
    pub locations: Vec<String>,
    pub industries: Vec<String>,
    pub roles: Vec<String>,
}

impl FilterOptions {
    pub fn from_records(records: &[JobRecord]) -> Self {
        let experience_levels = unique_values(records, JobField::ExperienceLevel)
            .into_iter()
            .map(|code| ExperienceOption {
                label: experience_label(&code).to_string(),
                code,
            })
            .collect();

        Self {
            experience_levels,
            locations: unique_values(records, JobField::CompanyLocation),
            industries: unique_values(records, JobField::Industry),
            roles: unique_values(records, JobField::JobTitle),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

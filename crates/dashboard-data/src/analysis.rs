//! Dashboard pipeline.
//!
//! Applies the active filters to the loaded records and recomputes every
//! summary from scratch, returning a [`Dashboard`] ready for display.

use chrono::Utc;
use dashboard_core::models::{
    EducationShare, ExperienceSalary, ExperienceShare, IndustryStat, JobRecord,
    RemoteDistribution, RemoteSlice, SkillStat,
};
use serde::Serialize;

use crate::aggregator::{
    average_salary, education_distribution, experience_distribution, industry_distribution,
    remote_distribution, salary_by_experience, top_skills, unique_companies, unique_industries,
    unique_locations, DEFAULT_TOP_INDUSTRIES, DEFAULT_TOP_SKILLS,
};
use crate::filters::{FilterOptions, JobFilter};

// ── Public types ──────────────────────────────────────────────────────────────

/// Lengths of the truncated rankings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryLimits {
    pub top_skills: usize,
    pub top_industries: usize,
}

impl Default for SummaryLimits {
    fn default() -> Self {
        Self {
            top_skills: DEFAULT_TOP_SKILLS,
            top_industries: DEFAULT_TOP_INDUSTRIES,
        }
    }
}

/// Headline figures for the filtered set.
///
/// Averages and percentages are `None` when no record matches.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatCards {
    pub total_jobs: usize,
    pub avg_salary: Option<i64>,
    pub remote_percentage: Option<i64>,
    pub top_skill: Option<String>,
    pub unique_companies: usize,
    pub unique_locations: usize,
    pub unique_industries: usize,
}

/// Information about how a [`Dashboard`] was produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetadata {
    /// RFC 3339 timestamp when this dashboard was generated.
    pub generated_at: String,
    pub active_filters: JobFilter,
}

/// Every summary the presentation layer consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    /// Records in the full dataset.
    pub total_jobs: usize,
    /// Records left after filtering.
    pub filtered_jobs: usize,
    pub stats: StatCards,
    pub filter_options: FilterOptions,
    pub top_skills: Vec<SkillStat>,
    pub salary_by_experience: Vec<ExperienceSalary>,
    pub experience_distribution: Vec<ExperienceShare>,
    pub industry_distribution: Vec<IndustryStat>,
    pub education_distribution: Vec<EducationShare>,
    pub remote_distribution: RemoteDistribution,
    pub remote_slices: Vec<RemoteSlice>,
    pub metadata: DashboardMetadata,
}

impl Dashboard {
    /// Whether the filters left nothing to summarise.
    pub fn is_empty(&self) -> bool {
        self.filtered_jobs == 0
    }
}

// ── Public function ───────────────────────────────────────────────────────────

/// Filter `records` and compute all summaries over the result.
///
/// Filter options always come from the full dataset so that a selection can
/// be changed without first being cleared.
pub fn build_dashboard(
    records: &[JobRecord],
    filter: &JobFilter,
    limits: SummaryLimits,
) -> Dashboard {
    let filtered = filter.apply(records);

    let skills = top_skills(&filtered, limits.top_skills);
    let remote = remote_distribution(&filtered);

    let stats = StatCards {
        total_jobs: filtered.len(),
        avg_salary: average_salary(&filtered),
        remote_percentage: remote.remote_percentage(),
        top_skill: skills.first().map(|s| s.skill.clone()),
        unique_companies: unique_companies(&filtered),
        unique_locations: unique_locations(&filtered),
        unique_industries: unique_industries(&filtered),
    };

    tracing::debug!(
        "Dashboard built: {} of {} records after filtering",
        filtered.len(),
        records.len()
    );

    Dashboard {
        total_jobs: records.len(),
        filtered_jobs: filtered.len(),
        stats,
        filter_options: FilterOptions::from_records(records),
        top_skills: skills,
        salary_by_experience: salary_by_experience(&filtered),
        experience_distribution: experience_distribution(&filtered),
        industry_distribution: industry_distribution(&filtered, limits.top_industries),
        education_distribution: education_distribution(&filtered),
        remote_slices: remote.chart_slices(),
        remote_distribution: remote,
        metadata: DashboardMetadata {
            generated_at: Utc::now().to_rfc3339(),
            active_filters: filter.clone(),
        },
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

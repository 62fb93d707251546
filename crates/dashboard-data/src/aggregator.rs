//! Summary statistics over a (possibly filtered) slice of job records.
//!
//! Every function here is pure: it borrows the records, never mutates them
//! and keeps no state between calls. Groups are reported in order of first
//! appearance unless a function sorts them, and every sort is stable so
//! that ties keep first-appearance order.

use std::borrow::Cow;
use std::collections::{BTreeSet, HashMap, HashSet};

use dashboard_core::formatting::{percentage, rounded_mean};
use dashboard_core::models::{
    EducationShare, ExperienceSalary, ExperienceShare, IndustryStat, JobField, JobRecord,
    RemoteDistribution, SkillStat, WorkArrangement,
};

/// Default length of the top-skills ranking.
pub const DEFAULT_TOP_SKILLS: usize = 10;

/// Default length of the industry breakdown.
pub const DEFAULT_TOP_INDUSTRIES: usize = 8;

/// Experience code → display label, in canonical display order.
pub const EXPERIENCE_LABELS: [(&str, &str); 4] = [
    ("EN", "Entry Level"),
    ("MI", "Mid Level"),
    ("SE", "Senior"),
    ("EX", "Executive"),
];

/// Display label for an experience code; unknown codes pass through.
pub fn experience_label(code: &str) -> &str {
    EXPERIENCE_LABELS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
        .unwrap_or(code)
}

/// Position of `label` in the canonical order; unknown labels sort last.
fn experience_rank(label: &str) -> usize {
    EXPERIENCE_LABELS
        .iter()
        .position(|(_, l)| *l == label)
        .unwrap_or(EXPERIENCE_LABELS.len())
}

// ── SalaryStats ───────────────────────────────────────────────────────────────

/// Running count and salary totals for one group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalaryStats {
    pub count: usize,
    pub total: f64,
    pub min: f64,
    pub max: f64,
}

impl Default for SalaryStats {
    fn default() -> Self {
        Self {
            count: 0,
            total: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }
}

impl SalaryStats {
    /// Add one posting's salary to the running totals.
    pub fn add(&mut self, salary: f64) {
        self.count += 1;
        self.total += salary;
        self.min = self.min.min(salary);
        self.max = self.max.max(salary);
    }

    /// Rounded mean salary. Groups always hold at least one record, so the
    /// empty case reports `0`.
    pub fn rounded_average(&self) -> i64 {
        rounded_mean(self.total, self.count).unwrap_or(0)
    }
}

// ── Grouping ──────────────────────────────────────────────────────────────────

/// Group `records` under every key produced by `keys`, folding each record
/// into its group's accumulator.
///
/// A record may land in several groups (one per key it yields). Groups are
/// returned in order of first appearance.
pub fn group_by<'a, A, I, K, F>(
    records: &'a [JobRecord],
    keys: K,
    mut fold: F,
) -> Vec<(&'a str, A)>
where
    A: Default,
    I: IntoIterator<Item = &'a str>,
    K: Fn(&'a JobRecord) -> I,
    F: FnMut(&mut A, &'a JobRecord),
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut groups: Vec<(&'a str, A)> = Vec::new();

    for record in records {
        for key in keys(record) {
            let slot = *index.entry(key).or_insert_with(|| {
                groups.push((key, A::default()));
                groups.len() - 1
            });
            fold(&mut groups[slot].1, record);
        }
    }

    groups
}

/// [`group_by`] with exactly one key per record, accumulating salaries.
fn salary_groups<'a>(
    records: &'a [JobRecord],
    key: impl Fn(&'a JobRecord) -> &'a str,
) -> Vec<(&'a str, SalaryStats)> {
    group_by(
        records,
        |r| std::iter::once(key(r)),
        |stats: &mut SalaryStats, r| stats.add(r.salary_usd),
    )
}

/// Stable sort by descending count.
fn sort_by_count_desc<T>(rows: &mut [T], count: impl Fn(&T) -> usize) {
    rows.sort_by(|a, b| count(b).cmp(&count(a)));
}

// ── Summaries ─────────────────────────────────────────────────────────────────

/// Distinct values of `field`, ascending.
pub fn unique_values(records: &[JobRecord], field: JobField) -> Vec<String> {
    records
        .iter()
        .map(|r| r.value(field))
        .collect::<BTreeSet<Cow<'_, str>>>()
        .into_iter()
        .map(Cow::into_owned)
        .collect()
}

/// Number of distinct values of `field`.
pub fn count_distinct(records: &[JobRecord], field: JobField) -> usize {
    records
        .iter()
        .map(|r| r.value(field))
        .collect::<HashSet<Cow<'_, str>>>()
        .len()
}

pub fn unique_companies(records: &[JobRecord]) -> usize {
    count_distinct(records, JobField::CompanyName)
}

pub fn unique_locations(records: &[JobRecord]) -> usize {
    count_distinct(records, JobField::CompanyLocation)
}

pub fn unique_industries(records: &[JobRecord]) -> usize {
    count_distinct(records, JobField::Industry)
}

/// Rounded mean salary; `None` for an empty slice.
pub fn average_salary(records: &[JobRecord]) -> Option<i64> {
    let total: f64 = records.iter().map(|r| r.salary_usd).sum();
    rounded_mean(total, records.len())
}

/// Most frequently required skills with their mean salary.
///
/// A posting counts once towards every skill it lists.
pub fn top_skills(records: &[JobRecord], limit: usize) -> Vec<SkillStat> {
    let mut skills: Vec<SkillStat> = group_by(
        records,
        |r| r.skills(),
        |stats: &mut SalaryStats, r| stats.add(r.salary_usd),
    )
    .into_iter()
    .map(|(skill, stats)| SkillStat {
        skill: skill.to_string(),
        count: stats.count,
        avg_salary: stats.rounded_average(),
    })
    .collect();

    sort_by_count_desc(&mut skills, |s| s.count);
    skills.truncate(limit);
    skills
}

/// Salary range per experience level, Entry → Executive, unknown levels last.
pub fn salary_by_experience(records: &[JobRecord]) -> Vec<ExperienceSalary> {
    let mut levels: Vec<ExperienceSalary> =
        salary_groups(records, |r| r.experience_level.as_str())
            .into_iter()
            .map(|(code, stats)| ExperienceSalary {
                level: experience_label(code).to_string(),
                avg_salary: stats.rounded_average(),
                min_salary: stats.min,
                max_salary: stats.max,
            })
            .collect();

    levels.sort_by_key(|l| experience_rank(&l.level));
    levels
}

/// Posting count and mean salary per industry, most common first.
pub fn industry_distribution(records: &[JobRecord], limit: usize) -> Vec<IndustryStat> {
    let mut industries: Vec<IndustryStat> =
        salary_groups(records, |r| r.industry.as_str())
            .into_iter()
            .map(|(industry, stats)| IndustryStat {
                industry: industry.to_string(),
                count: stats.count,
                avg_salary: stats.rounded_average(),
            })
            .collect();

    sort_by_count_desc(&mut industries, |i| i.count);
    industries.truncate(limit);
    industries
}

/// Share of postings per required education level, most common first.
pub fn education_distribution(records: &[JobRecord]) -> Vec<EducationShare> {
    let total = records.len() as f64;
    let mut shares: Vec<EducationShare> =
        salary_groups(records, |r| r.education_required.as_str())
            .into_iter()
            .map(|(education, stats)| EducationShare {
                education: education.to_string(),
                count: stats.count,
                percentage: percentage(stats.count as f64, total).unwrap_or(0),
            })
            .collect();

    sort_by_count_desc(&mut shares, |s| s.count);
    shares
}

/// Share of postings per experience level, most common first.
pub fn experience_distribution(records: &[JobRecord]) -> Vec<ExperienceShare> {
    let total = records.len() as f64;
    let mut shares: Vec<ExperienceShare> =
        salary_groups(records, |r| r.experience_level.as_str())
            .into_iter()
            .map(|(code, stats)| ExperienceShare {
                level: experience_label(code).to_string(),
                count: stats.count,
                percentage: percentage(stats.count as f64, total).unwrap_or(0),
            })
            .collect();

    sort_by_count_desc(&mut shares, |s| s.count);
    shares
}

/// Count postings per remote-work bucket.
pub fn remote_distribution(records: &[JobRecord]) -> RemoteDistribution {
    records
        .iter()
        .map(|r| WorkArrangement::from_ratio(r.remote_ratio))
        .fold(RemoteDistribution::default(), |mut dist, arrangement| {
            dist.add(arrangement);
            dist
        })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

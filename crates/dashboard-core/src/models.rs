use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

// ── JobField ──────────────────────────────────────────────────────────────────

/// One column of the job postings dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobField {
    JobId,
    JobTitle,
    SalaryUsd,
    SalaryCurrency,
    ExperienceLevel,
    EmploymentType,
    CompanyLocation,
    CompanySize,
    EmployeeResidence,
    RemoteRatio,
    RequiredSkills,
    EducationRequired,
    YearsExperience,
    Industry,
    PostingDate,
    ApplicationDeadline,
    JobDescriptionLength,
    BenefitsScore,
    CompanyName,
}

/// Header name → field lookup, in canonical column order.
const HEADER_TABLE: [(&str, JobField); 19] = [
    ("job_id", JobField::JobId),
    ("job_title", JobField::JobTitle),
    ("salary_usd", JobField::SalaryUsd),
    ("salary_currency", JobField::SalaryCurrency),
    ("experience_level", JobField::ExperienceLevel),
    ("employment_type", JobField::EmploymentType),
    ("company_location", JobField::CompanyLocation),
    ("company_size", JobField::CompanySize),
    ("employee_residence", JobField::EmployeeResidence),
    ("remote_ratio", JobField::RemoteRatio),
    ("required_skills", JobField::RequiredSkills),
    ("education_required", JobField::EducationRequired),
    ("years_experience", JobField::YearsExperience),
    ("industry", JobField::Industry),
    ("posting_date", JobField::PostingDate),
    ("application_deadline", JobField::ApplicationDeadline),
    ("job_description_length", JobField::JobDescriptionLength),
    ("benefits_score", JobField::BenefitsScore),
    ("company_name", JobField::CompanyName),
];

impl JobField {
    /// Every field, in the column order of the published dataset.
    pub const ALL: [JobField; 19] = [
        JobField::JobId,
        JobField::JobTitle,
        JobField::SalaryUsd,
        JobField::SalaryCurrency,
        JobField::ExperienceLevel,
        JobField::EmploymentType,
        JobField::CompanyLocation,
        JobField::CompanySize,
        JobField::EmployeeResidence,
        JobField::RemoteRatio,
        JobField::RequiredSkills,
        JobField::EducationRequired,
        JobField::YearsExperience,
        JobField::Industry,
        JobField::PostingDate,
        JobField::ApplicationDeadline,
        JobField::JobDescriptionLength,
        JobField::BenefitsScore,
        JobField::CompanyName,
    ];

    /// Resolve a CSV header name to its field. Exact, case-sensitive match.
    pub fn from_header(name: &str) -> Option<JobField> {
        HEADER_TABLE
            .iter()
            .find(|(header, _)| *header == name)
            .map(|(_, field)| *field)
    }

    /// The CSV header name for this field.
    pub fn as_str(self) -> &'static str {
        HEADER_TABLE
            .iter()
            .find(|(_, field)| *field == self)
            .map(|(header, _)| *header)
            .unwrap_or("")
    }

    /// Whether the column is coerced to a number on load.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            JobField::SalaryUsd
                | JobField::RemoteRatio
                | JobField::YearsExperience
                | JobField::JobDescriptionLength
                | JobField::BenefitsScore
        )
    }
}

impl fmt::Display for JobField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── JobRecord ─────────────────────────────────────────────────────────────────

/// One job posting, i.e. one accepted data row of the CSV file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub job_id: String,
    pub job_title: String,
    /// Annual salary in US dollars; `0.0` when the source value was not numeric.
    pub salary_usd: f64,
    pub salary_currency: String,
    /// Experience code, normally one of `EN`, `MI`, `SE`, `EX`.
    pub experience_level: String,
    pub employment_type: String,
    pub company_location: String,
    pub company_size: String,
    pub employee_residence: String,
    /// Share of remote work, expected to be 0, 50 or 100.
    pub remote_ratio: f64,
    /// Comma-separated skill list, see [`JobRecord::skills`].
    pub required_skills: String,
    pub education_required: String,
    pub years_experience: f64,
    pub industry: String,
    pub posting_date: String,
    pub application_deadline: String,
    pub job_description_length: f64,
    pub benefits_score: f64,
    pub company_name: String,
}

/// Mutable access to one field of a [`JobRecord`], typed by column kind.
pub enum FieldSlot<'a> {
    Text(&'a mut String),
    Number(&'a mut f64),
}

impl JobRecord {
    /// Stringified value of `field`.
    ///
    /// Numbers use `f64`'s `Display`, so `100000.0` becomes `"100000"`.
    pub fn value(&self, field: JobField) -> Cow<'_, str> {
        match field {
            JobField::JobId => Cow::Borrowed(&self.job_id),
            JobField::JobTitle => Cow::Borrowed(&self.job_title),
            JobField::SalaryUsd => Cow::Owned(self.salary_usd.to_string()),
            JobField::SalaryCurrency => Cow::Borrowed(&self.salary_currency),
            JobField::ExperienceLevel => Cow::Borrowed(&self.experience_level),
            JobField::EmploymentType => Cow::Borrowed(&self.employment_type),
            JobField::CompanyLocation => Cow::Borrowed(&self.company_location),
            JobField::CompanySize => Cow::Borrowed(&self.company_size),
            JobField::EmployeeResidence => Cow::Borrowed(&self.employee_residence),
            JobField::RemoteRatio => Cow::Owned(self.remote_ratio.to_string()),
            JobField::RequiredSkills => Cow::Borrowed(&self.required_skills),
            JobField::EducationRequired => Cow::Borrowed(&self.education_required),
            JobField::YearsExperience => Cow::Owned(self.years_experience.to_string()),
            JobField::Industry => Cow::Borrowed(&self.industry),
            JobField::PostingDate => Cow::Borrowed(&self.posting_date),
            JobField::ApplicationDeadline => Cow::Borrowed(&self.application_deadline),
            JobField::JobDescriptionLength => {
                Cow::Owned(self.job_description_length.to_string())
            }
            JobField::BenefitsScore => Cow::Owned(self.benefits_score.to_string()),
            JobField::CompanyName => Cow::Borrowed(&self.company_name),
        }
    }

    /// Mutable slot for `field`, used when building a record from a CSV row.
    pub fn slot_mut(&mut self, field: JobField) -> FieldSlot<'_> {
        match field {
            JobField::JobId => FieldSlot::Text(&mut self.job_id),
            JobField::JobTitle => FieldSlot::Text(&mut self.job_title),
            JobField::SalaryUsd => FieldSlot::Number(&mut self.salary_usd),
            JobField::SalaryCurrency => FieldSlot::Text(&mut self.salary_currency),
            JobField::ExperienceLevel => FieldSlot::Text(&mut self.experience_level),
            JobField::EmploymentType => FieldSlot::Text(&mut self.employment_type),
            JobField::CompanyLocation => FieldSlot::Text(&mut self.company_location),
            JobField::CompanySize => FieldSlot::Text(&mut self.company_size),
            JobField::EmployeeResidence => FieldSlot::Text(&mut self.employee_residence),
            JobField::RemoteRatio => FieldSlot::Number(&mut self.remote_ratio),
            JobField::RequiredSkills => FieldSlot::Text(&mut self.required_skills),
            JobField::EducationRequired => FieldSlot::Text(&mut self.education_required),
            JobField::YearsExperience => FieldSlot::Number(&mut self.years_experience),
            JobField::Industry => FieldSlot::Text(&mut self.industry),
            JobField::PostingDate => FieldSlot::Text(&mut self.posting_date),
            JobField::ApplicationDeadline => FieldSlot::Text(&mut self.application_deadline),
            JobField::JobDescriptionLength => {
                FieldSlot::Number(&mut self.job_description_length)
            }
            JobField::BenefitsScore => FieldSlot::Number(&mut self.benefits_score),
            JobField::CompanyName => FieldSlot::Text(&mut self.company_name),
        }
    }

    /// Skills listed in `required_skills`, split on commas and trimmed.
    ///
    /// An empty `required_skills` yields a single empty skill, matching how the
    /// column is grouped.
    pub fn skills(&self) -> impl Iterator<Item = &str> {
        self.required_skills.split(',').map(str::trim)
    }
}

// ── Summary rows ──────────────────────────────────────────────────────────────

/// Occurrence count and mean salary for one skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillStat {
    pub skill: String,
    pub count: usize,
    pub avg_salary: i64,
}

/// Salary range for one experience level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceSalary {
    /// Display label, e.g. `"Senior"`, or the raw code when unknown.
    pub level: String,
    pub avg_salary: i64,
    pub min_salary: f64,
    pub max_salary: f64,
}

/// Posting count and mean salary for one industry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryStat {
    pub industry: String,
    pub count: usize,
    pub avg_salary: i64,
}

/// Share of postings requiring one education level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationShare {
    pub education: String,
    pub count: usize,
    pub percentage: i64,
}

/// Share of postings at one experience level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceShare {
    pub level: String,
    pub count: usize,
    pub percentage: i64,
}

/// Remote-work bucket of a posting, derived from `remote_ratio`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkArrangement {
    FullyRemote,
    Hybrid,
    OnSite,
}

impl WorkArrangement {
    /// `100` is fully remote, `0` is on-site, anything else is hybrid.
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio == 100.0 {
            WorkArrangement::FullyRemote
        } else if ratio == 0.0 {
            WorkArrangement::OnSite
        } else {
            WorkArrangement::Hybrid
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WorkArrangement::FullyRemote => "Fully Remote",
            WorkArrangement::Hybrid => "Hybrid",
            WorkArrangement::OnSite => "On-site",
        }
    }
}

/// One non-empty slice of the work-type chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteSlice {
    pub name: String,
    pub value: usize,
}

/// Posting counts per [`WorkArrangement`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteDistribution {
    pub remote: usize,
    pub hybrid: usize,
    pub onsite: usize,
}

impl RemoteDistribution {
    pub fn add(&mut self, arrangement: WorkArrangement) {
        match arrangement {
            WorkArrangement::FullyRemote => self.remote += 1,
            WorkArrangement::Hybrid => self.hybrid += 1,
            WorkArrangement::OnSite => self.onsite += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.remote + self.hybrid + self.onsite
    }

    /// Rounded percentage of fully remote postings; `None` when empty.
    pub fn remote_percentage(&self) -> Option<i64> {
        crate::formatting::percentage(self.remote as f64, self.total() as f64)
    }

    /// Chart-facing buckets in fixed order, zero buckets omitted.
    pub fn chart_slices(&self) -> Vec<RemoteSlice> {
        [
            (WorkArrangement::FullyRemote, self.remote),
            (WorkArrangement::Hybrid, self.hybrid),
            (WorkArrangement::OnSite, self.onsite),
        ]
        .into_iter()
        .filter(|(_, value)| *value > 0)
        .map(|(arrangement, value)| RemoteSlice {
            name: arrangement.label().to_string(),
            value,
        })
        .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_header_round_trips_every_field() {
        for field in JobField::ALL {
            assert_eq!(JobField::from_header(field.as_str()), Some(field));
        }
    }

    #[test]
    fn test_from_header_unknown() {
        assert_eq!(JobField::from_header("salary"), None);
        assert_eq!(JobField::from_header("Job_Id"), None);
    }

    #[test]
    fn test_numeric_fields_match_slots() {
        let mut record = JobRecord::default();
        for field in JobField::ALL {
            let is_number_slot = matches!(record.slot_mut(field), FieldSlot::Number(_));
            assert_eq!(is_number_slot, field.is_numeric(), "{field}");
        }
    }

    #[test]
    fn test_value_formats_numbers_without_trailing_zero() {
        let record = JobRecord {
            salary_usd: 100_000.0,
            benefits_score: 7.5,
            ..Default::default()
        };
        assert_eq!(record.value(JobField::SalaryUsd), "100000");
        assert_eq!(record.value(JobField::BenefitsScore), "7.5");
    }

    #[test]
    fn test_value_returns_text_fields() {
        let record = JobRecord {
            industry: "Finance".to_string(),
            ..Default::default()
        };
        assert_eq!(record.value(JobField::Industry), "Finance");
    }

    #[test]
    fn test_skills_are_trimmed() {
        let record = JobRecord {
            required_skills: "Python,  SQL ,Rust".to_string(),
            ..Default::default()
        };
        let skills: Vec<&str> = record.skills().collect();
        assert_eq!(skills, vec!["Python", "SQL", "Rust"]);
    }

    // ── WorkArrangement / RemoteDistribution ──────────────────────────────

    #[test]
    fn test_work_arrangement_from_ratio() {
        assert_eq!(WorkArrangement::from_ratio(100.0), WorkArrangement::FullyRemote);
        assert_eq!(WorkArrangement::from_ratio(0.0), WorkArrangement::OnSite);
        assert_eq!(WorkArrangement::from_ratio(50.0), WorkArrangement::Hybrid);
        assert_eq!(WorkArrangement::from_ratio(150.0), WorkArrangement::Hybrid);
        assert_eq!(WorkArrangement::from_ratio(-5.0), WorkArrangement::Hybrid);
    }

    #[test]
    fn test_chart_slices_omit_empty_buckets() {
        let dist = RemoteDistribution {
            remote: 3,
            hybrid: 0,
            onsite: 1,
        };
        let slices = dist.chart_slices();
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].name, "Fully Remote");
        assert_eq!(slices[0].value, 3);
        assert_eq!(slices[1].name, "On-site");
    }

    #[test]
    fn test_remote_percentage() {
        let dist = RemoteDistribution {
            remote: 1,
            hybrid: 1,
            onsite: 1,
        };
        assert_eq!(dist.remote_percentage(), Some(33));
        assert_eq!(RemoteDistribution::default().remote_percentage(), None);
    }

    #[test]
    fn test_skill_stat_serializes_camel_case() {
        let stat = SkillStat {
            skill: "Python".to_string(),
            count: 2,
            avg_salary: 150_000,
        };
        let json = serde_json::to_value(&stat).unwrap();
        assert_eq!(json["avgSalary"], 150_000);
    }
}

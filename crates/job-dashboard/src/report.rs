//! Plain-text rendering of a [`Dashboard`].

use std::fmt::Write;

use dashboard_core::formatting::{format_count, format_dollars, format_percent, format_salary_k};
use dashboard_data::analysis::Dashboard;
use dashboard_data::filters::JobFilter;

/// Render `dashboard` as a text report.
pub fn render_text(dashboard: &Dashboard) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_report(&mut out, dashboard);
    out
}

fn write_report(out: &mut String, d: &Dashboard) -> std::fmt::Result {
    writeln!(out, "AI Job Market Analytics")?;
    writeln!(
        out,
        "Analyzing {} of {} jobs",
        format_count(d.filtered_jobs),
        format_count(d.total_jobs)
    )?;
    let filters = describe_filters(&d.metadata.active_filters);
    if !filters.is_empty() {
        writeln!(out, "Filters: {}", filters)?;
    }
    writeln!(out)?;

    let s = &d.stats;
    writeln!(out, "{:<14}{}", "Total Jobs", format_count(s.total_jobs))?;
    writeln!(out, "{:<14}{}", "Avg Salary", format_salary_k(s.avg_salary))?;
    writeln!(out, "{:<14}{}", "Remote Jobs", format_percent(s.remote_percentage))?;
    writeln!(
        out,
        "{:<14}{}",
        "Top Skill",
        s.top_skill.as_deref().unwrap_or("N/A")
    )?;
    writeln!(
        out,
        "{:<14}{} companies, {} locations, {} industries",
        "Coverage", s.unique_companies, s.unique_locations, s.unique_industries
    )?;

    if d.is_empty() {
        writeln!(out)?;
        writeln!(out, "No jobs match the current filters.")?;
        return Ok(());
    }

    section(out, "Salary by Experience")?;
    for row in &d.salary_by_experience {
        writeln!(
            out,
            "  {:<14}avg ${:>9}  min ${:>9}  max ${:>9}",
            row.level,
            format_dollars(row.avg_salary as f64),
            format_dollars(row.min_salary),
            format_dollars(row.max_salary)
        )?;
    }

    section(out, "Experience Levels")?;
    for row in &d.experience_distribution {
        writeln!(
            out,
            "  {:<14}{:>7}  {:>3}%",
            row.level,
            format_count(row.count),
            row.percentage
        )?;
    }

    section(out, "Work Type Distribution")?;
    let total = d.remote_distribution.total() as f64;
    for slice in &d.remote_slices {
        let share = (slice.value as f64 / total * 100.0).round();
        writeln!(
            out,
            "  {:<14}{:>7}  {:>3}%",
            slice.name,
            format_count(slice.value),
            share
        )?;
    }

    section(out, "Top Skills")?;
    for (rank, row) in d.top_skills.iter().enumerate() {
        writeln!(
            out,
            "  {:>2}. {:<24}{:>7}  avg ${}",
            rank + 1,
            row.skill,
            format_count(row.count),
            format_dollars(row.avg_salary as f64)
        )?;
    }

    section(out, "Industries")?;
    for row in &d.industry_distribution {
        writeln!(
            out,
            "  {:<24}{:>7}  avg ${}",
            row.industry,
            format_count(row.count),
            format_dollars(row.avg_salary as f64)
        )?;
    }

    section(out, "Education")?;
    for row in &d.education_distribution {
        writeln!(
            out,
            "  {:<24}{:>7}  {:>3}%",
            row.education,
            format_count(row.count),
            row.percentage
        )?;
    }

    Ok(())
}

fn section(out: &mut String, title: &str) -> std::fmt::Result {
    writeln!(out)?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", "-".repeat(title.len()))
}

/// `"industry=Tech, role=ML Engineer"`, empty when nothing is selected.
fn describe_filters(filter: &JobFilter) -> String {
    [
        ("experience", &filter.experience_level),
        ("location", &filter.location),
        ("industry", &filter.industry),
        ("role", &filter.role),
    ]
    .into_iter()
    .filter_map(|(name, value)| value.as_ref().map(|v| format!("{}={}", name, v)))
    .collect::<Vec<_>>()
    .join(", ")
}

// ── Tests ──────────────────────────────────────────────────────────────────────

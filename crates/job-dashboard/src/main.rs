mod bootstrap;
mod report;

use anyhow::{Context, Result};
use dashboard_core::settings::Settings;
use dashboard_data::analysis::{build_dashboard, SummaryLimits};
use dashboard_data::filters::JobFilter;
use dashboard_data::reader::load_records;

fn main() -> Result<()> {
    let (settings, config_warnings) = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    for warning in &config_warnings {
        tracing::warn!("{}", warning);
    }

    tracing::info!("Job Dashboard v{} starting", env!("CARGO_PKG_VERSION"));

    let data_path = bootstrap::discover_data_path(settings.data.as_deref())
        .context("no job postings dataset found; pass --data <PATH>")?;

    let records = load_records(&data_path)?;
    tracing::info!(
        "Loaded {} job listings from {}",
        records.len(),
        data_path.display()
    );

    let filter = JobFilter::default()
        .with_experience_level(settings.experience_level.as_str())
        .with_location(settings.location.as_str())
        .with_industry(settings.industry.as_str())
        .with_role(settings.role.as_str());

    let limits = SummaryLimits {
        top_skills: settings.top_skills as usize,
        top_industries: settings.top_industries as usize,
    };

    let dashboard = build_dashboard(&records, &filter, limits);

    match settings.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&dashboard)?),
        _ => print!("{}", report::render_text(&dashboard)),
    }

    Ok(())
}

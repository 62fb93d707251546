use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{DashboardError, Result};

/// Directory under the home directory holding dashboard state.
pub const APP_DIR_NAME: &str = ".job-dashboard";

/// Sentinel filter value meaning "do not filter on this field".
pub const ALL: &str = "all";

/// Accepted `--format` values.
const OUTPUT_FORMATS: [&str; 2] = ["text", "json"];

/// Accepted `--top-skills` / `--top-industries` values.
const LIMIT_RANGE: std::ops::RangeInclusive<u32> = 1..=100;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Salary, skill and industry analytics over an AI job postings dataset
#[derive(Parser, Debug, Clone)]
#[command(
    name = "job-dashboard",
    about = "Salary, skill and industry analytics over an AI job postings dataset",
    version
)]
pub struct Settings {
    /// Path to the job postings CSV (discovered if not specified)
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Experience level code to filter on (EN, MI, SE, EX)
    #[arg(long, default_value = ALL)]
    pub experience_level: String,

    /// Company location to filter on
    #[arg(long, default_value = ALL)]
    pub location: String,

    /// Industry to filter on
    #[arg(long, default_value = ALL)]
    pub industry: String,

    /// Job title to filter on
    #[arg(long, default_value = ALL)]
    pub role: String,

    /// Number of skills in the top-skills ranking
    #[arg(long, default_value = "10", value_parser = clap::value_parser!(u32).range(1..=100))]
    pub top_skills: u32,

    /// Number of industries in the industry breakdown
    #[arg(long, default_value = "8", value_parser = clap::value_parser!(u32).range(1..=100))]
    pub top_industries: u32,

    /// Output format
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Persisted last-used parameters saved to `~/.job-dashboard/last_used.json`.
///
/// Filters are deliberately absent: every run starts unfiltered.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_skills: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_industries: Option<u32>,
}

impl LastUsedParams {
    /// Default path of the persisted config file.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Config path rooted at `base_dir`.
    pub fn config_path_in(base_dir: &Path) -> PathBuf {
        base_dir.join(APP_DIR_NAME).join("last_used.json")
    }

    /// Load persisted params from an explicit path.
    /// Returns `Default` when the file is absent, unreadable or invalid.
    pub fn load_from(path: &Path) -> Self {
        Self::load_checked(path).unwrap_or_default()
    }

    /// Load and validate persisted params. An absent file is `Default`.
    pub fn load_checked(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| DashboardError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let params: Self = serde_json::from_str(&content)?;
        params.validate()?;
        Ok(params)
    }

    /// Reject values the command line itself would not accept.
    pub fn validate(&self) -> Result<()> {
        if let Some(format) = &self.format {
            if !OUTPUT_FORMATS.contains(&format.as_str()) {
                return Err(DashboardError::Config(format!(
                    "saved format {:?} is not one of {}",
                    format,
                    OUTPUT_FORMATS.join(", ")
                )));
            }
        }
        for (name, value) in [
            ("top_skills", self.top_skills),
            ("top_industries", self.top_industries),
        ] {
            match value {
                Some(v) if !LIMIT_RANGE.contains(&v) => {
                    return Err(DashboardError::Config(format!(
                        "saved {} {} is outside {}..={}",
                        name,
                        v,
                        LIMIT_RANGE.start(),
                        LIMIT_RANGE.end()
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Atomically write params to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the config file at `path` if it exists.
    pub fn clear_at(path: &Path) -> Result<()> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments, merge with last-used params where no explicit CLI
    /// value was provided, and persist the result.
    ///
    /// Problems with the last-used file never abort the run. They come back
    /// as warnings for the caller to log once logging is installed.
    pub fn load_with_last_used() -> (Self, Vec<DashboardError>) {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Same as [`Settings::load_with_last_used`] with explicit arguments and
    /// config path.
    pub fn load_with_last_used_impl(
        args: Vec<std::ffi::OsString>,
        config_path: &Path,
    ) -> (Self, Vec<DashboardError>) {
        let matches = Settings::command().get_matches_from(args.clone());
        let mut settings = Settings::parse_from(args);
        let mut warnings = Vec::new();

        if settings.clear {
            if let Err(e) = LastUsedParams::clear_at(config_path) {
                warnings.push(DashboardError::Config(format!(
                    "could not clear {}: {}",
                    config_path.display(),
                    e
                )));
            }
            return (settings.apply_debug_flag(), warnings);
        }

        let last = LastUsedParams::load_checked(config_path).unwrap_or_else(|e| {
            warnings.push(e);
            LastUsedParams::default()
        });

        // CLI always wins over persisted values.
        if settings.data.is_none() {
            match last.data {
                Some(path) if path.is_file() => settings.data = Some(path),
                Some(path) => warnings.push(DashboardError::Config(format!(
                    "saved data path {} no longer exists, searching default locations",
                    path.display()
                ))),
                None => {}
            }
        }
        if !is_arg_explicitly_set(&matches, "format") {
            if let Some(v) = last.format {
                settings.format = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "top_skills") {
            if let Some(v) = last.top_skills {
                settings.top_skills = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "top_industries") {
            if let Some(v) = last.top_industries {
                settings.top_industries = v;
            }
        }

        settings = settings.apply_debug_flag();

        let params = LastUsedParams::from(&settings);
        if let Err(e) = params.save_to(config_path) {
            warnings.push(DashboardError::Config(format!(
                "could not persist settings to {}: {}",
                config_path.display(),
                e
            )));
        }

        (settings, warnings)
    }

    /// `--debug` overrides the log level.
    fn apply_debug_flag(mut self) -> Self {
        if self.debug {
            self.log_level = "DEBUG".to_string();
        }
        self
    }
}

// ── Conversion ─────────────────────────────────────────────────────────────────

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            data: s.data.clone(),
            format: Some(s.format.clone()),
            top_skills: Some(s.top_skills),
            top_industries: Some(s.top_industries),
        }
    }
}

/// Returns `true` when `name` was supplied explicitly on the command line.
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

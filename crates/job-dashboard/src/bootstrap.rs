use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use dashboard_core::error::{DashboardError, Result};
use dashboard_core::settings::APP_DIR_NAME;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// File name looked up when no `--data` path is given.
pub const DATASET_FILE_NAME: &str = "ai_job_dataset.csv";

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Ensure `~/.job-dashboard/` exists.
pub fn ensure_directories() -> anyhow::Result<()> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(home.join(APP_DIR_NAME))?;
    Ok(())
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// `log_level` is mapped to a [`tracing_subscriber::EnvFilter`] directive,
/// falling back to `"info"`. Output goes to `log_file` when given (appending,
/// no colours), otherwise to stderr.
pub fn setup_logging(log_level: &str, log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(tracing_level(log_level)).unwrap_or_else(|_| EnvFilter::new("info"));

    let (stderr_layer, file_layer) = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let layer = fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file));
            (None, Some(layer))
        }
        None => {
            let layer = fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr);
            (Some(layer), None)
        }
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(())
}

/// Map CLI level names to `tracing` directives.
fn tracing_level(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" | "WARN" => "warn".to_string(),
        "ERROR" => "error".to_string(),
        _ => log_level.to_lowercase(),
    }
}

// ── Data-path discovery ────────────────────────────────────────────────────────

/// Locate the job postings CSV.
///
/// An explicit path must exist. Otherwise the first existing candidate wins:
/// 1. `./data/ai_job_dataset.csv`
/// 2. `./public/data/ai_job_dataset.csv`
/// 3. `~/.job-dashboard/ai_job_dataset.csv`
pub fn discover_data_path(explicit: Option<&Path>) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    discover_data_path_in(explicit, &cwd, dirs::home_dir().as_deref())
}

/// [`discover_data_path`] with the working and home directories supplied.
pub fn discover_data_path_in(
    explicit: Option<&Path>,
    cwd: &Path,
    home: Option<&Path>,
) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        return Err(DashboardError::DataPathNotFound(path.to_path_buf()));
    }

    let mut candidates = vec![
        cwd.join("data").join(DATASET_FILE_NAME),
        cwd.join("public").join("data").join(DATASET_FILE_NAME),
    ];
    if let Some(home) = home {
        candidates.push(home.join(APP_DIR_NAME).join(DATASET_FILE_NAME));
    }

    candidates
        .into_iter()
        .find(|p| p.is_file())
        .ok_or_else(|| DashboardError::DataPathNotFound(cwd.join("data").join(DATASET_FILE_NAME)))
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "job_id\n").unwrap();
    }

    #[test]
    fn test_tracing_level_mapping() {
        assert_eq!(tracing_level("DEBUG"), "debug");
        assert_eq!(tracing_level("INFO"), "info");
        assert_eq!(tracing_level("WARNING"), "warn");
        assert_eq!(tracing_level("error"), "error");
        assert_eq!(tracing_level("TRACE"), "trace");
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().expect("tempdir");
        let csv = tmp.path().join("jobs.csv");
        touch(&csv);

        let found = discover_data_path_in(Some(&csv), tmp.path(), None).unwrap();
        assert_eq!(found, csv);
    }

    #[test]
    fn test_discover_explicit_path_missing() {
        let tmp = TempDir::new().expect("tempdir");
        let csv = tmp.path().join("nope.csv");

        let err = discover_data_path_in(Some(&csv), tmp.path(), None).unwrap_err();
        assert!(matches!(err, DashboardError::DataPathNotFound(p) if p == csv));
    }

    #[test]
    fn test_discover_prefers_data_dir() {
        let tmp = TempDir::new().expect("tempdir");
        let data = tmp.path().join("data").join(DATASET_FILE_NAME);
        let public = tmp.path().join("public").join("data").join(DATASET_FILE_NAME);
        touch(&data);
        touch(&public);

        let found = discover_data_path_in(None, tmp.path(), None).unwrap();
        assert_eq!(found, data);
    }

    #[test]
    fn test_discover_falls_back_to_home() {
        let cwd = TempDir::new().expect("tempdir");
        let home = TempDir::new().expect("tempdir");
        let in_home = home.path().join(APP_DIR_NAME).join(DATASET_FILE_NAME);
        touch(&in_home);

        let found = discover_data_path_in(None, cwd.path(), Some(home.path())).unwrap();
        assert_eq!(found, in_home);
    }

    #[test]
    fn test_discover_none_found() {
        let cwd = TempDir::new().expect("tempdir");
        let home = TempDir::new().expect("tempdir");

        let result = discover_data_path_in(None, cwd.path(), Some(home.path()));
        assert!(matches!(result, Err(DashboardError::DataPathNotFound(_))));
    }
}

//! CSV loading for the job dashboard.
//!
//! Converts the raw text of the job postings file into typed [`JobRecord`]s.
//! Parsing never fails: malformed rows are dropped and unparseable numbers
//! become `0.0`.

use std::path::Path;

use dashboard_core::error::{DashboardError, Result};
use dashboard_core::models::{FieldSlot, JobField, JobRecord};
use tracing::{debug, warn};

// ── ParseStats ────────────────────────────────────────────────────────────────

/// Bookkeeping collected while parsing, used for logging by the loader.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Non-blank data lines seen after the header.
    pub rows_read: usize,
    /// Data lines dropped because their field count did not match the header.
    pub rows_dropped: usize,
    /// Header names that do not correspond to any [`JobField`].
    pub unknown_columns: Vec<String>,
    /// Fields absent from the header; they keep their default value.
    pub missing_columns: Vec<JobField>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Parse CSV text into job records, in input order.
pub fn parse_records(raw_text: &str) -> Vec<JobRecord> {
    parse_records_with_stats(raw_text).0
}

/// Parse CSV text into job records and report what was skipped.
pub fn parse_records_with_stats(raw_text: &str) -> (Vec<JobRecord>, ParseStats) {
    let mut stats = ParseStats::default();
    let mut lines = raw_text.split('\n').filter(|line| !line.trim().is_empty());

    let Some(header_line) = lines.next() else {
        return (Vec::new(), stats);
    };

    let columns: Vec<Option<JobField>> = header_line
        .split(',')
        .map(|name| {
            let name = name.trim();
            let field = JobField::from_header(name);
            if field.is_none() {
                stats.unknown_columns.push(name.to_string());
            }
            field
        })
        .collect();

    stats.missing_columns = JobField::ALL
        .into_iter()
        .filter(|field| !columns.contains(&Some(*field)))
        .collect();

    let mut records = Vec::new();
    for line in lines {
        stats.rows_read += 1;
        let values = split_line(line);
        if values.len() != columns.len() {
            stats.rows_dropped += 1;
            continue;
        }
        records.push(build_record(&columns, values));
    }

    (records, stats)
}

/// Read and parse the CSV file at `path`.
pub fn load_records(path: &Path) -> Result<Vec<JobRecord>> {
    if !path.exists() {
        return Err(DashboardError::DataPathNotFound(path.to_path_buf()));
    }

    let raw_text = std::fs::read_to_string(path).map_err(|source| DashboardError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let (records, stats) = parse_records_with_stats(&raw_text);

    if !stats.unknown_columns.is_empty() {
        warn!(
            "Ignoring unknown columns in {}: {}",
            path.display(),
            stats.unknown_columns.join(", ")
        );
    }
    if !stats.missing_columns.is_empty() {
        let names: Vec<&str> = stats.missing_columns.iter().map(|f| f.as_str()).collect();
        warn!(
            "Columns missing from {}, using defaults: {}",
            path.display(),
            names.join(", ")
        );
    }

    debug!(
        "File {}: {} rows read, {} dropped, {} records",
        path.display(),
        stats.rows_read,
        stats.rows_dropped,
        records.len(),
    );

    Ok(records)
}

/// Lenient float reader for numeric columns.
///
/// Accepts the longest numeric prefix (`"42abc"` → `42.0`) after leading
/// whitespace. No prefix, or a non-finite result, yields `0.0`.
pub fn coerce_number(value: &str) -> f64 {
    let s = value.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut has_digits = end > int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if has_digits || frac_end > frac_start {
            has_digits = true;
            end = frac_end;
        }
    }

    if !has_digits {
        return 0.0;
    }

    // Exponent only counts when followed by at least one digit.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > digits_start {
            end = exp_end;
        }
    }

    match s[..end].parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Split one data line into trimmed fields.
///
/// `"` toggles quoted mode and is dropped; commas inside quotes are literal.
/// There is no escaped-quote support.
fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    fields.push(current.trim().to_string());

    fields
}

/// Assign each value to the field named by its column.
fn build_record(columns: &[Option<JobField>], values: Vec<String>) -> JobRecord {
    let mut record = JobRecord::default();
    for (column, value) in columns.iter().zip(values) {
        let Some(field) = column else {
            continue;
        };
        match record.slot_mut(*field) {
            FieldSlot::Text(slot) => *slot = value,
            FieldSlot::Number(slot) => *slot = coerce_number(&value),
        }
    }
    record
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    const HEADER: &str = "job_id,job_title,salary_usd,salary_currency,experience_level,\
employment_type,company_location,company_size,employee_residence,remote_ratio,\
required_skills,education_required,years_experience,industry,posting_date,\
application_deadline,job_description_length,benefits_score,company_name";

    fn row(id: &str, salary: &str, skills: &str, company: &str) -> String {
        format!(
            "{id},AI Research Scientist,{salary},USD,SE,CT,China,M,China,50,\
{skills},Bachelor,9,Automotive,2024-10-18,2024-11-07,1076,5.9,{company}"
        )
    }

    fn csv(rows: &[String]) -> String {
        let mut text = HEADER.to_string();
        for r in rows {
            text.push('\n');
            text.push_str(r);
        }
        text.push('\n');
        text
    }

    // ── parse_records ─────────────────────────────────────────────────────────

    #[test]
    fn test_parse_preserves_count_and_order() {
        let rows: Vec<String> = (0..5)
            .map(|i| row(&format!("AI{i:05}"), "90376", "Python", "Acme"))
            .collect();
        let records = parse_records(&csv(&rows));

        assert_eq!(records.len(), 5);
        let ids: Vec<&str> = records.iter().map(|r| r.job_id.as_str()).collect();
        assert_eq!(ids, vec!["AI00000", "AI00001", "AI00002", "AI00003", "AI00004"]);
    }

    #[test]
    fn test_parse_typed_fields() {
        let records = parse_records(&csv(&[row("AI00001", "90376", "Python", "Smart Analytics")]));
        let r = &records[0];

        assert_eq!(r.job_title, "AI Research Scientist");
        assert_eq!(r.salary_usd, 90_376.0);
        assert_eq!(r.experience_level, "SE");
        assert_eq!(r.remote_ratio, 50.0);
        assert_eq!(r.years_experience, 9.0);
        assert_eq!(r.job_description_length, 1076.0);
        assert!((r.benefits_score - 5.9).abs() < f64::EPSILON);
        assert_eq!(r.company_name, "Smart Analytics");
        assert_eq!(r.posting_date, "2024-10-18");
    }

    #[test]
    fn test_parse_quoted_field_keeps_comma() {
        let records = parse_records(&csv(&[row(
            "AI00001",
            "100000",
            "\"Tableau, PyTorch, Kubernetes\"",
            "Acme",
        )]));

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].required_skills, "Tableau, PyTorch, Kubernetes");
        assert_eq!(records[0].company_name, "Acme");
    }

    #[test]
    fn test_parse_quotes_are_stripped_not_escaped() {
        // `""` is two toggles, not an escaped quote.
        let records = parse_records(&csv(&[row("AI00001", "1", "Py\"\"thon", "Acme")]));
        assert_eq!(records[0].required_skills, "Python");
    }

    #[test]
    fn test_parse_drops_rows_with_wrong_field_count() {
        let rows = vec![
            row("AI00001", "1", "Python", "Acme"),
            "AI00002,too,few".to_string(),
            row("AI00003", "1", "Python", "Acme") + ",extra",
            row("AI00004", "1", "Python", "Acme"),
        ];
        let (records, stats) = parse_records_with_stats(&csv(&rows));

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].job_id, "AI00001");
        assert_eq!(records[1].job_id, "AI00004");
        assert_eq!(stats.rows_read, 4);
        assert_eq!(stats.rows_dropped, 2);
    }

    #[test]
    fn test_parse_unquoted_comma_splits_field() {
        let rows = vec![row("AI00001", "1", "Python, SQL", "Acme")];
        assert!(parse_records(&csv(&rows)).is_empty());
    }

    #[test]
    fn test_parse_numeric_garbage_becomes_zero() {
        let records = parse_records(&csv(&[row("AI00001", "n/a", "Python", "Acme")]));
        assert_eq!(records[0].salary_usd, 0.0);
        assert!(records[0].salary_usd.is_finite());
    }

    #[test]
    fn test_parse_numeric_garbage_in_every_numeric_column() {
        let line = "AI00001,AI Research Scientist,x,USD,SE,CT,China,M,China,NaN,\
Python,Bachelor,inf,Automotive,2024-10-18,2024-11-07,--1,+.5,Acme";
        let records = parse_records(&csv(&[line.to_string()]));
        let r = &records[0];

        assert_eq!(r.salary_usd, 0.0);
        assert_eq!(r.remote_ratio, 0.0);
        assert_eq!(r.years_experience, 0.0);
        assert_eq!(r.job_description_length, 0.0);
        assert_eq!(r.benefits_score, 0.5);
        for value in [
            r.salary_usd,
            r.remote_ratio,
            r.years_experience,
            r.job_description_length,
            r.benefits_score,
        ] {
            assert!(value.is_finite());
        }
    }

    #[test]
    fn test_parse_skips_blank_lines_and_crlf() {
        let text = format!(
            "{}\r\n\r\n{}\r\n   \n{}\r\n",
            HEADER,
            row("AI00001", "10", "Python", "Acme"),
            row("AI00002", "20", "Python", "Beta Corp")
        );
        let records = parse_records(&text);

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].company_name, "Beta Corp");
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse_records("").is_empty());
        assert!(parse_records("\n\n").is_empty());
        assert!(parse_records(HEADER).is_empty());
    }

    #[test]
    fn test_parse_fields_are_trimmed() {
        let text = "job_id,industry,salary_usd\n  AI1 , Finance ,  120000  \n";
        let records = parse_records(text);
        assert_eq!(records[0].job_id, "AI1");
        assert_eq!(records[0].industry, "Finance");
        assert_eq!(records[0].salary_usd, 120_000.0);
    }

    #[test]
    fn test_parse_reports_unknown_and_missing_columns() {
        let text = "job_id,bonus,industry\nAI1,500,Finance\n";
        let (records, stats) = parse_records_with_stats(text);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].industry, "Finance");
        assert_eq!(records[0].salary_usd, 0.0);
        assert_eq!(stats.unknown_columns, vec!["bonus".to_string()]);
        assert!(stats.missing_columns.contains(&JobField::SalaryUsd));
        assert_eq!(stats.missing_columns.len(), 17);
    }

    // ── coerce_number ─────────────────────────────────────────────────────────

    #[test]
    fn test_coerce_number_plain() {
        assert_eq!(coerce_number("90376"), 90_376.0);
        assert_eq!(coerce_number("-3.5"), -3.5);
        assert_eq!(coerce_number(".5"), 0.5);
        assert_eq!(coerce_number("1e3"), 1000.0);
    }

    #[test]
    fn test_coerce_number_prefix() {
        assert_eq!(coerce_number("42abc"), 42.0);
        assert_eq!(coerce_number("  7.25 years"), 7.25);
        assert_eq!(coerce_number("3e"), 3.0);
        assert_eq!(coerce_number("5."), 5.0);
    }

    #[test]
    fn test_coerce_number_garbage() {
        assert_eq!(coerce_number(""), 0.0);
        assert_eq!(coerce_number("abc"), 0.0);
        assert_eq!(coerce_number("-"), 0.0);
        assert_eq!(coerce_number("."), 0.0);
        assert_eq!(coerce_number("Infinity"), 0.0);
        assert_eq!(coerce_number("1e999"), 0.0);
    }

    // ── load_records ──────────────────────────────────────────────────────────

    #[test]
    fn test_load_records_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ai_job_dataset.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{}", csv(&[row("AI00001", "1", "Python", "Acme")])).unwrap();

        let records = load_records(&path).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_load_records_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.csv");
        let err = load_records(&path).unwrap_err();
        assert!(matches!(err, DashboardError::DataPathNotFound(_)));
    }

    #[test]
    fn test_load_records_directory_is_read_error() {
        let dir = TempDir::new().unwrap();
        let err = load_records(dir.path()).unwrap_err();
        assert!(matches!(err, DashboardError::FileRead { .. }));
    }
}

/// Format a dollar amount as whole dollars with thousands separators.
///
/// Rounds half away from zero, like every other salary figure.
///
/// # Examples
///
/// ```
/// use dashboard_core::formatting::format_dollars;
///
/// assert_eq!(format_dollars(115_349.0), "115,349");
/// assert_eq!(format_dollars(99_999.5), "100,000");
/// assert_eq!(format_dollars(0.0), "0");
/// assert_eq!(format_dollars(-1_250.0), "-1,250");
/// ```
pub fn format_dollars(amount: f64) -> String {
    let rounded = amount.round();
    let digits = group_thousands(rounded.abs() as u64);
    if rounded < 0.0 {
        format!("-{}", digits)
    } else {
        digits
    }
}

/// Format a count with thousands separators.
///
/// ```
/// use dashboard_core::formatting::format_count;
///
/// assert_eq!(format_count(15000), "15,000");
/// assert_eq!(format_count(7), "7");
/// ```
pub fn format_count(count: usize) -> String {
    group_thousands(count as u64)
}

/// Format a rounded salary as thousands of dollars for a stat card.
///
/// ```
/// use dashboard_core::formatting::format_salary_k;
///
/// assert_eq!(format_salary_k(Some(115_349)), "$115k");
/// assert_eq!(format_salary_k(Some(99_500)), "$100k");
/// assert_eq!(format_salary_k(None), "N/A");
/// ```
pub fn format_salary_k(salary: Option<i64>) -> String {
    match salary {
        Some(value) => format!("${}k", (value as f64 / 1000.0).round() as i64),
        None => "N/A".to_string(),
    }
}

/// Format a whole-number percentage, `N/A` when undefined.
///
/// ```
/// use dashboard_core::formatting::format_percent;
///
/// assert_eq!(format_percent(Some(42)), "42%");
/// assert_eq!(format_percent(None), "N/A");
/// ```
pub fn format_percent(value: Option<i64>) -> String {
    match value {
        Some(v) => format!("{}%", v),
        None => "N/A".to_string(),
    }
}

/// Rounded mean of `total` over `count` items; `None` when `count` is zero.
///
/// Rounds half away from zero.
pub fn rounded_mean(total: f64, count: usize) -> Option<i64> {
    if count == 0 {
        return None;
    }
    Some((total / count as f64).round() as i64)
}

/// `round(part / whole * 100)`; `None` when `whole` is zero.
///
/// ```
/// use dashboard_core::formatting::percentage;
///
/// assert_eq!(percentage(2.0, 3.0), Some(67));
/// assert_eq!(percentage(1.0, 3.0), Some(33));
/// assert_eq!(percentage(0.0, 0.0), None);
/// ```
pub fn percentage(part: f64, whole: f64) -> Option<i64> {
    if whole == 0.0 {
        return None;
    }
    Some(((part / whole) * 100.0).round() as i64)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Decimal digits of `n` with a comma before every group of three.
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────

use chrono::{Days, NaiveDate};

/// Accepts `today`, `tomorrow`, `yesterday` (relative to `today`) or `YYYY-MM-DD`.
pub fn parse_natural_date(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let normalized = text.trim().to_lowercase();
    match normalized.as_str() {
        "today" => Some(today),
        "tomorrow" => today.checked_add_days(Days::new(1)),
        "yesterday" => today.checked_sub_days(Days::new(1)),
        _ => NaiveDate::parse_from_str(&normalized, "%Y-%m-%d").ok(),
    }
}

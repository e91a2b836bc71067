//! Display formatting shared by the cart and order views.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

/// Rendered in place of a date that is missing or cannot be parsed.
pub const NOT_AVAILABLE: &str = "N/A";

const ZERO_MONEY: &str = "0.00";
const DISPLAY_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Two-decimal rendering of an amount. Anything missing or non-finite shows
/// as `0.00`.
pub fn format_money(value: Option<f64>) -> String {
    match value {
        Some(amount) if amount.is_finite() => format!("{amount:.2}"),
        _ => ZERO_MONEY.to_string(),
    }
}

/// Locale-style rendering of an ISO-8601 timestamp.
///
/// Timestamps carrying an offset are shown in local time; naive timestamps are
/// shown as given. Missing or unparseable input yields [`NOT_AVAILABLE`].
pub fn format_date(value: Option<&str>) -> String {
    let Some(raw) = value.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return NOT_AVAILABLE.to_string();
    };

    match parse_timestamp(raw) {
        Some(timestamp) => timestamp.format(DISPLAY_FORMAT).to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_offset.with_timezone(&Local).naive_local());
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

//! Indonesian date and time rendering for report output.
//!
//! Dates render as `5 Jan 2024`, timestamps as `05 Jan 2024, 14.30` and times
//! as `14.30`, all in WIB (UTC+7). Missing values render as `-`; strings
//! that cannot be parsed are echoed back unchanged.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, TimeZone, Timelike};
use serde_json::Value;

const PLACEHOLDER: &str = "-";

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

const WIB_OFFSET_SECS: i32 = 7 * 3600;

fn wib() -> FixedOffset {
    FixedOffset::east_opt(WIB_OFFSET_SECS).expect("UTC+7 is a valid offset")
}

fn month_abbr(month: u32) -> &'static str {
    MONTHS[(month as usize).saturating_sub(1) % 12]
}

/// `2024-01-05` (or an RFC 3339 timestamp) → `5 Jan 2024`.
///
/// Unparseable input is echoed back unchanged.
pub fn format_date_indo(date: Option<&str>) -> String {
    let Some(raw) = date.map(str::trim).filter(|s| !s.is_empty()) else {
        return PLACEHOLDER.to_string();
    };
    let parsed = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_instant(raw).map(|dt| dt.date_naive()));
    match parsed {
        Some(d) => format!("{} {} {}", d.day(), month_abbr(d.month()), d.year()),
        None => raw.to_string(),
    }
}

/// Epoch milliseconds or RFC 3339 → `05 Jan 2024, 14.30`.
///
/// A non-empty string that is neither is echoed back, as in
/// [`format_date_indo`].
pub fn format_timestamp(ts: &Value) -> String {
    render(ts, |dt| {
        format!(
            "{:02} {} {}, {:02}.{:02}",
            dt.day(),
            month_abbr(dt.month()),
            dt.year(),
            dt.hour(),
            dt.minute()
        )
    })
}

/// Epoch milliseconds or RFC 3339 → `14.30`. Unparseable strings are echoed.
pub fn format_time_only(ts: &Value) -> String {
    render(ts, |dt| format!("{:02}.{:02}", dt.hour(), dt.minute()))
}

fn render(ts: &Value, fmt: impl FnOnce(DateTime<FixedOffset>) -> String) -> String {
    if let Some(dt) = to_wib(ts) {
        return fmt(dt);
    }
    match ts {
        Value::String(s) if !is_absent(s) => s.trim().to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

fn is_absent(raw: &str) -> bool {
    let raw = raw.trim();
    raw.is_empty() || raw == "0"
}

fn parse_instant(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw).ok()
}

fn to_wib(ts: &Value) -> Option<DateTime<FixedOffset>> {
    let millis = match ts {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?,
        Value::String(s) if !s.trim().is_empty() => match s.trim().parse::<i64>() {
            Ok(millis) => millis,
            Err(_) => return parse_instant(s.trim()).map(|dt| dt.with_timezone(&wib())),
        },
        _ => return None,
    };
    if millis == 0 {
        return None;
    }
    wib().timestamp_millis_opt(millis).single()
}

//! Formatting utilities for download filenames and file sizes.

use std::time::{SystemTime, UNIX_EPOCH};

/// Calendar fields of a Unix timestamp (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DateTime {
    year: i64,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
}

impl DateTime {
    /// Properly calculates year/month/day accounting for leap years.
    fn from_unix(timestamp: u64) -> Self {
        let mut remaining_days = (timestamp / 86400) as i64;
        let secs_of_day = (timestamp % 86400) as u32;

        let mut year = 1970i64;
        loop {
            let days_in_year = if is_leap_year(year) { 366 } else { 365 };
            if remaining_days < days_in_year {
                break;
            }
            remaining_days -= days_in_year;
            year += 1;
        }

        let days_in_months: [i64; 12] = if is_leap_year(year) {
            [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
        } else {
            [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
        };

        let mut month = 1;
        for days_in_month in days_in_months.iter() {
            if remaining_days < *days_in_month {
                break;
            }
            remaining_days -= days_in_month;
            month += 1;
        }

        Self {
            year,
            month,
            day: remaining_days as u32 + 1,
            hour: secs_of_day / 3600,
            minute: (secs_of_day % 3600) / 60,
            second: secs_of_day % 60,
        }
    }
}

/// Check if a year is a leap year.
fn is_leap_year(year: i64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Download filename for the given instant: `YYYYMMDDHHmmss.<ext>`.
///
/// A leading dot on `extension` is ignored.
pub fn timestamp_filename(extension: &str, unix_secs: u64) -> String {
    let dt = DateTime::from_unix(unix_secs);
    format!(
        "{:04}{:02}{:02}{:02}{:02}{:02}.{}",
        dt.year,
        dt.month,
        dt.day,
        dt.hour,
        dt.minute,
        dt.second,
        extension.trim_start_matches('.')
    )
}

/// Seconds since the Unix epoch; zero if the clock is set before it.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Format file size for display (e.g., "1.2K", "3.4M").
pub fn format_size(bytes: u64) -> String {
    if bytes >= 1_000_000 {
        format!("{:.1}M", bytes as f64 / 1_000_000.0)
    } else if bytes >= 1_000 {
        format!("{:.1}K", bytes as f64 / 1_000.0)
    } else {
        format!("{}B", bytes)
    }
}

//! Business-timezone time helpers
//!
//! All date-to-timestamp conversion happens at the API/service layer;
//! repositories only ever see `i64` Unix millis.

use chrono::{DateTime, NaiveDate, TimeZone, Timelike};
use chrono_tz::Tz;

use super::{AppError, AppResult};

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// Reject dates in the future (business timezone)
pub fn validate_not_future(date: NaiveDate, tz: Tz) -> AppResult<()> {
    let today = chrono::Utc::now().with_timezone(&tz).date_naive();
    if date > today {
        return Err(AppError::validation(format!(
            "Date {} is in the future (today is {})",
            date, today
        )));
    }
    Ok(())
}

/// Date + hour/min/sec to Unix millis (business timezone)
///
/// DST gap fallback: when the local time does not exist, fall back to UTC.
pub fn date_hms_to_millis(date: NaiveDate, hour: u32, min: u32, sec: u32, tz: Tz) -> i64 {
    let naive = date.and_hms_opt(hour, min, sec).unwrap_or_else(|| {
        date.and_hms_opt(0, 0, 0)
            .expect("midnight always exists for a valid date")
    });
    naive
        .and_local_timezone(tz)
        .latest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

/// Start of day (00:00:00) as Unix millis (business timezone)
pub fn day_start_millis(date: NaiveDate, tz: Tz) -> i64 {
    date_hms_to_millis(date, 0, 0, 0, tz)
}

/// End of day as next-day 00:00:00 Unix millis (business timezone)
///
/// Callers use `< end` (exclusive) semantics.
pub fn day_end_millis(date: NaiveDate, tz: Tz) -> i64 {
    let next_day = date.succ_opt().unwrap_or(date);
    date_hms_to_millis(next_day, 0, 0, 0, tz)
}

/// Timestamp to a timezone-aware datetime (business timezone)
pub fn local_datetime(millis: i64, tz: Tz) -> DateTime<Tz> {
    tz.timestamp_millis_opt(millis)
        .latest()
        .unwrap_or_else(|| tz.timestamp_millis_opt(0).unwrap())
}

/// Hour-of-day component (0-23) of a timestamp in the business timezone
pub fn hour_of_day(millis: i64, tz: Tz) -> u32 {
    local_datetime(millis, tz).hour()
}

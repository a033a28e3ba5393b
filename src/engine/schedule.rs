//! Work schedule resolution.
//!
//! Maps a calendar date to the expected work start and end times. The rule
//! table is fixed: Monday through Friday and Sunday run 08:00-16:00, Saturday
//! runs 08:00-15:00. Sunday being a full working day mirrors the upstream
//! roster and is preserved as-is.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::models::TimeOfDay;

/// The expected work start and end for one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkSchedule {
    /// The scheduled start of work.
    pub start: TimeOfDay,
    /// The scheduled end of work.
    pub end: TimeOfDay,
}

/// Scheduled start of work on every day, minutes since midnight (08:00).
pub const WORK_START_MINUTES: u32 = 8 * 60;

/// Scheduled end of work Sunday through Friday, minutes since midnight
/// (16:00).
pub const WEEKDAY_END_MINUTES: u32 = 16 * 60;

/// Scheduled end of work on Saturday, minutes since midnight (15:00).
pub const SATURDAY_END_MINUTES: u32 = 15 * 60;

/// Resolves the expected work schedule for a date.
///
/// Pure and deterministic; performs no I/O.
///
/// # Example
///
/// ```
/// use attendance_engine::engine::resolve_schedule;
/// use chrono::NaiveDate;
///
/// // 2024-01-15 is a Monday
/// let monday = resolve_schedule(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
/// assert_eq!(monday.start.to_string(), "08:00");
/// assert_eq!(monday.end.to_string(), "16:00");
///
/// // 2024-01-20 is a Saturday
/// let saturday = resolve_schedule(NaiveDate::from_ymd_opt(2024, 1, 20).unwrap());
/// assert_eq!(saturday.end.to_string(), "15:00");
/// ```
pub fn resolve_schedule(date: NaiveDate) -> WorkSchedule {
    let end_minutes = match date.weekday() {
        Weekday::Sat => SATURDAY_END_MINUTES,
        _ => WEEKDAY_END_MINUTES,
    };

    WorkSchedule {
        start: time_of_day(WORK_START_MINUTES),
        end: time_of_day(end_minutes),
    }
}

// The schedule constants are all below 24:00.
fn time_of_day(minutes: u32) -> TimeOfDay {
    TimeOfDay::from_minutes(minutes).unwrap_or(TimeOfDay::MIDNIGHT)
}

//! Check-in classification.
//!
//! Classifies a single check-in punch against the day's schedule into
//! present or late. A fixed five-minute tolerance window follows the
//! scheduled start; lateness is measured from the end of that window, so the
//! first five minutes are free and the penalty clock starts at the
//! threshold, not at the raw start time.
//!
//! This function's authority ends at present/late. Absent, leave and holiday
//! are assigned by other flows.

use chrono::NaiveDate;

use super::resolve_schedule;
use crate::models::{AttendanceRecord, AttendanceStatus, TimeOfDay};

/// Grace period after the scheduled start during which a check-in is still
/// on time, in minutes. Fixed for every schedule.
pub const CHECK_IN_TOLERANCE_MINUTES: i64 = 5;

/// The outcome of classifying one check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// `Present` or `Late`; never any other status.
    pub status: AttendanceStatus,
    /// Minutes past the tolerance threshold; zero when present.
    pub late_minutes: i64,
}

/// Classifies a check-in time against the schedule for `date`.
///
/// # Example
///
/// ```
/// use attendance_engine::engine::classify_check_in;
/// use attendance_engine::models::{AttendanceStatus, TimeOfDay};
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(); // Monday, starts 08:00
///
/// // 08:05 is the last on-time minute.
/// let on_time = classify_check_in(TimeOfDay::from_hm(8, 5).unwrap(), date);
/// assert_eq!(on_time.status, AttendanceStatus::Present);
/// assert_eq!(on_time.late_minutes, 0);
///
/// // 08:06 is one minute past the threshold.
/// let late = classify_check_in(TimeOfDay::from_hm(8, 6).unwrap(), date);
/// assert_eq!(late.status, AttendanceStatus::Late);
/// assert_eq!(late.late_minutes, 1);
/// ```
pub fn classify_check_in(check_in: TimeOfDay, date: NaiveDate) -> Classification {
    let schedule = resolve_schedule(date);
    let minutes_past_start = check_in.minutes_since(schedule.start);

    if minutes_past_start <= CHECK_IN_TOLERANCE_MINUTES {
        Classification {
            status: AttendanceStatus::Present,
            late_minutes: 0,
        }
    } else {
        Classification {
            status: AttendanceStatus::Late,
            late_minutes: minutes_past_start - CHECK_IN_TOLERANCE_MINUTES,
        }
    }
}

/// Re-derives the late minutes carried by a persisted attendance record.
///
/// Only records classified late with a stored check-in carry late minutes;
/// everything else contributes zero. Lateness is never persisted as a
/// counter, so window scans (compliance, deductions) call this per record.
pub fn recorded_late_minutes(record: &AttendanceRecord) -> i64 {
    match (record.status, record.check_in) {
        (AttendanceStatus::Late, Some(check_in)) => {
            classify_check_in(check_in, record.date).late_minutes
        }
        _ => 0,
    }
}

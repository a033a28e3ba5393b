//! Time-of-day value type.
//!
//! Punch times and schedule boundaries are plain times of day with minute
//! precision. Representing them as minutes since midnight keeps lateness
//! arithmetic integral and avoids the timezone and DST pitfalls of parsing
//! wall-clock strings at the point of use.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A time of day with minute precision, stored as minutes since midnight.
///
/// Serializes as an "HH:MM" string.
///
/// # Example
///
/// ```
/// use attendance_engine::models::TimeOfDay;
///
/// let t = TimeOfDay::from_hm(8, 5).unwrap();
/// assert_eq!(t.minutes(), 485);
/// assert_eq!(t.to_string(), "08:05");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u32);

impl TimeOfDay {
    /// Midnight, the start of the day.
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);

    /// Creates a time of day from hours and minutes.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `hour > 23` or `minute > 59`.
    pub fn from_hm(hour: u32, minute: u32) -> EngineResult<Self> {
        if hour > 23 || minute > 59 {
            return Err(EngineError::Validation {
                field: "time".to_string(),
                message: format!("{hour:02}:{minute:02} is not a valid time of day"),
            });
        }
        Ok(Self(hour * 60 + minute))
    }

    /// Creates a time of day from a minutes-since-midnight count.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `minutes >= 1440`.
    pub fn from_minutes(minutes: u32) -> EngineResult<Self> {
        if minutes >= 24 * 60 {
            return Err(EngineError::Validation {
                field: "time".to_string(),
                message: format!("{minutes} minutes exceeds a single day"),
            });
        }
        Ok(Self(minutes))
    }

    /// Returns the minutes elapsed since midnight.
    pub fn minutes(self) -> u32 {
        self.0
    }

    /// Returns the hour component (0-23).
    pub fn hour(self) -> u32 {
        self.0 / 60
    }

    /// Returns the minute component (0-59).
    pub fn minute(self) -> u32 {
        self.0 % 60
    }

    /// Returns the signed distance in minutes from `other` to `self`.
    ///
    /// Positive when `self` is later in the day than `other`.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::TimeOfDay;
    ///
    /// let start = TimeOfDay::from_hm(8, 0).unwrap();
    /// let punch = TimeOfDay::from_hm(8, 10).unwrap();
    /// assert_eq!(punch.minutes_since(start), 10);
    /// assert_eq!(start.minutes_since(punch), -10);
    /// ```
    pub fn minutes_since(self, other: TimeOfDay) -> i64 {
        i64::from(self.0) - i64::from(other.0)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = EngineError;

    /// Parses an "HH:MM" string.
    fn from_str(s: &str) -> EngineResult<Self> {
        let invalid = || EngineError::Validation {
            field: "time".to_string(),
            message: format!("'{s}' is not an HH:MM time"),
        };

        let (hour, minute) = s.split_once(':').ok_or_else(invalid)?;
        let hour: u32 = hour.parse().map_err(|_| invalid())?;
        let minute: u32 = minute.parse().map_err(|_| invalid())?;
        Self::from_hm(hour, minute)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = EngineError;

    fn try_from(value: String) -> EngineResult<Self> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

impl From<NaiveTime> for TimeOfDay {
    /// Converts from a chrono time, truncating seconds.
    fn from(value: NaiveTime) -> Self {
        Self(value.hour() * 60 + value.minute())
    }
}

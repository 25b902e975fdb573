//! Wall-clock time-of-day values and the half-open interval overlap rule.
//!
//! Breaks are expressed as `[start, end)` ranges of minutes since midnight.
//! Parsing is strict: only `H:MM` or `HH:MM` with ASCII digits, hour in
//! `0..=23`, minute in `0..=59`. Everything else is a validation error.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

/// A time of day at minute granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Build from hour and minute, rejecting out-of-range components.
    pub fn from_hm(hour: u16, minute: u16) -> Result<Self, CoreError> {
        if hour > 23 || minute > 59 {
            return Err(CoreError::Validation(
                "Time values must be within 00:00-23:59".into(),
            ));
        }
        Ok(Self(hour * 60 + minute))
    }

    /// Parse an `H:MM` / `HH:MM` string.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        let format_error =
            || CoreError::Validation(format!("Time must be in HH:MM format, got '{value}'"));

        let (hours, minutes) = value.split_once(':').ok_or_else(format_error)?;
        if hours.is_empty()
            || hours.len() > 2
            || minutes.len() != 2
            || !hours.bytes().all(|b| b.is_ascii_digit())
            || !minutes.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(format_error());
        }

        let h: u16 = hours.parse().map_err(|_| format_error())?;
        let m: u16 = minutes.parse().map_err(|_| format_error())?;
        Self::from_hm(h, m)
    }

    /// Minutes since midnight.
    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    pub fn minute(self) -> u16 {
        self.0 % 60
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// A half-open `[start, end)` time range with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl TimeRange {
    /// Build a range, enforcing strict `start < end`.
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Result<Self, CoreError> {
        if start >= end {
            return Err(CoreError::Validation(
                "Start time must be earlier than end time".into(),
            ));
        }
        Ok(Self { start, end })
    }

    /// Parse both endpoints then check ordering.
    pub fn parse(start: &str, end: &str) -> Result<Self, CoreError> {
        Self::new(TimeOfDay::parse(start)?, TimeOfDay::parse(end)?)
    }

    /// `max(s1, s2) < min(e1, e2)`.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start.max(other.start) < self.end.min(other.end)
    }

    pub fn duration_minutes(&self) -> u16 {
        self.end.minutes() - self.start.minutes()
    }
}

/// Return the first entry whose range overlaps `candidate`, in iteration order.
pub fn find_conflict<T, I>(candidate: &TimeRange, existing: I) -> Option<(T, TimeRange)>
where
    I: IntoIterator<Item = (T, TimeRange)>,
{
    existing
        .into_iter()
        .find(|(_, range)| candidate.overlaps(range))
}

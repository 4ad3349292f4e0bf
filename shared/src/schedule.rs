//! Weekly schedule edited by the schedule picker.
//!
//! A schedule maps each enabled weekday to a time range; a missing day is
//! disabled. Every edit returns a new schedule and leaves the receiver alone,
//! so the owner of the value stays the single source of truth.

use std::collections::btree_map::{self, BTreeMap};
use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_START_TIME: &str = "09:00";
pub const DEFAULT_END_TIME: &str = "10:00";

const TIME_FORMAT: &str = "%H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Wire name, e.g. `"monday"`
    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Weekday {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Weekday::ALL
            .into_iter()
            .find(|day| day.as_str() == wanted)
            .ok_or_else(|| ScheduleError::UnknownDay(s.to_string()))
    }
}

/// Which end of a time range an input edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    Start,
    End,
}

/// Raw `HH:MM` input for one day. Values are kept as typed so the inputs
/// can echo them; use [`TimeRange::parse`] to interpret them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    pub start_time: String,
    pub end_time: String,
}

impl TimeRange {
    pub fn new(start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        Self {
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }

    /// Entry created when a time is set on a day that was never enabled
    pub fn empty() -> Self {
        Self::new("", "")
    }

    pub fn field(&self, field: TimeField) -> &str {
        match field {
            TimeField::Start => &self.start_time,
            TimeField::End => &self.end_time,
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.start_time.trim().is_empty() && !self.end_time.trim().is_empty()
    }

    pub fn parse(&self, day: Weekday) -> Result<(NaiveTime, NaiveTime), ScheduleError> {
        if !self.is_complete() {
            return Err(ScheduleError::Incomplete(day));
        }
        let parse = |value: &str| {
            NaiveTime::parse_from_str(value.trim(), TIME_FORMAT).map_err(|_| {
                ScheduleError::InvalidTime {
                    day,
                    value: value.to_string(),
                }
            })
        };
        Ok((parse(&self.start_time)?, parse(&self.end_time)?))
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        Self::new(DEFAULT_START_TIME, DEFAULT_END_TIME)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("Unknown weekday: {0}")]
    UnknownDay(String),
    #[error("{0} needs both a start and an end time")]
    Incomplete(Weekday),
    #[error("{day}: '{value}' is not a valid time")]
    InvalidTime { day: Weekday, value: String },
    #[error("{0}: end time must be after start time")]
    EndNotAfterStart(Weekday),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklySchedule(BTreeMap<Weekday, TimeRange>);

impl WeeklySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self, day: Weekday) -> bool {
        self.0.contains_key(&day)
    }

    pub fn get(&self, day: Weekday) -> Option<&TimeRange> {
        self.0.get(&day)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Enabled days in weekday order
    pub fn iter(&self) -> btree_map::Iter<'_, Weekday, TimeRange> {
        self.0.iter()
    }

    /// Disable `day` if enabled, otherwise enable it with 09:00-10:00
    pub fn toggle_day(&self, day: Weekday) -> Self {
        let mut next = self.0.clone();
        if next.remove(&day).is_none() {
            next.insert(day, TimeRange::default());
        }
        Self(next)
    }

    /// Set one end of `day`'s range. A disabled day is enabled with an empty
    /// range first, which stays incomplete until both ends are filled.
    pub fn set_time(&self, day: Weekday, field: TimeField, value: impl Into<String>) -> Self {
        let mut next = self.0.clone();
        let range = next.entry(day).or_insert_with(TimeRange::empty);
        match field {
            TimeField::Start => range.start_time = value.into(),
            TimeField::End => range.end_time = value.into(),
        }
        Self(next)
    }

    /// Every enabled day must hold two valid times with start before end
    pub fn validate(&self) -> Result<(), ScheduleError> {
        for (day, range) in self.iter() {
            let (start, end) = range.parse(*day)?;
            if start >= end {
                return Err(ScheduleError::EndNotAfterStart(*day));
            }
        }
        Ok(())
    }
}

impl FromIterator<(Weekday, TimeRange)> for WeeklySchedule {
    fn from_iter<I: IntoIterator<Item = (Weekday, TimeRange)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

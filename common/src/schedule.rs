use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Timelike};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ScheduleError;

/// Weekday code for `now`: Sunday (0) through Saturday (6).
pub fn weekday_code<T: Datelike>(now: &T) -> u8 {
    now.weekday().num_days_from_sunday() as u8
}

/// Wall-clock time of day with minute precision, `00:00`..=`23:59`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    pub fn new(hour: u8, minute: u8) -> Result<Self, ScheduleError> {
        if hour > 23 || minute > 59 {
            return Err(ScheduleError::InvalidTime(format!("{hour:02}:{minute:02}")));
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn minute_of_day(&self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }
}

/// Accepts `H:MM`, `HH:MM` and `HH:MM:SS` (seconds are ignored).
impl FromStr for TimeOfDay {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ScheduleError::InvalidTime(s.to_string());
        let mut parts = s.trim().split(':');
        let (Some(h), Some(m)) = (parts.next(), parts.next()) else {
            return Err(invalid());
        };
        if let Some(sec) = parts.next() {
            if sec.len() != 2 || !sec.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
        }
        if parts.next().is_some()
            || !(1..=2).contains(&h.len())
            || m.len() != 2
            || !h.bytes().chain(m.bytes()).all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }
        let hour: u8 = h.parse().map_err(|_| invalid())?;
        let minute: u8 = m.parse().map_err(|_| invalid())?;
        TimeOfDay::new(hour, minute).map_err(|_| invalid())
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// One weekly recurring open interval, as delivered by the schedule API.
///
/// `day_of_week` is Sunday (0) through Saturday (6). Times are raw `HH:MM`
/// strings; nothing enforces `start_time < end_time`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingInterval {
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
}

impl WorkingInterval {
    pub fn new(day_of_week: u8, start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        Self {
            day_of_week,
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }

    /// Parse the raw entry, failing with `MalformedScheduleEntry` on bad data.
    pub fn parse(&self) -> Result<ParsedInterval, ScheduleError> {
        let malformed = |reason: String| ScheduleError::MalformedScheduleEntry {
            day: self.day_of_week,
            start: self.start_time.clone(),
            end: self.end_time.clone(),
            reason,
        };
        if self.day_of_week > 6 {
            return Err(malformed(format!("day {} outside 0..=6", self.day_of_week)));
        }
        let start = self
            .start_time
            .parse::<TimeOfDay>()
            .map_err(|e| malformed(e.to_string()))?;
        let end = self
            .end_time
            .parse::<TimeOfDay>()
            .map_err(|e| malformed(e.to_string()))?;
        Ok(ParsedInterval {
            day: self.day_of_week,
            start,
            end,
        })
    }
}

/// A validated working interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedInterval {
    pub day: u8,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl ParsedInterval {
    /// Start and end are the same instant; such an interval is never open.
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    pub fn is_overnight(&self) -> bool {
        self.end < self.start
    }

    /// Hour-granularity check used by [`is_open_now`]. Minutes are ignored,
    /// and an overnight interval never matches.
    pub fn contains_hour(&self, hour: u32) -> bool {
        hour >= self.start.hour as u32 && hour < self.end.hour as u32
    }

    /// Minute-precision check over `[start, end)`. An overnight interval
    /// covers `start..midnight` on its own day and `midnight..end` on the next.
    pub fn contains_minute(&self, day: u8, minute: u16) -> bool {
        if self.is_degenerate() {
            return false;
        }
        let start = self.start.minute_of_day();
        let end = self.end.minute_of_day();
        if day == self.day {
            if self.is_overnight() {
                minute >= start
            } else {
                minute >= start && minute < end
            }
        } else {
            self.is_overnight() && day == (self.day + 1) % 7 && minute < end
        }
    }
}

fn parse_or_warn(interval: &WorkingInterval) -> Option<ParsedInterval> {
    match interval.parse() {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            warn!(error = %e, "skipping malformed schedule entry");
            None
        }
    }
}

/// Whether the facility is open at `now`, compared at hour granularity.
///
/// The first well-formed interval for today's weekday decides; later entries
/// for the same day are ignored. Malformed entries are logged and skipped.
pub fn is_open_now<T: Datelike + Timelike>(intervals: &[WorkingInterval], now: &T) -> bool {
    let day = weekday_code(now);
    let hour = now.hour();
    intervals
        .iter()
        .filter(|interval| interval.day_of_week == day)
        .find_map(parse_or_warn)
        .is_some_and(|parsed| parsed.contains_hour(hour))
}

/// Minute-precision variant of [`is_open_now`].
///
/// Any well-formed interval covering `now` makes the facility open, and
/// intervals ending before they start carry over into the next day.
pub fn is_open_at_minute<T: Datelike + Timelike>(intervals: &[WorkingInterval], now: &T) -> bool {
    let day = weekday_code(now);
    let minute = (now.hour() * 60 + now.minute()) as u16;
    let previous = (day + 6) % 7;
    intervals
        .iter()
        .filter(|interval| interval.day_of_week == day || interval.day_of_week == previous)
        .filter_map(parse_or_warn)
        .any(|parsed| parsed.contains_minute(day, minute))
}

/// Check against the device's local clock.
#[cfg(feature = "std")]
pub fn is_currently_open(intervals: &[WorkingInterval]) -> bool {
    is_open_now(intervals, &chrono::Local::now())
}

/// Parsed weekly schedule, indexed by weekday code.
///
/// Per-day order follows the input, so [`WeeklyHours::is_open_now`] keeps the
/// first-match-wins behavior of the free function.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeeklyHours {
    days: [Vec<ParsedInterval>; 7],
    malformed: usize,
}

impl WeeklyHours {
    pub fn from_intervals(intervals: &[WorkingInterval]) -> Self {
        let mut hours = WeeklyHours::default();
        for interval in intervals {
            match parse_or_warn(interval) {
                Some(parsed) => hours.days[parsed.day as usize].push(parsed),
                None => hours.malformed += 1,
            }
        }
        hours
    }

    pub fn for_day(&self, day: u8) -> &[ParsedInterval] {
        self.days.get(day as usize).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of entries dropped while parsing.
    pub fn malformed(&self) -> usize {
        self.malformed
    }

    pub fn is_empty(&self) -> bool {
        self.days.iter().all(Vec::is_empty)
    }

    pub fn is_open_now<T: Datelike + Timelike>(&self, now: &T) -> bool {
        self.for_day(weekday_code(now))
            .first()
            .is_some_and(|parsed| parsed.contains_hour(now.hour()))
    }

    pub fn is_open_at_minute<T: Datelike + Timelike>(&self, now: &T) -> bool {
        let day = weekday_code(now);
        let minute = (now.hour() * 60 + now.minute()) as u16;
        self.for_day(day)
            .iter()
            .chain(self.for_day((day + 6) % 7))
            .any(|parsed| parsed.contains_minute(day, minute))
    }
}

use thiserror::Error;

/// Rejected coordinate input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    #[error("invalid coordinate ({latitude}, {longitude})")]
    InvalidCoordinate { latitude: f64, longitude: f64 },
}

/// Schedule data that cannot be evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("invalid time of day `{0}`, expected HH:MM")]
    InvalidTime(String),

    #[error("malformed schedule entry for day {day} ({start}-{end}): {reason}")]
    MalformedScheduleEntry {
        day: u8,
        start: String,
        end: String,
        reason: String,
    },
}

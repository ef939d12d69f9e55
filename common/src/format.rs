use crate::schedule::WorkingInterval;

/// Avatar background colors, picked deterministically per name.
const AVATAR_PALETTE: [&str; 8] = [
    "#4F46E5", "#0EA5E9", "#10B981", "#F59E0B", "#EF4444", "#8B5CF6", "#EC4899", "#14B8A6",
];

/// Format a distance for display: "850 m" below one kilometer, "1.2 km" above.
/// Unknown or non-finite distances read as unavailable.
pub fn format_distance(distance_km: Option<f64>) -> String {
    match distance_km.filter(|km| km.is_finite()) {
        None => "Distance unavailable".to_string(),
        Some(km) if km < 1.0 => format!("{:.0} m", km * 1000.0),
        Some(km) => format!("{km:.1} km"),
    }
}

/// Format a working interval as "08:00 - 17:00".
pub fn format_interval(interval: &WorkingInterval) -> String {
    match interval.parse() {
        Ok(parsed) => format!("{} - {}", parsed.start, parsed.end),
        Err(_) => "Invalid hours".to_string(),
    }
}

/// Day name from index (0=Sunday).
pub fn day_name(day: u8) -> &'static str {
    match day {
        0 => "Sunday",
        1 => "Monday",
        2 => "Tuesday",
        3 => "Wednesday",
        4 => "Thursday",
        5 => "Friday",
        6 => "Saturday",
        _ => "Unknown",
    }
}

/// Short day name from index (0=Sun).
pub fn day_name_short(day: u8) -> &'static str {
    match day {
        0 => "Sun",
        1 => "Mon",
        2 => "Tue",
        3 => "Wed",
        4 => "Thu",
        5 => "Fri",
        6 => "Sat",
        _ => "???",
    }
}

/// Up to two uppercase initials: first letter of the first and last word.
/// Blank names give "?".
pub fn initials(name: &str) -> String {
    let mut words = name.split_whitespace();
    let Some(first) = words.next() else {
        return "?".to_string();
    };
    let mut out: String = first.chars().take(1).flat_map(char::to_uppercase).collect();
    if let Some(last) = words.last() {
        out.extend(last.chars().take(1).flat_map(char::to_uppercase));
    }
    out
}

/// Stable palette color for a name.
pub fn avatar_color(name: &str) -> &'static str {
    let sum: usize = name.bytes().map(usize::from).sum();
    AVATAR_PALETTE[sum % AVATAR_PALETTE.len()]
}

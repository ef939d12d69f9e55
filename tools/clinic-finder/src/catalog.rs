use std::path::Path;

use anyhow::{Context, Result};
use clinic_common::{Facility, WeeklyHours};
use tracing::{info, warn};

/// Load a facility catalog: a JSON array of facilities.
pub fn load_catalog(path: &Path) -> Result<Vec<Facility>> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read catalog {}", path.display()))?;
    let facilities: Vec<Facility> = serde_json::from_slice(&bytes)
        .with_context(|| format!("failed to parse catalog {}", path.display()))?;

    for facility in &facilities {
        let hours = WeeklyHours::from_intervals(&facility.working_hours);
        if hours.malformed() > 0 {
            warn!(
                facility = %facility.id,
                malformed = hours.malformed(),
                "facility has unusable working hours"
            );
        }
        if let Some(location) = &facility.location {
            if !location.is_valid() {
                warn!(facility = %facility.id, ?location, "facility location out of range");
            }
        }
    }
    info!(count = facilities.len(), path = %path.display(), "loaded catalog");
    Ok(facilities)
}

use serde::{Deserialize, Serialize};

use crate::error::GeoError;

/// Mean Earth radius used for all great-circle distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Geographic coordinates in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Latitude within [-90, 90] and longitude within [-180, 180], both finite.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    pub fn validate(&self) -> Result<(), GeoError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(GeoError::InvalidCoordinate {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }

    /// Haversine distance in kilometers between two points, unrounded.
    pub fn haversine_km(&self, other: &GeoPoint) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let dlat = (other.latitude - self.latitude).to_radians();
        let dlon = (other.longitude - self.longitude).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        // Rounding can push near-antipodal points just past 1.0.
        let a = a.clamp(0.0, 1.0);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

/// Round to one decimal place, half away from zero.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Distance in kilometers from `origin` to the target, rounded to one decimal.
///
/// Returns `None` when the user's location is unknown. Coordinates are not
/// validated: out-of-range input gives a meaningless (possibly NaN) result.
pub fn distance_km(target_lat: f64, target_lon: f64, origin: Option<&GeoPoint>) -> Option<f64> {
    let origin = origin?;
    let target = GeoPoint::new(target_lat, target_lon);
    Some(round_to_tenth(origin.haversine_km(&target)))
}

/// Like [`distance_km`], but rejects out-of-range or non-finite coordinates.
pub fn try_distance_km(
    target_lat: f64,
    target_lon: f64,
    origin: Option<&GeoPoint>,
) -> Result<Option<f64>, GeoError> {
    let target = GeoPoint::new(target_lat, target_lon);
    target.validate()?;
    let Some(origin) = origin else {
        return Ok(None);
    };
    origin.validate()?;
    Ok(Some(round_to_tenth(origin.haversine_km(&target))))
}

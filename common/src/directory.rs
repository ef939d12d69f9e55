use std::cmp::Ordering;

use chrono::{DateTime, FixedOffset, TimeZone};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::location::{distance_km, GeoPoint};
use crate::schedule::{is_open_at_minute, is_open_now, WorkingInterval};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacilityKind {
    Clinic,
    Doctor,
}

/// A clinic or doctor as listed by the facility API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Facility {
    pub id: String,
    pub name: String,
    pub kind: FacilityKind,
    #[serde(default)]
    pub location: Option<GeoPoint>,
    #[serde(default)]
    pub working_hours: Vec<WorkingInterval>,
    /// Offset of the facility's wall clock from UTC. When absent, the
    /// caller's clock is taken as the facility's local time.
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,
}

/// How "open now" is decided for a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OpenPolicy {
    /// Hour comparison, first match per day, overnight intervals never open.
    #[default]
    HourGranularity,
    /// Minute comparison, any matching interval, overnight intervals wrap.
    MinutePrecise,
}

impl OpenPolicy {
    pub fn evaluate<Tz: TimeZone>(&self, intervals: &[WorkingInterval], now: &DateTime<Tz>) -> bool {
        match self {
            OpenPolicy::HourGranularity => is_open_now(intervals, now),
            OpenPolicy::MinutePrecise => is_open_at_minute(intervals, now),
        }
    }
}

/// A facility with its distance from the user and open status.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityListing {
    pub facility: Facility,
    pub distance_km: Option<f64>,
    pub open_now: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingQuery {
    pub open_only: bool,
    /// When set, facilities with unknown distance are dropped.
    pub max_distance_km: Option<f64>,
    pub kind: Option<FacilityKind>,
    pub policy: OpenPolicy,
}

impl Facility {
    /// Distance from `origin`, `None` if either side has no location.
    pub fn distance_from(&self, origin: Option<&GeoPoint>) -> Option<f64> {
        let location = self.location.as_ref()?;
        distance_km(location.latitude, location.longitude, origin)
    }

    pub fn is_open<Tz: TimeZone>(&self, now: &DateTime<Tz>, policy: OpenPolicy) -> bool {
        match self
            .utc_offset_minutes
            .and_then(|m| m.checked_mul(60))
            .and_then(FixedOffset::east_opt)
        {
            Some(offset) => policy.evaluate(&self.working_hours, &now.with_timezone(&offset)),
            None => policy.evaluate(&self.working_hours, now),
        }
    }

    pub fn listing<Tz: TimeZone>(
        &self,
        origin: Option<&GeoPoint>,
        now: &DateTime<Tz>,
        policy: OpenPolicy,
    ) -> FacilityListing {
        FacilityListing {
            facility: self.clone(),
            distance_km: self.distance_from(origin),
            open_now: self.is_open(now, policy),
        }
    }
}

/// Known distances first (nearest first), then unknown; ties by name.
fn compare_listings(a: &FacilityListing, b: &FacilityListing) -> Ordering {
    let by_distance = match (a.distance_km, b.distance_km) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_distance.then_with(|| a.facility.name.cmp(&b.facility.name))
}

/// Build sorted, filtered listings for a set of facilities.
pub fn build_listings<Tz: TimeZone>(
    facilities: &[Facility],
    origin: Option<&GeoPoint>,
    now: &DateTime<Tz>,
    query: &ListingQuery,
) -> Vec<FacilityListing> {
    let mut listings: Vec<FacilityListing> = facilities
        .iter()
        .filter(|f| query.kind.is_none_or(|kind| f.kind == kind))
        .map(|f| f.listing(origin, now, query.policy))
        .filter(|l| !query.open_only || l.open_now)
        .filter(|l| match query.max_distance_km {
            Some(max) => l.distance_km.is_some_and(|d| d <= max),
            None => true,
        })
        .collect();
    listings.sort_by(compare_listings);
    debug!(
        total = facilities.len(),
        listed = listings.len(),
        "built facility listings"
    );
    listings
}

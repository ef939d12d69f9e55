pub mod directory;
pub mod error;
pub mod format;
pub mod location;
pub mod schedule;

pub use directory::{build_listings, Facility, FacilityKind, FacilityListing, ListingQuery, OpenPolicy};
pub use error::{GeoError, ScheduleError};
pub use location::{distance_km, try_distance_km, GeoPoint};
pub use schedule::{is_open_at_minute, is_open_now, WeeklyHours, WorkingInterval};

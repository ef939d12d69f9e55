//! End-to-end listing tests over the sample catalog.
//!
//! 2024-01-01 is a Monday; all instants are given at UTC+7.

use clinic_common::format::format_distance;
use clinic_common::{build_listings, Facility, FacilityKind, ListingQuery, OpenPolicy};

use clinic_integration::{at, sample_catalog, sample_catalog_json, HANOI};

fn ids(listings: &[clinic_common::FacilityListing]) -> Vec<&str> {
    listings.iter().map(|l| l.facility.id.as_str()).collect()
}

#[test]
fn nearest_first_and_unknown_distance_last() {
    let catalog = sample_catalog();
    let listings = build_listings(
        &catalog,
        Some(&HANOI),
        &at("2024-01-01T10:00:00+07:00"),
        &ListingQuery::default(),
    );
    assert_eq!(ids(&listings), vec!["c-hoan-kiem", "c-night", "c-saigon", "d-le"]);

    let saigon = &listings[2];
    assert_eq!(saigon.distance_km, Some(1137.8));
    assert_eq!(format_distance(saigon.distance_km), "1137.8 km");
    assert_eq!(format_distance(listings[3].distance_km), "Distance unavailable");
}

#[test]
fn open_status_on_monday_morning() {
    let catalog = sample_catalog();
    let listings = build_listings(
        &catalog,
        Some(&HANOI),
        &at("2024-01-01T10:00:00+07:00"),
        &ListingQuery {
            open_only: true,
            ..Default::default()
        },
    );
    assert_eq!(ids(&listings), vec!["c-hoan-kiem", "c-saigon"]);
    assert!(listings.iter().all(|l| l.open_now));
}

#[test]
fn without_user_location_everything_sorts_by_name() {
    let catalog = sample_catalog();
    let listings = build_listings(
        &catalog,
        None,
        &at("2024-01-01T10:00:00+07:00"),
        &ListingQuery::default(),
    );
    assert!(listings.iter().all(|l| l.distance_km.is_none()));
    let names: Vec<&str> = listings.iter().map(|l| l.facility.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Dr. Le Thi Mai",
            "Hoan Kiem Family Clinic",
            "Night Care Clinic",
            "Saigon General"
        ]
    );
}

#[test]
fn radius_filter_drops_far_and_unknown() {
    let catalog = sample_catalog();
    let listings = build_listings(
        &catalog,
        Some(&HANOI),
        &at("2024-01-01T10:00:00+07:00"),
        &ListingQuery {
            max_distance_km: Some(5.0),
            ..Default::default()
        },
    );
    assert_eq!(ids(&listings), vec!["c-hoan-kiem", "c-night"]);
}

#[test]
fn doctor_filter_with_minute_precision() {
    let catalog = sample_catalog();
    let now = at("2024-01-01T19:15:00+07:00");
    let hour_query = ListingQuery {
        kind: Some(FacilityKind::Doctor),
        ..Default::default()
    };
    let hour = build_listings(&catalog, None, &now, &hour_query);
    assert_eq!(ids(&hour), vec!["d-le"]);
    // 19:00-19:59 fails `hour < 19` at hour granularity
    assert!(!hour[0].open_now);

    let precise = build_listings(
        &catalog,
        None,
        &now,
        &ListingQuery {
            policy: OpenPolicy::MinutePrecise,
            ..hour_query
        },
    );
    assert!(precise[0].open_now);
}

#[test]
fn catalog_survives_json_round_trip() {
    let decoded: Vec<Facility> = serde_json::from_str(&sample_catalog_json()).unwrap();
    let original = sample_catalog();
    assert_eq!(decoded.len(), original.len());
    for (d, o) in decoded.iter().zip(&original) {
        assert_eq!(d.id, o.id);
        assert_eq!(d.kind, o.kind);
        assert_eq!(d.working_hours, o.working_hours);
        assert_eq!(d.location.is_some(), o.location.is_some());
    }

    let json = sample_catalog_json();
    assert!(json.contains("\"workingHours\""));
    assert!(json.contains("\"dayOfWeek\":1"));
    assert!(json.contains("\"kind\":\"doctor\""));
}

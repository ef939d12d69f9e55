use clinic_common::schedule::is_open_at_minute;
use clinic_common::{distance_km, is_open_now, WeeklyHours, WorkingInterval};

use clinic_integration::{at, weekday_hours, HANOI, HO_CHI_MINH_CITY};

#[test]
fn weekday_follows_the_local_offset() {
    let hours = weekday_hours("08:00", "17:00");
    // Monday 16:30 at UTC-10 is already Tuesday in UTC; Monday rules apply.
    assert!(is_open_now(&hours, &at("2024-01-01T16:30:00-10:00")));
    // Sunday 20:00 at UTC-12 is Monday 08:00 in UTC; still closed locally.
    assert!(!is_open_now(&hours, &at("2024-01-07T20:00:00-12:00")));
    // Sunday at 10:00 local: no hours on day 0.
    assert!(!is_open_now(&hours, &at("2024-01-07T10:00:00+07:00")));
    assert!(is_open_now(&hours, &at("2024-01-05T16:59:00+07:00")));
    assert!(!is_open_now(&hours, &at("2024-01-05T17:00:00+07:00")));
}

#[test]
fn overnight_hours_depend_on_the_policy() {
    let hours = vec![WorkingInterval::new(5, "22:00", "02:00")];
    let friday_late = at("2024-01-05T23:00:00+07:00");
    let saturday_early = at("2024-01-06T01:30:00+07:00");

    assert!(!is_open_now(&hours, &friday_late));
    assert!(!is_open_now(&hours, &saturday_early));

    assert!(is_open_at_minute(&hours, &friday_late));
    assert!(is_open_at_minute(&hours, &saturday_early));
    assert!(!is_open_at_minute(&hours, &at("2024-01-06T02:00:00+07:00")));
}

#[test]
fn malformed_rows_are_skipped_not_fatal() {
    tracing_subscriber::fmt::try_init().ok();

    let hours = vec![
        WorkingInterval::new(1, "08:00", "noon"),
        WorkingInterval::new(1, "08:00", "12:00"),
        WorkingInterval::new(8, "08:00", "12:00"),
    ];
    let monday_nine = at("2024-01-01T09:00:00+07:00");
    assert!(is_open_now(&hours, &monday_nine));

    let weekly = WeeklyHours::from_intervals(&hours);
    assert_eq!(weekly.malformed(), 2);
    assert!(weekly.is_open_now(&monday_nine));
}

#[test]
fn distance_between_fixture_cities() {
    let d = distance_km(
        HO_CHI_MINH_CITY.latitude,
        HO_CHI_MINH_CITY.longitude,
        Some(&HANOI),
    )
    .unwrap();
    assert!((d - 1137.5).abs() <= 1.0);
    assert_eq!(
        d,
        distance_km(HANOI.latitude, HANOI.longitude, Some(&HO_CHI_MINH_CITY)).unwrap()
    );
    assert_eq!(distance_km(HANOI.latitude, HANOI.longitude, None), None);
}

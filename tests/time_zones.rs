use khrysalis_runtime::zone::{StaticTimeZone, FixedTimespanSet, FixedTimespan, TimeZoneSource, TimeZone};
use khrysalis_runtime::{Calendar, DateComponents, ZonedDateTime, Instant, HasDateComponents, DatePiece, TimePiece, Error};
use std::borrow::Cow;


const TEST_ZONESET: &'static StaticTimeZone<'static> = &StaticTimeZone {
    name: "Test Zoneset",
    fixed_timespans: FixedTimespanSet {
        first: FixedTimespan {
            offset: 0,
            is_dst: false,
            name: Cow::Borrowed("ZONE_A"),
        },
        rest: &[
            (1206838800, FixedTimespan {
                offset: 3600,
                is_dst: false,
                name: Cow::Borrowed("ZONE_B"),
            }),
            (1224982800, FixedTimespan {
                offset: 0,
                is_dst: false,
                name: Cow::Borrowed("ZONE_A"),
            }),
            (1238288400, FixedTimespan {
                offset: 3600,
                is_dst: false,
                name: Cow::Borrowed("ZONE_B"),
            }),
            (1256432400, FixedTimespan {
                offset: 0,
                is_dst: false,
                name: Cow::Borrowed("ZONE_A"),
            }),
            (1269738000, FixedTimespan {
                offset: 3600,
                is_dst: false,
                name: Cow::Borrowed("ZONE_B"),
            }),
            (1288486800, FixedTimespan {
                offset: 0,
                is_dst: false,
                name: Cow::Borrowed("ZONE_A"),
            }),
        ]
    }
};

fn zone() -> TimeZone {
    TimeZone(TimeZoneSource::Static(TEST_ZONESET))
}

fn utc_seconds(components: &DateComponents) -> i64 {
    Calendar::gregorian().resolve(components).unwrap().seconds()
}

fn ymd_hm(year: i64, month: i64, day: i64, hour: i64, minute: i64) -> DateComponents {
    DateComponents::new().year(year).month(month).day(day).hour(hour).minute(minute)
}


#[test]
fn construction() {
    let local = utc_seconds(&ymd_hm(2010, 6, 9, 15, 15));
    assert_eq!(zone().offset_at(local), 3600);

    let zoned = ZonedDateTime::new(Calendar::gregorian(), Some(zone()), 1, 2010, 6, 9, 15, 15, 0, 0);
    assert_eq!(zoned.year(), 2010);
    assert_eq!(zoned.hour(), 15);

    let instant = Calendar::gregorian().resolve(&ymd_hm(2010, 6, 9, 14, 15)).unwrap();
    assert_eq!(zoned.to_instant(), Ok(instant));
}

#[test]
fn ambiguity() {
    let local = utc_seconds(&ymd_hm(2010, 10, 31, 1, 15));
    let converted = zone().convert_local(local);
    assert!(converted.is_ambiguous(),
        "Local time {:?} should be ambiguous", converted);
}

#[test]
fn ambiguity_resolves_to_the_earlier_instant() {
    let zoned = ZonedDateTime::new(Calendar::gregorian(), Some(zone()), 1, 2010, 10, 31, 1, 15, 0, 0);
    let earlier = Calendar::gregorian().resolve(&ymd_hm(2010, 10, 31, 0, 15)).unwrap();
    assert_eq!(zoned.to_instant(), Ok(earlier));
}

#[test]
fn impossible() {
    let local = utc_seconds(&ymd_hm(2010, 3, 28, 1, 15));
    let converted = zone().convert_local(local);
    assert!(converted.is_impossible(),
        "Local time {:?} should be impossible", converted);
}

#[test]
fn impossible_moves_forward_when_lenient() {
    let calendar = Calendar::gregorian().with_time_zone(zone());
    let skipped = calendar.resolve(&ymd_hm(2010, 3, 28, 1, 15)).unwrap();
    let after = calendar.resolve(&ymd_hm(2010, 3, 28, 2, 15)).unwrap();
    assert_eq!(skipped, after);
}

#[test]
fn impossible_fails_when_strict() {
    let calendar = Calendar::gregorian().with_time_zone(zone()).strict();
    assert_eq!(calendar.resolve(&ymd_hm(2010, 3, 28, 1, 15)), Err(Error::NonexistentLocalTime));
}

#[test]
fn decomposing_in_the_zone() {
    // 2010-06-09T14:15:00Z
    let instant = Instant::at(1276092900);
    let zoned = ZonedDateTime::from_instant(&Calendar::gregorian(), Some(zone()), instant);

    assert_eq!((zoned.day(), zoned.hour(), zoned.minute()), (9, 15, 15));
    assert_eq!(zoned.date_components().time_zone, Some(zone()));
}

#[test]
fn static_zone_identifier() {
    assert_eq!(zone().identifier(), "Test Zoneset");
    assert!(!zone().is_fixed());
}

#[test]
fn named_zone_offsets() {
    let london = TimeZone::named("Europe/London").unwrap();

    // 2024-01-15T12:00:00Z and 2024-07-15T12:00:00Z
    assert_eq!(london.offset_at(1705320000), 0);
    assert_eq!(london.offset_at(1721044800), 3600);
}

#[test]
fn unknown_zone() {
    assert_eq!(TimeZone::named("Mars/Olympus_Mons"), Err(Error::UnknownTimeZone("Mars/Olympus_Mons".to_string())));
}

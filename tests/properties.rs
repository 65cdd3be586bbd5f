use proptest::prelude::*;

use khrysalis_runtime::{Calendar, DateComponents, LocalDate, LocalTime, LocalDateTime, ZonedDateTime, TimeZone, Instant};
use khrysalis_runtime::{DatePiece, TimePiece, HasDateComponents, KHashable};


fn gregorian() -> Calendar {
    Calendar::gregorian()
}

prop_compose! {
    fn any_date()(year in -3000_i64..3000, month in 1_i64..13, day in 1_i64..29) -> LocalDate {
        LocalDate::new(gregorian(), 1, year, month, day)
    }
}

prop_compose! {
    fn any_time()(hour in 0_i64..24, minute in 0_i64..60, second in 0_i64..60, nanosecond in 0_i64..1_000_000_000) -> LocalTime {
        LocalTime::new(gregorian(), hour, minute, second, nanosecond)
    }
}


proptest! {
    #[test]
    fn with_day_reads_back(date in any_date(), day in -1000_i64..1000) {
        let changed = date.with(&DateComponents::new().day(day));
        prop_assert_eq!(changed.day(), day);
        prop_assert_eq!(changed.month(), date.month());
        prop_assert_eq!(changed.year(), date.year());
        prop_assert_eq!(changed.era(), date.era());
    }

    #[test]
    fn with_hour_reads_back(time in any_time(), hour in -100_i64..100) {
        let changed = time.with(&DateComponents::new().hour(hour));
        prop_assert_eq!(changed.hour(), hour);
        prop_assert_eq!(changed.minute(), time.minute());
        prop_assert_eq!(changed.nanosecond(), time.nanosecond());
    }

    #[test]
    fn plus_day_adds_exactly(date in any_date(), days in -100_000_i64..100_000) {
        let moved = date.plus(&DateComponents::new().day(days));
        prop_assert_eq!(moved.day(), date.day() + days);
        prop_assert_eq!(moved.month(), date.month());
    }

    #[test]
    fn plus_day_moves_the_epoch_day(date in any_date(), days in -100_000_i64..100_000) {
        let moved = date.plus(&DateComponents::new().day(days));
        prop_assert_eq!(moved.epoch_day().unwrap(), date.epoch_day().unwrap() + days);
    }

    #[test]
    fn composition_round_trips(date in any_date(), time in any_time()) {
        let both = LocalDateTime::of(&date, &time);
        prop_assert_eq!(both.to_local_date(), date);
        prop_assert_eq!(both.to_local_time(), time);
    }

    #[test]
    fn epoch_day_round_trips(day in -1_000_000_i64..1_000_000) {
        prop_assert_eq!(LocalDate::from_epoch_day(&gregorian(), day).epoch_day(), Ok(day));
    }

    #[test]
    fn ordering_follows_instants(a in -10_000_000_000_i64..10_000_000_000, b in -10_000_000_000_i64..10_000_000_000) {
        let first = LocalDateTime::from_instant(&gregorian(), Instant::at(a));
        let second = LocalDateTime::from_instant(&gregorian(), Instant::at(b));
        prop_assert_eq!(first.try_cmp(&second), Ok(a.cmp(&b)));
    }

    #[test]
    fn decomposition_resolves_back(seconds in -10_000_000_000_i64..10_000_000_000, nanos in 0_i64..1_000_000_000) {
        let instant = Instant::at_nanos(seconds, nanos);
        let zone = TimeZone::named("Europe/Paris").unwrap();
        let zoned = ZonedDateTime::from_instant(&gregorian(), Some(zone), instant);
        let resolved = zoned.to_instant().unwrap();

        // Instants in a repeated hour come back as the first of the two.
        prop_assert!(resolved <= instant);
        prop_assert!(instant.seconds() - resolved.seconds() <= 3600);
    }

    #[test]
    fn zoned_with_calendar_adopts_its_zone(date in any_date(), time in any_time()) {
        let tokyo = TimeZone::named("Asia/Tokyo").unwrap();
        let zoned = ZonedDateTime::of_parts(gregorian(), None, &date, &time);
        let changed = zoned.with(&DateComponents::new().calendar(gregorian().with_time_zone(tokyo.clone())));

        prop_assert_eq!(changed.time_zone(), &tokyo);
        prop_assert_eq!(changed.date_components().fields_only(), zoned.date_components().fields_only());
    }

    #[test]
    fn equal_values_hash_equally(date in any_date()) {
        let copy = LocalDate::new(date.calendar().clone(), date.era(), date.year(), date.month(), date.day());
        prop_assert_eq!(copy.hash_code(), date.hash_code());
        prop_assert_eq!(copy.date_components(), date.date_components());
    }
}

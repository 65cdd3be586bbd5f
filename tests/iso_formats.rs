use khrysalis_runtime::{Calendar, LocalDate, LocalTime, LocalDateTime, ZonedDateTime, TimeZone, Offset, Instant, KStringable};


#[test]
fn recently() {
    let date = LocalDate::new(Calendar::gregorian(), 1, 1600, 2, 28);
    assert_eq!(format!("{:?}", date), "LocalDate(1600-02-28)");
}

#[test]
fn just_then() {
    let date = LocalDate::new(Calendar::gregorian(), 1, -753, 12, 1);
    assert_eq!(format!("{:?}", date), "LocalDate(-0753-12-01)");
}

#[test]
fn far_far_future() {
    let date = LocalDate::new(Calendar::gregorian(), 1, 10601, 1, 31);
    assert_eq!(date.to_string(), "+10601-01-31");
}

#[test]
fn midday() {
    let time = LocalTime::new(Calendar::gregorian(), 12, 0, 0, 0);
    assert_eq!(format!("{:?}", time), "LocalTime(12:00:00)");
}

#[test]
fn ascending() {
    let then = LocalDateTime::new(Calendar::gregorian(), 1, 2009, 2, 13, 23, 31, 30, 123_000_000);
    assert_eq!(then.to_string(), "2009-02-13T23:31:30.123000000");
}

#[test]
fn unnormalised_fields_print_as_they_are() {
    let date = LocalDate::new(Calendar::gregorian(), 1, 2024, 1, 32);
    assert_eq!(date.to_string(), "2024-01-32");
}

#[test]
fn zoned_with_a_fixed_offset() {
    let offset = Offset::of_hours_and_minutes(5, 30).unwrap();
    let zoned = ZonedDateTime::from_instant(&Calendar::gregorian(), Some(TimeZone::fixed(offset)), Instant::at(0));
    assert_eq!(zoned.to_string(), "1970-01-01T05:30:00[+05:30]");
}

#[test]
fn kotlin_string_matches_display() {
    let then = LocalDateTime::new(Calendar::gregorian(), 1, 2009, 2, 13, 23, 31, 30, 0);
    assert_eq!(then.to_kotlin_string(), then.to_string());
}

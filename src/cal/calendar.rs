//! The calendar service: turning instants into fields, and fields back
//! into instants.

use std::borrow::Cow;

use lazy_static::lazy_static;
use log::{debug, trace};

use crate::cal::{DatePiece, TimePiece, Error};
use crate::cal::components::{DateComponents, Field};
use crate::cal::gregorian::{self, Weekday, SECONDS_IN_DAY};
use crate::cal::zone::{TimeZone, LocalOffsets};
use crate::instant::{Instant, NANOS_IN_SECOND};
use crate::util::RangeExt;


lazy_static! {
    static ref CURRENT: Calendar = Calendar::new(Identifier::Gregorian, TimeZone::current());
}

/// Years beyond this many either side of year zero are rejected rather
/// than risking overflow when they get turned into seconds.
const MAX_YEAR: i64 = 1_000_000_000;

/// How far Buddhist Era years are ahead of Gregorian years.
const BUDDHIST_YEAR_OFFSET: i64 = 543;


/// Which calendar system a calendar uses to number its eras and years.
/// Every system shares the Gregorian month and day structure.
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
pub enum Identifier {

    /// The Gregorian calendar, extended backwards before 1582. Era 1 is the
    /// Common Era; era 0 counts years backwards before it, so 1 BCE is
    /// year 1 of era 0.
    Gregorian,

    /// The ISO-8601 calendar, which numbers eras and years in the same way
    /// as the Gregorian calendar here.
    Iso8601,

    /// The Thai solar calendar: a single era, with years 543 ahead of
    /// Gregorian ones.
    Buddhist,
}

impl Identifier {

    /// The era that fields are assumed to be in when none is given.
    pub fn default_era(self) -> i64 {
        match self {
            Identifier::Gregorian | Identifier::Iso8601 => 1,
            Identifier::Buddhist                       => 0,
        }
    }

    fn to_gregorian_year(self, era: i64, year: i64) -> Result<i64, Error> {
        match self {
            Identifier::Gregorian | Identifier::Iso8601 => {
                if era >= 1 { Ok(year) }
                       else { 1i64.checked_sub(year).ok_or(Error::OutOfRange) }
            },
            Identifier::Buddhist => year.checked_sub(BUDDHIST_YEAR_OFFSET).ok_or(Error::OutOfRange),
        }
    }

    /// Returns the era and year-of-era of the given proleptic Gregorian
    /// year.
    pub fn era_and_year(self, gregorian_year: i64) -> (i64, i64) {
        match self {
            Identifier::Gregorian | Identifier::Iso8601 => {
                if gregorian_year >= 1 { (1, gregorian_year) }
                                  else { (0, 1 - gregorian_year) }
            },
            Identifier::Buddhist => (0, gregorian_year + BUDDHIST_YEAR_OFFSET),
        }
    }

    fn check_era(self, era: i64) -> Result<(), Error> {
        match self {
            Identifier::Gregorian | Identifier::Iso8601 if !era.is_within(0..2) => {
                Err(Error::Unresolvable { field: Field::Era, value: era })
            },
            _ => Ok(()),
        }
    }
}


/// A **calendar** decomposes instants into date components and resolves
/// date components into instants, according to a calendar system and a
/// time zone.
///
/// Calendars are *lenient* by default: fields out of their usual range are
/// carried into the larger ones when resolving, so the 32nd of January
/// resolves to the 1st of February, and month 13 to January of the next
/// year. A *strict* calendar refuses to resolve such fields.
#[derive(PartialEq, Eq, Hash, Debug, Clone)]
pub struct Calendar {
    identifier: Identifier,
    time_zone:  TimeZone,
    lenient:    bool,
}

impl Calendar {

    /// The system’s calendar: Gregorian, lenient, in the system’s time
    /// zone.
    pub fn current() -> Self {
        CURRENT.clone()
    }

    /// Creates a lenient calendar of the given system in the given zone.
    pub fn new(identifier: Identifier, time_zone: TimeZone) -> Self {
        Self { identifier, time_zone, lenient: true }
    }

    /// A lenient Gregorian calendar in UTC.
    pub fn gregorian() -> Self {
        Self::new(Identifier::Gregorian, TimeZone::utc())
    }

    /// A lenient ISO-8601 calendar in UTC.
    pub fn iso8601() -> Self {
        Self::new(Identifier::Iso8601, TimeZone::utc())
    }

    /// A lenient Buddhist calendar in UTC.
    pub fn buddhist() -> Self {
        Self::new(Identifier::Buddhist, TimeZone::utc())
    }

    /// Returns a copy of this calendar in a different time zone.
    pub fn with_time_zone(&self, time_zone: TimeZone) -> Self {
        Self { time_zone, .. self.clone() }
    }

    /// Returns a copy of this calendar that refuses to resolve fields that
    /// are out of range.
    pub fn strict(&self) -> Self {
        Self { lenient: false, .. self.clone() }
    }

    pub fn identifier(&self) -> Identifier {
        self.identifier
    }

    pub fn time_zone(&self) -> &TimeZone {
        &self.time_zone
    }

    pub fn is_lenient(&self) -> bool {
        self.lenient
    }

    /// Splits an instant into the requested fields, as seen on a wall
    /// clock in this calendar’s time zone. Fields that weren’t asked for
    /// are left unset, as are the calendar and time zone.
    pub fn decompose(&self, instant: Instant, fields: &[Field]) -> DateComponents {
        let view = self.view_in(instant, &self.time_zone);
        let mut components = DateComponents::new();

        for &field in fields {
            let value = match field {
                Field::Era         => view.era,
                Field::Year        => view.year,
                Field::Month       => view.month,
                Field::Day         => view.day,
                Field::Hour        => view.hour,
                Field::Minute      => view.minute,
                Field::Second      => view.second,
                Field::Nanosecond  => view.nanosecond,
            };

            components.set(field, Some(value));
        }

        components
    }

    /// Turns a date-components record into an instant.
    ///
    /// The record’s own time zone is used if it has one; otherwise this
    /// calendar’s. Missing fields take their lowest value: the calendar’s
    /// default era, year 1, the 1st of January, and midnight.
    ///
    /// Wall-clock times that happen twice resolve to the first occurrence.
    /// Wall-clock times that never happen (because the clocks skipped
    /// them) are moved forward by the length of the skip in a lenient
    /// calendar, and are an error in a strict one.
    pub fn resolve(&self, components: &DateComponents) -> Result<Instant, Error> {
        let era         = components.era.unwrap_or_else(|| self.identifier.default_era());
        let year        = components.year.unwrap_or(1);
        let month       = components.month.unwrap_or(1);
        let day         = components.day.unwrap_or(1);
        let hour        = components.hour.unwrap_or(0);
        let minute      = components.minute.unwrap_or(0);
        let second      = components.second.unwrap_or(0);
        let nanosecond  = components.nanosecond.unwrap_or(0);

        let year = self.identifier.to_gregorian_year(era, year)?;

        if !self.lenient {
            self.check_ranges(era, year, month, day, hour, minute, second, nanosecond)?;
        }

        // Carry surplus months into the year, so the month is 1 to 12.
        let month_index = checked(month.checked_sub(1))?;
        let year = checked(year.checked_add(month_index.div_euclid(12)))?;
        let month = month_index.rem_euclid(12) + 1;

        if month_index.div_euclid(12) != 0 {
            trace!("Carrying month {} over into year {}", components.month.unwrap_or(1), year);
        }

        if !year.is_within(-MAX_YEAR .. MAX_YEAR + 1) {
            debug!("Year {} is too far away to resolve", year);
            return Err(Error::OutOfRange);
        }

        if !day.is_within(1 .. gregorian::days_in_month(year, month) + 1) {
            trace!("Carrying day {} over from {}-{:02}", day, year, month);
        }

        let days = checked(gregorian::days_from_year_month(year, month).checked_add(day).and_then(|d| d.checked_sub(1)))?;

        let local_seconds = checked(
            days.checked_mul(SECONDS_IN_DAY)
                .and_then(|s| s.checked_add(checked_mul(hour, 3600)?))
                .and_then(|s| s.checked_add(checked_mul(minute, 60)?))
                .and_then(|s| s.checked_add(second))
                .and_then(|s| s.checked_add(nanosecond.div_euclid(NANOS_IN_SECOND)))
        )?;

        let time_zone = components.time_zone.as_ref().unwrap_or(&self.time_zone);
        let offset = match time_zone.convert_local(local_seconds) {
            LocalOffsets::Precise(offset)                => offset,
            LocalOffsets::Ambiguous { earlier, .. }      => earlier,
            LocalOffsets::Impossible { before, after } if self.lenient => {
                trace!("Local time skipped by {}; moving forward {}s", time_zone, after - before);
                before
            },
            LocalOffsets::Impossible { .. } => {
                debug!("Local time does not exist in {}", time_zone);
                return Err(Error::NonexistentLocalTime);
            },
        };

        let seconds = checked(local_seconds.checked_sub(offset))?;
        Ok(Instant::at_nanos(seconds, nanosecond.rem_euclid(NANOS_IN_SECOND)))
    }

    #[allow(clippy::too_many_arguments)]
    fn check_ranges(&self, era: i64, year: i64, month: i64, day: i64, hour: i64, minute: i64, second: i64, nanosecond: i64) -> Result<(), Error> {
        self.identifier.check_era(era)?;

        let bounds = [
            (Field::Month,       month,       1 .. 13),
            (Field::Hour,        hour,        0 .. 24),
            (Field::Minute,      minute,      0 .. 60),
            (Field::Second,      second,      0 .. 60),
            (Field::Nanosecond,  nanosecond,  0 .. NANOS_IN_SECOND),
        ];

        for (field, value, range) in bounds {
            if !value.is_within(range) {
                return Err(Error::Unresolvable { field, value });
            }
        }

        if !day.is_within(1 .. gregorian::days_in_month(year, month) + 1) {
            return Err(Error::Unresolvable { field: Field::Day, value: day });
        }

        Ok(())
    }

    /// Fully decomposes an instant, including the weekday and the time
    /// zone, for display.
    pub fn view(&self, instant: Instant) -> CalendarView {
        self.view_in(instant, &self.time_zone)
    }

    /// Fully decomposes an instant as seen in the given time zone.
    pub fn view_in(&self, instant: Instant, time_zone: &TimeZone) -> CalendarView {
        let offset = time_zone.offset_at(instant.seconds());
        let (days, seconds) = gregorian::split_cycles(instant.seconds().saturating_add(offset), SECONDS_IN_DAY);
        let date = gregorian::date_from_days(days);
        let (era, year) = self.identifier.era_and_year(date.year);

        CalendarView {
            era,
            year,
            month:       date.month,
            day:         date.day,
            yearday:     date.yearday,
            weekday:     gregorian::weekday_from_days(days),
            hour:        seconds / 3600,
            minute:      seconds / 60 % 60,
            second:      seconds % 60,
            nanosecond:  instant.nanoseconds() as i64,
            offset,
            zone:        time_zone.identifier(),
        }
    }

    /// The number of whole local days between the Unix epoch and the given
    /// instant, as seen in the given time zone.
    pub(crate) fn local_day(instant: Instant, time_zone: &TimeZone) -> i64 {
        let offset = time_zone.offset_at(instant.seconds());
        gregorian::split_cycles(instant.seconds().saturating_add(offset), SECONDS_IN_DAY).0
    }
}

fn checked(value: Option<i64>) -> Result<i64, Error> {
    value.ok_or(Error::OutOfRange)
}

fn checked_mul(value: i64, factor: i64) -> Option<i64> {
    value.checked_mul(factor)
}


/// Every field of an instant, as it appears in some calendar and time
/// zone. This is what formatters render.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct CalendarView {
    pub era:        i64,
    pub year:       i64,
    pub month:      i64,
    pub day:        i64,
    pub yearday:    i64,
    pub weekday:    Weekday,
    pub hour:       i64,
    pub minute:     i64,
    pub second:     i64,
    pub nanosecond: i64,

    /// The offset from UTC in effect, in seconds.
    pub offset:     i64,

    /// The identifier of the time zone.
    pub zone:       Cow<'static, str>,
}

impl DatePiece for CalendarView {
    fn era(&self) -> i64 { self.era }
    fn year(&self) -> i64 { self.year }
    fn month(&self) -> i64 { self.month }
    fn day(&self) -> i64 { self.day }
}

impl TimePiece for CalendarView {
    fn hour(&self) -> i64 { self.hour }
    fn minute(&self) -> i64 { self.minute }
    fn second(&self) -> i64 { self.second }
    fn nanosecond(&self) -> i64 { self.nanosecond }
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::cal::offset::Offset;

    fn ymd(year: i64, month: i64, day: i64) -> DateComponents {
        DateComponents::new().year(year).month(month).day(day)
    }

    #[test]
    fn epoch() {
        let instant = Calendar::gregorian().resolve(&ymd(1970, 1, 1)).unwrap();
        assert_eq!(instant, Instant::at_epoch());
    }

    #[test]
    fn full_resolution() {
        let components = ymd(2001, 2, 3).hour(4).minute(5).second(6).nanosecond(7);
        let instant = Calendar::gregorian().resolve(&components).unwrap();
        assert_eq!(instant, Instant::at_nanos(981173106, 7));
    }

    #[test]
    fn missing_fields_take_lowest_values() {
        let instant = Calendar::gregorian().resolve(&DateComponents::new().year(1970)).unwrap();
        assert_eq!(instant, Instant::at_epoch());
    }

    #[test]
    fn lenient_month_carry() {
        let calendar = Calendar::gregorian();
        assert_eq!(calendar.resolve(&ymd(2023, 13, 1)), calendar.resolve(&ymd(2024, 1, 1)));
        assert_eq!(calendar.resolve(&ymd(2024, 0, 1)), calendar.resolve(&ymd(2023, 12, 1)));
    }

    #[test]
    fn lenient_day_carry() {
        let calendar = Calendar::gregorian();
        assert_eq!(calendar.resolve(&ymd(2023, 1, 32)), calendar.resolve(&ymd(2023, 2, 1)));
        assert_eq!(calendar.resolve(&ymd(2023, 3, 0)), calendar.resolve(&ymd(2023, 2, 28)));
    }

    #[test]
    fn lenient_time_carry() {
        let calendar = Calendar::gregorian();
        let overflowing = ymd(2023, 12, 31).hour(23).minute(59).second(59).nanosecond(1_000_000_000);
        assert_eq!(calendar.resolve(&overflowing), calendar.resolve(&ymd(2024, 1, 1)));
    }

    #[test]
    fn strict_rejects_day_31_of_april() {
        let result = Calendar::gregorian().strict().resolve(&ymd(2023, 4, 31));
        assert_eq!(result, Err(Error::Unresolvable { field: Field::Day, value: 31 }));
    }

    #[test]
    fn strict_rejects_hour_24() {
        let result = Calendar::gregorian().strict().resolve(&ymd(2023, 4, 1).hour(24));
        assert_eq!(result, Err(Error::Unresolvable { field: Field::Hour, value: 24 }));
    }

    #[test]
    fn strict_accepts_leap_day() {
        assert!(Calendar::gregorian().strict().resolve(&ymd(2024, 2, 29)).is_ok());
        assert!(Calendar::gregorian().strict().resolve(&ymd(2023, 2, 29)).is_err());
    }

    #[test]
    fn huge_years_are_out_of_range() {
        let result = Calendar::gregorian().resolve(&ymd(i64::MAX, 1, 1));
        assert_eq!(result, Err(Error::OutOfRange));
    }

    #[test]
    fn before_common_era() {
        let calendar = Calendar::gregorian();
        let bce = calendar.resolve(&ymd(1, 1, 1).era(0)).unwrap();
        let ce = calendar.resolve(&ymd(1, 1, 1).era(1)).unwrap();
        assert_eq!(ce.seconds() - bce.seconds(), 366 * SECONDS_IN_DAY);

        let components = calendar.decompose(bce, &[Field::Era, Field::Year]);
        assert_eq!(components.era, Some(0));
        assert_eq!(components.year, Some(1));
    }

    #[test]
    fn buddhist_years() {
        let calendar = Calendar::buddhist();
        let instant = calendar.resolve(&ymd(2567, 1, 1)).unwrap();
        assert_eq!(instant, Calendar::gregorian().resolve(&ymd(2024, 1, 1)).unwrap());
        assert_eq!(calendar.decompose(instant, &[Field::Year]).year, Some(2567));
    }

    #[test]
    fn decompose_only_requested_fields() {
        let components = Calendar::gregorian().decompose(Instant::at(981173106), &[Field::Year, Field::Hour]);
        assert_eq!(components.year, Some(2001));
        assert_eq!(components.hour, Some(4));
        assert_eq!(components.month, None);
        assert!(components.calendar.is_none());
    }

    #[test]
    fn decompose_in_time_zone() {
        let zone = TimeZone::fixed(Offset::of_hours_and_minutes(5, 30).unwrap());
        let calendar = Calendar::gregorian().with_time_zone(zone);
        let components = calendar.decompose(Instant::at_epoch(), &[Field::Day, Field::Hour, Field::Minute]);
        assert_eq!((components.day, components.hour, components.minute), (Some(1), Some(5), Some(30)));
    }

    #[test]
    fn resolve_in_time_zone() {
        let zone = TimeZone::fixed(Offset::of_hours_and_minutes(-2, 0).unwrap());
        let calendar = Calendar::gregorian().with_time_zone(zone);
        let instant = calendar.resolve(&ymd(1970, 1, 1)).unwrap();
        assert_eq!(instant, Instant::at(7200));
    }

    #[test]
    fn record_time_zone_wins() {
        let zone = TimeZone::fixed(Offset::of_hours_and_minutes(1, 0).unwrap());
        let instant = Calendar::gregorian().resolve(&ymd(1970, 1, 1).time_zone(zone)).unwrap();
        assert_eq!(instant, Instant::at(-3600));
    }

    #[test]
    fn view_has_weekday() {
        let view = Calendar::gregorian().view(Instant::at(981173106));
        assert_eq!(view.weekday, Weekday::Saturday);
        assert_eq!(view.yearday, 34);
        assert_eq!(view.zone, "UTC");
    }

    #[test]
    fn dst_gap_moves_forward_when_lenient() {
        let calendar = Calendar::gregorian().with_time_zone(TimeZone::named("America/New_York").unwrap());
        let skipped = calendar.resolve(&ymd(2024, 3, 10).hour(2).minute(30)).unwrap();
        let after = calendar.resolve(&ymd(2024, 3, 10).hour(3).minute(30)).unwrap();
        assert_eq!(skipped, after);
    }

    #[test]
    fn dst_gap_fails_when_strict() {
        let calendar = Calendar::gregorian().with_time_zone(TimeZone::named("America/New_York").unwrap()).strict();
        let result = calendar.resolve(&ymd(2024, 3, 10).hour(2).minute(30));
        assert_eq!(result, Err(Error::NonexistentLocalTime));
    }

    #[test]
    fn dst_overlap_takes_first_occurrence() {
        let calendar = Calendar::gregorian().with_time_zone(TimeZone::named("America/New_York").unwrap());
        let instant = calendar.resolve(&ymd(2024, 11, 3).hour(1).minute(30)).unwrap();

        // 05:30 UTC is 01:30 EDT, the first of the two.
        assert_eq!(instant, Calendar::gregorian().resolve(&ymd(2024, 11, 3).hour(5).minute(30)).unwrap());
    }
}

//! Reading dates and times from ISO 8601 strings.

use std::error::Error as ErrorTrait;
use std::fmt;
use std::str::FromStr;

use crate::cal::Error as DateTimeError;
use crate::cal::calendar::Calendar;
use crate::cal::components::Field;
use crate::cal::datetime::{LocalDate, LocalTime, LocalDateTime};
use crate::cal::gregorian;
use crate::cal::offset::{Offset, Error as OffsetError};
use crate::cal::zone::TimeZone;
use crate::cal::zoned::ZonedDateTime;
use crate::util::RangeExt;


impl FromStr for LocalDate {
    type Err = Error<DateTimeError>;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match iso8601::date(input) {
            Ok(fields)  => fields_to_date(fields).map_err(Error::Date),
            Err(e)      => Err(Error::Parse(e)),
        }
    }
}

impl FromStr for LocalTime {
    type Err = Error<DateTimeError>;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match iso8601::time(input) {
            Ok(fields)  => fields_to_time(fields).map_err(Error::Date),
            Err(e)      => Err(Error::Parse(e)),
        }
    }
}

impl FromStr for LocalDateTime {
    type Err = Error<DateTimeError>;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let fields = iso8601::datetime(input).map_err(Error::Parse)?;

        let date = fields_to_date(fields.date).map_err(Error::Date)?;
        let time = fields_to_time(fields.time).map_err(Error::Date)?;
        Ok(Self::of(&date, &time))
    }
}

/// Zoned date-times read this way are given a fixed-offset zone, as the
/// string says nothing about which named zone the offset came from.
impl FromStr for ZonedDateTime {
    type Err = Error<DateTimeError>;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let fields = iso8601::datetime(input).map_err(Error::Parse)?;

        let date = fields_to_date(fields.date).map_err(Error::Date)?;
        let time = fields_to_time(fields.time).map_err(Error::Date)?;
        let offset = fields_to_offset(fields.time).map_err(|e| Error::Date(e.into()))?;

        let date_time = LocalDateTime::of(&date, &time);
        Ok(Self::of(date_time.calendar().clone(), Some(TimeZone::fixed(offset)), &date_time))
    }
}


fn fields_to_date(fields: iso8601::Date) -> Result<LocalDate, DateTimeError> {
    let days = match fields {
        iso8601::Date::YMD { year, month, day } => {
            let (year, month, day) = (i64::from(year), i64::from(month), i64::from(day));
            check(Field::Month, month, 1 .. 13)?;
            check(Field::Day, day, 1 .. gregorian::days_in_month(year, month) + 1)?;
            gregorian::days_from_year_month(year, month) + day - 1
        },

        iso8601::Date::Week { year, ww, d } => {
            let (year, week, weekday) = (i64::from(year), i64::from(ww), i64::from(d));
            if !week.is_within(1 .. weeks_in_year(year) + 1) || !weekday.is_within(1 .. 8) {
                return Err(DateTimeError::InvalidWeekDate { year, week, weekday });
            }

            first_monday(year) + (week - 1) * 7 + (weekday - 1)
        },

        iso8601::Date::Ordinal { year, ddd } => {
            let (year, yearday) = (i64::from(year), i64::from(ddd));
            let days_in_year = if gregorian::is_leap_year(year) { 366 } else { 365 };
            check(Field::Day, yearday, 1 .. days_in_year + 1)?;
            gregorian::days_from_year_month(year, 1) + yearday - 1
        },
    };

    let calendar = Calendar::current();
    let ymd = gregorian::date_from_days(days);
    let (era, year) = calendar.identifier().era_and_year(ymd.year);
    Ok(LocalDate::new(calendar, era, year, ymd.month, ymd.day))
}

/// The day, counted from the epoch, that ISO week 1 of a year starts on.
/// Week 1 is the week with the 4th of January in it.
fn first_monday(year: i64) -> i64 {
    let fourth = gregorian::days_from_year_month(year, 1) + 3;
    let fourth_from_monday = (gregorian::weekday_from_days(fourth).days_from_sunday() as i64 + 6) % 7;
    fourth - fourth_from_monday
}

/// Either 52 or 53.
fn weeks_in_year(year: i64) -> i64 {
    (first_monday(year + 1) - first_monday(year)) / 7
}

fn fields_to_time(fields: iso8601::Time) -> Result<LocalTime, DateTimeError> {
    let h  = i64::from(fields.hour);
    let m  = i64::from(fields.minute);
    let s  = i64::from(fields.second);
    let ms = i64::from(fields.millisecond);

    check(Field::Hour, h, 0 .. 24)?;
    check(Field::Minute, m, 0 .. 60)?;
    check(Field::Second, s, 0 .. 60)?;

    Ok(LocalTime::new(Calendar::current(), h, m, s, ms * 1_000_000))
}

fn fields_to_offset(fields: iso8601::Time) -> Result<Offset, OffsetError> {
    let hours = i8::try_from(fields.tz_offset_hours).map_err(|_| OffsetError::OutOfRange)?;
    let minutes = i8::try_from(fields.tz_offset_minutes).map_err(|_| OffsetError::OutOfRange)?;

    // `Z` and `+00:00` both arrive as zero, and both mean UTC.
    if hours == 0 && minutes == 0 {
        return Ok(Offset::utc());
    }

    Offset::of_hours_and_minutes(hours, minutes)
}

fn check(field: Field, value: i64, range: std::ops::Range<i64>) -> Result<(), DateTimeError> {
    if value.is_within(range) { Ok(()) }
                         else { Err(DateTimeError::Unresolvable { field, value }) }
}


#[derive(PartialEq, Debug, Clone)]
pub enum Error<E: ErrorTrait> {
    Date(E),
    Parse(String),
}

impl<E: ErrorTrait> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Date(ref error)    => write!(f, "parsing resulted in an invalid date: {}", error),
            Error::Parse(ref string)  => write!(f, "parse error: {}", string),
        }
    }
}

impl<E: ErrorTrait + 'static> ErrorTrait for Error<E> {
    fn source(&self) -> Option<&(dyn ErrorTrait + 'static)> {
        match *self {
            Error::Date(ref error)  => Some(error),
            Error::Parse(_)         => None,
        }
    }
}

//! Calendar dates and times, kept as sparse date components and resolved
//! through a calendar.

pub mod calendar;
pub mod components;
pub mod convenience;
pub(crate) mod datetime;
pub(crate) mod fmt;
pub(crate) mod gregorian;
pub mod offset;
#[cfg(feature="parse")] pub mod parse;
pub mod zone;
pub(crate) mod zoned;

use std::cmp::Ordering;
use std::error::Error as ErrorTrait;
use std::fmt as stdfmt;

use self::calendar::Calendar;
use self::components::{DateComponents, Field};
use crate::instant::Instant;

#[cfg(feature="format")] use log::debug;
#[cfg(feature="format")] use self::fmt::custom::{DateFormatter, FORMAT_FAILURE};


/// The **date piece** trait is used for values that have date components
/// of eras, years, months, and days.
///
/// Every value is in the numbering of the value’s own calendar, so the
/// year 2024 has a year value of 2024 in a Gregorian calendar but 2567 in
/// a Buddhist one.
pub trait DatePiece {

    /// The era. In the Gregorian calendar, 1 is the Common Era and 0 is
    /// before it.
    fn era(&self) -> i64;

    /// The year within the era.
    fn year(&self) -> i64;

    /// The month of the year, usually from 1 to 12.
    fn month(&self) -> i64;

    /// The day of the month, usually from 1 to 31.
    fn day(&self) -> i64;
}


/// The **time piece** trait is used for values that have time components
/// of hours, minutes, seconds, and nanoseconds.
pub trait TimePiece {

    /// The hour of the day.
    fn hour(&self) -> i64;

    /// The minute of the hour.
    fn minute(&self) -> i64;

    /// The second of the minute.
    fn second(&self) -> i64;

    /// The nanosecond of the second.
    fn nanosecond(&self) -> i64;
}


/// Anything that is backed by a date-components record, and so can be
/// resolved, compared, and formatted through its calendar.
pub trait HasDateComponents {

    /// The record behind this value.
    fn date_components(&self) -> &DateComponents;

    /// Resolves this value to an instant using its own calendar, or the
    /// current calendar if it has none.
    fn resolve(&self) -> Result<Instant, Error> {
        let components = self.date_components();
        match components.calendar {
            Some(ref calendar) => calendar.resolve(components),
            None               => Calendar::current().resolve(components),
        }
    }

    /// Compares two values by the instants they resolve to. Fails if
    /// either can’t be resolved.
    fn try_cmp<O: HasDateComponents + ?Sized>(&self, other: &O) -> Result<Ordering, Error> {
        Ok(self.resolve()?.cmp(&other.resolve()?))
    }

    /// Returns whether this value resolves to an earlier instant than
    /// the other.
    fn is_before<O: HasDateComponents + ?Sized>(&self, other: &O) -> Result<bool, Error> {
        self.try_cmp(other).map(|o| o == Ordering::Less)
    }

    /// Returns whether this value resolves to a later instant than the
    /// other.
    fn is_after<O: HasDateComponents + ?Sized>(&self, other: &O) -> Result<bool, Error> {
        self.try_cmp(other).map(|o| o == Ordering::Greater)
    }

    /// Renders this value with the given formatter.
    ///
    /// The value is resolved through its calendar first, and then shown in
    /// the formatter’s time zone, if it has one, or else in the value’s
    /// own. Values that can’t be resolved come out as `"-"` rather than
    /// as an error.
    #[cfg(feature="format")]
    fn format(&self, formatter: &DateFormatter) -> String {
        let instant = match self.resolve() {
            Ok(instant) => instant,
            Err(e) => {
                debug!("Formatting unresolvable components: {}", e);
                return FORMAT_FAILURE.to_string();
            }
        };

        let components = self.date_components();
        let calendar = components.calendar.clone().unwrap_or_else(Calendar::current);
        let time_zone = formatter.time_zone()
                                 .or(components.time_zone.as_ref())
                                 .unwrap_or_else(|| calendar.time_zone());

        formatter.format(&calendar.view_in(instant, time_zone))
    }
}

impl HasDateComponents for DateComponents {
    fn date_components(&self) -> &DateComponents {
        self
    }
}


/// Something went wrong reading or resolving date components.
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum Error {

    /// A field was read that isn’t set.
    MissingField(Field),

    /// The calendar was read but isn’t set.
    MissingCalendar,

    /// The time zone was read but isn’t set.
    MissingTimeZone,

    /// A strict calendar was given a field outside of its range.
    Unresolvable { field: Field, value: i64 },

    /// A strict calendar was given a wall-clock time that never happens in
    /// its time zone.
    NonexistentLocalTime,

    /// The fields describe a point too far away to represent.
    OutOfRange,

    /// A time zone name isn’t in the time zone database.
    UnknownTimeZone(String),

    /// A fixed offset from UTC is out of range.
    InvalidOffset(self::offset::Error),

    /// An ISO week date names a week the year doesn’t have, or a weekday
    /// other than 1 to 7.
    InvalidWeekDate { year: i64, week: i64, weekday: i64 },
}

impl stdfmt::Display for Error {
    fn fmt(&self, f: &mut stdfmt::Formatter) -> stdfmt::Result {
        match *self {
            Error::MissingField(field)                => write!(f, "field `{}` is not set", field),
            Error::MissingCalendar                    => write!(f, "calendar is not set"),
            Error::MissingTimeZone                    => write!(f, "time zone is not set"),
            Error::Unresolvable { field, value }      => write!(f, "{} {} cannot be resolved", field, value),
            Error::NonexistentLocalTime               => write!(f, "local time does not exist in its time zone"),
            Error::OutOfRange                         => write!(f, "datetime field out of range"),
            Error::UnknownTimeZone(ref name)          => write!(f, "unknown time zone `{}`", name),
            Error::InvalidOffset(ref e)               => write!(f, "invalid offset: {}", e),
            Error::InvalidWeekDate { year, week, weekday }  => write!(f, "{}-W{:02}-{} is not a week date", year, week, weekday),
        }
    }
}

impl ErrorTrait for Error {
    fn source(&self) -> Option<&(dyn ErrorTrait + 'static)> {
        match *self {
            Error::InvalidOffset(ref e)  => Some(e),
            _                            => None,
        }
    }
}

impl From<self::offset::Error> for Error {
    fn from(error: self::offset::Error) -> Self {
        Error::InvalidOffset(error)
    }
}

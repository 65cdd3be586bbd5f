//! Datetimes with a time zone.

use std::fmt;

use crate::cal::{DatePiece, TimePiece, HasDateComponents, Error};
use crate::cal::calendar::Calendar;
use crate::cal::components::{DateComponents, Field, DATE_TIME_FIELDS};
use crate::cal::datetime::{self, LocalDate, LocalTime, LocalDateTime};
use crate::cal::zone::TimeZone;
use crate::instant::Instant;


/// A **zoned date-time** is a date and a time in a particular time zone.
///
/// The fields are the wall-clock reading in that zone. They’re only turned
/// into an instant on demand, so one that falls in a daylight-saving gap
/// or overlap is only sorted out when it gets resolved.
#[derive(PartialEq, Eq, Hash, Clone)]
pub struct ZonedDateTime {
    components: DateComponents,
}

impl ZonedDateTime {

    /// The current date and time, in the current calendar and its zone.
    pub fn now() -> Self {
        Self::now_in(&Calendar::current())
    }

    /// The current date and time, in the given calendar and its zone.
    pub fn now_in(calendar: &Calendar) -> Self {
        Self::from_instant(calendar, None, Instant::now())
    }

    /// The date and wall-clock time of the given instant, as seen in the
    /// given time zone, or the calendar’s own zone if none is given.
    pub fn from_instant(calendar: &Calendar, time_zone: Option<TimeZone>, instant: Instant) -> Self {
        let time_zone = time_zone.unwrap_or_else(|| calendar.time_zone().clone());
        let components = calendar.with_time_zone(time_zone.clone())
                                 .decompose(instant, DATE_TIME_FIELDS)
                                 .calendar(calendar.clone())
                                 .time_zone(time_zone);
        Self { components }
    }

    /// Creates a zoned date-time from every one of its fields. Without a
    /// time zone, the calendar’s zone is used.
    #[allow(clippy::too_many_arguments)]
    pub fn new(calendar: Calendar, time_zone: Option<TimeZone>, era: i64, year: i64, month: i64, day: i64, hour: i64, minute: i64, second: i64, nanosecond: i64) -> Self {
        let date_time = LocalDateTime::new(calendar.clone(), era, year, month, day, hour, minute, second, nanosecond);
        Self::of(calendar, time_zone, &date_time)
    }

    /// Places a local date-time in a time zone, or in the calendar’s zone
    /// if none is given.
    ///
    /// Only the fields of `date_time` are taken: the result is in the
    /// `calendar` passed here, even when `date_time` has a different one.
    pub fn of(calendar: Calendar, time_zone: Option<TimeZone>, date_time: &LocalDateTime) -> Self {
        let time_zone = time_zone.unwrap_or_else(|| calendar.time_zone().clone());
        let components = DateComponents::new()
            .calendar(calendar)
            .time_zone(time_zone)
            .absorbed(&date_time.date_components().fields_only());

        Self { components }
    }

    /// Places a local date and a local time in a time zone.
    pub fn of_parts(calendar: Calendar, time_zone: Option<TimeZone>, date: &LocalDate, time: &LocalTime) -> Self {
        Self::of(calendar, time_zone, &LocalDateTime::of(date, time))
    }

    pub fn calendar(&self) -> &Calendar {
        datetime::calendar(&self.components)
    }

    pub fn time_zone(&self) -> &TimeZone {
        match self.components.time_zone {
            Some(ref time_zone) => time_zone,
            None                => panic!("{}", Error::MissingTimeZone),
        }
    }

    pub fn to_local_date(&self) -> LocalDate {
        LocalDate::new(self.calendar().clone(), self.era(), self.year(), self.month(), self.day())
    }

    pub fn to_local_time(&self) -> LocalTime {
        LocalTime::new(self.calendar().clone(), self.hour(), self.minute(), self.second(), self.nanosecond())
    }

    pub fn to_local_date_time(&self) -> LocalDateTime {
        LocalDateTime::new(self.calendar().clone(), self.era(), self.year(), self.month(), self.day(),
                           self.hour(), self.minute(), self.second(), self.nanosecond())
    }

    /// The instant this wall-clock reading happens at in its time zone.
    pub fn to_instant(&self) -> Result<Instant, Error> {
        self.resolve()
    }

    /// Returns a copy of this date-time with every field that is set in
    /// `changes` replaced.
    ///
    /// If `changes` has a calendar but no time zone, the result takes the
    /// new calendar’s zone rather than keeping its own.
    pub fn with(&self, changes: &DateComponents) -> Self {
        let time_zone = match (&changes.time_zone, &changes.calendar) {
            (Some(time_zone), _)  => time_zone.clone(),
            (None, Some(calendar)) => calendar.time_zone().clone(),
            (None, None)          => self.time_zone().clone(),
        };

        let calendar = changes.calendar.clone().unwrap_or_else(|| self.calendar().clone());
        let components = DateComponents {
            calendar:  Some(calendar),
            time_zone: Some(time_zone),
            .. self.components.clone()
        };

        Self { components: components.absorbed(&changes.fields_only()) }
    }

    /// Returns a copy of this date-time with every field that is set in
    /// `amounts` added on. The result isn’t normalised, and the calendar
    /// and time zone of `amounts` are ignored.
    pub fn plus(&self, amounts: &DateComponents) -> Self {
        let mut components = self.components.clone();

        for &f in DATE_TIME_FIELDS {
            let sum = datetime::field(&self.components, f).saturating_add(datetime::field_or(amounts, f, 0));
            components.set(f, Some(sum));
        }

        Self { components }
    }
}

impl DatePiece for ZonedDateTime {
    fn era(&self) -> i64 { datetime::field(&self.components, Field::Era) }
    fn year(&self) -> i64 { datetime::field(&self.components, Field::Year) }
    fn month(&self) -> i64 { datetime::field(&self.components, Field::Month) }
    fn day(&self) -> i64 { datetime::field(&self.components, Field::Day) }
}

impl TimePiece for ZonedDateTime {
    fn hour(&self) -> i64 { datetime::field(&self.components, Field::Hour) }
    fn minute(&self) -> i64 { datetime::field(&self.components, Field::Minute) }
    fn second(&self) -> i64 { datetime::field(&self.components, Field::Second) }
    fn nanosecond(&self) -> i64 { datetime::field(&self.components, Field::Nanosecond) }
}

impl HasDateComponents for ZonedDateTime {
    fn date_components(&self) -> &DateComponents {
        &self.components
    }
}

/// Takes the fields of a record the way `LocalDateTime` does, along with
/// its time zone, which defaults to the calendar’s.
impl TryFrom<DateComponents> for ZonedDateTime {
    type Error = Error;

    fn try_from(components: DateComponents) -> Result<Self, Self::Error> {
        let time_zone = components.time_zone.clone();
        let date_time = LocalDateTime::try_from(components)?;
        Ok(Self::of(date_time.calendar().clone(), time_zone, &date_time))
    }
}

impl fmt::Debug for ZonedDateTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ZonedDateTime({})", self)
    }
}

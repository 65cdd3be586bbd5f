//! Dates, times, and datetimes without a time zone.

use std::fmt;

use crate::cal::{DatePiece, TimePiece, HasDateComponents, Error};
use crate::cal::calendar::{Calendar, Identifier};
use crate::cal::components::{DateComponents, Field, DATE_FIELDS, TIME_FIELDS, DATE_TIME_FIELDS};
use crate::instant::Instant;


/// Reads a field that the value types guarantee is set.
///
/// # Panics
///
/// Panics with the `MissingField` message if the field isn’t set, which
/// can only happen if a value’s construction invariant was broken.
pub(crate) fn field(components: &DateComponents, field: Field) -> i64 {
    match components.get(field) {
        Some(value) => value,
        None        => panic!("{}", Error::MissingField(field)),
    }
}

/// Reads the calendar that the value types guarantee is set.
pub(crate) fn calendar(components: &DateComponents) -> &Calendar {
    match components.calendar {
        Some(ref calendar) => calendar,
        None               => panic!("{}", Error::MissingCalendar),
    }
}

/// Reads a field for one of the `TryFrom` conversions, falling back to a
/// default if it isn’t set.
pub(crate) fn field_or(components: &DateComponents, field: Field, default: i64) -> i64 {
    components.get(field).unwrap_or(default)
}


/// A **local date** is a day-long span on the timeline, *without a time
/// zone*: a calendar, an era, a year, a month, and a day.
///
/// The fields are kept exactly as given. Nothing checks that the 31st of
/// April doesn’t exist, and adding a day to the 31st of January gives the
/// 32nd of January; it’s only when the date is resolved through its
/// calendar that these get sorted out.
#[derive(PartialEq, Eq, Hash, Clone)]
pub struct LocalDate {
    components: DateComponents,
}

/// A **local time** is a time on the timeline that recurs once a day,
/// *without a time zone*.
#[derive(PartialEq, Eq, Hash, Clone)]
pub struct LocalTime {
    components: DateComponents,
}

/// A **local date-time** is a date and a time, *without a time zone*.
#[derive(PartialEq, Eq, Hash, Clone)]
pub struct LocalDateTime {
    components: DateComponents,
}


impl LocalDate {

    /// Today’s date, in the current calendar.
    pub fn now() -> Self {
        Self::now_in(&Calendar::current())
    }

    /// Today’s date, in the given calendar.
    pub fn now_in(calendar: &Calendar) -> Self {
        Self::from_instant(calendar, Instant::now())
    }

    /// The date of the given instant, as seen in the given calendar.
    pub fn from_instant(calendar: &Calendar, instant: Instant) -> Self {
        let components = calendar.decompose(instant, DATE_FIELDS).calendar(calendar.clone());
        Self { components }
    }

    /// Creates a date from a year, month, and day in the current calendar
    /// and its default era.
    ///
    /// ### Examples
    ///
    /// ```
    /// use khrysalis_runtime::{LocalDate, DatePiece};
    ///
    /// let date = LocalDate::ymd(1969, 7, 20);
    /// assert_eq!(date.year(), 1969);
    /// assert_eq!(date.month(), 7);
    /// assert_eq!(date.day(), 20);
    /// ```
    pub fn ymd(year: i64, month: i64, day: i64) -> Self {
        let calendar = Calendar::current();
        let era = calendar.identifier().default_era();
        Self::new(calendar, era, year, month, day)
    }

    /// Creates a date from every one of its fields.
    pub fn new(calendar: Calendar, era: i64, year: i64, month: i64, day: i64) -> Self {
        let components = DateComponents::new()
            .calendar(calendar)
            .era(era).year(year).month(month).day(day);

        Self { components }
    }

    /// Creates the date that is the given number of days after the 1st of
    /// January 1970.
    ///
    /// The day count goes straight into the day-of-month field of January
    /// 1970, without any checking: it’s up to the calendar to make sense
    /// of it when the date gets resolved.
    pub fn from_epoch_day(calendar: &Calendar, epoch_day: i64) -> Self {
        let (era, year) = calendar.identifier().era_and_year(1970);
        Self::new(calendar.clone(), era, year, 1, epoch_day.saturating_add(1))
    }

    pub fn calendar(&self) -> &Calendar {
        calendar(&self.components)
    }

    /// The number of days between the 1st of January 1970 and this date.
    /// Fails if this date can’t be resolved by its calendar.
    pub fn epoch_day(&self) -> Result<i64, Error> {
        let calendar = self.calendar();
        let time_zone = calendar.time_zone();

        let basis = DateComponents::new().era(1).year(1970).month(1).day(1);
        let basis = Calendar::new(Identifier::Gregorian, time_zone.clone()).resolve(&basis)?;
        let date = calendar.resolve(&self.components)?;

        Ok(Calendar::local_day(date, time_zone) - Calendar::local_day(basis, time_zone))
    }

    /// Returns a copy of this date with every field that is set in
    /// `changes` replaced. Time fields in `changes` are ignored.
    pub fn with(&self, changes: &DateComponents) -> Self {
        Self::new(
            changes.calendar.clone().unwrap_or_else(|| self.calendar().clone()),
            changes.era.unwrap_or_else(|| self.era()),
            changes.year.unwrap_or_else(|| self.year()),
            changes.month.unwrap_or_else(|| self.month()),
            changes.day.unwrap_or_else(|| self.day()),
        )
    }

    /// Returns a copy of this date with every field that is set in
    /// `amounts` added on. The result isn’t normalised.
    pub fn plus(&self, amounts: &DateComponents) -> Self {
        Self::new(
            self.calendar().clone(),
            self.era().saturating_add(field_or(amounts, Field::Era, 0)),
            self.year().saturating_add(field_or(amounts, Field::Year, 0)),
            self.month().saturating_add(field_or(amounts, Field::Month, 0)),
            self.day().saturating_add(field_or(amounts, Field::Day, 0)),
        )
    }
}

impl DatePiece for LocalDate {
    fn era(&self) -> i64 { field(&self.components, Field::Era) }
    fn year(&self) -> i64 { field(&self.components, Field::Year) }
    fn month(&self) -> i64 { field(&self.components, Field::Month) }
    fn day(&self) -> i64 { field(&self.components, Field::Day) }
}

impl HasDateComponents for LocalDate {
    fn date_components(&self) -> &DateComponents {
        &self.components
    }
}

/// Takes the date fields of a record. The year, month, and day must be
/// set; the calendar defaults to the current one, and the era to that
/// calendar’s default.
impl TryFrom<DateComponents> for LocalDate {
    type Error = Error;

    fn try_from(components: DateComponents) -> Result<Self, Self::Error> {
        let calendar = components.calendar.clone().unwrap_or_else(Calendar::current);
        let era = field_or(&components, Field::Era, calendar.identifier().default_era());

        Ok(Self::new(
            calendar,
            era,
            components.require(Field::Year)?,
            components.require(Field::Month)?,
            components.require(Field::Day)?,
        ))
    }
}

impl fmt::Debug for LocalDate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LocalDate({})", self)
    }
}


impl LocalTime {

    /// The current time, in the current calendar.
    pub fn now() -> Self {
        Self::now_in(&Calendar::current())
    }

    /// The current time, in the given calendar.
    pub fn now_in(calendar: &Calendar) -> Self {
        Self::from_instant(calendar, Instant::now())
    }

    /// The wall-clock time of the given instant, as seen in the given
    /// calendar.
    pub fn from_instant(calendar: &Calendar, instant: Instant) -> Self {
        let components = calendar.decompose(instant, TIME_FIELDS).calendar(calendar.clone());
        Self { components }
    }

    /// Midnight, at the start of the day.
    pub fn min() -> Self {
        Self::new(Calendar::current(), 0, 0, 0, 0)
    }

    /// The last nanosecond of the day.
    pub fn max() -> Self {
        Self::new(Calendar::current(), 23, 59, 59, 999_999_999)
    }

    pub fn hm(hour: i64, minute: i64) -> Self {
        Self::new(Calendar::current(), hour, minute, 0, 0)
    }

    pub fn hms(hour: i64, minute: i64, second: i64) -> Self {
        Self::new(Calendar::current(), hour, minute, second, 0)
    }

    pub fn hms_nano(hour: i64, minute: i64, second: i64, nanosecond: i64) -> Self {
        Self::new(Calendar::current(), hour, minute, second, nanosecond)
    }

    /// Creates a time from every one of its fields.
    pub fn new(calendar: Calendar, hour: i64, minute: i64, second: i64, nanosecond: i64) -> Self {
        let components = DateComponents::new()
            .calendar(calendar)
            .hour(hour).minute(minute).second(second).nanosecond(nanosecond);

        Self { components }
    }

    pub fn calendar(&self) -> &Calendar {
        calendar(&self.components)
    }

    /// Returns a copy of this time with every field that is set in
    /// `changes` replaced. Date fields in `changes` are ignored.
    pub fn with(&self, changes: &DateComponents) -> Self {
        Self::new(
            changes.calendar.clone().unwrap_or_else(|| self.calendar().clone()),
            changes.hour.unwrap_or_else(|| self.hour()),
            changes.minute.unwrap_or_else(|| self.minute()),
            changes.second.unwrap_or_else(|| self.second()),
            changes.nanosecond.unwrap_or_else(|| self.nanosecond()),
        )
    }

    /// Returns a copy of this time with every field that is set in
    /// `amounts` added on. Nothing carries over: 23:00 plus two hours is
    /// hour 25.
    pub fn plus(&self, amounts: &DateComponents) -> Self {
        Self::new(
            self.calendar().clone(),
            self.hour().saturating_add(field_or(amounts, Field::Hour, 0)),
            self.minute().saturating_add(field_or(amounts, Field::Minute, 0)),
            self.second().saturating_add(field_or(amounts, Field::Second, 0)),
            self.nanosecond().saturating_add(field_or(amounts, Field::Nanosecond, 0)),
        )
    }
}

impl TimePiece for LocalTime {
    fn hour(&self) -> i64 { field(&self.components, Field::Hour) }
    fn minute(&self) -> i64 { field(&self.components, Field::Minute) }
    fn second(&self) -> i64 { field(&self.components, Field::Second) }
    fn nanosecond(&self) -> i64 { field(&self.components, Field::Nanosecond) }
}

impl HasDateComponents for LocalTime {
    fn date_components(&self) -> &DateComponents {
        &self.components
    }
}

/// Takes the time fields of a record. The hour must be set; the other
/// fields default to zero, and the calendar to the current one.
impl TryFrom<DateComponents> for LocalTime {
    type Error = Error;

    fn try_from(components: DateComponents) -> Result<Self, Self::Error> {
        Ok(Self::new(
            components.calendar.clone().unwrap_or_else(Calendar::current),
            components.require(Field::Hour)?,
            field_or(&components, Field::Minute, 0),
            field_or(&components, Field::Second, 0),
            field_or(&components, Field::Nanosecond, 0),
        ))
    }
}

impl fmt::Debug for LocalTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LocalTime({})", self)
    }
}


impl LocalDateTime {

    /// The current date and time, in the current calendar.
    pub fn now() -> Self {
        Self::now_in(&Calendar::current())
    }

    /// The current date and time, in the given calendar.
    pub fn now_in(calendar: &Calendar) -> Self {
        Self::from_instant(calendar, Instant::now())
    }

    /// The date and wall-clock time of the given instant, as seen in the
    /// given calendar.
    pub fn from_instant(calendar: &Calendar, instant: Instant) -> Self {
        let components = calendar.decompose(instant, DATE_TIME_FIELDS).calendar(calendar.clone());
        Self { components }
    }

    /// Creates a date-time from every one of its fields.
    #[allow(clippy::too_many_arguments)]
    pub fn new(calendar: Calendar, era: i64, year: i64, month: i64, day: i64, hour: i64, minute: i64, second: i64, nanosecond: i64) -> Self {
        let components = DateComponents::new()
            .calendar(calendar)
            .era(era).year(year).month(month).day(day)
            .hour(hour).minute(minute).second(second).nanosecond(nanosecond);

        Self { components }
    }

    /// Creates a date-time to the second in the current calendar and its
    /// default era.
    pub fn ymd_hms(year: i64, month: i64, day: i64, hour: i64, minute: i64, second: i64) -> Self {
        let calendar = Calendar::current();
        let era = calendar.identifier().default_era();
        Self::new(calendar, era, year, month, day, hour, minute, second, 0)
    }

    /// Puts a date and a time together. The date’s calendar is kept.
    pub fn of(date: &LocalDate, time: &LocalTime) -> Self {
        let components = date.components.clone()
                                        .absorbed(&time.components.fields_only());
        Self { components }
    }

    pub fn calendar(&self) -> &Calendar {
        calendar(&self.components)
    }

    /// The date part of this date-time, in the same calendar.
    pub fn to_local_date(&self) -> LocalDate {
        LocalDate::new(self.calendar().clone(), self.era(), self.year(), self.month(), self.day())
    }

    /// The time part of this date-time, in the same calendar.
    pub fn to_local_time(&self) -> LocalTime {
        LocalTime::new(self.calendar().clone(), self.hour(), self.minute(), self.second(), self.nanosecond())
    }

    /// Returns a copy of this date-time with every field that is set in
    /// `changes` replaced.
    pub fn with(&self, changes: &DateComponents) -> Self {
        Self::new(
            changes.calendar.clone().unwrap_or_else(|| self.calendar().clone()),
            changes.era.unwrap_or_else(|| self.era()),
            changes.year.unwrap_or_else(|| self.year()),
            changes.month.unwrap_or_else(|| self.month()),
            changes.day.unwrap_or_else(|| self.day()),
            changes.hour.unwrap_or_else(|| self.hour()),
            changes.minute.unwrap_or_else(|| self.minute()),
            changes.second.unwrap_or_else(|| self.second()),
            changes.nanosecond.unwrap_or_else(|| self.nanosecond()),
        )
    }

    /// Returns a copy of this date-time with every field that is set in
    /// `amounts` added on. The result isn’t normalised.
    pub fn plus(&self, amounts: &DateComponents) -> Self {
        let mut components = self.components.clone();

        for &f in DATE_TIME_FIELDS {
            let sum = field(&self.components, f).saturating_add(field_or(amounts, f, 0));
            components.set(f, Some(sum));
        }

        Self { components }
    }
}

impl DatePiece for LocalDateTime {
    fn era(&self) -> i64 { field(&self.components, Field::Era) }
    fn year(&self) -> i64 { field(&self.components, Field::Year) }
    fn month(&self) -> i64 { field(&self.components, Field::Month) }
    fn day(&self) -> i64 { field(&self.components, Field::Day) }
}

impl TimePiece for LocalDateTime {
    fn hour(&self) -> i64 { field(&self.components, Field::Hour) }
    fn minute(&self) -> i64 { field(&self.components, Field::Minute) }
    fn second(&self) -> i64 { field(&self.components, Field::Second) }
    fn nanosecond(&self) -> i64 { field(&self.components, Field::Nanosecond) }
}

impl HasDateComponents for LocalDateTime {
    fn date_components(&self) -> &DateComponents {
        &self.components
    }
}

/// Takes the date and time fields of a record. The year, month, and day
/// must be set; the time fields default to zero, the calendar to the
/// current one, and the era to that calendar’s default.
impl TryFrom<DateComponents> for LocalDateTime {
    type Error = Error;

    fn try_from(components: DateComponents) -> Result<Self, Self::Error> {
        let date = LocalDate::try_from(components.clone())?;
        let time = LocalTime::try_from(DateComponents { hour: Some(field_or(&components, Field::Hour, 0)), .. components })?;
        Ok(Self::of(&date, &time))
    }
}

impl fmt::Debug for LocalDateTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LocalDateTime({})", self)
    }
}

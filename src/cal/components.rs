//! Sparse records of calendar fields.

use std::fmt;

use crate::cal::{Calendar, Error};
use crate::cal::zone::TimeZone;


/// One of the numeric fields of a date-components record.
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
pub enum Field {
    Era,
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Nanosecond,
}

/// The fields that make up a calendar date.
pub const DATE_FIELDS: &[Field] = &[Field::Era, Field::Year, Field::Month, Field::Day];

/// The fields that make up a wall-clock time.
pub const TIME_FIELDS: &[Field] = &[Field::Hour, Field::Minute, Field::Second, Field::Nanosecond];

/// Every numeric field.
pub const DATE_TIME_FIELDS: &[Field] = &[
    Field::Era, Field::Year, Field::Month, Field::Day,
    Field::Hour, Field::Minute, Field::Second, Field::Nanosecond,
];

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            Field::Era         => "era",
            Field::Year        => "year",
            Field::Month       => "month",
            Field::Day         => "day",
            Field::Hour        => "hour",
            Field::Minute      => "minute",
            Field::Second      => "second",
            Field::Nanosecond  => "nanosecond",
        };

        f.write_str(name)
    }
}


/// A **date-components record** is a sparse set of calendar fields, any of
/// which may be missing, along with the calendar and time zone they should
/// be read in.
///
/// The same record type is used for three jobs: as the backing store of
/// the date and time value types, as the set of overrides passed to their
/// `with` methods, and as the set of amounts passed to their `plus`
/// methods.
///
/// ```
/// use khrysalis_runtime::DateComponents;
///
/// let record = DateComponents::new().year(2024).month(2);
/// assert_eq!(record.year, Some(2024));
/// assert_eq!(record.day, None);
/// ```
#[derive(PartialEq, Eq, Hash, Debug, Clone, Default)]
pub struct DateComponents {
    pub calendar:   Option<Calendar>,
    pub time_zone:  Option<TimeZone>,
    pub era:        Option<i64>,
    pub year:       Option<i64>,
    pub month:      Option<i64>,
    pub day:        Option<i64>,
    pub hour:       Option<i64>,
    pub minute:     Option<i64>,
    pub second:     Option<i64>,
    pub nanosecond: Option<i64>,
}

impl DateComponents {

    /// Creates a record with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calendar(mut self, calendar: Calendar) -> Self {
        self.calendar = Some(calendar);
        self
    }

    pub fn time_zone(mut self, time_zone: TimeZone) -> Self {
        self.time_zone = Some(time_zone);
        self
    }

    pub fn era(self, era: i64) -> Self { self.with_field(Field::Era, era) }
    pub fn year(self, year: i64) -> Self { self.with_field(Field::Year, year) }
    pub fn month(self, month: i64) -> Self { self.with_field(Field::Month, month) }
    pub fn day(self, day: i64) -> Self { self.with_field(Field::Day, day) }
    pub fn hour(self, hour: i64) -> Self { self.with_field(Field::Hour, hour) }
    pub fn minute(self, minute: i64) -> Self { self.with_field(Field::Minute, minute) }
    pub fn second(self, second: i64) -> Self { self.with_field(Field::Second, second) }
    pub fn nanosecond(self, nanosecond: i64) -> Self { self.with_field(Field::Nanosecond, nanosecond) }

    fn with_field(mut self, field: Field, value: i64) -> Self {
        self.set(field, Some(value));
        self
    }

    /// Returns the value of the given field, if it’s set.
    pub fn get(&self, field: Field) -> Option<i64> {
        *self.slot(field)
    }

    /// Sets or clears the given field.
    pub fn set(&mut self, field: Field, value: Option<i64>) {
        *self.slot_mut(field) = value;
    }

    /// Returns the value of the given field, or an error naming the field
    /// if it isn’t set.
    pub fn require(&self, field: Field) -> Result<i64, Error> {
        self.get(field).ok_or(Error::MissingField(field))
    }

    /// Returns the calendar, or an error if it isn’t set.
    pub fn require_calendar(&self) -> Result<&Calendar, Error> {
        self.calendar.as_ref().ok_or(Error::MissingCalendar)
    }

    /// Returns the time zone, or an error if it isn’t set.
    pub fn require_time_zone(&self) -> Result<&TimeZone, Error> {
        self.time_zone.as_ref().ok_or(Error::MissingTimeZone)
    }

    /// Merges another record into this one. Every field that is set in
    /// `other` replaces the field here; every field that isn’t is left
    /// alone. This includes the calendar and time zone.
    pub fn absorb(&mut self, other: &DateComponents) {
        if let Some(ref calendar) = other.calendar {
            self.calendar = Some(calendar.clone());
        }

        if let Some(ref time_zone) = other.time_zone {
            self.time_zone = Some(time_zone.clone());
        }

        for &field in DATE_TIME_FIELDS {
            if let Some(value) = other.get(field) {
                self.set(field, Some(value));
            }
        }
    }

    /// By-value version of `absorb`.
    pub fn absorbed(mut self, other: &DateComponents) -> Self {
        self.absorb(other);
        self
    }

    /// Returns a copy of this record with only the given fields kept. The
    /// calendar and time zone are kept too.
    pub fn restricted_to(&self, fields: &[Field]) -> Self {
        let mut restricted = DateComponents {
            calendar:  self.calendar.clone(),
            time_zone: self.time_zone.clone(),
            .. DateComponents::default()
        };

        for &field in fields {
            restricted.set(field, self.get(field));
        }

        restricted
    }

    /// Returns a copy of this record without its calendar or time zone.
    pub fn fields_only(&self) -> Self {
        DateComponents {
            calendar:  None,
            time_zone: None,
            .. self.clone()
        }
    }

    /// Returns whether no numeric field is set.
    pub fn is_empty(&self) -> bool {
        DATE_TIME_FIELDS.iter().all(|&f| self.get(f).is_none())
    }

    fn slot(&self, field: Field) -> &Option<i64> {
        match field {
            Field::Era         => &self.era,
            Field::Year        => &self.year,
            Field::Month       => &self.month,
            Field::Day         => &self.day,
            Field::Hour        => &self.hour,
            Field::Minute      => &self.minute,
            Field::Second      => &self.second,
            Field::Nanosecond  => &self.nanosecond,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<i64> {
        match field {
            Field::Era         => &mut self.era,
            Field::Year        => &mut self.year,
            Field::Month       => &mut self.month,
            Field::Day         => &mut self.day,
            Field::Hour        => &mut self.hour,
            Field::Minute      => &mut self.minute,
            Field::Second      => &mut self.second,
            Field::Nanosecond  => &mut self.nanosecond,
        }
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::cal::Calendar;

    #[test]
    fn builder_sets_only_named_fields() {
        let record = DateComponents::new().day(5).hour(3);
        assert_eq!(record.get(Field::Day), Some(5));
        assert_eq!(record.get(Field::Hour), Some(3));
        assert_eq!(record.get(Field::Month), None);
        assert!(record.calendar.is_none());
    }

    #[test]
    fn require_names_the_missing_field() {
        let record = DateComponents::new().year(2020);
        assert_eq!(record.require(Field::Year), Ok(2020));
        assert_eq!(record.require(Field::Month), Err(Error::MissingField(Field::Month)));
    }

    #[test]
    fn absorb_overrides_set_fields_only() {
        let mut base = DateComponents::new().year(2020).month(1).day(1).calendar(Calendar::gregorian());
        base.absorb(&DateComponents::new().month(6).hour(12));

        assert_eq!(base.year, Some(2020));
        assert_eq!(base.month, Some(6));
        assert_eq!(base.day, Some(1));
        assert_eq!(base.hour, Some(12));
        assert_eq!(base.calendar, Some(Calendar::gregorian()));
    }

    #[test]
    fn absorb_replaces_calendar_and_zone_when_given() {
        let base = DateComponents::new().calendar(Calendar::gregorian()).time_zone(TimeZone::utc());
        let other = DateComponents::new().calendar(Calendar::buddhist());

        let merged = base.absorbed(&other);
        assert_eq!(merged.calendar, Some(Calendar::buddhist()));
        assert_eq!(merged.time_zone, Some(TimeZone::utc()));
    }

    #[test]
    fn restriction() {
        let record = DateComponents::new().year(2020).hour(4).calendar(Calendar::gregorian());
        let restricted = record.restricted_to(DATE_FIELDS);
        assert_eq!(restricted.year, Some(2020));
        assert_eq!(restricted.hour, None);
        assert!(restricted.calendar.is_some());
    }

    #[test]
    fn fields_only_drops_calendar_and_zone() {
        let record = DateComponents::new().day(9).calendar(Calendar::gregorian()).time_zone(TimeZone::utc());
        let stripped = record.fields_only();
        assert_eq!(stripped.day, Some(9));
        assert!(stripped.calendar.is_none());
        assert!(stripped.time_zone.is_none());
    }

    #[test]
    fn emptiness() {
        assert!(DateComponents::new().calendar(Calendar::gregorian()).is_empty());
        assert!(!DateComponents::new().second(0).is_empty());
    }
}

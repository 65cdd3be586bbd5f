//! Proleptic Gregorian day-count arithmetic.
//!
//! This is the only place that knows how long months and years are. Every
//! calendar identifier maps its era and year numbering onto a proleptic
//! Gregorian year and then uses these functions to move between dates and
//! days since the Unix epoch.

use std::fmt;


/// Number of days guaranteed to be in four years.
const DAYS_IN_4Y:   i64 = 365 *   4 +  1;

/// Number of days guaranteed to be in a hundred years.
const DAYS_IN_100Y: i64 = 365 * 100 + 24;

/// Number of days guaranteed to be in four hundred years.
const DAYS_IN_400Y: i64 = 365 * 400 + 97;

/// Number of seconds in a day. Leap seconds are simply ignored.
pub(crate) const SECONDS_IN_DAY: i64 = 86400;

/// Number of days between **1st January, 1970** and **1st March, 2000**.
///
/// Having the reference point immediately after a possible leap day, at
/// the very end of a 400-year cycle, reduces the maths needed to turn a
/// day count into a date to simple division.
const EPOCH_DIFFERENCE: i64 = 30 * 365   // 30 years between 2000 and 1970...
                            + 7          // plus seven days for leap years...
                            + 31 + 29;   // plus all the days in January and February in 2000.

/// Number of days between 1st January 1970 and 1st January 2000.
const DAYS_1970_TO_2000: i64 = 10958;

/// The number of days elapsed at the end of each month, starting at the
/// beginning of March (the first month after the EPOCH above), going
/// backwards, ignoring February.
const TIME_TRIANGLE: &[i64; 11] =
    &[31 + 30 + 31 + 30 + 31 + 31 + 30 + 31 + 30 + 31 + 31,  // January
      31 + 30 + 31 + 30 + 31 + 31 + 30 + 31 + 30 + 31,  // December
      31 + 30 + 31 + 30 + 31 + 31 + 30 + 31 + 30,  // November
      31 + 30 + 31 + 30 + 31 + 31 + 30 + 31,  // October
      31 + 30 + 31 + 30 + 31 + 31 + 30,  // September
      31 + 30 + 31 + 30 + 31 + 31,  // August
      31 + 30 + 31 + 30 + 31,  // July
      31 + 30 + 31 + 30,  // June
      31 + 30 + 31,  // May
      31 + 30,  // April
      31]; // March

/// Days before the start of each month in a common year.
const DAYS_BEFORE_MONTH: [i64; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];


/// Returns whether the given proleptic Gregorian year is a leap year.
pub(crate) fn is_leap_year(year: i64) -> bool {
    leap_year_calculations(year).1
}

/// Returns the number of days in the given month (1 to 12) of the given
/// year.
pub(crate) fn days_in_month(year: i64, month: i64) -> i64 {
    match month {
        2               => if is_leap_year(year) { 29 } else { 28 },
        4 | 6 | 9 | 11  => 30,
        _               => 31,
    }
}

/// Performs two related calculations for leap years, returning the
/// results as a two-part tuple:
///
/// 1. The number of leap years that have elapsed prior to this year,
///    counted from the year 2000;
/// 2. Whether this year is a leap year or not.
fn leap_year_calculations(year: i64) -> (i64, bool) {
    let year = year - 2000;

    // This calculation is the reverse of `date_from_days`.
    let (num_400y_cycles, mut remainder) = split_cycles(year, 400);

    // Standard leap-year calculations, performed on the remainder
    let currently_leap_year = remainder == 0 || (remainder % 100 != 0 && remainder % 4 == 0);

    let num_100y_cycles = remainder / 100;
    remainder -= num_100y_cycles * 100;

    let leap_years_elapsed = remainder / 4
        + 97 * num_400y_cycles  // There are 97 leap years in 400 years
        + 24 * num_100y_cycles  // There are 24 leap years in 100 years
        - if currently_leap_year { 1 } else { 0 };

    (leap_years_elapsed, currently_leap_year)
}

/// Returns the number of days between the Unix epoch and the first day of
/// the given month. The month must already be in the range 1 to 12.
pub(crate) fn days_from_year_month(year: i64, month: i64) -> i64 {
    let (leap_days_elapsed, is_leap_year) = leap_year_calculations(year);

    (year - 2000) * 365
        + DAYS_1970_TO_2000
        + leap_days_elapsed
        + DAYS_BEFORE_MONTH[(month - 1) as usize]
        + if is_leap_year && month >= 3 { 1 } else { 0 }
}

/// A year, month, and day-of-month triple, as produced by
/// [`date_from_days`], along with the day of the year.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub(crate) struct YearMonthDay {
    pub year:    i64,
    pub month:   i64,
    pub day:     i64,
    pub yearday: i64,
}

/// Turns a number of days since the Unix epoch into a Gregorian date.
pub(crate) fn date_from_days(days_since_1970: i64) -> YearMonthDay {
    let days = days_since_1970 - EPOCH_DIFFERENCE;

    // The Gregorian calendar works in 400-year cycles, which repeat
    // themselves ever after.
    let (num_400y_cycles, mut remainder) = split_cycles(days, DAYS_IN_400Y);

    let num_100y_cycles = remainder / DAYS_IN_100Y;
    remainder -= num_100y_cycles * DAYS_IN_100Y;  // remainder is now days left in this 100-year cycle

    let num_4y_cycles = remainder / DAYS_IN_4Y;
    remainder -= num_4y_cycles * DAYS_IN_4Y;  // remainder is now days left in this 4-year cycle

    let mut years = std::cmp::min(remainder / 365, 3);
    remainder -= years * 365;  // remainder is now days left in this year

    let days_this_year =
        if years == 0 && !(num_4y_cycles == 0 && num_100y_cycles != 0) { 366 }
                                                                  else { 365 };

    // The 306 here refers to the number of days in a year excluding
    // January and February (which are excluded because of the EPOCH)
    let mut day_of_year = remainder + days_this_year - 306;
    if day_of_year >= days_this_year {
        day_of_year -= days_this_year;  // wrap around for January and February
    }

    years +=   4 * num_4y_cycles
           + 100 * num_100y_cycles
           + 400 * num_400y_cycles;

    // (it’s “11 - index” below because the triangle goes backwards)
    let result = TIME_TRIANGLE.iter()
                              .enumerate()
                              .find(|&(_, days)| *days <= remainder);

    let (mut month, month_days) = match result {
        Some((index, days)) => (11 - index as i64, remainder - *days),
        None => (0, remainder),  // No month found? Then it’s February.
    };

    // Add 2 to the month to compensate for the EPOCH being in March.
    month += 2;

    if month >= 12 {
        years += 1;   // wrap around for January and February
        month -= 12;
    }

    YearMonthDay {
        year:    years + 2000,
        month:   month + 1,
        day:     month_days + 1,
        yearday: day_of_year + 1,
    }
}

/// Returns the weekday of the given number of days since the Unix epoch.
pub(crate) fn weekday_from_days(days_since_1970: i64) -> Weekday {
    // 1st January 1970 was a Thursday.
    Weekday::from_zero((days_since_1970 + 4).rem_euclid(7))
}

/// Splits a number of periods into whole cycles and a non-negative
/// remainder.
pub(crate) fn split_cycles(number_of_periods: i64, cycle_length: i64) -> (i64, i64) {
    (number_of_periods.div_euclid(cycle_length), number_of_periods.rem_euclid(cycle_length))
}


/// A day of the week.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub enum Weekday {
    Sunday, Monday, Tuesday, Wednesday, Thursday, Friday, Saturday,
}

impl Weekday {

    /// Returns the number of days since Sunday, which is also the index
    /// locales use for weekday names.
    pub fn days_from_sunday(self) -> usize {
        self as usize
    }

    fn from_zero(weekday: i64) -> Self {
        match weekday {
            0 => Weekday::Sunday,     1 => Weekday::Monday,    2 => Weekday::Tuesday,
            3 => Weekday::Wednesday,  4 => Weekday::Thursday,  5 => Weekday::Friday,
            _ => Weekday::Saturday,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

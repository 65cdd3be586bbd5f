//! Fixed offsets from UTC.

use std::error::Error as ErrorTrait;
use std::fmt;

use crate::util::RangeExt;


/// A fixed offset from UTC, in seconds. The UTC offset is kept distinct
/// from a zero offset so that it can be displayed as `Z`.
#[derive(PartialEq, Eq, Hash, Copy, Clone)]
pub struct Offset {
    offset_seconds: Option<i32>,
}

impl Offset {

    /// The offset of UTC itself.
    pub fn utc() -> Self {
        Self { offset_seconds: None }
    }

    /// Creates an offset of the given number of seconds, which must be
    /// within a day either side of UTC.
    pub fn of_seconds(seconds: i32) -> Result<Self, Error> {
        if seconds.is_within(-86400..86401) {
            Ok(Self { offset_seconds: Some(seconds) })
        }
        else {
            Err(Error::OutOfRange)
        }
    }

    /// Creates an offset of the given number of hours and minutes. Both
    /// parts must have the same sign.
    pub fn of_hours_and_minutes(hours: i8, minutes: i8) -> Result<Self, Error> {
        if (hours.is_positive() && minutes.is_negative())
        || (hours.is_negative() && minutes.is_positive()) {
            Err(Error::SignMismatch)
        }
        else if hours <= -24 || hours >= 24 || minutes <= -60 || minutes >= 60 {
            Err(Error::OutOfRange)
        }
        else {
            let hours = hours as i32;
            let minutes = minutes as i32;
            Self::of_seconds(hours * (60 * 60) + minutes * 60)
        }
    }

    /// Returns the total number of seconds this offset is ahead of UTC.
    pub fn total_seconds(self) -> i64 {
        self.offset_seconds.unwrap_or(0) as i64
    }

    pub fn is_utc(self) -> bool {
        self.offset_seconds.is_none()
    }

    pub fn is_negative(self) -> bool {
        self.total_seconds() < 0
    }

    pub fn hours(self) -> i8 {
        (self.total_seconds() / 60 / 60) as i8
    }

    pub fn minutes(self) -> i8 {
        (self.total_seconds() / 60 % 60) as i8
    }

    pub fn seconds(self) -> i8 {
        (self.total_seconds() % 60) as i8
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_utc() {
            return write!(f, "Z");
        }

        let sign = if self.is_negative() { '-' } else { '+' };
        write!(f, "{}{:02}:{:02}", sign, self.hours().abs(), self.minutes().abs())?;

        if self.seconds() != 0 {
            write!(f, ":{:02}", self.seconds().abs())?;
        }

        Ok(())
    }
}

impl fmt::Debug for Offset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Offset({})", self)
    }
}


#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum Error {
    OutOfRange,
    SignMismatch,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::OutOfRange    => write!(f, "offset field out of range"),
            Error::SignMismatch  => write!(f, "sign mismatch"),
        }
    }
}

impl ErrorTrait for Error {
}


#[cfg(test)]
mod test {
    use super::Offset;

    #[test]
    fn fixed_seconds() {
        assert!(Offset::of_seconds(1234).is_ok());
    }

    #[test]
    fn fixed_seconds_out_of_range() {
        assert!(Offset::of_seconds(100_000).is_err());
    }

    #[test]
    fn fixed_hm() {
        assert!(Offset::of_hours_and_minutes(5, 30).is_ok());
    }

    #[test]
    fn fixed_hm_negative() {
        assert!(Offset::of_hours_and_minutes(-3, -45).is_ok());
    }

    #[test]
    fn fixed_hm_err() {
        assert!(Offset::of_hours_and_minutes(8, 60).is_err());
    }

    #[test]
    fn fixed_hm_signs() {
        assert!(Offset::of_hours_and_minutes(-4, 30).is_err());
    }

    #[test]
    fn fixed_hm_signs_zero() {
        assert!(Offset::of_hours_and_minutes(4, 0).is_ok());
    }

    #[test]
    fn display_zulu() {
        assert_eq!(Offset::utc().to_string(), "Z");
    }

    #[test]
    fn display_zero_is_not_zulu() {
        assert_eq!(Offset::of_seconds(0).unwrap().to_string(), "+00:00");
    }

    #[test]
    fn debug_offset() {
        let offset = Offset::of_seconds(-25 * 60 - 21).unwrap();
        let debugged = format!("{:?}", offset);
        assert_eq!(debugged, "Offset(-00:25:21)");
    }

    #[test]
    fn total_seconds() {
        assert_eq!(Offset::of_hours_and_minutes(5, 30).unwrap().total_seconds(), 19800);
        assert_eq!(Offset::utc().total_seconds(), 0);
    }
}

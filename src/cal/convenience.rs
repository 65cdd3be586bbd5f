//! Adds convenience functions to some structs.
//!
//! # Example
//! ```
//! use khrysalis_runtime::{LocalDate, Instant, TimeZone, DatePiece};
//! use khrysalis_runtime::convenience::{Today, AtZone};
//!
//! let today: LocalDate = LocalDate::today();
//! let zoned = Instant::at(0).at_zone(TimeZone::utc());
//! assert_eq!(zoned.year(), 1970);
//! ```

use crate::cal::calendar::Calendar;
use crate::cal::datetime::LocalDate;
use crate::cal::zone::TimeZone;
use crate::cal::zoned::ZonedDateTime;
use crate::instant::Instant;


/// Adds `LocalDate::today() -> LocalDate`
pub trait Today {
    fn today() -> LocalDate;
}

impl Today for LocalDate {
    fn today() -> LocalDate {
        LocalDate::now()
    }
}


/// Adds `Instant::at_zone(TimeZone) -> ZonedDateTime`, which reads an
/// instant in the current calendar but the given zone.
pub trait AtZone {
    fn at_zone(&self, time_zone: TimeZone) -> ZonedDateTime;
}

impl AtZone for Instant {
    fn at_zone(&self, time_zone: TimeZone) -> ZonedDateTime {
        ZonedDateTime::from_instant(&Calendar::current(), Some(time_zone), *self)
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::cal::{DatePiece, TimePiece};

    #[test]
    fn instant_in_zone() {
        let new_york = TimeZone::named("America/New_York").unwrap();
        let zoned = Instant::at(981173106).at_zone(new_york.clone());

        assert_eq!(zoned.time_zone(), &new_york);
        assert_eq!((zoned.day(), zoned.hour()), (2, 23));
    }
}

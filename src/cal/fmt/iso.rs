use std::fmt;

use crate::cal::{DatePiece, TimePiece};
use crate::cal::datetime::{LocalDate, LocalTime, LocalDateTime};
use crate::cal::zoned::ZonedDateTime;
use crate::util::RangeExt;


fn write_date<T: DatePiece>(f: &mut fmt::Formatter, date: &T) -> fmt::Result {
    let year = date.year();
    if year.is_within(0 .. 10000) {
        write!(f, "{:04}-{:02}-{:02}", year, date.month(), date.day())
    }
    else {
        write!(f, "{:+05}-{:02}-{:02}", year, date.month(), date.day())
    }
}

fn write_time<T: TimePiece>(f: &mut fmt::Formatter, time: &T) -> fmt::Result {
    write!(f, "{:02}:{:02}:{:02}", time.hour(), time.minute(), time.second())?;

    match time.nanosecond() {
        0 => Ok(()),
        n => write!(f, ".{:09}", n),
    }
}


impl fmt::Display for LocalDate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_date(f, self)
    }
}

impl fmt::Display for LocalTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_time(f, self)
    }
}

impl fmt::Display for LocalDateTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_date(f, self)?;
        f.write_str("T")?;
        write_time(f, self)
    }
}

impl fmt::Display for ZonedDateTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_date(f, self)?;
        f.write_str("T")?;
        write_time(f, self)?;
        write!(f, "[{}]", self.time_zone())
    }
}


#[cfg(test)]
mod test {
    use crate::cal::calendar::Calendar;
    use crate::cal::datetime::{LocalDate, LocalTime, LocalDateTime};
    use crate::cal::zoned::ZonedDateTime;
    use crate::cal::zone::TimeZone;

    #[test]
    fn date() {
        assert_eq!(LocalDate::new(Calendar::gregorian(), 1, 2024, 3, 5).to_string(), "2024-03-05");
    }

    #[test]
    fn far_future_date() {
        assert_eq!(LocalDate::new(Calendar::gregorian(), 1, 12345, 1, 2).to_string(), "+12345-01-02");
    }

    #[test]
    fn negative_year() {
        assert_eq!(LocalDate::new(Calendar::gregorian(), 1, -44, 3, 15).to_string(), "-0044-03-15");
    }

    #[test]
    fn whole_second_time() {
        assert_eq!(LocalTime::new(Calendar::gregorian(), 10, 15, 30, 0).to_string(), "10:15:30");
    }

    #[test]
    fn nanosecond_time() {
        assert_eq!(LocalTime::new(Calendar::gregorian(), 10, 15, 30, 1).to_string(), "10:15:30.000000001");
    }

    #[test]
    fn date_time() {
        let date_time = LocalDateTime::new(Calendar::gregorian(), 1, 2024, 3, 5, 10, 15, 30, 1);
        assert_eq!(date_time.to_string(), "2024-03-05T10:15:30.000000001");
        assert_eq!(format!("{:?}", date_time), "LocalDateTime(2024-03-05T10:15:30.000000001)");
    }

    #[test]
    fn zoned() {
        let london = TimeZone::named("Europe/London").unwrap();
        let zoned = ZonedDateTime::new(Calendar::gregorian(), Some(london), 1, 2024, 3, 5, 10, 15, 30, 0);
        assert_eq!(zoned.to_string(), "2024-03-05T10:15:30[Europe/London]");
    }
}

//! Exact points on a timeline.

use std::fmt;

use crate::system::sys_time;


/// Number of nanoseconds in a second.
pub(crate) const NANOS_IN_SECOND: i64 = 1_000_000_000;


/// An **instant** is an exact point on the timeline, irrespective of time
/// zone or calendar format, with nanosecond precision.
///
/// Internally, this is represented by a 64-bit integer of seconds since the
/// Unix epoch, and a 32-bit integer of nanoseconds into that second, which
/// is always in the range `0 .. 1_000_000_000`. Instants before the epoch
/// have negative seconds but a positive nanosecond part.
///
/// This is what calendars resolve date components *into*, and decompose
/// date components *from*.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct Instant {
    seconds: i64,
    nanoseconds: i32,
}

impl Instant {

    /// Creates a new Instant set to the number of seconds since the Unix
    /// epoch, and zero nanoseconds.
    pub fn at(seconds: i64) -> Self {
        Self { seconds, nanoseconds: 0 }
    }

    /// Creates a new Instant set to the number of seconds since the
    /// Unix epoch, along with a number of nanoseconds. Nanosecond values
    /// outside of a single second are carried into the seconds.
    pub fn at_nanos(seconds: i64, nanoseconds: i64) -> Self {
        let carry = nanoseconds.div_euclid(NANOS_IN_SECOND);
        Self {
            seconds: seconds + carry,
            nanoseconds: nanoseconds.rem_euclid(NANOS_IN_SECOND) as i32,
        }
    }

    /// Creates a new Instant set to the computer’s current time.
    #[cfg_attr(target_os = "redox", allow(unused_unsafe))]
    pub fn now() -> Self {
        let (seconds, nanoseconds) = unsafe { sys_time() };
        Self::at_nanos(seconds, nanoseconds as i64)
    }

    /// Creates a new Instant set to the Unix epoch.
    pub fn at_epoch() -> Self {
        Self::at(0)
    }

    /// Returns the number of seconds at this instant.
    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    /// Returns the number of nanoseconds into the current second.
    pub fn nanoseconds(&self) -> i32 {
        self.nanoseconds
    }
}

impl fmt::Debug for Instant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Instant({}s/{}ns)", self.seconds, self.nanoseconds)
    }
}


#[cfg(test)]
mod test {
    use super::Instant;

    #[test]
    fn carries_positive_nanoseconds() {
        assert_eq!(Instant::at_nanos(10, 1_500_000_000), Instant::at_nanos(11, 500_000_000));
    }

    #[test]
    fn borrows_negative_nanoseconds() {
        let instant = Instant::at_nanos(0, -1);
        assert_eq!(instant.seconds(), -1);
        assert_eq!(instant.nanoseconds(), 999_999_999);
    }

    #[test]
    fn orders_by_seconds_then_nanoseconds() {
        assert!(Instant::at_nanos(5, 1) < Instant::at_nanos(5, 2));
        assert!(Instant::at_nanos(-1, 999_999_999) < Instant::at_epoch());
    }

    #[test]
    fn debug() {
        assert_eq!(format!("{:?}", Instant::at_nanos(3, 7)), "Instant(3s/7ns)");
    }
}

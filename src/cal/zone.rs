//! Time zones, and the offsets they put on local times.

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, LocalResult, Offset as _, TimeZone as _};
use chrono_tz::Tz;
use lazy_static::lazy_static;
use log::warn;

use crate::cal::Error;
use crate::cal::gregorian::SECONDS_IN_DAY;
use crate::cal::offset::Offset;
use crate::system::sys_timezone;
use crate::util::RangeExt;


lazy_static! {
    static ref CURRENT: TimeZone = TimeZone::from_system();
}


/// A **time zone**: something that knows which offset from UTC applies at
/// any given point on the timeline.
///
/// Two time zones are equal if they have the same identifier.
#[derive(Debug, Clone)]
pub struct TimeZone(pub TimeZoneSource);

#[derive(Debug, Clone)]
pub enum TimeZoneSource {

    /// A single offset that never changes, including UTC itself.
    Fixed(Offset),

    /// A table of transitions compiled into the program.
    Static(&'static StaticTimeZone<'static>),

    /// A zone from the IANA time zone database.
    Named(Tz),
}

#[derive(PartialEq, Debug)]
pub struct StaticTimeZone<'a> {

    /// This zone’s name, such as “America/New_York”.
    pub name: &'a str,

    /// The set of timespans used in this time zone.
    pub fixed_timespans: FixedTimespanSet<'a>,
}

impl TimeZone {

    /// The UTC time zone.
    pub fn utc() -> Self {
        TimeZone(TimeZoneSource::Fixed(Offset::utc()))
    }

    /// A time zone that is always at the given offset.
    pub fn fixed(offset: Offset) -> Self {
        TimeZone(TimeZoneSource::Fixed(offset))
    }

    /// Looks up a zone in the IANA time zone database by its name, such as
    /// “Europe/London”.
    pub fn named(name: &str) -> Result<Self, Error> {
        name.parse::<Tz>()
            .map(|tz| TimeZone(TimeZoneSource::Named(tz)))
            .map_err(|_| Error::UnknownTimeZone(name.to_string()))
    }

    /// The system’s time zone. This is worked out once, the first time
    /// it’s asked for, and falls back to UTC if it can’t be determined.
    pub fn current() -> Self {
        CURRENT.clone()
    }

    fn from_system() -> Self {
        let name = match sys_timezone() {
            Some(name) => name,
            None => {
                warn!("Could not determine the system time zone; using UTC");
                return Self::utc();
            }
        };

        match Self::named(&name) {
            Ok(zone) => zone,
            Err(e) => {
                warn!("System time zone is unusable ({}); using UTC", e);
                Self::utc()
            }
        }
    }

    /// The identifier of this zone: “UTC”, an offset such as “+05:30”, or
    /// the zone’s name.
    pub fn identifier(&self) -> Cow<'static, str> {
        match self.0 {
            TimeZoneSource::Fixed(offset) if offset.is_utc() => Cow::Borrowed("UTC"),
            TimeZoneSource::Fixed(offset)  => Cow::Owned(offset.to_string()),
            TimeZoneSource::Static(tz)     => Cow::Borrowed(tz.name),
            TimeZoneSource::Named(tz)      => Cow::Borrowed(tz.name()),
        }
    }

    /// Returns the total offset from UTC, in seconds, that this time zone
    /// has at the given Unix timestamp.
    pub fn offset_at(&self, unix_timestamp: i64) -> i64 {
        match self.0 {
            TimeZoneSource::Fixed(offset)  => offset.total_seconds(),
            TimeZoneSource::Static(tz)     => tz.fixed_timespans.offset(unix_timestamp),
            TimeZoneSource::Named(ref tz)  => named_offset_at(tz, unix_timestamp),
        }
    }

    /// Whether this time zone is “fixed”: a fixed time zone has no
    /// transitions, meaning it will always be at the same offset from UTC.
    pub fn is_fixed(&self) -> bool {
        match self.0 {
            TimeZoneSource::Fixed(_)   => true,
            TimeZoneSource::Static(tz) => tz.fixed_timespans.is_fixed(),
            TimeZoneSource::Named(_)   => false,
        }
    }

    /// Works out which offsets could apply to a wall-clock time in this
    /// zone. The local time is given as a count of seconds as though it
    /// were a Unix timestamp.
    ///
    /// This can return 0, 1, or 2 offsets, depending on whether the local
    /// time falls between two timespans (an impossible time) or overlaps
    /// two separate timespans (an ambiguous time).
    pub fn convert_local(&self, local_seconds: i64) -> LocalOffsets {
        match self.0 {
            TimeZoneSource::Fixed(offset)  => LocalOffsets::Precise(offset.total_seconds()),
            TimeZoneSource::Static(tz)     => tz.fixed_timespans.convert_local(local_seconds),
            TimeZoneSource::Named(ref tz)  => named_convert_local(tz, local_seconds),
        }
    }
}

impl PartialEq for TimeZone {
    fn eq(&self, other: &Self) -> bool {
        self.identifier() == other.identifier()
    }
}

impl Eq for TimeZone {}

impl Hash for TimeZone {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identifier().hash(state)
    }
}

impl fmt::Display for TimeZone {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.identifier())
    }
}


fn named_offset_at(tz: &Tz, unix_timestamp: i64) -> i64 {
    match DateTime::from_timestamp(unix_timestamp, 0) {
        Some(utc) => tz.offset_from_utc_datetime(&utc.naive_utc()).fix().local_minus_utc() as i64,

        // Outside of the range the database covers.
        None => 0,
    }
}

fn named_convert_local(tz: &Tz, local_seconds: i64) -> LocalOffsets {
    let local = match DateTime::from_timestamp(local_seconds, 0) {
        Some(as_utc) => as_utc.naive_utc(),
        None         => return LocalOffsets::Precise(0),
    };

    match tz.offset_from_local_datetime(&local) {
        LocalResult::Single(offset) => LocalOffsets::Precise(offset.fix().local_minus_utc() as i64),
        LocalResult::Ambiguous(a, b) => {
            let (a, b) = (a.fix().local_minus_utc() as i64, b.fix().local_minus_utc() as i64);
            LocalOffsets::Ambiguous { earlier: a.max(b), later: a.min(b) }
        },
        LocalResult::None => LocalOffsets::Impossible {
            before: named_offset_at(tz, local_seconds - SECONDS_IN_DAY),
            after:  named_offset_at(tz, local_seconds + SECONDS_IN_DAY),
        },
    }
}


/// A set of timespans, separated by the instances at which the timespans
/// change over. There will always be one more timespan than transitions.
#[derive(PartialEq, Debug, Clone)]
pub struct FixedTimespanSet<'a> {

    /// The first timespan, which is assumed to have been in effect up until
    /// the initial transition instant (if any). Each set has to have at
    /// least one timespan.
    pub first: FixedTimespan<'a>,

    /// The rest of the timespans, as a slice of tuples, each containing:
    ///
    /// 1. A transition instant at which the previous timespan ends and the
    ///    next one begins, stored as a Unix timestamp;
    /// 2. The actual timespan to transition into.
    pub rest: &'a [ (i64, FixedTimespan<'a>) ],
}

/// An individual timespan with a fixed offset.
#[derive(PartialEq, Debug, Clone)]
pub struct FixedTimespan<'a> {

    /// The *total* offset in effect during this timespan, in seconds. This
    /// is the sum of the standard offset from UTC (the zone’s standard
    /// time), and any extra daylight-saving offset.
    pub offset: i64,

    /// Whether there was any daylight-saving offset in effect during this
    /// timespan.
    pub is_dst: bool,

    /// The abbreviation in use during this timespan, such as “GMT” or
    /// “PDT”.
    pub name: Cow<'a, str>,
}

impl<'a> FixedTimespanSet<'a> {
    fn find(&self, time: i64) -> &FixedTimespan {
        match self.rest.iter().take_while(|t| t.0 < time).last() {
            None     => &self.first,
            Some(zd) => &zd.1,
        }
    }

    fn offset(&self, unix_timestamp: i64) -> i64 {
        self.find(unix_timestamp).offset
    }

    fn is_fixed(&self) -> bool {
        self.rest.is_empty()
    }

    fn convert_local(&self, local_seconds: i64) -> LocalOffsets {
        let timespans = self.find_with_surroundings(local_seconds);

        if let Some((previous_zone, previous_transition_time)) = timespans.previous {

            // Test whether this timestamp is in the *overlap* after the
            // current timespan starts but before the previous one ends.
            if previous_zone.offset > timespans.current.offset
            && (local_seconds - previous_transition_time).is_within(timespans.current.offset .. previous_zone.offset) {
                return LocalOffsets::Ambiguous {
                    earlier:  previous_zone.offset,
                    later:    timespans.current.offset,
                };
            }

            // Test whether this timestamp is in the *space* after the
            // previous timespan ends but before the current one starts.
            if previous_zone.offset < timespans.current.offset
            && (local_seconds - previous_transition_time).is_within(previous_zone.offset .. timespans.current.offset) {
                return LocalOffsets::Impossible {
                    before:  previous_zone.offset,
                    after:   timespans.current.offset,
                };
            }
        }

        if let Some(&(next_transition_time, ref next_zone)) = timespans.next {

            // Test whether this timestamp is in the *overlap* after the
            // next timespan starts but before the current one ends.
            if timespans.current.offset > next_zone.offset
            && (local_seconds - next_transition_time).is_within(next_zone.offset .. timespans.current.offset) {
                return LocalOffsets::Ambiguous {
                    earlier:  timespans.current.offset,
                    later:    next_zone.offset,
                };
            }

            // Test whether this timestamp is in the *space* after the
            // current timespan ends but before the next one starts.
            if timespans.current.offset < next_zone.offset
            && (local_seconds - next_transition_time).is_within(timespans.current.offset .. next_zone.offset) {
                return LocalOffsets::Impossible {
                    before:  timespans.current.offset,
                    after:   next_zone.offset,
                };
            }
        }

        LocalOffsets::Precise(timespans.current.offset)
    }

    fn find_with_surroundings(&self, time: i64) -> Surroundings {
        if let Some((position, _)) = self.rest.iter().enumerate().take_while(|&(_, t)| t.0 < time).last() {
            // There’s a matching time in the ‘rest’ list, so return that
            // time along with the two sets of details around it.

            let previous_details = if position == 0 {
                &self.first
            }
            else {
                &self.rest[position - 1].1
            };

            Surroundings {
                previous:  Some((previous_details, self.rest[position].0)),
                current:   &self.rest[position].1,
                next:      self.rest.get(position + 1),
            }
        }
        else {
            // If there’s no matching time in the ‘rest’ list, it must be
            // the ‘first’ one.
            Surroundings {
                previous: None,
                current:  &self.first,
                next:     self.rest.first(),
            }
        }
    }
}


#[derive(PartialEq, Debug)]
struct Surroundings<'a> {
    previous:  Option<(&'a FixedTimespan<'a>, i64)>,
    current:   &'a FixedTimespan<'a>,
    next:      Option<&'a (i64, FixedTimespan<'a>)>,
}


/// The offsets that could apply to a *local* time. See
/// `TimeZone::convert_local` for more information.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum LocalOffsets {

    /// This local time is impossible: it falls in the gap between two
    /// timespans, and never gets shown on a wall clock. The offsets either
    /// side of the gap are included.
    Impossible { before: i64, after: i64 },

    /// This local time can be defined unambiguously.
    Precise(i64),

    /// This local time is ambiguous: it overlaps two timespans, so it
    /// happens twice on a wall clock rather than once. `earlier` is the
    /// offset of the first occurrence.
    Ambiguous { earlier: i64, later: i64 },
}

impl LocalOffsets {

    /// Returns whether this local time is impossible.
    pub fn is_impossible(&self) -> bool {
        matches!(*self, LocalOffsets::Impossible { .. })
    }

    /// Returns whether this local time is ambiguous.
    pub fn is_ambiguous(&self) -> bool {
        matches!(*self, LocalOffsets::Ambiguous { .. })
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use super::Surroundings;
    use std::borrow::Cow;

    const NONE: FixedTimespanSet<'static> = FixedTimespanSet {
        first: FixedTimespan {
            offset: 0,
            is_dst: false,
            name: Cow::Borrowed("ZONE_A"),
        },
        rest: &[],
    };

    #[test]
    fn empty() {
        assert_eq!(NONE.find_with_surroundings(1184000000), Surroundings {
            previous: None,
            current: &FixedTimespan {
                offset: 0,
                is_dst: false,
                name: Cow::Borrowed("ZONE_A"),
            },
            next: None,
        })
    }

    const MANY: FixedTimespanSet<'static> = FixedTimespanSet {
        first: FixedTimespan {
            offset: 0,
            is_dst: false,
            name: Cow::Borrowed("ZONE_A"),
        },
        rest: &[
            (1174784400, FixedTimespan {
                offset: 3600,
                is_dst: true,
                name: Cow::Borrowed("ZONE_B"),
            }),
            (1193533200, FixedTimespan {
                offset: 0,
                is_dst: false,
                name: Cow::Borrowed("ZONE_C"),
            }),
        ],
    };

    #[test]
    fn multiple_second() {
        assert_eq!(MANY.find_with_surroundings(1184000000), Surroundings {
            previous: Some((
                &FixedTimespan {
                    offset: 0,
                    is_dst: false,
                    name: Cow::Borrowed("ZONE_A"),
                },
                1174784400,
            )),
            current: &FixedTimespan {
                offset: 3600,
                is_dst: true,
                name: Cow::Borrowed("ZONE_B"),
            },
            next: Some(&(
                1193533200,
                FixedTimespan {
                    offset: 0,
                    is_dst: false,
                    name: Cow::Borrowed("ZONE_C"),
                }
            )),
        });
    }

    #[test]
    fn offsets_follow_transitions() {
        assert_eq!(MANY.offset(1174784399), 0);
        assert_eq!(MANY.offset(1184000000), 3600);
        assert_eq!(MANY.offset(1200000000), 0);
    }

    #[test]
    fn gap_is_impossible() {
        let result = MANY.convert_local(1174784400 + 1800);
        assert_eq!(result, LocalOffsets::Impossible { before: 0, after: 3600 });
    }

    #[test]
    fn overlap_is_ambiguous() {
        let result = MANY.convert_local(1193533200 + 1800);
        assert_eq!(result, LocalOffsets::Ambiguous { earlier: 3600, later: 0 });
    }

    #[test]
    fn fixed_identifiers() {
        assert_eq!(TimeZone::utc().identifier(), "UTC");
        let offset = Offset::of_hours_and_minutes(-3, -30).unwrap();
        assert_eq!(TimeZone::fixed(offset).identifier(), "-03:30");
    }

    #[test]
    fn named_zone() {
        let london = TimeZone::named("Europe/London").unwrap();
        assert_eq!(london.identifier(), "Europe/London");

        // 2024-01-15T12:00:00Z and 2024-07-15T12:00:00Z
        assert_eq!(london.offset_at(1705320000), 0);
        assert_eq!(london.offset_at(1721044800), 3600);
    }

    #[test]
    fn named_zone_gap() {
        let new_york = TimeZone::named("America/New_York").unwrap();

        // 2024-03-10T02:30 local doesn’t exist.
        let result = new_york.convert_local(1710037800);
        assert_eq!(result, LocalOffsets::Impossible { before: -18000, after: -14400 });
    }

    #[test]
    fn unknown_zone() {
        assert_eq!(TimeZone::named("Mars/Olympus_Mons"), Err(Error::UnknownTimeZone("Mars/Olympus_Mons".into())));
    }

    #[test]
    fn equality_is_by_identifier() {
        assert_eq!(TimeZone::utc(), TimeZone::named("UTC").unwrap());
        assert_ne!(TimeZone::utc(), TimeZone::named("Europe/London").unwrap());
    }
}

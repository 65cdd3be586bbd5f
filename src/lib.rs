#![crate_name = "khrysalis_runtime"]
#![crate_type = "rlib"]

#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
//#![warn(missing_docs)]

#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unused_qualifications)]
#![warn(unused_results)]

//! Runtime support for code transpiled from Kotlin: Kotlin-style
//! `hashCode()` and `toString()` traits, and the `java.time`-style
//! calendar value types, backed by sparse date components that a calendar
//! resolves into instants.
//!
//! # Examples
//!
//! ```
//! use khrysalis_runtime::{LocalDate, LocalDateTime, LocalTime, DateComponents, DatePiece, TimePiece};
//!
//! let date = LocalDate::ymd(2024, 1, 31);
//! let later = date.plus(&DateComponents::new().day(1));
//! assert_eq!(later.day(), 32);
//!
//! let noon = LocalDateTime::of(&date, &LocalTime::hm(12, 0));
//! assert_eq!(noon.hour(), 12);
//! ```

mod cal;
pub use crate::cal::{DatePiece, TimePiece, HasDateComponents, Error};
pub use crate::cal::calendar::{Calendar, CalendarView, Identifier};
pub use crate::cal::components::{DateComponents, Field, DATE_FIELDS, TIME_FIELDS, DATE_TIME_FIELDS};
pub use crate::cal::datetime::{LocalDate, LocalTime, LocalDateTime};
pub use crate::cal::gregorian::Weekday;
pub use crate::cal::offset::Offset;
pub use crate::cal::zoned::ZonedDateTime;
pub use crate::cal::convenience;
pub use crate::cal::zone;

#[cfg(feature="format")]
pub use crate::cal::fmt::custom::{DateFormat, DateFormatter, DateStyle, TimeStyle, FormatError, FORMAT_FAILURE};

#[cfg(feature="parse")]
pub use crate::cal::parse;

pub use crate::cal::zone::TimeZone;

mod instant;
pub use crate::instant::Instant;

pub mod kotlin;
pub use crate::kotlin::{KHashable, KStringable};

mod system;
pub use crate::system::sys_timezone;

mod util;

//! Kotlin-style `hashCode()` and `toString()` for transpiled types.
//!
//! Code transpiled from Kotlin calls these by their Kotlin names. Types
//! written in Rust get them for free from their `Hash` and `Display`
//! impls; types transpiled with hand-written `hashCode` or `toString`
//! bodies can go the other way with the two macros here.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use crate::cal::datetime::{LocalDate, LocalTime, LocalDateTime};
use crate::cal::zoned::ZonedDateTime;


/// A value with a Kotlin-style 32-bit hash code.
///
/// Values that are equal must have equal hash codes.
pub trait KHashable {
    fn hash_code(&self) -> i32;
}

/// A value with a Kotlin-style string form.
pub trait KStringable {
    fn to_kotlin_string(&self) -> String;
}


/// Derives a 32-bit hash code from a value’s `Hash` impl.
///
/// The hasher is unkeyed, so the code is the same on every run, and the
/// 64-bit hash is folded in half the way the JVM hashes a `Long`.
///
/// ```
/// use khrysalis_runtime::kotlin::hash_code_of;
///
/// assert_eq!(hash_code_of("abc"), hash_code_of("abc"));
/// ```
pub fn hash_code_of<T: Hash + ?Sized>(value: &T) -> i32 {
    let mut hasher = FxHasher::default();
    value.hash(&mut hasher);

    let hash = hasher.finish();
    (hash ^ (hash >> 32)) as i32
}


/// Implements `Hash` for a type by feeding it the type’s `hash_code`.
#[macro_export]
macro_rules! impl_hash_from_hash_code {
    ($t:ty) => {
        impl ::std::hash::Hash for $t {
            fn hash<H: ::std::hash::Hasher>(&self, state: &mut H) {
                state.write_i32($crate::KHashable::hash_code(self));
            }
        }
    };
}

/// Implements `Display` for a type by writing out its `to_kotlin_string`.
#[macro_export]
macro_rules! impl_display_from_to_string {
    ($t:ty) => {
        impl ::std::fmt::Display for $t {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                f.write_str(&$crate::KStringable::to_kotlin_string(self))
            }
        }
    };
}


macro_rules! kotlin_value {
    ($($t:ty),*) => {
        $(
            impl KHashable for $t {
                fn hash_code(&self) -> i32 {
                    hash_code_of(self)
                }
            }

            impl KStringable for $t {
                fn to_kotlin_string(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

kotlin_value!(LocalDate, LocalTime, LocalDateTime, ZonedDateTime);

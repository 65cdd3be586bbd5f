//! Range checks shared by the offset and calendar code.

use std::ops::Range;


pub(crate) trait RangeExt {

    /// Returns whether this value exists within the given half-open range.
    fn is_within(&self, range: Range<Self>) -> bool where Self: Sized;
}

impl<T> RangeExt for T where T: PartialOrd<T> {
    fn is_within(&self, range: Range<Self>) -> bool {
        range.contains(self)
    }
}

//! Strongly typed, zero-cost identifier wrappers.
//!
//! Ids are `Copy + Ord + Hash` so they work as map keys and sort keys without
//! ceremony.  `RobotId` doubles as an index into the robot `Vec`; `OrderId`
//! is a monotonically assigned key into the order registry.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
///
/// `$tag` is the short prefix used by `Display` (`R3`, `O17`).
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty) = $tag:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// The id that follows `self` in allocation order.
            #[inline]
            pub fn next(self) -> $name {
                $name(self.0 + 1)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($tag, "{}"), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a robot in the fleet `Vec`.
    pub struct RobotId(u32) = "R";
}

typed_id! {
    /// Registry key of a delivery order.  Assigned in increasing order and
    /// never reused within a run.
    pub struct OrderId(u32) = "O";
}

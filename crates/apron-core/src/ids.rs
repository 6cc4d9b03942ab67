//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  Surface ids index directly into the
//! `Surface` vectors via `.index()`; `AircraftId` is a stable handle assigned
//! when a flight is constructed.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
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
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
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
    /// Stable handle of an aircraft for its whole lifecycle.
    pub struct AircraftId(u32);
}

typed_id! {
    /// Index of a surface node (intersection, gate stand, spot, runway end).
    pub struct NodeId(u32);
}

typed_id! {
    /// Index of a directed taxiway/runway link.
    pub struct LinkId(u32);
}

typed_id! {
    /// Index of a gate in the surface's gate table.
    pub struct GateId(u16);
}

typed_id! {
    /// Index of a spot (ramp/taxiway handover point).
    pub struct SpotId(u16);
}

typed_id! {
    /// Index of a runway.
    pub struct RunwayId(u16);
}

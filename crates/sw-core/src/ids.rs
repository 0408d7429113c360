//! Strongly typed identifier wrappers.
//!
//! Two families live here:
//!
//! - **Survey ids** (`NodeId`, `WayId`) are the `i64` identifiers assigned by
//!   the upstream map data.  They are sparse and only ever used as keys.
//! - **Graph ids** (`VertexId`, `EdgeId`) are dense `u32` indices into the
//!   CSR arrays of a built road graph.  Callers should prefer the
//!   `.index()` helpers over `id.0 as usize`.

use std::fmt;

/// Generate a dense, index-like ID wrapper.
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

/// Generate a sparse survey-id wrapper.
macro_rules! survey_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        $vis struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<i64> for $name {
            #[inline(always)]
            fn from(id: i64) -> Self {
                $name(id)
            }
        }
    };
}

survey_id! {
    /// Identifier of a surveyed point in the raw map data.
    pub struct NodeId;
}

survey_id! {
    /// Identifier of a tagged polyline in the raw map data.
    pub struct WayId;
}

typed_id! {
    /// Index of an intersection vertex in a built road graph.
    pub struct VertexId(u32);
}

typed_id! {
    /// Index of a directed edge in a built road graph.
    pub struct EdgeId(u32);
}

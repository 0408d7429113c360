//! Eight-point compass directions for narrating bearings.

use std::fmt;

use crate::geo::normalize_bearing;

/// One of the eight principal compass directions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompassPoint {
    North,
    Northeast,
    East,
    Southeast,
    South,
    Southwest,
    West,
    Northwest,
}

impl CompassPoint {
    pub const ALL: [CompassPoint; 8] = [
        CompassPoint::North,
        CompassPoint::Northeast,
        CompassPoint::East,
        CompassPoint::Southeast,
        CompassPoint::South,
        CompassPoint::Southwest,
        CompassPoint::West,
        CompassPoint::Northwest,
    ];

    /// Nearest compass point to `bearing_deg` (45° sectors centred on each
    /// point, so 22.5° rounds to Northeast).
    pub fn from_bearing(bearing_deg: f64) -> Self {
        let sector = (normalize_bearing(bearing_deg) / 45.0).round() as usize % 8;
        Self::ALL[sector]
    }

    pub fn name(self) -> &'static str {
        match self {
            CompassPoint::North     => "North",
            CompassPoint::Northeast => "Northeast",
            CompassPoint::East      => "East",
            CompassPoint::Southeast => "Southeast",
            CompassPoint::South     => "South",
            CompassPoint::Southwest => "Southwest",
            CompassPoint::West      => "West",
            CompassPoint::Northwest => "Northwest",
        }
    }
}

impl fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//! Geographic coordinate type and spherical geometry.
//!
//! All angles are degrees and all distances are metres.  `GeoPoint` uses
//! `f64` because edge lengths are sums of many short survey hops and the
//! navigation layer compares them for exact equality between the two
//! directions of a road segment.
//!
//! # Conventions
//!
//! - Bearings are compass bearings in `[0, 360)`, `0` = north, clockwise.
//! - [`angular_difference`] is the signed shortest rotation from `a` to `b`,
//!   in `[-180, 180]`.  Positive means clockwise.

use std::fmt;
use std::str::FromStr;

use crate::{CoreError, CoreResult};

/// Mean Earth radius, metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Kilometres per degree of latitude (and of longitude at the equator).
const KM_PER_DEGREE: f64 = 111.32;

// ── GeoPoint ──────────────────────────────────────────────────────────────────

/// A WGS-84 geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Construct a point, rejecting non-finite or out-of-range coordinates.
    pub fn try_new(lat: f64, lon: f64) -> CoreResult<Self> {
        let valid = lat.is_finite()
            && lon.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lon);
        if valid {
            Ok(Self { lat, lon })
        } else {
            Err(CoreError::InvalidCoordinate { lat, lon })
        }
    }

    /// Haversine great-circle distance in metres.
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).max(0.0).sqrt());
        EARTH_RADIUS_M * c
    }

    /// Initial great-circle bearing from `self` towards `other`, in `[0, 360)`.
    ///
    /// Returns `0.0` for coincident points; callers must not read meaning
    /// into that value.
    pub fn bearing_to(self, other: GeoPoint) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let y = d_lon.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();

        normalize_bearing(y.atan2(x).to_degrees())
    }

    /// Point reached by travelling `distance_m` metres from `self` along the
    /// great circle with initial bearing `bearing_deg`.
    pub fn destination(self, bearing_deg: f64, distance_m: f64) -> GeoPoint {
        let lat1 = self.lat.to_radians();
        let lon1 = self.lon.to_radians();
        let theta = bearing_deg.to_radians();
        let delta = distance_m / EARTH_RADIUS_M;

        let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * theta.cos()).asin();
        let lon2 = lon1
            + (theta.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * lat2.sin());

        GeoPoint {
            lat: lat2.to_degrees(),
            lon: (lon2.to_degrees() + 540.0).rem_euclid(360.0) - 180.0,
        }
    }

    /// Position on the unit sphere.  Squared chord length between two such
    /// vectors is monotonic in great-circle distance, so a Euclidean R-tree
    /// over them answers nearest-by-haversine queries exactly.
    #[inline]
    pub fn to_unit_vector(self) -> [f64; 3] {
        let lat = self.lat.to_radians();
        let lon = self.lon.to_radians();
        [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

/// Parse `"lat,lon"` (whitespace around either part is ignored).
impl FromStr for GeoPoint {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        let mut parts = s.split(',').map(str::trim);
        let (Some(lat), Some(lon), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(CoreError::Parse(format!("expected \"lat,lon\", got {s:?}")));
        };
        let lat: f64 = lat
            .parse()
            .map_err(|_| CoreError::Parse(format!("invalid latitude {lat:?}")))?;
        let lon: f64 = lon
            .parse()
            .map_err(|_| CoreError::Parse(format!("invalid longitude {lon:?}")))?;
        GeoPoint::try_new(lat, lon)
    }
}

// ── Free functions ────────────────────────────────────────────────────────────

/// Haversine distance in metres.  See [`GeoPoint::distance_m`].
#[inline]
pub fn distance(p1: GeoPoint, p2: GeoPoint) -> f64 {
    p1.distance_m(p2)
}

/// Initial bearing from `p1` to `p2`.  See [`GeoPoint::bearing_to`].
#[inline]
pub fn bearing(p1: GeoPoint, p2: GeoPoint) -> f64 {
    p1.bearing_to(p2)
}

/// Direct geodesic projection.  See [`GeoPoint::destination`].
#[inline]
pub fn destination(p: GeoPoint, bearing_deg: f64, distance_m: f64) -> GeoPoint {
    p.destination(bearing_deg, distance_m)
}

/// Wrap any finite angle into `[0, 360)`.
#[inline]
pub fn normalize_bearing(deg: f64) -> f64 {
    let b = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if b >= 360.0 { 0.0 } else { b }
}

/// Signed shortest rotation from bearing `a` to bearing `b`, in `[-180, 180]`.
#[inline]
pub fn angular_difference(a: f64, b: f64) -> f64 {
    (b - a + 180.0).rem_euclid(360.0) - 180.0
}

// ── GeoBounds ─────────────────────────────────────────────────────────────────

/// Axis-aligned latitude/longitude box, used to scope data acquisition.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl GeoBounds {
    /// Box extending `radius_km` from `center` in each cardinal direction.
    ///
    /// Uses the flat-earth degree approximation, which over-covers slightly
    /// away from the equator; acquisition only needs a superset.
    pub fn around(center: GeoPoint, radius_km: f64) -> Self {
        let d_lat = radius_km / KM_PER_DEGREE;
        let cos_lat = center.lat.to_radians().cos().abs().max(1e-6);
        let d_lon = (radius_km / (KM_PER_DEGREE * cos_lat)).min(180.0);
        Self {
            south: (center.lat - d_lat).max(-90.0),
            west: (center.lon - d_lon).max(-180.0),
            north: (center.lat + d_lat).min(90.0),
            east: (center.lon + d_lon).min(180.0),
        }
    }

    #[inline]
    pub fn contains(&self, p: GeoPoint) -> bool {
        (self.south..=self.north).contains(&p.lat) && (self.west..=self.east).contains(&p.lon)
    }
}

//! Acquisition boundary: where raw road data comes from, and how much of it
//! to ask for.
//!
//! The engine never performs I/O itself.  A [`RoadSource`] hands back raw
//! elements for a circle; [`acquire_graph`] wraps it in a bounded
//! radius-doubling loop and builds the graph.

use log::{debug, warn};
use rustc_hash::FxHashSet;
use thiserror::Error;

use sw_core::{GeoBounds, GeoPoint, NodeId};
use sw_spatial::{build, significance::real_intersections, NetworkConfig, RawElement, RoadGraph, SpatialError};

use crate::{NavError, NavResult};

// ── Source ────────────────────────────────────────────────────────────────────

/// Failure reported by a [`RoadSource`].
#[derive(Debug, Error)]
pub enum AcquisitionError {
    /// Network, process, or filesystem failure outside the engine.
    #[error("transport: {0}")]
    Transport(String),

    /// The source answered but the payload could not be decoded.
    #[error("decode: {0}")]
    Decode(#[from] SpatialError),
}

/// Supplier of raw road elements around a point.
///
/// Implemented for any `FnMut(GeoPoint, f64) -> Result<Vec<RawElement>, _>`,
/// so a closure wrapping an HTTP client plus
/// [`sw_spatial::overpass::parse_elements`] is a complete source.
pub trait RoadSource {
    fn fetch_road_elements(
        &mut self,
        center:    GeoPoint,
        radius_km: f64,
    ) -> Result<Vec<RawElement>, AcquisitionError>;
}

impl<F> RoadSource for F
where
    F: FnMut(GeoPoint, f64) -> Result<Vec<RawElement>, AcquisitionError>,
{
    fn fetch_road_elements(
        &mut self,
        center:    GeoPoint,
        radius_km: f64,
    ) -> Result<Vec<RawElement>, AcquisitionError> {
        self(center, radius_km)
    }
}

/// A fixed element set, clipped to the requested bounding box on each fetch.
///
/// A way is returned if any of its nodes falls inside the box, together
/// with every node it references, which is what an Overpass
/// `way(bbox); node(w);` query yields.
#[derive(Clone, Debug, Default)]
pub struct InMemorySource {
    pub elements: Vec<RawElement>,
    /// Number of fetches served.
    pub fetches: usize,
}

impl InMemorySource {
    pub fn new(elements: Vec<RawElement>) -> Self {
        Self { elements, fetches: 0 }
    }
}

impl RoadSource for InMemorySource {
    fn fetch_road_elements(
        &mut self,
        center:    GeoPoint,
        radius_km: f64,
    ) -> Result<Vec<RawElement>, AcquisitionError> {
        self.fetches += 1;
        let bounds = GeoBounds::around(center, radius_km);

        let inside: FxHashSet<NodeId> = self
            .elements
            .iter()
            .filter_map(|e| match e {
                RawElement::Node(n) if bounds.contains(n.pos) => Some(n.id),
                _ => None,
            })
            .collect();

        let mut wanted: FxHashSet<NodeId> = FxHashSet::default();
        let mut out = Vec::new();
        for e in &self.elements {
            if let RawElement::Way(w) = e {
                if w.nodes.iter().any(|n| inside.contains(n)) {
                    wanted.extend(w.nodes.iter().copied());
                    out.push(e.clone());
                }
            }
        }
        out.extend(
            self.elements
                .iter()
                .filter(|e| matches!(e, RawElement::Node(n) if wanted.contains(&n.id)))
                .cloned(),
        );
        Ok(out)
    }
}

// ── Growth policy ─────────────────────────────────────────────────────────────

/// How far to look for road data before giving up.
///
/// The first fetch uses `initial_radius_km`; while the built graph has
/// fewer than `min_real_intersections` real intersections the radius is
/// doubled, up to and including `max_radius_km`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GrowthPolicy {
    pub initial_radius_km:      f64,
    pub max_radius_km:          f64,
    pub min_real_intersections: usize,
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self {
            initial_radius_km:      0.5,
            max_radius_km:          8.0,
            min_real_intersections: 4,
        }
    }
}

impl GrowthPolicy {
    /// Reject policies whose loop would not terminate or never fetch.
    pub fn validate(&self) -> NavResult<()> {
        if !(self.initial_radius_km.is_finite() && self.initial_radius_km > 0.0) {
            return Err(NavError::InvalidPolicy(format!(
                "initial radius must be positive and finite, got {}",
                self.initial_radius_km
            )));
        }
        if !self.max_radius_km.is_finite() || self.max_radius_km < self.initial_radius_km {
            return Err(NavError::InvalidPolicy(format!(
                "max radius {} is below initial radius {}",
                self.max_radius_km, self.initial_radius_km
            )));
        }
        Ok(())
    }

    /// Every radius the policy will try, in order.
    pub fn radii(&self) -> impl Iterator<Item = f64> + '_ {
        let max = self.max_radius_km;
        std::iter::successors(Some(self.initial_radius_km), move |&r| {
            (r < max).then(|| (r * 2.0).min(max))
        })
    }
}

/// Fetch and build a graph around `center`, growing the radius per `policy`.
///
/// Returns the first graph with enough real intersections.  If the maximum
/// radius is reached first, the largest graph that has at least one real
/// intersection is returned instead.
///
/// # Errors
///
/// - [`NavError::InvalidPolicy`] before any fetch.
/// - [`NavError::AcquisitionFailure`] if every fetch failed.
/// - [`NavError::NoData`] if fetches succeeded but no graph had a real
///   intersection.
pub fn acquire_graph<S: RoadSource + ?Sized>(
    source: &mut S,
    center: GeoPoint,
    policy: &GrowthPolicy,
    config: &NetworkConfig,
) -> NavResult<RoadGraph> {
    policy.validate()?;

    let mut usable: Option<RoadGraph> = None;
    let mut last_error: Option<AcquisitionError> = None;
    let mut any_fetch_ok = false;
    let mut last_radius = policy.initial_radius_km;

    for radius_km in policy.radii() {
        last_radius = radius_km;
        let elements = match source.fetch_road_elements(center, radius_km) {
            Ok(elements) => elements,
            Err(e) => {
                warn!("fetch at {radius_km} km around {center} failed: {e}");
                last_error = Some(e);
                continue;
            }
        };
        any_fetch_ok = true;

        let graph = build(&elements, config);
        let real = real_intersections(&graph, &config.low_priority_highways).count();
        debug!(
            "radius {radius_km} km: {} elements, {} vertices, {real} real intersections",
            elements.len(),
            graph.vertex_count(),
        );

        if real >= policy.min_real_intersections {
            return Ok(graph);
        }
        if real > 0 {
            usable = Some(graph);
        }
    }

    match (usable, last_error) {
        (Some(graph), _) => Ok(graph),
        (None, Some(e)) if !any_fetch_ok => Err(NavError::AcquisitionFailure(e)),
        (None, _) => Err(NavError::NoData { radius_km: last_radius }),
    }
}

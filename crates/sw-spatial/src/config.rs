//! Highway classification policy for graph construction and significance.

use rustc_hash::FxHashSet;

use crate::osm::Highway;

/// Which `highway` values are dropped from the graph entirely, and which are
/// kept but never count as a "real" road.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkConfig {
    /// Ways with one of these values contribute no edges and never make a
    /// node an intersection candidate.
    pub excluded_highways: FxHashSet<Highway>,

    /// Ways with one of these values are traversable but are ignored when
    /// deciding whether a vertex is a decision point, when picking a start
    /// vertex, and when enumerating turn options.
    pub low_priority_highways: FxHashSet<Highway>,
}

impl NetworkConfig {
    /// `true` if a way with this highway tag contributes edges.  Untagged
    /// ways never do.
    #[inline]
    pub fn qualifies(&self, highway: Option<&Highway>) -> bool {
        highway.is_some_and(|h| !self.excluded_highways.contains(h))
    }

    #[inline]
    pub fn is_low_priority(&self, highway: Option<&Highway>) -> bool {
        highway.is_some_and(|h| self.low_priority_highways.contains(h))
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        let excluded_highways = [
            Highway::Proposed,
            Highway::Construction,
            Highway::Abandoned,
            Highway::Razed,
            Highway::Platform,
        ]
        .into_iter()
        .collect();

        let low_priority_highways = [
            Highway::Service,
            Highway::Footway,
            Highway::Cycleway,
            Highway::Path,
            Highway::Track,
            Highway::Steps,
            Highway::Pedestrian,
            Highway::Bridleway,
            Highway::Corridor,
        ]
        .into_iter()
        .collect();

        Self { excluded_highways, low_priority_highways }
    }
}

//! Structured results handed to whatever narrates the walk.
//!
//! Nothing here formats text for a particular surface; a front end turns
//! these into speech, braille, or a status line.

use sw_core::{CompassPoint, EdgeId, GeoPoint, VertexId};
use sw_spatial::{display_name, intersection_title, NetworkConfig, RoadGraph};

use crate::cursor::Arrival;

/// Where road mode put the walker.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TravelSummary {
    pub vertex: VertexId,
    pub position: GeoPoint,
    pub bearing_deg: f64,
    pub direction: CompassPoint,
    /// Distance covered by the command that produced this summary.
    pub distance_m: f64,
    /// Intersection title, e.g. `"Main Street and First Avenue"`.
    pub title: String,
    /// Display name of the road travelled or faced.
    pub road: String,
    pub upcoming: Option<Upcoming>,
}

/// The next real intersection straight ahead.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Upcoming {
    pub vertex: VertexId,
    pub title: String,
    pub distance_m: f64,
}

/// Result of a road-mode turn.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnSummary {
    pub vertex: VertexId,
    pub bearing_deg: f64,
    pub direction: CompassPoint,
    /// Road now faced.
    pub road: String,
    pub upcoming: Option<Upcoming>,
}

/// Result of a free-explore move.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveSummary {
    pub from: GeoPoint,
    pub to: GeoPoint,
    pub bearing_deg: f64,
    pub direction: CompassPoint,
    pub distance_m: f64,
}

/// Title of the intersection at `vertex`.
///
/// Low-priority ways are left out unless nothing else meets there.
pub fn vertex_title(graph: &RoadGraph, config: &NetworkConfig, vertex: VertexId) -> String {
    let ways: Vec<_> = graph
        .vertex_ways(vertex)
        .iter()
        .filter_map(|&w| graph.way(w))
        .collect();
    let real: Vec<_> = ways
        .iter()
        .copied()
        .filter(|w| !config.is_low_priority(w.highway()))
        .collect();
    intersection_title(if real.is_empty() { ways } else { real })
}

/// Display name of the way `edge` runs along.
pub fn road_name(graph: &RoadGraph, edge: EdgeId) -> String {
    graph
        .way(graph.edge_way[edge.index()])
        .map(display_name)
        .unwrap_or_default()
}

impl Upcoming {
    pub(crate) fn from_arrival(graph: &RoadGraph, config: &NetworkConfig, arrival: &Arrival) -> Self {
        Self {
            vertex: arrival.vertex,
            title: vertex_title(graph, config, arrival.vertex),
            distance_m: arrival.distance_m,
        }
    }
}

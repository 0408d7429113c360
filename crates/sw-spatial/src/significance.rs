//! Decision-point classification.
//!
//! Survey data places a vertex wherever two ways share a node, which
//! includes plenty of places nobody would call an intersection: a street
//! split into two ways mid-block, a driveway joining a road.  A vertex is
//! **collapsible** when it is not a real decision point; navigation skips
//! over collapsible vertices.
//!
//! Nothing here is cached.  The answer is recomputed from the graph on
//! every call, so it cannot disagree with the graph it was asked about.

use rustc_hash::FxHashSet;

use sw_core::VertexId;

use crate::naming::display_name;
use crate::network::RoadGraph;
use crate::osm::Highway;

/// `true` if `vertex` is not a real decision point.
///
/// - no incident edges → collapsible;
/// - otherwise take the display names of incident edges whose way is not
///   `low_priority`; if they contain at most one distinct name the vertex
///   is collapsible (this covers a single road split into two ways, a road
///   with only driveways branching off, and a cluster of low-priority paths);
/// - two or more distinct names → a real intersection.
pub fn is_collapsible(
    graph:        &RoadGraph,
    vertex:       VertexId,
    low_priority: &FxHashSet<Highway>,
) -> bool {
    if graph.out_degree(vertex) == 0 {
        return true;
    }
    let mut first: Option<String> = None;
    for name in real_road_names(graph, vertex, low_priority) {
        match &first {
            None => first = Some(name),
            Some(seen) if *seen == name => {}
            Some(_) => return false,
        }
    }
    true
}

/// Display names of the non-low-priority edges leaving `vertex`, one per
/// edge (duplicates included).
pub fn real_road_names<'a>(
    graph:        &'a RoadGraph,
    vertex:       VertexId,
    low_priority: &'a FxHashSet<Highway>,
) -> impl Iterator<Item = String> + 'a {
    graph
        .out_edges(vertex)
        .filter_map(move |e| graph.way(graph.edge_way[e.index()]))
        .filter(move |way| !way.highway().is_some_and(|h| low_priority.contains(h)))
        .map(display_name)
}

/// Every non-collapsible vertex, in `VertexId` order.
pub fn real_intersections<'a>(
    graph:        &'a RoadGraph,
    low_priority: &'a FxHashSet<Highway>,
) -> impl Iterator<Item = VertexId> + 'a {
    graph
        .vertices()
        .filter(move |&v| !is_collapsible(graph, v, low_priority))
}

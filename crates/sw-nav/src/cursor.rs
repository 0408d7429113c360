//! Road-mode traversal over an immutable [`RoadGraph`].
//!
//! A [`NavigationCursor`] is three values: the vertex the walker stands on,
//! the bearing they face, and an edge.  After a turn or a fresh start the
//! edge leaves the vertex (it is the road about to be taken); after an
//! advance it is the edge just arrived on, and the road onward is the same
//! way, the same street name, or whatever lies straight ahead.
//! [`NavigationCursor::heading_edge`] resolves both cases.
//!
//! Commands either succeed and update the cursor, or fail and leave it
//! exactly as it was.

use log::debug;
use rustc_hash::FxHashSet;

use sw_core::{angular_difference, normalize_bearing, EdgeId, GeoPoint, VertexId};
use sw_spatial::{is_collapsible, Edge, NetworkConfig, RoadGraph, SpatialError};

use crate::{NavError, NavResult};

/// Widest bend, either side of the facing, still taken as going straight on
/// at a real intersection.
pub const STRAIGHT_AHEAD_DEG: f64 = 45.0;

/// Rotation sense for [`NavigationCursor::turn`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnDirection {
    /// Next road clockwise from the current one: a right turn.
    Clockwise,
    /// Next road counter-clockwise: a left turn.
    Counterclockwise,
}

/// Result of walking from one real intersection to the next.
#[derive(Clone, Debug, PartialEq)]
pub struct Arrival {
    /// The real intersection reached.
    pub vertex: VertexId,
    /// Bearing of travel on the final survey hop into `vertex`.
    pub arrival_bearing_deg: f64,
    /// Total length of every edge traversed.
    pub distance_m: f64,
    /// The edge that ends at `vertex`.
    pub last_edge: EdgeId,
    /// Collapsible vertices passed through on the way, in order.
    pub skipped: Vec<VertexId>,
}

/// Outcome of [`NavigationCursor::advance`].
#[derive(Clone, Debug, PartialEq)]
pub struct Advance {
    pub arrival: Arrival,
    /// The intersection after `arrival`, continuing straight.  `None` when
    /// the road ends before another real intersection.
    pub upcoming: Option<Arrival>,
}

/// Road-mode position and facing.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavigationCursor {
    pub vertex: VertexId,
    /// Facing, in `[0, 360)`.
    pub bearing_deg: f64,
    pub last_edge: EdgeId,
}

impl NavigationCursor {
    /// Place a cursor on the real intersection nearest to `point`, facing
    /// the incident road whose departure bearing is closest to `facing_deg`.
    ///
    /// # Errors
    ///
    /// [`NavError::NoViableVertex`] if every vertex is collapsible.
    pub fn locate_start(
        graph:      &RoadGraph,
        config:     &NetworkConfig,
        point:      GeoPoint,
        facing_deg: f64,
    ) -> NavResult<Self> {
        let low_priority = &config.low_priority_highways;
        let vertex = graph
            .nearest_vertex_where(point, |v| !is_collapsible(graph, v, low_priority))
            .ok_or(NavError::NoViableVertex)?;

        // Non-collapsible implies at least one incident edge.
        let edge = closest_by_bearing(graph, graph.out_edges(vertex), facing_deg)
            .ok_or(NavError::NoViableVertex)?;

        debug!("start at {vertex} facing {:.0}°", edge.departure_deg);
        Ok(Self {
            vertex,
            bearing_deg: normalize_bearing(edge.departure_deg),
            last_edge: edge.id,
        })
    }

    /// The edge an advance would set off along, if any.
    ///
    /// After a turn or a fresh start this is `last_edge`.  After an advance
    /// it is the continuation of the arrival way, else a road carrying the
    /// same name, else the road within [`STRAIGHT_AHEAD_DEG`] of the
    /// facing.  `None` when the road ends here, as at the stem of a T.
    pub fn heading_edge(&self, graph: &RoadGraph) -> NavResult<Option<EdgeId>> {
        if !graph.contains(self.vertex) {
            return Err(SpatialError::UnknownVertex(self.vertex).into());
        }
        if self.departs(graph) {
            return Ok(Some(self.last_edge));
        }
        let arrived = self.arrived_on(graph);
        let back = arrived.map(|e| graph.reverse(e));
        let onward: Vec<EdgeId> = graph.out_edges(self.vertex).filter(|&e| Some(e) != back).collect();

        if let Some(arrived) = arrived {
            let way = graph.edge_way[arrived.index()];
            let same_way = onward.iter().copied().filter(|&e| graph.edge_way[e.index()] == way);
            if let Some(edge) = closest_by_bearing(graph, same_way, self.bearing_deg) {
                return Ok(Some(edge.id));
            }
            if let Some(name) = street_name(graph, arrived) {
                let same_name = onward.iter().copied().filter(|&e| street_name(graph, e) == Some(name));
                if let Some(edge) = closest_by_bearing(graph, same_name, self.bearing_deg) {
                    return Ok(Some(edge.id));
                }
            }
        }
        Ok(closest_by_bearing(graph, onward, self.bearing_deg)
            .filter(|e| angular_difference(self.bearing_deg, e.departure_deg).abs() <= STRAIGHT_AHEAD_DEG)
            .map(|e| e.id))
    }

    /// `last_edge` leaves the current vertex.
    fn departs(&self, graph: &RoadGraph) -> bool {
        self.last_edge.index() < graph.edge_count() && graph.edge_from[self.last_edge.index()] == self.vertex
    }

    /// `last_edge`, if it ends at the current vertex.
    fn arrived_on(&self, graph: &RoadGraph) -> Option<EdgeId> {
        (self.last_edge.index() < graph.edge_count() && graph.edge_to[self.last_edge.index()] == self.vertex)
            .then_some(self.last_edge)
    }

    /// Move to the next real intersection ahead and commit the arrival.
    ///
    /// Also looks one intersection further ahead without moving, so the
    /// caller can announce what comes next.
    ///
    /// # Errors
    ///
    /// [`NavError::DeadEnd`] if no road leads on, including a real
    /// intersection with nothing straight ahead; the cursor is unchanged.
    pub fn advance(&mut self, graph: &RoadGraph, config: &NetworkConfig) -> NavResult<Advance> {
        let edge = self
            .heading_edge(graph)?
            .ok_or(NavError::DeadEnd { vertex: self.vertex })?;
        let arrival = advance_to_next_real_intersection(graph, config, edge)?;

        self.vertex = arrival.vertex;
        self.bearing_deg = normalize_bearing(arrival.arrival_bearing_deg);
        self.last_edge = arrival.last_edge;

        let upcoming = match self.heading_edge(graph)? {
            Some(next) => advance_to_next_real_intersection(graph, config, next).ok(),
            None => None,
        };
        Ok(Advance { arrival, upcoming })
    }

    /// Rotate to the neighbouring road in `direction`.
    ///
    /// Candidate roads are the non-low-priority edges at the vertex, sorted
    /// by departure bearing.  After a turn or a fresh start the current road
    /// is `last_edge` and the result is its circular neighbour, so turning
    /// clockwise then counter-clockwise returns to the same road.
    ///
    /// After an advance the road just arrived on is dropped from the
    /// candidates unless it is the only one.  The current road is then the
    /// one straight ahead, if any; otherwise the result is the first
    /// candidate met sweeping from the facing in `direction`.
    ///
    /// # Errors
    ///
    /// - [`NavError::NotAtIntersection`] if the vertex is collapsible.
    /// - [`NavError::NoForwardEdge`] if no candidate road exists.
    pub fn turn(
        &mut self,
        graph:     &RoadGraph,
        config:    &NetworkConfig,
        direction: TurnDirection,
    ) -> NavResult<Edge> {
        if !graph.contains(self.vertex) {
            return Err(SpatialError::UnknownVertex(self.vertex).into());
        }
        if is_collapsible(graph, self.vertex, &config.low_priority_highways) {
            return Err(NavError::NotAtIntersection { vertex: self.vertex });
        }

        let mut options: Vec<(f64, EdgeId)> = graph
            .out_edges(self.vertex)
            .filter(|&e| {
                let way = graph.way(graph.edge_way[e.index()]);
                !config.is_low_priority(way.and_then(|w| w.highway()))
            })
            .map(|e| (normalize_bearing(graph.edge_departure_deg[e.index()]), e))
            .collect();
        if options.is_empty() {
            return Err(NavError::NoForwardEdge { vertex: self.vertex });
        }
        options.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        let next = match options.iter().position(|&(_, e)| e == self.last_edge) {
            Some(current) => neighbour(current, options.len(), direction),
            None => {
                let back = self.arrived_on(graph).map(|e| graph.reverse(e));
                if options.len() > 1 {
                    options.retain(|&(_, e)| Some(e) != back);
                }
                self.sweep(&options, direction)
            }
        };

        let (bearing, edge) = options[next];
        self.bearing_deg = bearing;
        self.last_edge = edge;
        Ok(graph.edge(edge))
    }

    /// Index of the option reached turning from the facing when `last_edge`
    /// is not among `options`.  `options` is sorted and non-empty.
    fn sweep(&self, options: &[(f64, EdgeId)], direction: TurnDirection) -> usize {
        let facing = self.bearing_deg;
        let ahead = options
            .iter()
            .enumerate()
            .map(|(i, &(bearing, _))| (i, angular_difference(facing, bearing).abs()))
            .filter(|&(_, d)| d <= STRAIGHT_AHEAD_DEG)
            .min_by(|a, b| a.1.total_cmp(&b.1));
        if let Some((current, _)) = ahead {
            return neighbour(current, options.len(), direction);
        }

        let offset = |bearing: f64| match direction {
            TurnDirection::Clockwise        => normalize_bearing(bearing - facing),
            TurnDirection::Counterclockwise => normalize_bearing(facing - bearing),
        };
        options
            .iter()
            .enumerate()
            .min_by(|a, b| offset(a.1.0).total_cmp(&offset(b.1.0)))
            .map_or(0, |(i, _)| i)
    }
}

fn neighbour(current: usize, n: usize, direction: TurnDirection) -> usize {
    match direction {
        TurnDirection::Clockwise        => (current + 1) % n,
        TurnDirection::Counterclockwise => (current + n - 1) % n,
    }
}

/// The `name` tag of the way carrying `edge`.
fn street_name(graph: &RoadGraph, edge: EdgeId) -> Option<&str> {
    graph.way(graph.edge_way[edge.index()])?.tags.name.as_deref()
}

/// Follow `first` and keep going straight through collapsible vertices
/// until a real intersection is reached.
///
/// At each collapsible vertex the next edge is the one (other than the
/// reverse of the edge just travelled) whose departure bearing is closest
/// to the arrival bearing.  Does not touch any cursor.
///
/// # Errors
///
/// [`NavError::DeadEnd`] when a collapsible vertex has no way on, or when
/// continuing straight would re-enter an edge already travelled (a ring of
/// collapsible vertices).
pub fn advance_to_next_real_intersection(
    graph:  &RoadGraph,
    config: &NetworkConfig,
    first:  EdgeId,
) -> NavResult<Arrival> {
    let low_priority = &config.low_priority_highways;
    let mut edge = graph.edge(first);
    let mut distance_m = edge.length_m;
    let mut skipped = Vec::new();
    let mut travelled: FxHashSet<EdgeId> = FxHashSet::default();
    travelled.insert(first);

    loop {
        let here = edge.to;
        if !is_collapsible(graph, here, low_priority) {
            return Ok(Arrival {
                vertex: here,
                arrival_bearing_deg: edge.arrival_deg,
                distance_m,
                last_edge: edge.id,
                skipped,
            });
        }

        let back = graph.reverse(edge.id);
        let candidates = graph.out_edges(here).filter(|&e| e != back);
        let Some(next) = closest_by_bearing(graph, candidates, edge.arrival_deg) else {
            return Err(NavError::DeadEnd { vertex: here });
        };
        if !travelled.insert(next.id) {
            debug!("collapsible ring through {here}; stopping");
            return Err(NavError::DeadEnd { vertex: here });
        }

        debug!("passing {here} after {distance_m:.0} m");
        skipped.push(here);
        distance_m += next.length_m;
        edge = next;
    }
}

/// The edge whose departure bearing is nearest `bearing_deg`.  Ties go to
/// the earliest edge.
fn closest_by_bearing<I>(graph: &RoadGraph, edges: I, bearing_deg: f64) -> Option<Edge>
where
    I: IntoIterator<Item = EdgeId>,
{
    edges
        .into_iter()
        .map(|e| graph.edge(e))
        .min_by(|a, b| {
            let da = angular_difference(bearing_deg, a.departure_deg).abs();
            let db = angular_difference(bearing_deg, b.departure_deg).abs();
            da.total_cmp(&db)
        })
}

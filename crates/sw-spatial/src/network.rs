//! Intersection graph representation and construction.
//!
//! # Data layout
//!
//! Vertices are the surveyed nodes where two or more qualifying ways meet.
//! Edges are stored in **Compressed Sparse Row (CSR)** format: the outgoing
//! edges of `VertexId v` occupy
//!
//! ```text
//! edge_*[ vertex_out_start[v] .. vertex_out_start[v+1] ]
//! ```
//!
//! Every edge has a twin running the other way along the same way with the
//! same length; `edge_reverse` links the two.  There is no API for adding a
//! one-directional edge, so the symmetry holds by construction.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) over unit-sphere vectors orders vertices by exact
//! great-circle distance from a query point.

use std::fmt;

use log::{debug, warn};
use rstar::{PointDistance, RTree, RTreeObject, AABB};
use rustc_hash::FxHashMap;

use sw_core::{EdgeId, GeoPoint, NodeId, VertexId, WayId};

use crate::config::NetworkConfig;
use crate::osm::{RawElement, RawWay};
use crate::SpatialError;

// ── R-tree vertex entry ───────────────────────────────────────────────────────

#[derive(Clone)]
struct VertexEntry {
    point: [f64; 3],
    id: VertexId,
}

impl RTreeObject for VertexEntry {
    type Envelope = AABB<[f64; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for VertexEntry {
    /// Squared chord length on the unit sphere.
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        let dz = self.point[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

// ── Edge view ─────────────────────────────────────────────────────────────────

/// A copy of one directed edge's attributes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Edge {
    pub id: EdgeId,
    pub from: VertexId,
    pub to: VertexId,
    pub way: WayId,
    /// Sum of the great-circle hops between `from` and `to` along `way`.
    pub length_m: f64,
    /// Bearing of the first survey hop leaving `from`.
    pub departure_deg: f64,
    /// Bearing of the last survey hop entering `to`.
    pub arrival_deg: f64,
}

// ── RoadGraph ─────────────────────────────────────────────────────────────────

/// Immutable, undirected intersection graph stored as symmetric directed
/// edge pairs.  Built by [`build`] or [`RoadGraphBuilder`].
pub struct RoadGraph {
    // ── Vertex data ───────────────────────────────────────────────────────
    /// Underlying survey node of each vertex.  Indexed by `VertexId`.
    pub vertex_node: Vec<NodeId>,

    /// Position of each vertex.
    pub vertex_pos: Vec<GeoPoint>,

    /// Qualifying ways that reference each vertex, in first-seen order.
    vertex_ways: Vec<Vec<WayId>>,

    /// CSR row pointer.  Length = `vertex_count + 1`.
    pub vertex_out_start: Vec<u32>,

    // ── Edge data (indexed by EdgeId) ─────────────────────────────────────
    pub edge_from: Vec<VertexId>,
    pub edge_to: Vec<VertexId>,
    pub edge_way: Vec<WayId>,
    pub edge_length_m: Vec<f64>,
    pub edge_departure_deg: Vec<f64>,
    pub edge_arrival_deg: Vec<f64>,
    /// The twin of each edge: same way and length, opposite direction.
    pub edge_reverse: Vec<EdgeId>,

    // ── Lookup ────────────────────────────────────────────────────────────
    ways: FxHashMap<WayId, RawWay>,
    node_to_vertex: FxHashMap<NodeId, VertexId>,
    malformed: Vec<SpatialError>,
    spatial_idx: RTree<VertexEntry>,
}

impl RoadGraph {
    /// A graph with no vertices, edges, or ways.
    pub fn empty() -> Self {
        RoadGraphBuilder::new().build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn vertex_count(&self) -> usize {
        self.vertex_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertex_pos.is_empty()
    }

    // ── Vertex queries ────────────────────────────────────────────────────

    #[inline]
    pub fn contains(&self, vertex: VertexId) -> bool {
        vertex.index() < self.vertex_count()
    }

    #[inline]
    pub fn vertex_pos(&self, vertex: VertexId) -> GeoPoint {
        self.vertex_pos[vertex.index()]
    }

    #[inline]
    pub fn vertex_node(&self, vertex: VertexId) -> NodeId {
        self.vertex_node[vertex.index()]
    }

    /// Vertex built from survey node `node`, if it became one.
    pub fn vertex_of(&self, node: NodeId) -> Option<VertexId> {
        self.node_to_vertex.get(&node).copied()
    }

    /// Qualifying ways that pass through `vertex`, whether or not they
    /// produced an edge there.
    pub fn vertex_ways(&self, vertex: VertexId) -> &[WayId] {
        &self.vertex_ways[vertex.index()]
    }

    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        (0..self.vertex_count()).map(|i| VertexId(i as u32))
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing edges from `vertex`.
    #[inline]
    pub fn out_edges(&self, vertex: VertexId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.vertex_out_start[vertex.index()] as usize;
        let end   = self.vertex_out_start[vertex.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    #[inline]
    pub fn out_degree(&self, vertex: VertexId) -> usize {
        let start = self.vertex_out_start[vertex.index()] as usize;
        let end   = self.vertex_out_start[vertex.index() + 1] as usize;
        end - start
    }

    pub fn edge(&self, id: EdgeId) -> Edge {
        let i = id.index();
        Edge {
            id,
            from:          self.edge_from[i],
            to:            self.edge_to[i],
            way:           self.edge_way[i],
            length_m:      self.edge_length_m[i],
            departure_deg: self.edge_departure_deg[i],
            arrival_deg:   self.edge_arrival_deg[i],
        }
    }

    #[inline]
    pub fn reverse(&self, id: EdgeId) -> EdgeId {
        self.edge_reverse[id.index()]
    }

    // ── Ways ──────────────────────────────────────────────────────────────

    /// Any way from the input, including ones that contributed no edges.
    pub fn way(&self, id: WayId) -> Option<&RawWay> {
        self.ways.get(&id)
    }

    pub fn way_count(&self) -> usize {
        self.ways.len()
    }

    /// Ways truncated during construction because of a missing node.
    pub fn malformed_ways(&self) -> &[SpatialError] {
        &self.malformed
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The vertex nearest to `pos` by great-circle distance.
    ///
    /// Returns `None` only if the graph has no vertices.
    pub fn nearest_vertex(&self, pos: GeoPoint) -> Option<VertexId> {
        self.spatial_idx
            .nearest_neighbor(&pos.to_unit_vector())
            .map(|e| e.id)
    }

    /// The nearest vertex to `pos` for which `accept` returns `true`.
    /// Candidates are visited in ascending distance, so `accept` runs only
    /// until the first match.
    pub fn nearest_vertex_where<F>(&self, pos: GeoPoint, mut accept: F) -> Option<VertexId>
    where
        F: FnMut(VertexId) -> bool,
    {
        let query = pos.to_unit_vector();
        self.spatial_idx
            .nearest_neighbor_iter(&query)
            .map(|e| e.id)
            .find(|&v| accept(v))
    }
}

/// Sizes only; the arrays themselves are too large to print usefully.
impl fmt::Debug for RoadGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoadGraph")
            .field("vertices", &self.vertex_count())
            .field("edges", &self.edge_count())
            .field("ways", &self.ways.len())
            .field("malformed", &self.malformed.len())
            .finish()
    }
}

// ── RoadGraphBuilder ──────────────────────────────────────────────────────────

/// Assemble a [`RoadGraph`] from explicit vertices and segments, then call
/// [`build`](Self::build).
///
/// [`build`](crate::network::build) drives this from raw survey data; tests
/// and synthetic networks can use it directly.
///
/// # Example
///
/// ```
/// use sw_core::{GeoPoint, NodeId, WayId};
/// use sw_spatial::RoadGraphBuilder;
///
/// let mut b = RoadGraphBuilder::new();
/// let a = b.add_vertex(NodeId(1), GeoPoint::new(40.0, -74.0));
/// let c = b.add_vertex(NodeId(2), GeoPoint::new(40.001, -74.0));
/// b.add_segment(a, c, WayId(7), 111.2, 0.0, 0.0, 180.0, 180.0);
/// let g = b.build();
/// assert_eq!(g.vertex_count(), 2);
/// assert_eq!(g.edge_count(), 2); // one segment, both directions
/// ```
pub struct RoadGraphBuilder {
    nodes:     Vec<NodeId>,
    positions: Vec<GeoPoint>,
    ways_at:   Vec<Vec<WayId>>,
    segments:  Vec<RawSegment>,
    ways:      FxHashMap<WayId, RawWay>,
    malformed: Vec<SpatialError>,
}

struct RawSegment {
    a:           VertexId,
    b:           VertexId,
    way:         WayId,
    length_m:    f64,
    depart_a:    f64,
    arrive_b:    f64,
    depart_b:    f64,
    arrive_a:    f64,
}

impl RoadGraphBuilder {
    pub fn new() -> Self {
        Self {
            nodes:     Vec::new(),
            positions: Vec::new(),
            ways_at:   Vec::new(),
            segments:  Vec::new(),
            ways:      FxHashMap::default(),
            malformed: Vec::new(),
        }
    }

    pub fn with_capacity(vertices: usize, segments: usize) -> Self {
        Self {
            nodes:     Vec::with_capacity(vertices),
            positions: Vec::with_capacity(vertices),
            ways_at:   Vec::with_capacity(vertices),
            segments:  Vec::with_capacity(segments),
            ways:      FxHashMap::default(),
            malformed: Vec::new(),
        }
    }

    /// Add a vertex and return its `VertexId` (sequential from 0).
    pub fn add_vertex(&mut self, node: NodeId, pos: GeoPoint) -> VertexId {
        let id = VertexId(self.positions.len() as u32);
        self.nodes.push(node);
        self.positions.push(pos);
        self.ways_at.push(Vec::new());
        id
    }

    /// Record that `way` passes through `vertex`.  Duplicates are ignored.
    pub fn note_way_at(&mut self, vertex: VertexId, way: WayId) {
        let ways = &mut self.ways_at[vertex.index()];
        if !ways.contains(&way) {
            ways.push(way);
        }
    }

    /// Register a way for naming lookups.
    pub fn add_way(&mut self, way: RawWay) {
        self.ways.insert(way.id, way);
    }

    /// Add a traversable segment between `a` and `b` along `way`.  Produces
    /// the edge pair `a → b` and `b → a`, both of length `length_m`.
    ///
    /// Bearings are those of the first and last survey hop in each
    /// direction: `depart_a` leaves `a`, `arrive_b` enters `b`, and so on.
    #[allow(clippy::too_many_arguments)]
    pub fn add_segment(
        &mut self,
        a:        VertexId,
        b:        VertexId,
        way:      WayId,
        length_m: f64,
        depart_a: f64,
        arrive_b: f64,
        depart_b: f64,
        arrive_a: f64,
    ) {
        self.segments.push(RawSegment { a, b, way, length_m, depart_a, arrive_b, depart_b, arrive_a });
    }

    pub fn vertex_count(&self) -> usize { self.positions.len() }
    pub fn segment_count(&self) -> usize { self.segments.len() }

    /// Consume the builder and produce a [`RoadGraph`].
    ///
    /// Edges are stably sorted by source vertex, so the result depends only
    /// on the order segments were added.
    pub fn build(self) -> RoadGraph {
        let vertex_count = self.positions.len();

        // Expand each segment into its two directed halves.  Half 2k and
        // 2k+1 are twins.
        struct Half {
            from:   VertexId,
            to:     VertexId,
            way:    WayId,
            len:    f64,
            depart: f64,
            arrive: f64,
        }
        let mut halves = Vec::with_capacity(self.segments.len() * 2);
        for s in &self.segments {
            halves.push(Half { from: s.a, to: s.b, way: s.way, len: s.length_m, depart: s.depart_a, arrive: s.arrive_b });
            halves.push(Half { from: s.b, to: s.a, way: s.way, len: s.length_m, depart: s.depart_b, arrive: s.arrive_a });
        }

        let mut order: Vec<usize> = (0..halves.len()).collect();
        order.sort_by_key(|&i| halves[i].from.0);

        // position_of[raw half index] = EdgeId after sorting.
        let mut position_of = vec![0u32; halves.len()];
        for (pos, &raw) in order.iter().enumerate() {
            position_of[raw] = pos as u32;
        }

        let edge_from:          Vec<VertexId> = order.iter().map(|&i| halves[i].from).collect();
        let edge_to:            Vec<VertexId> = order.iter().map(|&i| halves[i].to).collect();
        let edge_way:           Vec<WayId>    = order.iter().map(|&i| halves[i].way).collect();
        let edge_length_m:      Vec<f64>      = order.iter().map(|&i| halves[i].len).collect();
        let edge_departure_deg: Vec<f64>      = order.iter().map(|&i| halves[i].depart).collect();
        let edge_arrival_deg:   Vec<f64>      = order.iter().map(|&i| halves[i].arrive).collect();
        let edge_reverse:       Vec<EdgeId>   = order.iter().map(|&i| EdgeId(position_of[i ^ 1])).collect();

        let mut vertex_out_start = vec![0u32; vertex_count + 1];
        for from in &edge_from {
            vertex_out_start[from.index() + 1] += 1;
        }
        for i in 1..=vertex_count {
            vertex_out_start[i] += vertex_out_start[i - 1];
        }
        debug_assert_eq!(vertex_out_start[vertex_count] as usize, edge_from.len());

        let node_to_vertex = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, &n)| (n, VertexId(i as u32)))
            .collect();

        let entries: Vec<VertexEntry> = self
            .positions
            .iter()
            .enumerate()
            .map(|(i, &pos)| VertexEntry {
                point: pos.to_unit_vector(),
                id: VertexId(i as u32),
            })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        RoadGraph {
            vertex_node: self.nodes,
            vertex_pos: self.positions,
            vertex_ways: self.ways_at,
            vertex_out_start,
            edge_from,
            edge_to,
            edge_way,
            edge_length_m,
            edge_departure_deg,
            edge_arrival_deg,
            edge_reverse,
            ways: self.ways,
            node_to_vertex,
            malformed: self.malformed,
            spatial_idx,
        }
    }
}

impl Default for RoadGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ── Construction from raw survey data ─────────────────────────────────────────

/// Build the intersection graph for a bag of raw elements.
///
/// 1. A node is an intersection candidate when qualifying ways (see
///    [`NetworkConfig::qualifies`]) reference it at least twice in total.
/// 2. Each qualifying way is walked in node order.  Reaching a candidate
///    closes the open segment (emitting an edge pair carrying the summed hop
///    lengths) and opens the next one there, so a way through N candidates
///    yields N − 1 segments.
/// 3. A reference to a node missing from the input truncates that way at the
///    gap; the way is reported in [`RoadGraph::malformed_ways`].
///
/// The result depends only on the element *set*: ways are processed in
/// `WayId` order and vertices are numbered in `NodeId` order.
pub fn build(elements: &[RawElement], config: &NetworkConfig) -> RoadGraph {
    let mut positions: FxHashMap<NodeId, GeoPoint> = FxHashMap::default();
    let mut ways: Vec<&RawWay> = Vec::new();
    for element in elements {
        match element {
            RawElement::Node(n) => {
                positions.insert(n.id, n.pos);
            }
            RawElement::Way(w) => ways.push(w),
        }
    }
    ways.sort_by_key(|w| w.id);
    ways.dedup_by_key(|w| w.id);

    // ── Phase 1: usable prefix of every qualifying way ────────────────────
    let mut malformed = Vec::new();
    let mut qualifying: Vec<(&RawWay, &[NodeId])> = Vec::new();
    for &way in &ways {
        if !config.qualifies(way.highway()) {
            continue;
        }
        let usable = match way.nodes.iter().position(|n| !positions.contains_key(n)) {
            Some(gap) => {
                let missing = way.nodes[gap];
                warn!("way {} references missing node {missing}; truncating", way.id);
                malformed.push(SpatialError::MalformedWay { way: way.id, missing });
                &way.nodes[..gap]
            }
            None => &way.nodes[..],
        };
        qualifying.push((way, usable));
    }

    // ── Phase 2: intersection candidates ──────────────────────────────────
    let mut references: FxHashMap<NodeId, u32> = FxHashMap::default();
    for (_, nodes) in &qualifying {
        for &n in *nodes {
            *references.entry(n).or_insert(0) += 1;
        }
    }
    let mut candidates: Vec<NodeId> = references
        .into_iter()
        .filter(|&(_, count)| count >= 2)
        .map(|(n, _)| n)
        .collect();
    candidates.sort_unstable();

    let mut builder = RoadGraphBuilder::with_capacity(candidates.len(), candidates.len() * 2);
    let mut vertex_of: FxHashMap<NodeId, VertexId> =
        FxHashMap::with_capacity_and_hasher(candidates.len(), Default::default());
    for &n in &candidates {
        vertex_of.insert(n, builder.add_vertex(n, positions[&n]));
    }

    // ── Phase 3: walk ways, cutting at candidates ─────────────────────────
    for &(way, nodes) in &qualifying {
        walk_way(&mut builder, way, nodes, &positions, &vertex_of);
    }

    for way in ways {
        builder.add_way(way.clone());
    }
    builder.malformed = malformed;

    let graph = builder.build();
    debug!(
        "built road graph: {} vertices, {} edges, {} ways ({} truncated)",
        graph.vertex_count(),
        graph.edge_count(),
        graph.way_count(),
        graph.malformed_ways().len(),
    );
    graph
}

/// A segment being accumulated while walking a way.
struct OpenSegment {
    start:     VertexId,
    start_pos: GeoPoint,
    length_m:  f64,
    /// Far end of the first non-zero hop after `start`.
    first_step: Option<GeoPoint>,
    /// Near end of the most recent non-zero hop.
    last_step_from: Option<GeoPoint>,
}

impl OpenSegment {
    fn at(start: VertexId, start_pos: GeoPoint) -> Self {
        Self { start, start_pos, length_m: 0.0, first_step: None, last_step_from: None }
    }
}

fn walk_way(
    builder:   &mut RoadGraphBuilder,
    way:       &RawWay,
    nodes:     &[NodeId],
    positions: &FxHashMap<NodeId, GeoPoint>,
    vertex_of: &FxHashMap<NodeId, VertexId>,
) {
    let mut open: Option<OpenSegment> = None;
    let mut prev: Option<GeoPoint> = None;

    for node in nodes {
        // Phase 1 guarantees every node in the usable prefix has a position.
        let Some(&pos) = positions.get(node) else { break };

        if let (Some(seg), Some(prev_pos)) = (open.as_mut(), prev) {
            let hop = prev_pos.distance_m(pos);
            seg.length_m += hop;
            if hop > 0.0 {
                seg.first_step.get_or_insert(pos);
                seg.last_step_from = Some(prev_pos);
            }
        }

        if let Some(&vertex) = vertex_of.get(node) {
            builder.note_way_at(vertex, way.id);
            match open.take() {
                // Repeated node id with no distance between: nothing to emit.
                Some(seg) if seg.start == vertex && seg.length_m == 0.0 => {}
                Some(seg) => close_segment(builder, way.id, seg, vertex, pos),
                None => {}
            }
            open = Some(OpenSegment::at(vertex, pos));
        }
        prev = Some(pos);
    }
}

fn close_segment(
    builder: &mut RoadGraphBuilder,
    way:     WayId,
    seg:     OpenSegment,
    end:     VertexId,
    end_pos: GeoPoint,
) {
    let first_step = seg.first_step.unwrap_or(end_pos);
    let last_step_from = seg.last_step_from.unwrap_or(seg.start_pos);
    builder.add_segment(
        seg.start,
        end,
        way,
        seg.length_m,
        seg.start_pos.bearing_to(first_step),
        last_step_from.bearing_to(end_pos),
        end_pos.bearing_to(last_step_from),
        first_step.bearing_to(seg.start_pos),
    );
}

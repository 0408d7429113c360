//! The navigation context object.
//!
//! A [`NavigationSession`] owns the free-explore state and, while road mode
//! is active, the road graph and cursor.  Front ends call its command
//! methods and render the returned summaries; there is no global state.

use log::info;

use sw_core::{CompassPoint, GeoPoint};
use sw_spatial::RoadGraph;

use crate::acquire::{acquire_graph, GrowthPolicy, RoadSource};
use crate::config::NavConfig;
use crate::cursor::{advance_to_next_real_intersection, Advance, NavigationCursor, TurnDirection};
use crate::explore::Explorer;
use crate::summary::{road_name, vertex_title, TravelSummary, TurnSummary, Upcoming};
use crate::{NavError, NavResult};

/// Graph and cursor for an active road-mode walk.
struct RoadMode {
    graph:  RoadGraph,
    cursor: NavigationCursor,
}

/// One user's walk: free-explore state plus, optionally, road mode.
pub struct NavigationSession {
    config:   NavConfig,
    explorer: Explorer,
    road:     Option<RoadMode>,
}

impl NavigationSession {
    /// Start in free-explore mode at `position` facing `heading_deg`.
    pub fn new(config: NavConfig, position: GeoPoint, heading_deg: f64) -> Self {
        let explorer = Explorer::new(position, heading_deg, &config.explore);
        Self { config, explorer, road: None }
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    pub fn is_road_mode(&self) -> bool {
        self.road.is_some()
    }

    /// Free-explore state.  Unavailable while road mode is active.
    pub fn explore(&mut self) -> NavResult<&mut Explorer> {
        if self.road.is_some() {
            return Err(NavError::InRoadMode);
        }
        Ok(&mut self.explorer)
    }

    /// Free-explore state, read-only, in either mode.
    pub fn explorer(&self) -> &Explorer {
        &self.explorer
    }

    pub fn cursor(&self) -> Option<&NavigationCursor> {
        self.road.as_ref().map(|r| &r.cursor)
    }

    pub fn graph(&self) -> Option<&RoadGraph> {
        self.road.as_ref().map(|r| &r.graph)
    }

    // ── Mode switching ────────────────────────────────────────────────────

    /// Enter road mode using the session's growth policy.
    pub fn enter_road_mode<S: RoadSource + ?Sized>(&mut self, source: &mut S) -> NavResult<TravelSummary> {
        let policy = self.config.growth.clone();
        self.enter_road_mode_with_policy(source, &policy)
    }

    /// Fetch roads around the explorer, build the graph, and stand on the
    /// nearest real intersection facing the road closest to the explorer's
    /// heading.
    ///
    /// On any error the session is left in free-explore mode exactly as it
    /// was.
    pub fn enter_road_mode_with_policy<S: RoadSource + ?Sized>(
        &mut self,
        source: &mut S,
        policy: &GrowthPolicy,
    ) -> NavResult<TravelSummary> {
        if self.road.is_some() {
            return Err(NavError::InRoadMode);
        }
        let graph = acquire_graph(source, self.explorer.position(), policy, &self.config.network)?;
        self.enter_road_mode_with_graph(graph)
    }

    /// Enter road mode on an already-built graph.
    pub fn enter_road_mode_with_graph(&mut self, graph: RoadGraph) -> NavResult<TravelSummary> {
        if self.road.is_some() {
            return Err(NavError::InRoadMode);
        }
        let here = self.explorer.position();
        let cursor = NavigationCursor::locate_start(
            &graph,
            &self.config.network,
            here,
            self.explorer.heading_deg(),
        )?;

        let position = graph.vertex_pos(cursor.vertex);
        let summary = TravelSummary {
            vertex: cursor.vertex,
            position,
            bearing_deg: cursor.bearing_deg,
            direction: CompassPoint::from_bearing(cursor.bearing_deg),
            distance_m: here.distance_m(position),
            title: vertex_title(&graph, &self.config.network, cursor.vertex),
            road: road_name(&graph, cursor.last_edge),
            upcoming: self.lookahead(&graph, &cursor),
        };
        info!(
            "road mode: {} vertices, start at {} ({})",
            graph.vertex_count(),
            cursor.vertex,
            summary.title,
        );
        self.road = Some(RoadMode { graph, cursor });
        Ok(summary)
    }

    /// Leave road mode, placing the explorer on the current intersection
    /// facing the cursor's bearing.  The position held before road mode is
    /// pushed onto the explorer's history.
    pub fn exit_road_mode(&mut self) -> NavResult<GeoPoint> {
        let road = self.road.take().ok_or(NavError::NotInRoadMode)?;
        let position = road.graph.vertex_pos(road.cursor.vertex);
        self.explorer.relocate(position, road.cursor.bearing_deg);
        info!("free-explore at {position}");
        Ok(position)
    }

    // ── Road-mode commands ────────────────────────────────────────────────

    /// Walk to the next real intersection ahead.
    pub fn advance(&mut self) -> NavResult<TravelSummary> {
        let road = self.road.as_mut().ok_or(NavError::NotInRoadMode)?;
        let network = &self.config.network;
        let Advance { arrival, upcoming } = road.cursor.advance(&road.graph, network)?;

        let cursor = &road.cursor;
        Ok(TravelSummary {
            vertex: cursor.vertex,
            position: road.graph.vertex_pos(cursor.vertex),
            bearing_deg: cursor.bearing_deg,
            direction: CompassPoint::from_bearing(cursor.bearing_deg),
            distance_m: arrival.distance_m,
            title: vertex_title(&road.graph, network, cursor.vertex),
            road: road_name(&road.graph, arrival.last_edge),
            upcoming: upcoming.map(|a| Upcoming::from_arrival(&road.graph, network, &a)),
        })
    }

    pub fn turn_left(&mut self) -> NavResult<TurnSummary> {
        self.turn(TurnDirection::Counterclockwise)
    }

    pub fn turn_right(&mut self) -> NavResult<TurnSummary> {
        self.turn(TurnDirection::Clockwise)
    }

    fn turn(&mut self, direction: TurnDirection) -> NavResult<TurnSummary> {
        let road = self.road.as_mut().ok_or(NavError::NotInRoadMode)?;
        let edge = road.cursor.turn(&road.graph, &self.config.network, direction)?;
        let upcoming = advance_to_next_real_intersection(&road.graph, &self.config.network, edge.id)
            .ok()
            .map(|a| Upcoming::from_arrival(&road.graph, &self.config.network, &a));

        Ok(TurnSummary {
            vertex: road.cursor.vertex,
            bearing_deg: road.cursor.bearing_deg,
            direction: CompassPoint::from_bearing(road.cursor.bearing_deg),
            road: road_name(&road.graph, edge.id),
            upcoming,
        })
    }

    /// Next real intersection along the cursor's heading, without moving.
    fn lookahead(&self, graph: &RoadGraph, cursor: &NavigationCursor) -> Option<Upcoming> {
        let edge = cursor.heading_edge(graph).ok().flatten()?;
        advance_to_next_real_intersection(graph, &self.config.network, edge)
            .ok()
            .map(|a| Upcoming::from_arrival(graph, &self.config.network, &a))
    }
}

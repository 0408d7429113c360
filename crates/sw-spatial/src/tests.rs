//! Unit tests for sw-spatial.
//!
//! All tests use hand-built element lists so they run without network
//! access.

#[cfg(test)]
mod helpers {
    use sw_core::{GeoPoint, NodeId, VertexId, WayId};

    use crate::{Highway, RawElement, RawNode, RawWay, RoadGraph, RoadGraphBuilder, WayTags};

    pub fn node(id: i64, lat: f64, lon: f64) -> RawElement {
        RawElement::Node(RawNode { id: NodeId(id), pos: GeoPoint::new(lat, lon) })
    }

    pub fn way(id: i64, highway: &str, name: Option<&str>, nodes: &[i64]) -> RawElement {
        RawElement::Way(raw_way(id, highway, name, nodes))
    }

    pub fn raw_way(id: i64, highway: &str, name: Option<&str>, nodes: &[i64]) -> RawWay {
        RawWay {
            id: WayId(id),
            tags: WayTags {
                highway: Some(Highway::from(highway)),
                name: name.map(str::to_owned),
                ..WayTags::default()
            },
            nodes: nodes.iter().copied().map(NodeId).collect(),
        }
    }

    pub fn pos_of(elements: &[RawElement], id: i64) -> GeoPoint {
        elements
            .iter()
            .find_map(|e| match e {
                RawElement::Node(n) if n.id == NodeId(id) => Some(n.pos),
                _ => None,
            })
            .expect("fixture node")
    }

    /// Two streets crossing two avenues.
    ///
    /// ```text
    ///          First Ave      Second Ave
    ///             16             18
    ///             |              |
    ///  High St 13-3--------------4-14
    ///             |              |
    ///  Main St 10-1------11------2-12      (11 is a survey point)
    ///             |              |
    ///             15             17
    /// ```
    ///
    /// Intersections: 1, 2, 3, 4.  Four segments, eight edges.
    pub fn ladder() -> Vec<RawElement> {
        vec![
            node(1, 40.000, -74.002),
            node(2, 40.000, -74.000),
            node(3, 40.002, -74.002),
            node(4, 40.002, -74.000),
            node(10, 40.000, -74.004),
            node(11, 40.0003, -74.001),
            node(12, 40.000, -73.998),
            node(13, 40.002, -74.004),
            node(14, 40.002, -73.998),
            node(15, 39.998, -74.002),
            node(16, 40.004, -74.002),
            node(17, 39.998, -74.000),
            node(18, 40.004, -74.000),
            way(100, "primary", Some("Main St"), &[10, 1, 11, 2, 12]),
            way(101, "secondary", Some("High St"), &[13, 3, 4, 14]),
            way(102, "residential", Some("First Ave"), &[15, 1, 3, 16]),
            way(103, "residential", Some("Second Ave"), &[17, 2, 4, 18]),
        ]
    }

    /// A centre vertex with one spoke per `(highway, name)` pair, each spoke
    /// running to its own outer vertex.
    pub fn star(spokes: &[(&str, Option<&str>)]) -> (RoadGraph, VertexId) {
        let mut b = RoadGraphBuilder::new();
        let centre = b.add_vertex(NodeId(0), GeoPoint::new(0.0, 0.0));
        for (i, &(highway, name)) in spokes.iter().enumerate() {
            let bearing = 360.0 * i as f64 / spokes.len() as f64;
            let outer_pos = GeoPoint::new(0.0, 0.0).destination(bearing, 100.0);
            let outer = b.add_vertex(NodeId(i as i64 + 1), outer_pos);
            let way_id = WayId(i as i64 + 100);
            b.add_way(raw_way(way_id.0, highway, name, &[0, i as i64 + 1]));
            b.add_segment(centre, outer, way_id, 100.0, bearing, bearing, bearing + 180.0, bearing + 180.0);
        }
        (b.build(), centre)
    }
}

// ── Builder & graph structure ─────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use sw_core::{GeoPoint, NodeId, WayId};

    use crate::{RoadGraph, RoadGraphBuilder};

    #[test]
    fn empty_build() {
        let g = RoadGraph::empty();
        assert_eq!(g.vertex_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert!(g.is_empty());
        assert!(g.nearest_vertex(GeoPoint::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn debug_shows_sizes() {
        let mut b = RoadGraphBuilder::new();
        let a = b.add_vertex(NodeId(1), GeoPoint::new(0.0, 0.0));
        let c = b.add_vertex(NodeId(2), GeoPoint::new(0.0, 0.001));
        b.add_segment(a, c, WayId(5), 111.0, 90.0, 90.0, 270.0, 270.0);
        let text = format!("{:?}", b.build());
        assert_eq!(text, "RoadGraph { vertices: 2, edges: 2, ways: 0, malformed: 0 }");
    }

    #[test]
    fn segment_yields_linked_twins() {
        let mut b = RoadGraphBuilder::new();
        let a = b.add_vertex(NodeId(1), GeoPoint::new(0.0, 0.0));
        let c = b.add_vertex(NodeId(2), GeoPoint::new(0.0, 0.001));
        b.add_segment(a, c, WayId(5), 111.0, 90.0, 90.0, 270.0, 270.0);
        let g = b.build();

        assert_eq!(g.edge_count(), 2);
        let fwd = g.out_edges(a).next().unwrap();
        let back = g.reverse(fwd);
        assert_eq!(g.reverse(back), fwd);

        let (f, r) = (g.edge(fwd), g.edge(back));
        assert_eq!((f.from, f.to), (a, c));
        assert_eq!((r.from, r.to), (c, a));
        assert_eq!(f.way, r.way);
        assert_eq!(f.length_m, r.length_m);
        assert_eq!(f.departure_deg, 90.0);
        assert_eq!(r.departure_deg, 270.0);
    }

    #[test]
    fn csr_degrees() {
        let (g, centre) = super::helpers::star(&[
            ("primary", Some("A")),
            ("primary", Some("B")),
            ("service", None),
        ]);
        assert_eq!(g.out_degree(centre), 3);
        for e in g.out_edges(centre) {
            assert_eq!(g.edge_from[e.index()], centre);
        }
        assert_eq!(g.vertex_count(), 4);
    }
}

// ── Construction from raw elements ────────────────────────────────────────────

#[cfg(test)]
mod construction {
    use sw_core::{NodeId, WayId};

    use super::helpers::{ladder, node, pos_of, way};
    use crate::{build, NetworkConfig, RawElement, SpatialError};

    #[test]
    fn ladder_has_four_segments() {
        let g = build(&ladder(), &NetworkConfig::default());
        assert_eq!(g.vertex_count(), 4);
        assert_eq!(g.edge_count(), 8);
        assert_eq!(g.way_count(), 4);
        for n in [1, 2, 3, 4] {
            let v = g.vertex_of(NodeId(n)).unwrap();
            assert_eq!(g.out_degree(v), 2, "vertex for node {n}");
            assert_eq!(g.vertex_ways(v).len(), 2);
        }
        // Survey points and way ends never become vertices.
        assert!(g.vertex_of(NodeId(11)).is_none());
        assert!(g.vertex_of(NodeId(10)).is_none());
    }

    #[test]
    fn edges_are_symmetric() {
        let g = build(&ladder(), &NetworkConfig::default());
        for e in (0..g.edge_count()).map(|i| sw_core::EdgeId(i as u32)) {
            let fwd = g.edge(e);
            let back = g.edge(g.reverse(e));
            assert_eq!(fwd.from, back.to);
            assert_eq!(fwd.to, back.from);
            assert_eq!(fwd.way, back.way);
            assert_eq!(fwd.length_m, back.length_m);
            assert!(fwd.length_m >= 0.0);
            assert_eq!(g.reverse(g.reverse(e)), e);
        }
    }

    #[test]
    fn length_is_sum_of_hops() {
        let elements = ladder();
        let g = build(&elements, &NetworkConfig::default());
        let v1 = g.vertex_of(NodeId(1)).unwrap();
        let v2 = g.vertex_of(NodeId(2)).unwrap();
        let main = g
            .out_edges(v1)
            .map(|e| g.edge(e))
            .find(|e| e.to == v2)
            .expect("Main St segment");
        assert_eq!(main.way, WayId(100));

        let p = |id| pos_of(&elements, id);
        let mut expected = 0.0;
        expected += p(1).distance_m(p(11));
        expected += p(11).distance_m(p(2));
        assert_eq!(main.length_m, expected);
        // The survey point bends the road, so the segment is longer than
        // the straight line between its ends.
        assert!(main.length_m > p(1).distance_m(p(2)));
    }

    #[test]
    fn bearings_follow_survey_hops() {
        let elements = ladder();
        let g = build(&elements, &NetworkConfig::default());
        let v1 = g.vertex_of(NodeId(1)).unwrap();
        let v2 = g.vertex_of(NodeId(2)).unwrap();
        let main = g.out_edges(v1).map(|e| g.edge(e)).find(|e| e.to == v2).unwrap();

        let p = |id| pos_of(&elements, id);
        assert_eq!(main.departure_deg, p(1).bearing_to(p(11)));
        assert_eq!(main.arrival_deg, p(11).bearing_to(p(2)));
        let back = g.edge(g.reverse(main.id));
        assert_eq!(back.departure_deg, p(2).bearing_to(p(11)));
        assert_eq!(back.arrival_deg, p(11).bearing_to(p(1)));
    }

    #[test]
    fn way_through_n_candidates_yields_n_minus_one_segments() {
        let elements = vec![
            node(1, 0.0, 0.000),
            node(2, 0.0, 0.001),
            node(3, 0.0, 0.002),
            node(4, 0.0, 0.003),
            node(5, 0.001, 0.000),
            node(6, 0.001, 0.001),
            node(7, 0.001, 0.002),
            node(8, 0.001, 0.003),
            way(1, "primary", Some("Long Rd"), &[1, 2, 3, 4]),
            way(2, "primary", Some("Cross A"), &[1, 5]),
            way(3, "primary", Some("Cross B"), &[2, 6]),
            way(4, "primary", Some("Cross C"), &[3, 7]),
            way(5, "primary", Some("Cross D"), &[4, 8]),
        ];
        let g = build(&elements, &NetworkConfig::default());
        let long_rd = (0..g.edge_count()).filter(|&i| g.edge_way[i] == WayId(1)).count();
        assert_eq!(long_rd, 2 * 3);
    }

    #[test]
    fn excluded_and_untagged_ways_contribute_nothing() {
        let mut elements = ladder();
        elements.push(node(30, 40.001, -74.003));
        elements.push(way(200, "construction", Some("New Rd"), &[1, 30, 3]));
        let mut untagged = way(201, "residential", Some("Ghost Ln"), &[2, 4]);
        if let RawElement::Way(w) = &mut untagged {
            w.tags.highway = None;
        }
        elements.push(untagged);

        let g = build(&elements, &NetworkConfig::default());
        assert_eq!(g.edge_count(), 8);
        assert!(g.edge_way.iter().all(|&w| w != WayId(200) && w != WayId(201)));
        // Still inspectable for naming.
        assert_eq!(g.way(WayId(201)).unwrap().tags.name.as_deref(), Some("Ghost Ln"));
    }

    #[test]
    fn missing_node_truncates_without_bridging() {
        let elements: Vec<RawElement> = ladder()
            .into_iter()
            .filter(|e| !matches!(e, RawElement::Node(n) if n.id == NodeId(11)))
            .collect();
        let g = build(&elements, &NetworkConfig::default());

        assert_eq!(g.malformed_ways().len(), 1);
        assert!(matches!(
            g.malformed_ways()[0],
            SpatialError::MalformedWay { way: WayId(100), missing: NodeId(11) }
        ));
        assert!(g.edge_way.iter().all(|&w| w != WayId(100)));
        // Nothing connects node 1 to node 2 any more.
        if let (Some(v1), Some(v2)) = (g.vertex_of(NodeId(1)), g.vertex_of(NodeId(2))) {
            assert!(g.out_edges(v1).all(|e| g.edge_to[e.index()] != v2));
        }
    }

    #[test]
    fn degenerate_ways_are_tolerated() {
        let mut elements = ladder();
        elements.push(way(300, "residential", Some("Stub"), &[1]));
        elements.push(way(301, "residential", Some("Empty"), &[]));
        let g = build(&elements, &NetworkConfig::default());
        assert_eq!(g.edge_count(), 8);
    }

    #[test]
    fn independent_of_element_order() {
        let forward = ladder();
        let mut reversed = ladder();
        reversed.reverse();
        let a = build(&forward, &NetworkConfig::default());
        let b = build(&reversed, &NetworkConfig::default());
        assert_eq!(a.vertex_node, b.vertex_node);
        assert_eq!(a.edge_from, b.edge_from);
        assert_eq!(a.edge_to, b.edge_to);
        assert_eq!(a.edge_way, b.edge_way);
        assert_eq!(a.edge_length_m, b.edge_length_m);
    }

    #[test]
    fn nearest_vertex_by_great_circle() {
        let g = build(&ladder(), &NetworkConfig::default());
        let near_4 = sw_core::GeoPoint::new(40.0015, -74.0000);
        assert_eq!(g.vertex_node(g.nearest_vertex(near_4).unwrap()), NodeId(4));
        let skip_4 = g
            .nearest_vertex_where(near_4, |v| g.vertex_node(v) != NodeId(4))
            .unwrap();
        assert_eq!(g.vertex_node(skip_4), NodeId(2));
    }
}

// ── Significance ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod significance {
    use sw_core::{GeoPoint, NodeId};

    use super::helpers::{ladder, star};
    use crate::{build, is_collapsible, NetworkConfig, RoadGraphBuilder};

    fn collapsible(spokes: &[(&str, Option<&str>)]) -> bool {
        let (g, centre) = star(spokes);
        is_collapsible(&g, centre, &NetworkConfig::default().low_priority_highways)
    }

    #[test]
    fn isolated_vertex_is_collapsible() {
        let mut b = RoadGraphBuilder::new();
        let v = b.add_vertex(NodeId(1), GeoPoint::new(0.0, 0.0));
        let g = b.build();
        assert!(is_collapsible(&g, v, &NetworkConfig::default().low_priority_highways));
    }

    #[test]
    fn same_road_split_in_two_is_collapsible() {
        assert!(collapsible(&[("residential", Some("Elm St")), ("residential", Some("Elm St"))]));
    }

    #[test]
    fn unnamed_residential_pair_is_collapsible() {
        assert!(collapsible(&[("residential", None), ("residential", None)]));
    }

    #[test]
    fn driveway_off_a_road_is_collapsible() {
        assert!(collapsible(&[
            ("primary", Some("Main St")),
            ("service", None),
            ("primary", Some("Main St")),
        ]));
    }

    #[test]
    fn only_paths_is_collapsible() {
        assert!(collapsible(&[("footway", None), ("cycleway", None), ("path", None)]));
    }

    #[test]
    fn two_named_roads_are_a_decision_point() {
        assert!(!collapsible(&[
            ("primary", Some("Main St")),
            ("residential", Some("Oak Ave")),
            ("primary", Some("Main St")),
            ("residential", Some("Oak Ave")),
        ]));
        assert!(!collapsible(&[("primary", Some("Main St")), ("residential", Some("Oak Ave"))]));
    }

    #[test]
    fn repeated_queries_agree() {
        let g = build(&ladder(), &NetworkConfig::default());
        let lp = NetworkConfig::default().low_priority_highways;
        let first: Vec<bool> = g.vertices().map(|v| is_collapsible(&g, v, &lp)).collect();
        for _ in 0..5 {
            let again: Vec<bool> = g.vertices().map(|v| is_collapsible(&g, v, &lp)).collect();
            assert_eq!(first, again);
        }
        assert!(first.iter().all(|&c| !c));
    }
}

// ── Naming ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod naming {
    use crate::naming::{display_name_for, join_names};
    use crate::{intersection_title, Highway, WayTags};

    use super::helpers::raw_way;

    fn tags(pairs: &[(&str, &str)]) -> WayTags {
        WayTags::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn name_and_ref() {
        assert_eq!(display_name_for(&tags(&[("name", "Broadway"), ("ref", "US 9")])), "Broadway / US 9");
        assert_eq!(display_name_for(&tags(&[("name", "Broadway"), ("highway", "service")])), "Broadway");
    }

    #[test]
    fn highway_defaults() {
        assert_eq!(display_name_for(&tags(&[("highway", "service")])), "Service Road");
        assert_eq!(display_name_for(&tags(&[("highway", "footway")])), "Walking Path");
        assert_eq!(display_name_for(&tags(&[("highway", "cycleway")])), "Bike Path");
        assert_eq!(display_name_for(&tags(&[("highway", "residential")])), "Residential Street");
        assert_eq!(
            display_name_for(&tags(&[("highway", "primary"), ("junction", "roundabout")])),
            "Roundabout"
        );
    }

    #[test]
    fn highway_kind_outranks_roundabout() {
        assert_eq!(
            display_name_for(&tags(&[("highway", "residential"), ("junction", "roundabout")])),
            "Residential Street"
        );
        assert_eq!(
            display_name_for(&tags(&[("name", "Columbus Circle"), ("junction", "roundabout")])),
            "Columbus Circle"
        );
    }

    #[test]
    fn ramps() {
        assert_eq!(display_name_for(&tags(&[("highway", "motorway_link")])), "Ramp");
        assert_eq!(
            display_name_for(&tags(&[
                ("highway", "motorway_link"),
                ("junction:ref", "12"),
                ("destination:ref", "I 95"),
                ("destination", "Boston;Providence"),
            ])),
            "Exit 12 Ramp to I 95 toward Boston / Providence"
        );
    }

    #[test]
    fn ref_then_fallback() {
        assert_eq!(display_name_for(&tags(&[("highway", "primary"), ("ref", "NY 25")])), "NY 25");
        assert_eq!(display_name_for(&tags(&[("highway", "primary")])), "Road");
        assert_eq!(display_name_for(&WayTags::default()), "Road");
    }

    #[test]
    fn empty_values_are_absent() {
        let t = tags(&[("name", ""), ("highway", "footway")]);
        assert_eq!(t.name, None);
        assert_eq!(t.highway, Some(Highway::Footway));
    }

    #[test]
    fn titles_dedupe_by_name() {
        let a = raw_way(1, "primary", Some("Main St"), &[]);
        let a2 = raw_way(2, "primary", Some("Main St"), &[]);
        let b = raw_way(3, "residential", Some("Oak Ave"), &[]);
        let c = raw_way(4, "service", None, &[]);
        assert_eq!(intersection_title([&a]), "Main St");
        assert_eq!(intersection_title([&a, &a2]), "Main St");
        assert_eq!(intersection_title([&a, &b, &a2]), "Main St and Oak Ave");
        assert_eq!(intersection_title([&a, &b, &c]), "Main St, Oak Ave and Service Road");
        assert_eq!(intersection_title(std::iter::empty()), "");
    }

    #[test]
    fn join_four() {
        let names: Vec<String> = ["A", "B", "C", "D"].iter().map(|s| s.to_string()).collect();
        assert_eq!(join_names(&names), "A, B, C and D");
    }
}

// ── Overpass decoding ─────────────────────────────────────────────────────────

#[cfg(test)]
mod overpass {
    use sw_core::{GeoBounds, GeoPoint, NodeId, WayId};

    use crate::overpass::{parse_elements, query};
    use crate::{Highway, RawElement, SpatialError};

    #[test]
    fn decodes_nodes_and_ways() {
        let body = r#"{
            "version": 0.6,
            "elements": [
                {"type": "way", "id": 42, "nodes": [1, 2, 3],
                 "tags": {"highway": "motorway_link", "destination": "Boston", "surface": "asphalt"}},
                {"type": "node", "id": 1, "lat": 40.1, "lon": -74.2, "tags": {"highway": "traffic_signals"}},
                {"type": "relation", "id": 7, "members": []}
            ]
        }"#;
        let elements = parse_elements(body).unwrap();
        assert_eq!(elements.len(), 2);
        match &elements[0] {
            RawElement::Way(w) => {
                assert_eq!(w.id, WayId(42));
                assert_eq!(w.nodes, vec![NodeId(1), NodeId(2), NodeId(3)]);
                assert_eq!(w.tags.highway, Some(Highway::MotorwayLink));
                assert_eq!(w.tags.destination.as_deref(), Some("Boston"));
            }
            other => panic!("expected way, got {other:?}"),
        }
        assert_eq!(
            elements[1],
            RawElement::Node(crate::RawNode { id: NodeId(1), pos: GeoPoint::new(40.1, -74.2) })
        );
    }

    #[test]
    fn way_without_tags_or_nodes() {
        let elements = parse_elements(r#"{"elements":[{"type":"way","id":1}]}"#).unwrap();
        let RawElement::Way(w) = &elements[0] else { panic!("expected way") };
        assert!(w.nodes.is_empty());
        assert_eq!(w.tags.highway, None);
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(parse_elements("<html>busy</html>"), Err(SpatialError::Json(_))));
    }

    #[test]
    fn query_embeds_bounds() {
        let b = GeoBounds { south: 1.5, west: 2.5, north: 3.5, east: 4.5 };
        let q = query(&b);
        assert!(q.contains("way[\"highway\"](1.5,2.5,3.5,4.5);"));
        assert!(q.contains("node(w);"));
    }
}

//! Synthetic downtown street data.
//!
//! A 4 × 4 grid loosely laid over downtown Mobile, Alabama, with two streets
//! split mid-block by a service alley, plus an interstate ramp delivered as
//! an Overpass response.

use anyhow::Result;

use sw_core::{GeoPoint, NodeId, WayId};
use sw_spatial::{overpass, Highway, RawElement, RawNode, RawWay, WayTags};

const SOUTH_LAT: f64 = 30.690;
const WEST_LON:  f64 = -88.045;
const SPACING:   f64 = 0.0015;

const STREETS: [&str; 4] = ["Government St", "Conti St", "Dauphin St", "St Francis St"];
const AVENUES: [&str; 4] = ["Water St", "Royal St", "St Joseph St", "Claiborne St"];

// Mid-block nodes on Conti St and Dauphin St, joined by the alley.
const CONTI_MID:   i64 = 2003;
const DAUPHIN_MID: i64 = 2001;
const ALLEY_BEND:  i64 = 2002;

// Ramp off the north-east corner, as an Overpass interpreter would return it.
const RAMP_JSON: &str = r#"{
  "version": 0.6,
  "elements": [
    {"type": "node", "id": 3000, "lat": 30.6938, "lon": -88.0395},
    {"type": "way", "id": 900, "nodes": [1033, 3000, 1023],
     "tags": {"highway": "motorway_link", "junction:ref": "26B",
              "destination:ref": "I 10", "destination": "Pascagoula;Mobile Bay"}},
    {"type": "relation", "id": 77, "members": []}
  ]
}"#;

fn grid_id(row: usize, col: usize) -> i64 {
    1000 + 10 * row as i64 + col as i64
}

fn grid_pos(row: usize, col: usize) -> GeoPoint {
    GeoPoint::new(SOUTH_LAT + row as f64 * SPACING, WEST_LON + col as f64 * SPACING)
}

fn node(id: i64, pos: GeoPoint) -> RawElement {
    RawNode { id: NodeId(id), pos }.into()
}

fn way(id: i64, highway: Highway, name: Option<&str>, nodes: Vec<i64>) -> RawElement {
    RawWay {
        id: WayId(id),
        tags: WayTags {
            name: name.map(str::to_owned),
            highway: Some(highway),
            ..WayTags::default()
        },
        nodes: nodes.into_iter().map(NodeId).collect(),
    }
    .into()
}

/// Every element of the demo area.
pub fn downtown() -> Result<Vec<RawElement>> {
    let mut elements = Vec::new();

    for row in 0..4 {
        for col in 0..4 {
            elements.push(node(grid_id(row, col), grid_pos(row, col)));
        }
    }
    let midpoint = |row: usize| {
        let (a, b) = (grid_pos(row, 1), grid_pos(row, 2));
        GeoPoint::new(a.lat, (a.lon + b.lon) / 2.0)
    };
    elements.push(node(CONTI_MID, midpoint(1)));
    elements.push(node(DAUPHIN_MID, midpoint(2)));
    elements.push(node(ALLEY_BEND, GeoPoint::new(SOUTH_LAT + 1.5 * SPACING, midpoint(1).lon)));

    // East-west streets.  Conti and Dauphin are each mapped as two ways
    // meeting at the alley.
    let mut next_way = 100;
    for (row, name) in STREETS.iter().enumerate() {
        let row_nodes: Vec<i64> = (0..4).map(|col| grid_id(row, col)).collect();
        let mid = match row {
            1 => Some(CONTI_MID),
            2 => Some(DAUPHIN_MID),
            _ => None,
        };
        match mid {
            Some(mid) => {
                let (west, east) = row_nodes.split_at(2);
                let mut first = west.to_vec();
                first.push(mid);
                let mut second = vec![mid];
                second.extend_from_slice(east);
                elements.push(way(next_way, Highway::Secondary, Some(*name), first));
                elements.push(way(next_way + 1, Highway::Secondary, Some(*name), second));
                next_way += 2;
            }
            None => {
                elements.push(way(next_way, Highway::Secondary, Some(*name), row_nodes));
                next_way += 1;
            }
        }
    }

    // North-south avenues.
    for (col, name) in AVENUES.iter().enumerate() {
        let nodes = (0..4).map(|row| grid_id(row, col)).collect();
        elements.push(way(200 + col as i64, Highway::Residential, Some(*name), nodes));
    }

    elements.push(way(300, Highway::Service, None, vec![CONTI_MID, ALLEY_BEND, DAUPHIN_MID]));

    elements.extend(overpass::parse_elements(RAMP_JSON)?);
    Ok(elements)
}

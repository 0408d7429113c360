//! Overpass API wire format.
//!
//! The engine never performs HTTP itself.  An acquisition collaborator posts
//! [`query`] to an Overpass interpreter and hands the response body to
//! [`parse_elements`].
//!
//! ```
//! use sw_core::{GeoBounds, GeoPoint};
//! use sw_spatial::overpass;
//!
//! let q = overpass::query(&GeoBounds::around(GeoPoint::new(40.7128, -74.0060), 0.5));
//! assert!(q.starts_with("[out:json]"));
//!
//! let body = r#"{"elements":[
//!     {"type":"node","id":1,"lat":40.0,"lon":-74.0},
//!     {"type":"way","id":9,"nodes":[1,2],"tags":{"highway":"residential","name":"Elm St"}},
//!     {"type":"relation","id":4}
//! ]}"#;
//! let elements = overpass::parse_elements(body).unwrap();
//! assert_eq!(elements.len(), 2);
//! ```

use rustc_hash::FxHashMap;
use serde::Deserialize;

use sw_core::{GeoBounds, GeoPoint, NodeId, WayId};

use crate::osm::{RawElement, RawNode, RawWay, WayTags};
use crate::SpatialResult;

/// Public Overpass interpreter endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://overpass-api.de/api/interpreter";

/// Build a query for every `highway=*` way inside `bounds`, plus the nodes
/// those ways reference.
pub fn query(bounds: &GeoBounds) -> String {
    format!(
        "[out:json][timeout:60];\n\
         way[\"highway\"]({s},{w},{n},{e});\n\
         out body;\n\
         node(w);\n\
         out body;",
        s = bounds.south,
        w = bounds.west,
        n = bounds.north,
        e = bounds.east,
    )
}

/// Decode an Overpass JSON response body.  Relations and any other element
/// types are skipped.
pub fn parse_elements(body: &str) -> SpatialResult<Vec<RawElement>> {
    let response: OverpassResponse = serde_json::from_str(body)?;
    Ok(response
        .elements
        .into_iter()
        .filter_map(OverpassElement::into_raw)
        .collect())
}

// ── Wire types ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum OverpassElement {
    Node {
        id: i64,
        lat: f64,
        lon: f64,
    },
    Way {
        id: i64,
        #[serde(default)]
        nodes: Vec<i64>,
        #[serde(default)]
        tags: FxHashMap<String, String>,
    },
    #[serde(other)]
    Other,
}

impl OverpassElement {
    fn into_raw(self) -> Option<RawElement> {
        match self {
            OverpassElement::Node { id, lat, lon } => Some(RawElement::Node(RawNode {
                id:  NodeId(id),
                pos: GeoPoint::new(lat, lon),
            })),
            OverpassElement::Way { id, nodes, tags } => Some(RawElement::Way(RawWay {
                id:    WayId(id),
                tags:  WayTags::from_pairs(tags.iter().map(|(k, v)| (k.as_str(), v.as_str()))),
                nodes: nodes.into_iter().map(NodeId).collect(),
            })),
            OverpassElement::Other => None,
        }
    }
}

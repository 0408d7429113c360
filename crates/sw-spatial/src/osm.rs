//! Raw survey elements and the typed tag schema.
//!
//! Upstream map data arrives as an unordered bag of points and tagged
//! polylines.  Only the tags that naming and graph construction read are
//! kept; everything else is dropped at the decoding boundary.

use std::fmt;

use sw_core::{GeoPoint, NodeId, WayId};

// ── Highway classification ────────────────────────────────────────────────────

/// Value of a way's `highway` tag.
///
/// Values the engine treats specially get their own variant; anything else
/// is preserved verbatim in [`Highway::Other`] so configs can still name it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "String")
)]
pub enum Highway {
    Motorway,
    MotorwayLink,
    Trunk,
    TrunkLink,
    Primary,
    PrimaryLink,
    Secondary,
    SecondaryLink,
    Tertiary,
    TertiaryLink,
    Unclassified,
    Residential,
    LivingStreet,
    Service,
    Pedestrian,
    Track,
    Footway,
    Cycleway,
    Path,
    Steps,
    Bridleway,
    Corridor,
    Proposed,
    Construction,
    Abandoned,
    Razed,
    Platform,
    Other(String),
}

impl Highway {
    pub fn as_str(&self) -> &str {
        match self {
            Highway::Motorway      => "motorway",
            Highway::MotorwayLink  => "motorway_link",
            Highway::Trunk         => "trunk",
            Highway::TrunkLink     => "trunk_link",
            Highway::Primary       => "primary",
            Highway::PrimaryLink   => "primary_link",
            Highway::Secondary     => "secondary",
            Highway::SecondaryLink => "secondary_link",
            Highway::Tertiary      => "tertiary",
            Highway::TertiaryLink  => "tertiary_link",
            Highway::Unclassified  => "unclassified",
            Highway::Residential   => "residential",
            Highway::LivingStreet  => "living_street",
            Highway::Service       => "service",
            Highway::Pedestrian    => "pedestrian",
            Highway::Track         => "track",
            Highway::Footway       => "footway",
            Highway::Cycleway      => "cycleway",
            Highway::Path          => "path",
            Highway::Steps         => "steps",
            Highway::Bridleway     => "bridleway",
            Highway::Corridor      => "corridor",
            Highway::Proposed      => "proposed",
            Highway::Construction  => "construction",
            Highway::Abandoned     => "abandoned",
            Highway::Razed         => "razed",
            Highway::Platform      => "platform",
            Highway::Other(s)      => s,
        }
    }
}

impl From<&str> for Highway {
    fn from(s: &str) -> Self {
        match s {
            "motorway"       => Highway::Motorway,
            "motorway_link"  => Highway::MotorwayLink,
            "trunk"          => Highway::Trunk,
            "trunk_link"     => Highway::TrunkLink,
            "primary"        => Highway::Primary,
            "primary_link"   => Highway::PrimaryLink,
            "secondary"      => Highway::Secondary,
            "secondary_link" => Highway::SecondaryLink,
            "tertiary"       => Highway::Tertiary,
            "tertiary_link"  => Highway::TertiaryLink,
            "unclassified"   => Highway::Unclassified,
            "residential"    => Highway::Residential,
            "living_street"  => Highway::LivingStreet,
            "service"        => Highway::Service,
            "pedestrian"     => Highway::Pedestrian,
            "track"          => Highway::Track,
            "footway"        => Highway::Footway,
            "cycleway"       => Highway::Cycleway,
            "path"           => Highway::Path,
            "steps"          => Highway::Steps,
            "bridleway"      => Highway::Bridleway,
            "corridor"       => Highway::Corridor,
            "proposed"       => Highway::Proposed,
            "construction"   => Highway::Construction,
            "abandoned"      => Highway::Abandoned,
            "razed"          => Highway::Razed,
            "platform"       => Highway::Platform,
            other            => Highway::Other(other.to_owned()),
        }
    }
}

impl From<String> for Highway {
    fn from(s: String) -> Self {
        Highway::from(s.as_str())
    }
}

impl From<Highway> for String {
    fn from(h: Highway) -> String {
        h.as_str().to_owned()
    }
}

impl fmt::Display for Highway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Tags ──────────────────────────────────────────────────────────────────────

/// The subset of way tags the engine understands.  Every field is optional.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WayTags {
    /// `name`
    pub name: Option<String>,
    /// `ref`
    pub reference: Option<String>,
    /// `highway`
    pub highway: Option<Highway>,
    /// `junction`
    pub junction: Option<String>,
    /// `destination`
    pub destination: Option<String>,
    /// `destination:ref`
    pub destination_ref: Option<String>,
    /// `junction:ref`
    pub junction_ref: Option<String>,
}

impl WayTags {
    /// Pick the known keys out of an arbitrary key/value list.  Empty values
    /// are treated as absent.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut tags = WayTags::default();
        for (key, value) in pairs {
            if value.is_empty() {
                continue;
            }
            let slot = match key {
                "name"            => &mut tags.name,
                "ref"             => &mut tags.reference,
                "junction"        => &mut tags.junction,
                "destination"     => &mut tags.destination,
                "destination:ref" => &mut tags.destination_ref,
                "junction:ref"    => &mut tags.junction_ref,
                "highway" => {
                    tags.highway = Some(Highway::from(value));
                    continue;
                }
                _ => continue,
            };
            *slot = Some(value.to_owned());
        }
        tags
    }

    #[inline]
    pub fn is_roundabout(&self) -> bool {
        self.junction.as_deref() == Some("roundabout")
    }
}

// ── Elements ──────────────────────────────────────────────────────────────────

/// A surveyed point.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawNode {
    pub id: NodeId,
    pub pos: GeoPoint,
}

/// A tagged polyline referencing nodes by id, in travel order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawWay {
    pub id: WayId,
    pub tags: WayTags,
    pub nodes: Vec<NodeId>,
}

impl RawWay {
    #[inline]
    pub fn highway(&self) -> Option<&Highway> {
        self.tags.highway.as_ref()
    }
}

/// One element of an acquisition result.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RawElement {
    Node(RawNode),
    Way(RawWay),
}

impl From<RawNode> for RawElement {
    fn from(n: RawNode) -> Self {
        RawElement::Node(n)
    }
}

impl From<RawWay> for RawElement {
    fn from(w: RawWay) -> Self {
        RawElement::Way(w)
    }
}

//! Human-readable names for ways and intersections.
//!
//! A way's display name comes from the first rule in [`NAMING_RULES`] that
//! produces one, falling back to `"Road"`.  Intersections are titled from
//! the distinct display names of the ways meeting there.

use crate::osm::{Highway, RawWay, WayTags};

/// One step of the display-name fallback chain.
pub type NamingRule = fn(&WayTags) -> Option<String>;

/// Display-name rules in precedence order.
pub const NAMING_RULES: [NamingRule; 6] = [
    name_with_ref,
    name_only,
    highway_kind,
    roundabout,
    motorway_ramp,
    ref_only,
];

const FALLBACK_NAME: &str = "Road";

/// Display name of a way.
pub fn display_name(way: &RawWay) -> String {
    display_name_for(&way.tags)
}

/// Display name for a tag set.
pub fn display_name_for(tags: &WayTags) -> String {
    NAMING_RULES
        .iter()
        .find_map(|rule| rule(tags))
        .unwrap_or_else(|| FALLBACK_NAME.to_owned())
}

/// Title for the intersection of `ways`: distinct display names in
/// first-seen order, joined as `"A"`, `"A and B"` or `"A, B and C"`.
///
/// Deduplication is by name rather than way id because a single street is
/// often split into several ways.  An empty input yields an empty string.
pub fn intersection_title<'a, I>(ways: I) -> String
where
    I: IntoIterator<Item = &'a RawWay>,
{
    let mut names: Vec<String> = Vec::new();
    for way in ways {
        let name = display_name(way);
        if !names.contains(&name) {
            names.push(name);
        }
    }
    join_names(&names)
}

/// Join names into an English list.
pub fn join_names(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{first} and {second}"),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    }
}

// ── Rules ─────────────────────────────────────────────────────────────────────

fn name_with_ref(tags: &WayTags) -> Option<String> {
    let name = tags.name.as_deref()?;
    let reference = tags.reference.as_deref()?;
    Some(format!("{name} / {reference}"))
}

fn name_only(tags: &WayTags) -> Option<String> {
    tags.name.clone()
}

fn roundabout(tags: &WayTags) -> Option<String> {
    tags.is_roundabout().then(|| "Roundabout".to_owned())
}

fn highway_kind(tags: &WayTags) -> Option<String> {
    let label = match tags.highway.as_ref()? {
        Highway::Service     => "Service Road",
        Highway::Footway     => "Walking Path",
        Highway::Cycleway    => "Bike Path",
        Highway::Residential => "Residential Street",
        _ => return None,
    };
    Some(label.to_owned())
}

/// `"Exit 12 Ramp to I 95 toward Boston"`, or just `"Ramp"` when the link
/// carries no junction or destination tags.  Multi-valued destinations
/// (`;`-separated) are joined with `" / "`.
fn motorway_ramp(tags: &WayTags) -> Option<String> {
    if tags.highway != Some(Highway::MotorwayLink) {
        return None;
    }
    let mut label = match tags.junction_ref.as_deref() {
        Some(exit) => format!("Exit {exit} Ramp"),
        None => "Ramp".to_owned(),
    };
    if let Some(dest_ref) = tags.destination_ref.as_deref() {
        label.push_str(" to ");
        label.push_str(&split_values(dest_ref));
    }
    if let Some(dest) = tags.destination.as_deref() {
        label.push_str(" toward ");
        label.push_str(&split_values(dest));
    }
    Some(label)
}

fn ref_only(tags: &WayTags) -> Option<String> {
    tags.reference.clone()
}

fn split_values(value: &str) -> String {
    value
        .split(';')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join(" / ")
}

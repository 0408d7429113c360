//! `sw-spatial` — intersection graph, vertex significance, and road naming.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                    |
//! |------------------|-------------------------------------------------------------|
//! | [`osm`]          | `RawNode`, `RawWay`, `RawElement`, typed `WayTags`/`Highway` |
//! | [`overpass`]     | Overpass query text and JSON response decoding              |
//! | [`network`]      | `RoadGraph` (CSR + R-tree), `RoadGraphBuilder`, `build`     |
//! | [`significance`] | `is_collapsible` — real intersection vs. survey artefact    |
//! | [`naming`]       | `display_name`, `intersection_title`                        |
//! | [`config`]       | `NetworkConfig` — excluded / low-priority highway classes   |
//! | [`error`]        | `SpatialError`, `SpatialResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod config;
pub mod error;
pub mod naming;
pub mod network;
pub mod osm;
pub mod overpass;
pub mod significance;

#[cfg(test)]
mod tests;

pub use config::NetworkConfig;
pub use error::{SpatialError, SpatialResult};
pub use naming::{display_name, intersection_title};
pub use network::{build, Edge, RoadGraph, RoadGraphBuilder};
pub use osm::{Highway, RawElement, RawNode, RawWay, WayTags};
pub use significance::is_collapsible;

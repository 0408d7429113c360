//! `sw-core` — foundational types for the `streetwalk` navigation engine.
//!
//! This crate is a dependency of every other `sw-*` crate.  It has no
//! `sw-*` dependencies and a single required external one (`thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`ids`]         | `NodeId`, `WayId` (survey ids), `VertexId`, `EdgeId`       |
//! | [`geo`]         | `GeoPoint`, haversine, bearings, projection, `GeoBounds`   |
//! | [`compass`]     | `CompassPoint` — 8-point direction names                  |
//! | [`error`]       | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod compass;
pub mod error;
pub mod geo;
pub mod ids;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use compass::CompassPoint;
pub use error::{CoreError, CoreResult};
pub use geo::{angular_difference, bearing, destination, distance, normalize_bearing, GeoBounds, GeoPoint};
pub use ids::{EdgeId, NodeId, VertexId, WayId};

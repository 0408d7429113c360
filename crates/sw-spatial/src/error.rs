//! Spatial-subsystem error type.

use thiserror::Error;

use sw_core::{NodeId, VertexId, WayId};

/// Errors produced by `sw-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    /// A way references a node absent from the input.  Graph construction
    /// recovers by truncating the way at the gap; this value is only ever
    /// reported, never returned from `build`.
    #[error("way {way} references missing node {missing}")]
    MalformedWay { way: WayId, missing: NodeId },

    #[error("vertex {0} not found in graph")]
    UnknownVertex(VertexId),

    #[error("malformed Overpass response: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SpatialResult<T> = Result<T, SpatialError>;

use sw_core::{CoreError, VertexId};
use sw_spatial::SpatialError;
use thiserror::Error;

use crate::acquire::AcquisitionError;

#[derive(Debug, Error)]
pub enum NavError {
    #[error("no real intersection in the loaded area")]
    NoViableVertex,

    #[error("dead end after {vertex}: no road continues")]
    DeadEnd { vertex: VertexId },

    #[error("no road to turn onto at {vertex}")]
    NoForwardEdge { vertex: VertexId },

    #[error("{vertex} is not an intersection")]
    NotAtIntersection { vertex: VertexId },

    #[error("road mode is not active")]
    NotInRoadMode,

    #[error("command unavailable while road mode is active")]
    InRoadMode,

    #[error("road data acquisition failed: {0}")]
    AcquisitionFailure(#[from] AcquisitionError),

    #[error("no usable road data within {radius_km} km")]
    NoData { radius_km: f64 },

    #[error("invalid growth policy: {0}")]
    InvalidPolicy(String),

    #[error("invalid location: {0}")]
    InvalidLocation(#[from] CoreError),

    #[error("no previous location to return to")]
    NoPreviousLocation,

    #[error("graph error: {0}")]
    Spatial(#[from] SpatialError),
}

pub type NavResult<T> = Result<T, NavError>;

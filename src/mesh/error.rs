use crate::Id;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    #[error("Link latency must be non-negative: {from} -> {to} carries {latency}")]
    NegativeLatency { from: Id, to: Id, latency: f64 },

    #[error("Satellite not found in mesh: {0}")]
    SatelliteNotFound(Id),
}

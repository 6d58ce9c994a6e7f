//! orbilink - Orbital Link Intelligence for satellite constellations
//!
//! A connectivity-analysis library for satellite constellations: shortest-latency
//! routing through an inter-satellite link mesh, coverage-gap analysis over
//! ground-to-satellite visibility windows, and greedy handoff scheduling.

pub mod coverage;
pub mod handoff;
pub mod mesh;
pub mod units;

// Re-export unit conversion traits for ergonomic use
pub use units::{convert, SameDim};

/// Identifier type used for satellites, ground terminals, and links.
pub type Id = String;

/// Generates a new unique identifier (UUID v4).
pub fn generate_id() -> Id {
    uuid::Uuid::new_v4().to_string()
}

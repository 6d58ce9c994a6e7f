use thiserror::Error;

/// Errors that can occur while analyzing coverage windows.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoverageError {
    #[error("Invalid interval: start {start} is after end {end}")]
    InvalidInterval { start: f64, end: f64 },
}

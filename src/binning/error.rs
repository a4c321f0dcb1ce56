//! Defines the error types for the binning module.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BinningError {
    #[error("Invalid range [{min}, {max}]: {reason}")]
    InvalidRange { min: f64, max: f64, reason: &'static str },
    #[error("A partition needs at least one bin")]
    NoBins,
    #[error("Edges must be finite and strictly increasing (violated at edge {index})")]
    NonIncreasingEdges { index: usize },
}

//! Error types for porenet-region

use thiserror::Error;

/// Errors that can occur during region processing operations
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] porenet_core::Error),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Distance transform requested with no solid voxel to measure from
    #[error("image has no solid phase to measure distances from")]
    NoSolidPhase,

    /// Label arithmetic would exceed the label type
    #[error("label overflow: {0}")]
    LabelOverflow(String),

    /// Empty image
    #[error("empty image: no voxels to process")]
    EmptyImage,
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;

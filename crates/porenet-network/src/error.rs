//! Error types for porenet-network

use thiserror::Error;

/// Errors that can occur while assembling a pore network
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] porenet_core::Error),

    /// Region processing error
    #[error("region error: {0}")]
    Region(#[from] porenet_region::RegionError),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for network operations
pub type NetworkResult<T> = Result<T, NetworkError>;

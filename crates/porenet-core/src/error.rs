//! Error types for porenet-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use crate::face::Face;
use thiserror::Error;

/// Porenet core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Image dimensionality other than 2-D or 3-D
    #[error("unsupported dimensionality: {0}-D (expected 2-D or 3-D)")]
    UnsupportedDimension(usize),

    /// Two arrays that must share a shape do not
    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// Face name outside the six canonical values
    #[error("unknown face name: {0:?}")]
    UnknownFace(String),

    /// Face that has no axis on an image of this dimensionality
    #[error("face '{face}' does not apply to a {ndim}-D image")]
    FaceNotApplicable { face: Face, ndim: usize },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Network property required by an operation is absent
    #[error("missing network property: {0}")]
    MissingProperty(String),

    /// Network property stored with a different kind than requested
    #[error("property '{key}' holds {actual}, expected {expected}")]
    PropertyKind {
        key: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// Network property whose row count disagrees with its entity count
    #[error("property '{key}' has {actual} rows, expected {expected}")]
    PropertyLength {
        key: String,
        expected: usize,
        actual: usize,
    },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for porenet core operations
pub type Result<T> = std::result::Result<T, Error>;

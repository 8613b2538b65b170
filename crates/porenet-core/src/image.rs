//! Image types shared by every stage of the extraction
//!
//! All images are dynamically dimensioned `ndarray` arrays in standard
//! (row-major) order. Only 2-D and 3-D images are accepted by the pipeline;
//! [`Dimensionality`] is the checked form of `ndim()`.

use crate::error::{Error, Result};
use ndarray::ArrayD;

/// Binary image: `true` is void (pore space), `false` is solid.
pub type BinaryImage = ArrayD<bool>;

/// Region label image: `0` is solid, each positive value one region.
pub type LabelImage = ArrayD<u32>;

/// Distance-transform image: distance from each void voxel to solid.
pub type DistanceImage = ArrayD<f64>;

/// Dimensionality of an image accepted by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimensionality {
    /// Planar image
    Two,
    /// Volumetric image
    Three,
}

impl Dimensionality {
    /// Convert a raw number of axes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDimension`] for anything but 2 or 3.
    pub fn from_ndim(ndim: usize) -> Result<Self> {
        match ndim {
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            other => Err(Error::UnsupportedDimension(other)),
        }
    }

    /// Dimensionality of an array.
    pub fn of<T>(image: &ArrayD<T>) -> Result<Self> {
        Self::from_ndim(image.ndim())
    }

    /// Number of axes.
    pub fn ndim(self) -> usize {
        match self {
            Self::Two => 2,
            Self::Three => 3,
        }
    }
}

/// Fail with [`Error::ShapeMismatch`] unless both arrays have the same shape.
pub fn check_same_shape<A, B>(expected: &ArrayD<A>, actual: &ArrayD<B>) -> Result<()> {
    if expected.shape() != actual.shape() {
        return Err(Error::ShapeMismatch {
            expected: expected.shape().to_vec(),
            actual: actual.shape().to_vec(),
        });
    }
    Ok(())
}

/// Largest label in a label image, or 0 when it holds no region.
pub fn max_label(labels: &LabelImage) -> u32 {
    labels.iter().copied().max().unwrap_or(0)
}

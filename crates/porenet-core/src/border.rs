//! Border operations for images
//!
//! This module provides functions for adding borders (padding) around
//! N-dimensional images:
//!
//! - Edge replication, repeating the outermost value into the border
//! - Constant fill
//!
//! Pad widths are given per axis as `(low, high)` pairs. Boundary collars
//! for a face selection are built with [`PadWidths::from_faces`].

use crate::error::{Error, Result};
use crate::face::FaceSet;
use crate::image::{BinaryImage, Dimensionality, DistanceImage, check_same_shape};
use ndarray::{ArrayD, IxDyn};

/// Thickness in voxels of the collar added on each requested face.
pub const COLLAR_WIDTH: usize = 3;

/// Per-axis `(low, high)` pad widths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PadWidths {
    pairs: Vec<(usize, usize)>,
}

impl PadWidths {
    /// The same width on both sides of every axis.
    pub fn uniform(ndim: usize, width: usize) -> Self {
        Self {
            pairs: vec![(width, width); ndim],
        }
    }

    /// Collar widths for a face set.
    ///
    /// Each side of an axis gets `width` voxels if its face is in `faces`,
    /// else 0. Faces with no axis at this dimensionality are ignored here;
    /// reject them beforehand with [`FaceSet::validate`].
    pub fn from_faces(faces: &FaceSet, dim: Dimensionality, width: usize) -> Self {
        let side = |present: bool| if present { width } else { 0 };
        let pairs = dim
            .pad_axes()
            .iter()
            .map(|&(low, high)| (side(faces.contains(low)), side(faces.contains(high))))
            .collect();
        Self { pairs }
    }

    pub fn ndim(&self) -> usize {
        self.pairs.len()
    }

    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    /// `(low, high)` widths of one axis.
    pub fn axis(&self, axis: usize) -> (usize, usize) {
        self.pairs[axis]
    }

    /// Whether every width is zero.
    pub fn is_zero(&self) -> bool {
        self.pairs.iter().all(|&(low, high)| low == 0 && high == 0)
    }

    /// Shape after padding `shape`.
    pub fn padded_shape(&self, shape: &[usize]) -> Vec<usize> {
        shape
            .iter()
            .zip(&self.pairs)
            .map(|(len, (low, high))| len + low + high)
            .collect()
    }

    fn check(&self, shape: &[usize]) -> Result<()> {
        if self.ndim() != shape.len() {
            return Err(Error::InvalidParameter(format!(
                "pad widths cover {} axes but the array has {}",
                self.ndim(),
                shape.len()
            )));
        }
        Ok(())
    }
}

/// Pad an array by replicating its edge values.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] if the widths do not match the array's
/// number of axes, or if an empty axis would need padding (there is no
/// edge value to replicate).
pub fn pad_edge<T: Clone>(array: &ArrayD<T>, widths: &PadWidths) -> Result<ArrayD<T>> {
    let shape = array.shape();
    widths.check(shape)?;
    if widths.is_zero() {
        return Ok(array.clone());
    }
    if let Some(axis) = (0..shape.len()).find(|&a| shape[a] == 0 && widths.axis(a) != (0, 0)) {
        return Err(Error::InvalidParameter(format!(
            "cannot edge-pad empty axis {axis}"
        )));
    }

    let padded = widths.padded_shape(shape);
    let mut source = vec![0; shape.len()];
    Ok(ArrayD::from_shape_fn(IxDyn(&padded), |index| {
        for (axis, src) in source.iter_mut().enumerate() {
            let (low, _) = widths.axis(axis);
            *src = index[axis].saturating_sub(low).min(shape[axis] - 1);
        }
        array[IxDyn(&source)].clone()
    }))
}

/// Pad an array with a constant value.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] if the widths do not match the array's
/// number of axes.
pub fn pad_constant<T: Clone>(array: &ArrayD<T>, widths: &PadWidths, value: T) -> Result<ArrayD<T>> {
    let shape = array.shape();
    widths.check(shape)?;
    if widths.is_zero() {
        return Ok(array.clone());
    }

    let padded = widths.padded_shape(shape);
    let mut source = vec![0; shape.len()];
    Ok(ArrayD::from_shape_fn(IxDyn(&padded), |index| {
        for (axis, src) in source.iter_mut().enumerate() {
            let (low, _) = widths.axis(axis);
            let i = index[axis];
            if i < low || i - low >= shape[axis] {
                return value.clone();
            }
            *src = i - low;
        }
        array[IxDyn(&source)].clone()
    }))
}

/// Pad a distance map and its binary image with collars on `faces`.
///
/// Both arrays are edge-padded by [`COLLAR_WIDTH`] on each requested face.
/// With no face set (`None`) both pass through unchanged.
///
/// # Arguments
///
/// * `dt` - Distance map of the image
/// * `im` - Binary image, same shape as `dt`
/// * `faces` - Faces receiving a collar, or `None` for no boundaries
///
/// # Returns
///
/// The padded `(dt, im)` pair; each axis grows by the collars on its two
/// faces.
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] if `dt` and `im` differ in shape,
/// [`Error::UnsupportedDimension`] for images that are not 2-D or 3-D, and
/// [`Error::FaceNotApplicable`] for faces with no axis at the image's
/// dimensionality.
pub fn pad_boundary(
    dt: &DistanceImage,
    im: &BinaryImage,
    faces: Option<&FaceSet>,
) -> Result<(DistanceImage, BinaryImage)> {
    check_same_shape(dt, im)?;
    let Some(faces) = faces else {
        return Ok((dt.clone(), im.clone()));
    };
    let dim = Dimensionality::of(im)?;
    faces.validate(dim)?;
    let widths = PadWidths::from_faces(faces, dim, COLLAR_WIDTH);
    Ok((pad_edge(dt, &widths)?, pad_edge(im, &widths)?))
}

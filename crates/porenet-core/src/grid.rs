//! Flat-index arithmetic over 2-D and 3-D images
//!
//! Region algorithms (labeling, flooding, dilation) walk voxels by flat
//! row-major index. [`Grid`] converts between flat indices and coordinates
//! and enumerates in-bounds neighbors without allocating.

use crate::error::{Error, Result};
use ndarray::{ArrayD, IxDyn};

/// Maximum number of axes a [`Grid`] supports.
pub const MAX_NDIM: usize = 3;

/// Neighbor offset; unused trailing axes are zero.
pub type Offset = [isize; MAX_NDIM];

/// Neighborhood used when walking from a voxel to its neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connectivity {
    /// Neighbors sharing a face (4 in 2-D, 6 in 3-D)
    #[default]
    Faces,
    /// Neighbors sharing a face, edge or corner (8 in 2-D, 26 in 3-D)
    Full,
}

impl Connectivity {
    /// Neighbor offsets for `ndim` axes, excluding the zero offset.
    pub fn offsets(self, ndim: usize) -> Vec<Offset> {
        let mut offsets = Vec::new();
        let range = |axis: usize| if axis < ndim { -1isize..=1 } else { 0..=0 };
        for d0 in range(0) {
            for d1 in range(1) {
                for d2 in range(2) {
                    let steps = d0.abs() + d1.abs() + d2.abs();
                    let keep = match self {
                        Connectivity::Faces => steps == 1,
                        Connectivity::Full => steps > 0,
                    };
                    if keep {
                        offsets.push([d0, d1, d2]);
                    }
                }
            }
        }
        offsets
    }
}

/// Shape and row-major strides of an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    ndim: usize,
    shape: [usize; MAX_NDIM],
    strides: [usize; MAX_NDIM],
    len: usize,
}

impl Grid {
    /// Create a grid for a shape of 1 to 3 axes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDimension`] for 0 or more than 3 axes.
    pub fn new(shape: &[usize]) -> Result<Self> {
        let ndim = shape.len();
        if ndim == 0 || ndim > MAX_NDIM {
            return Err(Error::UnsupportedDimension(ndim));
        }
        let mut dims = [1; MAX_NDIM];
        dims[..ndim].copy_from_slice(shape);
        let mut strides = [0; MAX_NDIM];
        let mut stride = 1;
        for axis in (0..ndim).rev() {
            strides[axis] = stride;
            stride *= dims[axis];
        }
        Ok(Self {
            ndim,
            shape: dims,
            strides,
            len: stride,
        })
    }

    /// Grid matching an array's shape.
    pub fn of<T>(array: &ArrayD<T>) -> Result<Self> {
        Self::new(array.shape())
    }

    pub fn ndim(&self) -> usize {
        self.ndim
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape[..self.ndim]
    }

    /// Number of voxels.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Flat index of a coordinate.
    pub fn index(&self, coords: &[usize]) -> usize {
        coords
            .iter()
            .zip(&self.strides[..self.ndim])
            .map(|(c, s)| c * s)
            .sum()
    }

    /// Coordinate of a flat index; unused trailing axes are zero.
    pub fn coords(&self, index: usize) -> [usize; MAX_NDIM] {
        let mut coords = [0; MAX_NDIM];
        for axis in 0..self.ndim {
            coords[axis] = (index / self.strides[axis]) % self.shape[axis];
        }
        coords
    }

    /// Call `f` with the flat index of every in-bounds neighbor.
    pub fn for_each_neighbor(&self, index: usize, offsets: &[Offset], mut f: impl FnMut(usize)) {
        let coords = self.coords(index);
        'offsets: for offset in offsets {
            let mut neighbor = 0;
            for axis in 0..self.ndim {
                let c = coords[axis] as isize + offset[axis];
                if c < 0 || c >= self.shape[axis] as isize {
                    continue 'offsets;
                }
                neighbor += c as usize * self.strides[axis];
            }
            f(neighbor);
        }
    }

    /// Values of an array in flat-index order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if the array does not match the grid.
    pub fn flatten<T: Clone>(&self, array: &ArrayD<T>) -> Result<Vec<T>> {
        if array.shape() != self.shape() {
            return Err(Error::ShapeMismatch {
                expected: self.shape().to_vec(),
                actual: array.shape().to_vec(),
            });
        }
        Ok(array.iter().cloned().collect())
    }

    /// Build an array of this grid's shape from flat-index-ordered values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `data` has the wrong length.
    pub fn reshape<T>(&self, data: Vec<T>) -> Result<ArrayD<T>> {
        let len = data.len();
        ArrayD::from_shape_vec(IxDyn(self.shape()), data).map_err(|_| Error::IndexOutOfBounds {
            index: len,
            len: self.len,
        })
    }
}

//! Smoothing, rank and morphological filters
//!
//! Filters read past the image edge with reflect mode (`d c b a | a b c d`),
//! except binary dilation, which treats the exterior as background.

use crate::error::{RegionError, RegionResult};
use ndarray::Axis;
use porenet_core::{BinaryImage, Connectivity, DistanceImage, Grid, MAX_NDIM, Offset};

/// Gaussian kernels are cut off at this many standard deviations.
pub const GAUSSIAN_TRUNCATE: f64 = 4.0;

/// Map an out-of-range index into `0..n` by mirroring about the edges.
fn reflect(i: isize, n: usize) -> usize {
    let n = n as isize;
    let period = 2 * n;
    let mut i = i.rem_euclid(period);
    if i >= n {
        i = period - 1 - i;
    }
    i as usize
}

/// Separable Gaussian smoothing.
///
/// A `sigma` of zero returns a copy of the input.
///
/// # Errors
///
/// Returns [`RegionError::InvalidParameters`] for a negative or non-finite
/// `sigma`.
pub fn gaussian_filter(input: &DistanceImage, sigma: f64) -> RegionResult<DistanceImage> {
    if !sigma.is_finite() || sigma < 0.0 {
        return Err(RegionError::InvalidParameters(format!(
            "gaussian sigma must be finite and non-negative, got {sigma}"
        )));
    }
    if sigma == 0.0 {
        return Ok(input.clone());
    }

    let radius = (GAUSSIAN_TRUNCATE * sigma + 0.5) as isize;
    let mut weights: Vec<f64> = (-radius..=radius)
        .map(|x| (-0.5 * (x * x) as f64 / (sigma * sigma)).exp())
        .collect();
    let total: f64 = weights.iter().sum();
    for w in &mut weights {
        *w /= total;
    }

    let mut out = input.clone();
    let mut line = Vec::new();
    for axis in 0..out.ndim() {
        for mut lane in out.lanes_mut(Axis(axis)) {
            let n = lane.len();
            line.clear();
            line.extend(lane.iter().copied());
            for (i, dst) in lane.iter_mut().enumerate() {
                *dst = weights
                    .iter()
                    .enumerate()
                    .map(|(k, w)| w * line[reflect(i as isize + k as isize - radius, n)])
                    .sum();
            }
        }
    }
    Ok(out)
}

/// Set of offsets a rank filter visits around each voxel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footprint {
    offsets: Vec<Offset>,
}

impl Footprint {
    /// Disk (2-D) or ball (3-D) of the given radius: every offset whose
    /// squared length is at most `radius²`.
    pub fn ball(radius: usize, ndim: usize) -> Self {
        let r = radius as isize;
        let range = |axis: usize| if axis < ndim { -r..=r } else { 0..=0 };
        let mut offsets = Vec::new();
        for d0 in range(0) {
            for d1 in range(1) {
                for d2 in range(2) {
                    if d0 * d0 + d1 * d1 + d2 * d2 <= r * r {
                        offsets.push([d0, d1, d2]);
                    }
                }
            }
        }
        Self { offsets }
    }

    pub fn offsets(&self) -> &[Offset] {
        &self.offsets
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

/// Maximum over a footprint around every voxel, reflect mode at edges.
pub fn maximum_filter(input: &DistanceImage, footprint: &Footprint) -> RegionResult<DistanceImage> {
    let grid = Grid::of(input)?;
    let values = grid.flatten(input)?;
    let shape = grid.shape();

    let mut out = Vec::with_capacity(grid.len());
    for index in 0..grid.len() {
        let coords = grid.coords(index);
        let mut best = f64::NEG_INFINITY;
        for offset in footprint.offsets() {
            let mut probe = [0usize; MAX_NDIM];
            for axis in 0..grid.ndim() {
                probe[axis] = reflect(coords[axis] as isize + offset[axis], shape[axis]);
            }
            best = best.max(values[grid.index(&probe[..grid.ndim()])]);
        }
        out.push(best);
    }
    Ok(grid.reshape(out)?)
}

/// One step of binary dilation; voxels outside the image count as unset.
pub fn binary_dilation(im: &BinaryImage, connectivity: Connectivity) -> RegionResult<BinaryImage> {
    let grid = Grid::of(im)?;
    let values = grid.flatten(im)?;
    let offsets = connectivity.offsets(grid.ndim());

    let mut out = values.clone();
    for (index, &set) in values.iter().enumerate() {
        if set {
            grid.for_each_neighbor(index, &offsets, |n| out[n] = true);
        }
    }
    Ok(grid.reshape(out)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::IxDyn;

    #[test]
    fn test_reflect() {
        assert_eq!(reflect(-1, 4), 0);
        assert_eq!(reflect(-2, 4), 1);
        assert_eq!(reflect(4, 4), 3);
        assert_eq!(reflect(5, 4), 2);
        assert_eq!(reflect(2, 4), 2);
        assert_eq!(reflect(3, 1), 0);
    }

    #[test]
    fn test_gaussian_preserves_constant() {
        let input = DistanceImage::from_elem(IxDyn(&[4, 5]), 2.5);
        let out = gaussian_filter(&input, 1.0).unwrap();
        assert!(out.iter().all(|&v| (v - 2.5).abs() < 1e-12));
    }

    #[test]
    fn test_gaussian_spreads_spike() {
        let mut input = DistanceImage::zeros(IxDyn(&[7]));
        input[IxDyn(&[3])] = 1.0;
        let out = gaussian_filter(&input, 1.0).unwrap();
        assert!(out[IxDyn(&[3])] < 1.0);
        assert!(out[IxDyn(&[2])] > 0.0);
        assert!((out[IxDyn(&[2])] - out[IxDyn(&[4])]).abs() < 1e-12);
        assert!((out.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_gaussian_rejects_negative_sigma() {
        let input = DistanceImage::zeros(IxDyn(&[3, 3]));
        assert!(gaussian_filter(&input, -0.1).is_err());
        assert_eq!(gaussian_filter(&input, 0.0).unwrap(), input);
    }

    #[test]
    fn test_ball_footprint() {
        assert_eq!(Footprint::ball(1, 2).len(), 5);
        assert_eq!(Footprint::ball(1, 3).len(), 7);
        assert_eq!(Footprint::ball(2, 2).len(), 13);
        assert_eq!(Footprint::ball(0, 3).len(), 1);
    }

    #[test]
    fn test_maximum_filter() {
        let mut input = DistanceImage::zeros(IxDyn(&[5, 5]));
        input[IxDyn(&[2, 2])] = 3.0;
        let out = maximum_filter(&input, &Footprint::ball(1, 2)).unwrap();
        assert_eq!(out[IxDyn(&[1, 2])], 3.0);
        assert_eq!(out[IxDyn(&[1, 1])], 0.0);
        assert_eq!(out.iter().filter(|&&v| v == 3.0).count(), 5);
    }

    #[test]
    fn test_binary_dilation() {
        let mut im = BinaryImage::from_elem(IxDyn(&[3, 3, 3]), false);
        im[IxDyn(&[1, 1, 1])] = true;
        let faces = binary_dilation(&im, Connectivity::Faces).unwrap();
        assert_eq!(faces.iter().filter(|&&v| v).count(), 7);
        let full = binary_dilation(&im, Connectivity::Full).unwrap();
        assert!(full.iter().all(|&v| v));
    }
}

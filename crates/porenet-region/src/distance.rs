//! Euclidean distance transform
//!
//! Exact distance from every void voxel to the nearest solid voxel, computed
//! with the separable lower-envelope algorithm of Felzenszwalb and
//! Huttenlocher: one 1-D squared-distance pass per axis, O(n) overall.

use crate::error::{RegionError, RegionResult};
use ndarray::{Axis, Slice};
use porenet_core::{BinaryImage, DistanceImage, PadWidths, pad_constant};

/// Squared distance standing in for "no solid voxel seen yet".
const FAR: f64 = 1e20;

/// How voxels outside the image are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryCondition {
    /// The exterior is solid: distances are capped by the distance to the
    /// image border.
    #[default]
    Background,
    /// The exterior is void: only solid voxels inside the image count.
    Foreground,
}

/// Compute the Euclidean distance transform of a binary image.
///
/// Solid voxels (`false`) get 0; void voxels get the distance, in voxel
/// units, to the nearest solid voxel.
///
/// # Errors
///
/// Returns [`RegionError::NoSolidPhase`] with
/// [`BoundaryCondition::Foreground`] when the image has no solid voxel.
pub fn distance_transform(
    im: &BinaryImage,
    boundary: BoundaryCondition,
) -> RegionResult<DistanceImage> {
    match boundary {
        BoundaryCondition::Foreground => {
            if im.iter().all(|&v| v) {
                return Err(RegionError::NoSolidPhase);
            }
            Ok(squared_edt(im).mapv(f64::sqrt))
        }
        BoundaryCondition::Background => {
            let padded = pad_constant(im, &PadWidths::uniform(im.ndim(), 1), false)?;
            let sq = squared_edt(&padded);
            let inner = sq.slice_each_axis(|ax| Slice::from(1..ax.len - 1));
            Ok(inner.mapv(f64::sqrt))
        }
    }
}

fn squared_edt(im: &BinaryImage) -> DistanceImage {
    let mut sq = im.mapv(|void| if void { FAR } else { 0.0 });
    let longest = sq.shape().iter().copied().max().unwrap_or(0);
    let mut f = vec![0.0; longest];
    let mut d = vec![0.0; longest];
    let mut v = vec![0usize; longest];
    let mut z = vec![0.0; longest + 1];

    for axis in 0..sq.ndim() {
        for mut lane in sq.lanes_mut(Axis(axis)) {
            let n = lane.len();
            for (dst, &src) in f.iter_mut().zip(lane.iter()) {
                *dst = src;
            }
            lower_envelope(&f[..n], &mut d[..n], &mut v, &mut z);
            for (dst, &src) in lane.iter_mut().zip(&d[..n]) {
                *dst = src;
            }
        }
    }
    sq
}

/// 1-D squared distance transform of sampled function `f` into `d`.
fn lower_envelope(f: &[f64], d: &mut [f64], v: &mut [usize], z: &mut [f64]) {
    let n = f.len();
    if n == 0 {
        return;
    }
    let parabola = |q: usize, p: usize| {
        let (qf, pf) = (q as f64, p as f64);
        ((f[q] + qf * qf) - (f[p] + pf * pf)) / (2.0 * (qf - pf))
    };

    let mut k = 0;
    v[0] = 0;
    z[0] = f64::NEG_INFINITY;
    z[1] = f64::INFINITY;
    for q in 1..n {
        let mut s = parabola(q, v[k]);
        while s <= z[k] {
            k -= 1;
            s = parabola(q, v[k]);
        }
        k += 1;
        v[k] = q;
        z[k] = s;
        z[k + 1] = f64::INFINITY;
    }

    k = 0;
    for (q, out) in d.iter_mut().enumerate() {
        while z[k + 1] < q as f64 {
            k += 1;
        }
        let dq = q as f64 - v[k] as f64;
        *out = dq * dq + f[v[k]];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::IxDyn;

    #[test]
    fn test_single_solid_voxel() {
        let mut im = BinaryImage::from_elem(IxDyn(&[5, 5]), true);
        im[IxDyn(&[2, 2])] = false;
        let dt = distance_transform(&im, BoundaryCondition::Foreground).unwrap();
        assert_eq!(dt[IxDyn(&[2, 2])], 0.0);
        assert!((dt[IxDyn(&[2, 3])] - 1.0).abs() < 1e-12);
        assert!((dt[IxDyn(&[0, 0])] - 8.0f64.sqrt()).abs() < 1e-12);
        assert!((dt[IxDyn(&[4, 2])] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_background_boundary() {
        let im = BinaryImage::from_elem(IxDyn(&[5, 5, 5]), true);
        let dt = distance_transform(&im, BoundaryCondition::Background).unwrap();
        assert_eq!(dt.shape(), &[5, 5, 5]);
        assert!((dt[IxDyn(&[0, 0, 0])] - 1.0).abs() < 1e-12);
        assert!((dt[IxDyn(&[2, 2, 2])] - 3.0).abs() < 1e-12);
        assert!((dt[IxDyn(&[1, 2, 2])] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_foreground_needs_solid() {
        let im = BinaryImage::from_elem(IxDyn(&[3, 3]), true);
        assert!(matches!(
            distance_transform(&im, BoundaryCondition::Foreground),
            Err(RegionError::NoSolidPhase)
        ));
    }

    #[test]
    fn test_solid_is_zero() {
        let im = BinaryImage::from_elem(IxDyn(&[3, 4]), false);
        let dt = distance_transform(&im, BoundaryCondition::Background).unwrap();
        assert!(dt.iter().all(|&d| d == 0.0));
    }
}

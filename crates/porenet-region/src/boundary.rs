//! Boundary region injection
//!
//! Adds a collar of [`COLLAR_WIDTH`] voxels on each requested face of a label
//! image. Collar voxels copy the label of the body voxel they replicate,
//! shifted into a label range owned by their face, so each body region
//! touching a face gets one boundary region beside it.

use crate::error::{RegionError, RegionResult};
use porenet_core::{
    COLLAR_WIDTH, Dimensionality, Face, FaceSet, Grid, LabelImage, PadWidths, max_label, pad_edge,
};
use tracing::debug;

/// Pad `regions` with labeled boundary collars on `faces`.
///
/// With `m` the largest input label, a collar voxel on face `f` gets
/// `label + m·(f.index() + 1)`, so every collar label exceeds `m` and no two
/// faces share a label. Voxels inside two or more collars (edges and
/// corners) are set to 0, as are collar voxels replicating solid.
///
/// # Errors
///
/// Fails for images that are not 2-D or 3-D, for faces with no axis at the
/// image's dimensionality, and with [`RegionError::LabelOverflow`] when the
/// shifted labels do not fit in `u32`.
pub fn add_boundary_regions(regions: &LabelImage, faces: &FaceSet) -> RegionResult<LabelImage> {
    let dim = Dimensionality::of(regions)?;
    faces.validate(dim)?;
    let widths = PadWidths::from_faces(faces, dim, COLLAR_WIDTH);
    let mut padded = pad_edge(regions, &widths)?;
    let shift = max_label(regions);
    let body = regions.shape().to_vec();
    let grid = Grid::of(&padded)?;
    let axes = dim.pad_axes();

    for (index, value) in padded.iter_mut().enumerate() {
        let coords = grid.coords(index);
        let mut collar: Option<Face> = None;
        let mut hits = 0;
        for (axis, &(low_face, high_face)) in axes.iter().enumerate() {
            let (low, _) = widths.axis(axis);
            let c = coords[axis];
            if c < low {
                collar = Some(low_face);
                hits += 1;
            } else if c >= low + body[axis] {
                collar = Some(high_face);
                hits += 1;
            }
        }
        match (hits, collar) {
            (0, _) => {}
            (1, Some(face)) if *value > 0 => {
                *value = shift
                    .checked_mul(face.index() as u32 + 1)
                    .and_then(|offset| value.checked_add(offset))
                    .ok_or_else(|| {
                        RegionError::LabelOverflow(format!(
                            "collar label for face {face} exceeds u32 (max body label {shift})"
                        ))
                    })?;
            }
            _ => *value = 0,
        }
    }

    debug!(faces = faces.len(), shape = ?padded.shape(), "added boundary regions");
    Ok(padded)
}

/// Boundary region injector padding [`COLLAR_WIDTH`]-voxel collars.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollarInjector;

impl CollarInjector {
    pub fn new() -> Self {
        Self
    }

    /// See [`add_boundary_regions`].
    pub fn inject(&self, regions: &LabelImage, faces: &FaceSet) -> RegionResult<LabelImage> {
        add_boundary_regions(regions, faces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::IxDyn;

    #[test]
    fn test_left_right_collars_2d() {
        let regions = LabelImage::from_shape_vec(IxDyn(&[2, 2]), vec![1, 2, 1, 0]).unwrap();
        let faces = FaceSet::new().with(Face::Left).with(Face::Right);
        let out = add_boundary_regions(&regions, &faces).unwrap();
        assert_eq!(out.shape(), &[2, 8]);
        // Body is untouched
        assert_eq!(out[IxDyn(&[0, 3])], 1);
        assert_eq!(out[IxDyn(&[0, 4])], 2);
        // Left collar: shift 2 * (index 2 + 1)
        assert_eq!(out[IxDyn(&[0, 0])], 1 + 6);
        assert_eq!(out[IxDyn(&[1, 2])], 1 + 6);
        // Right collar: shift 2 * (index 3 + 1); solid stays solid
        assert_eq!(out[IxDyn(&[0, 7])], 2 + 8);
        assert_eq!(out[IxDyn(&[1, 5])], 0);
    }

    #[test]
    fn test_corners_cleared() {
        let regions = LabelImage::from_elem(IxDyn(&[3, 3]), 1);
        let faces = FaceSet::new().with(Face::Top).with(Face::Left);
        let out = add_boundary_regions(&regions, &faces).unwrap();
        assert_eq!(out.shape(), &[6, 6]);
        assert_eq!(out[IxDyn(&[0, 0])], 0);
        assert_eq!(out[IxDyn(&[2, 2])], 0);
        assert_eq!(out[IxDyn(&[0, 3])], 1 + 1);
        assert_eq!(out[IxDyn(&[3, 0])], 1 + 3);
        let collar_max = out.iter().copied().max().unwrap();
        assert!(collar_max > 1);
    }

    #[test]
    fn test_collar_labels_exceed_body() {
        let regions =
            LabelImage::from_shape_fn(IxDyn(&[4, 4, 4]), |ix| (ix[0] + ix[1] + ix[2]) as u32 % 5);
        let out = CollarInjector::new().inject(&regions, &FaceSet::all()).unwrap();
        assert_eq!(out.shape(), &[10, 10, 10]);
        for (i, &l) in out.iter().enumerate() {
            let c = [i / 100, (i / 10) % 10, i % 10];
            let in_body = c.iter().all(|&x| (3..7).contains(&x));
            if !in_body && l > 0 {
                assert!(l > 4);
            }
        }
    }

    #[test]
    fn test_front_rejected_in_2d() {
        let regions = LabelImage::zeros(IxDyn(&[3, 3]));
        let faces = FaceSet::new().with(Face::Front);
        assert!(add_boundary_regions(&regions, &faces).is_err());
    }

    #[test]
    fn test_overflow() {
        let regions = LabelImage::from_elem(IxDyn(&[2, 2]), u32::MAX / 2);
        let faces = FaceSet::new().with(Face::Bottom);
        assert!(matches!(
            add_boundary_regions(&regions, &faces),
            Err(RegionError::LabelOverflow(_))
        ));
    }
}

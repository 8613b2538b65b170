//! Connected component analysis
//!
//! This module provides functions for finding and labeling connected
//! components in 2-D and 3-D binary images, and for per-label measurements
//! on label images (voxel lists, centroids, bounding boxes).

use crate::error::RegionResult;
use ndarray::{ArrayD, Slice};
use porenet_core::{BinaryImage, Connectivity, Grid, LabelImage, MAX_NDIM};
use std::collections::VecDeque;

/// Axis-aligned bounding box of a component, `hi` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    /// Number of axes in use
    pub ndim: usize,
    /// Inclusive lower corner
    pub lo: [usize; MAX_NDIM],
    /// Exclusive upper corner
    pub hi: [usize; MAX_NDIM],
}

impl Bounds {
    fn at(ndim: usize, coords: [usize; MAX_NDIM]) -> Self {
        let mut hi = coords;
        for h in hi.iter_mut().take(ndim) {
            *h += 1;
        }
        Self {
            ndim,
            lo: coords,
            hi,
        }
    }

    fn include(&mut self, coords: [usize; MAX_NDIM]) {
        for axis in 0..self.ndim {
            self.lo[axis] = self.lo[axis].min(coords[axis]);
            self.hi[axis] = self.hi[axis].max(coords[axis] + 1);
        }
    }

    /// Grow by `pad` voxels on every side, clipped to `shape`.
    pub fn extend(&self, pad: usize, shape: &[usize]) -> Self {
        let mut out = *self;
        for axis in 0..self.ndim {
            out.lo[axis] = self.lo[axis].saturating_sub(pad);
            out.hi[axis] = (self.hi[axis] + pad).min(shape[axis]);
        }
        out
    }

    /// Extent along each axis.
    pub fn shape(&self) -> Vec<usize> {
        (0..self.ndim).map(|a| self.hi[a] - self.lo[a]).collect()
    }

    /// Copy of the part of `array` inside the box.
    pub fn crop<A: Clone>(&self, array: &ArrayD<A>) -> ArrayD<A> {
        array
            .slice_each_axis(|ax| {
                let a = ax.axis.index();
                Slice::from(self.lo[a]..self.hi[a])
            })
            .to_owned()
    }
}

/// Label connected components of a binary image.
///
/// Returns the label image (0 for background, 1..=n in scan order of each
/// component's first voxel) and the number of components.
pub fn label(im: &BinaryImage, connectivity: Connectivity) -> RegionResult<(LabelImage, u32)> {
    let grid = Grid::of(im)?;
    let mask = grid.flatten(im)?;
    let offsets = connectivity.offsets(grid.ndim());

    let mut labels = vec![0u32; grid.len()];
    let mut count = 0u32;
    let mut queue = VecDeque::new();

    for start in 0..grid.len() {
        if !mask[start] || labels[start] != 0 {
            continue;
        }
        count += 1;
        labels[start] = count;
        queue.push_back(start);

        while let Some(index) = queue.pop_front() {
            grid.for_each_neighbor(index, &offsets, |n| {
                if mask[n] && labels[n] == 0 {
                    labels[n] = count;
                    queue.push_back(n);
                }
            });
        }
    }

    Ok((grid.reshape(labels)?, count))
}

/// Flat indices of the voxels of each label.
///
/// Entry `i` lists the voxels of label `i + 1` in ascending order; labels
/// absent from the image get an empty list.
pub fn region_voxels(labels: &LabelImage) -> Vec<Vec<usize>> {
    let max = porenet_core::max_label(labels) as usize;
    let mut voxels = vec![Vec::new(); max];
    for (index, &l) in labels.iter().enumerate() {
        if l > 0 {
            voxels[l as usize - 1].push(index);
        }
    }
    voxels
}

/// Bounding box of each label; `None` for labels absent from the image.
pub fn find_objects(labels: &LabelImage) -> RegionResult<Vec<Option<Bounds>>> {
    let grid = Grid::of(labels)?;
    let max = porenet_core::max_label(labels) as usize;
    let mut bounds: Vec<Option<Bounds>> = vec![None; max];
    for (index, &l) in labels.iter().enumerate() {
        if l == 0 {
            continue;
        }
        let coords = grid.coords(index);
        let slot = l as usize - 1;
        match bounds[slot].as_mut() {
            Some(b) => b.include(coords),
            None => bounds[slot] = Some(Bounds::at(grid.ndim(), coords)),
        }
    }
    Ok(bounds)
}

/// Mean voxel coordinate of a set of flat indices.
pub fn center_of_mass(grid: &Grid, voxels: &[usize]) -> Vec<f64> {
    let mut sum = vec![0.0; grid.ndim()];
    for &index in voxels {
        let coords = grid.coords(index);
        for (s, &c) in sum.iter_mut().zip(&coords) {
            *s += c as f64;
        }
    }
    let n = voxels.len().max(1) as f64;
    sum.iter().map(|s| s / n).collect()
}

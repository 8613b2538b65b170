//! Marker-based watershed segmentation
//!
//! Priority flood from labeled markers over a cost image. Voxels are claimed
//! in order of increasing cost; among equal costs the one queued first wins.

use crate::error::RegionResult;
use porenet_core::{BinaryImage, Connectivity, DistanceImage, Grid, LabelImage, check_same_shape};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Queued voxel, ordered as a min-heap on `(cost, age)`.
#[derive(Debug, Clone, Copy)]
struct Entry {
    cost: f64,
    age: u64,
    index: usize,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap pops the largest
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.age.cmp(&self.age))
    }
}

/// Flood `markers` over `cost`, restricted to `mask`.
///
/// Every masked voxel reachable from a marker through face-connected masked
/// voxels receives that marker's label. Unreachable and unmasked voxels are
/// 0. Markers outside the mask are ignored.
///
/// # Errors
///
/// Returns a shape mismatch error unless all three images share one shape.
pub fn watershed(
    cost: &DistanceImage,
    markers: &LabelImage,
    mask: &BinaryImage,
) -> RegionResult<LabelImage> {
    check_same_shape(cost, markers)?;
    check_same_shape(cost, mask)?;
    let grid = Grid::of(cost)?;
    let cost = grid.flatten(cost)?;
    let mask = grid.flatten(mask)?;
    let offsets = Connectivity::Faces.offsets(grid.ndim());

    let mut labels: Vec<u32> = grid
        .flatten(markers)?
        .into_iter()
        .zip(&mask)
        .map(|(l, &m)| if m { l } else { 0 })
        .collect();

    let mut heap = BinaryHeap::new();
    let mut age = 0u64;
    for (index, &l) in labels.iter().enumerate() {
        if l > 0 {
            heap.push(Entry {
                cost: cost[index],
                age,
                index,
            });
            age += 1;
        }
    }

    while let Some(Entry { index, .. }) = heap.pop() {
        let current = labels[index];
        grid.for_each_neighbor(index, &offsets, |n| {
            if mask[n] && labels[n] == 0 {
                labels[n] = current;
                heap.push(Entry {
                    cost: cost[n],
                    age,
                    index: n,
                });
                age += 1;
            }
        });
    }

    Ok(grid.reshape(labels)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::IxDyn;

    #[test]
    fn test_two_basins() {
        // Cost valleys at columns 1 and 7 with a ridge at column 4.
        let cost = DistanceImage::from_shape_fn(IxDyn(&[3, 9]), |ix| {
            -(3.0 - ((ix[1] as f64 - 4.0).abs() - 3.0).abs())
        });
        let mut markers = LabelImage::zeros(IxDyn(&[3, 9]));
        markers[IxDyn(&[1, 1])] = 1;
        markers[IxDyn(&[1, 7])] = 2;
        let mask = BinaryImage::from_elem(IxDyn(&[3, 9]), true);

        let labels = watershed(&cost, &markers, &mask).unwrap();
        assert!(labels.iter().all(|&l| l > 0));
        assert_eq!(labels[IxDyn(&[0, 0])], 1);
        assert_eq!(labels[IxDyn(&[2, 3])], 1);
        assert_eq!(labels[IxDyn(&[0, 5])], 2);
        assert_eq!(labels[IxDyn(&[2, 8])], 2);
    }

    #[test]
    fn test_mask_blocks_flood() {
        let cost = DistanceImage::zeros(IxDyn(&[3, 5]));
        let mut markers = LabelImage::zeros(IxDyn(&[3, 5]));
        markers[IxDyn(&[0, 0])] = 4;
        let mut mask = BinaryImage::from_elem(IxDyn(&[3, 5]), true);
        for row in 0..3 {
            mask[IxDyn(&[row, 2])] = false;
        }
        let labels = watershed(&cost, &markers, &mask).unwrap();
        assert_eq!(labels[IxDyn(&[2, 1])], 4);
        assert_eq!(labels[IxDyn(&[1, 2])], 0);
        assert_eq!(labels[IxDyn(&[1, 4])], 0);
    }

    #[test]
    fn test_shape_mismatch() {
        let cost = DistanceImage::zeros(IxDyn(&[3, 5]));
        let markers = LabelImage::zeros(IxDyn(&[3, 4]));
        let mask = BinaryImage::from_elem(IxDyn(&[3, 5]), true);
        assert!(watershed(&cost, &markers, &mask).is_err());
    }
}

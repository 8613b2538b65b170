//! Distance-map peak detection and pruning
//!
//! Peaks of the distance map seed the watershed. Raw maxima include saddle
//! points along ridges and clusters of near-duplicate maxima inside one
//! cavity; [`trim_saddle_points`] and [`trim_nearby_peaks`] remove both.

use crate::conncomp::{center_of_mass, find_objects, label, region_voxels};
use crate::error::RegionResult;
use crate::filter::{Footprint, binary_dilation, maximum_filter};
use porenet_core::{BinaryImage, Connectivity, DistanceImage, Grid, check_same_shape};
use tracing::{debug, warn};

/// Extra voxels around a peak's bounding box searched during saddle trimming.
const SADDLE_SEARCH_PAD: usize = 10;

/// Find local maxima of a distance map.
///
/// A void voxel (`dt > 0`) is a peak if it equals the maximum of
/// `dt + 2·solid` over a disk or ball of radius `r_max` around it. The solid
/// term keeps voxels touching solid from winning against the wall.
pub fn find_peaks(dt: &DistanceImage, r_max: usize) -> RegionResult<BinaryImage> {
    let boosted = dt.mapv(|d| if d > 0.0 { d } else { d + 2.0 });
    let mx = maximum_filter(&boosted, &Footprint::ball(r_max, dt.ndim()))?;
    let mut peaks = BinaryImage::from_elem(dt.raw_dim(), false);
    ndarray::Zip::from(&mut peaks)
        .and(dt)
        .and(&mx)
        .for_each(|p, &d, &m| *p = d > 0.0 && d == m);
    debug!(count = peaks.iter().filter(|&&p| p).count(), r_max, "found peaks");
    Ok(peaks)
}

/// Remove peaks that sit on saddles or plateaus rather than true maxima.
///
/// Each face-connected peak is grown one voxel at a time (full
/// connectivity). After each step the voxels of the grown set that reach its
/// maximum distance are compared with the peak: identical means a true peak,
/// disjoint means the peak was a saddle and is removed. Peaks still
/// undecided after `max_iters` steps are kept.
pub fn trim_saddle_points(
    peaks: &BinaryImage,
    dt: &DistanceImage,
    max_iters: usize,
) -> RegionResult<BinaryImage> {
    check_same_shape(peaks, dt)?;
    let (labels, count) = label(peaks, Connectivity::Faces)?;
    let bounds = find_objects(&labels)?;

    let mut saddle = vec![false; count as usize];
    let mut capped = 0usize;
    for (slot, b) in bounds.iter().enumerate() {
        let Some(b) = b else { continue };
        let b = b.extend(SADDLE_SEARCH_PAD, dt.shape());
        let id = slot as u32 + 1;
        let peak_i = b.crop(&labels).mapv(|l| l == id);
        let dt_i = b.crop(dt);

        let mut grown = peak_i.clone();
        let mut iters = 0;
        while iters < max_iters {
            iters += 1;
            grown = binary_dilation(&grown, Connectivity::Full)?;
            let top = grown
                .iter()
                .zip(dt_i.iter())
                .filter(|&(&g, _)| g)
                .map(|(_, &d)| d)
                .fold(f64::NEG_INFINITY, f64::max);
            let mut same = true;
            let mut overlap = false;
            for ((&g, &d), &p) in grown.iter().zip(dt_i.iter()).zip(peak_i.iter()) {
                let extended = g && d > 0.0 && d == top;
                same &= extended == p;
                overlap |= extended && p;
            }
            if same {
                break;
            }
            if !overlap {
                saddle[slot] = true;
                break;
            }
        }
        if iters >= max_iters {
            capped += 1;
        }
    }
    if capped > 0 {
        warn!(capped, max_iters, "saddle trimming hit its iteration limit");
    }

    let removed = saddle.iter().filter(|&&s| s).count();
    debug!(peaks = count, removed, "trimmed saddle points");
    Ok(labels.mapv(|l| l > 0 && !saddle[l as usize - 1]))
}

/// Remove peaks that lie closer to another peak than to the solid.
///
/// Peaks are grouped with full connectivity and represented by their
/// centroid (truncated to a voxel). When a peak's nearest neighbor is closer
/// than the distance to solid at its centroid, the member of the pair with
/// the smaller distance to solid is dropped; on a tie the higher-numbered
/// peak goes.
pub fn trim_nearby_peaks(peaks: &BinaryImage, dt: &DistanceImage) -> RegionResult<BinaryImage> {
    check_same_shape(peaks, dt)?;
    let grid = Grid::of(dt)?;
    let (labels, count) = label(peaks, Connectivity::Full)?;
    let n = count as usize;
    if n < 2 {
        return Ok(peaks.clone());
    }

    let dt_flat = grid.flatten(dt)?;
    let centers: Vec<Vec<usize>> = region_voxels(&labels)
        .iter()
        .map(|voxels| {
            center_of_mass(&grid, voxels)
                .iter()
                .map(|&c| c as usize)
                .collect()
        })
        .collect();
    let to_solid: Vec<f64> = centers.iter().map(|c| dt_flat[grid.index(c)]).collect();

    let mut drop = vec![false; n];
    for p in 0..n {
        let mut nearest = None;
        let mut best = f64::INFINITY;
        for q in (0..n).filter(|&q| q != p) {
            let d = distance(&centers[p], &centers[q]);
            if d < best {
                best = d;
                nearest = Some(q);
            }
        }
        let Some(q) = nearest else { continue };
        if best < to_solid[p] {
            let loser = if to_solid[p] < to_solid[q] {
                p
            } else if to_solid[q] < to_solid[p] {
                q
            } else {
                p.max(q)
            };
            drop[loser] = true;
        }
    }

    let removed = drop.iter().filter(|&&d| d).count();
    debug!(peaks = n, removed, "trimmed nearby peaks");
    Ok(labels.mapv(|l| l > 0 && !drop[l as usize - 1]))
}

fn distance(a: &[usize], b: &[usize]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| {
            let d = x as f64 - y as f64;
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

//! SNOW partitioning of the void space
//!
//! Sub-network of an oversegmented watershed: the void phase of a binary
//! image is split into regions, one per cavity, by flooding the negated
//! distance map from its filtered peaks.
//!
//! # Steps
//!
//! 1. Exact Euclidean distance transform
//! 2. Gaussian smoothing of the distance map
//! 3. Peak detection with a disk or ball footprint
//! 4. Removal of saddle points and of peaks too close to each other
//! 5. Marker watershed on the negated distance map over the whole image,
//!    then cleared on solid voxels so every void voxel keeps a region
//! 6. Renumbering of the regions to `1..=n`

use crate::conncomp::label;
use crate::contiguous::make_contiguous;
use crate::distance::{BoundaryCondition, distance_transform};
use crate::error::{RegionError, RegionResult};
use crate::filter::gaussian_filter;
use crate::peaks::{find_peaks, trim_nearby_peaks, trim_saddle_points};
use crate::watershed::watershed;
use ndarray::Zip;
use porenet_core::{BinaryImage, Connectivity, Dimensionality, DistanceImage, LabelImage};
use tracing::debug;

/// Parameters of SNOW partitioning.
#[derive(Debug, Clone)]
pub struct PartitionOptions {
    /// Radius of the peak-detection footprint, in voxels
    pub r_max: usize,
    /// Standard deviation of the Gaussian applied to the distance map;
    /// 0 disables smoothing
    pub sigma: f64,
    /// Iteration cap of saddle-point trimming
    pub max_iters: usize,
    /// Treatment of the image exterior in the distance transform
    pub boundary: BoundaryCondition,
}

impl Default for PartitionOptions {
    fn default() -> Self {
        Self {
            r_max: 4,
            sigma: 0.4,
            max_iters: 500,
            boundary: BoundaryCondition::Background,
        }
    }
}

impl PartitionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_r_max(mut self, r_max: usize) -> Self {
        self.r_max = r_max;
        self
    }

    pub fn with_sigma(mut self, sigma: f64) -> Self {
        self.sigma = sigma;
        self
    }

    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }

    pub fn with_boundary(mut self, boundary: BoundaryCondition) -> Self {
        self.boundary = boundary;
        self
    }

    fn validate(&self) -> RegionResult<()> {
        if !self.sigma.is_finite() || self.sigma < 0.0 {
            return Err(RegionError::InvalidParameters(format!(
                "sigma must be finite and non-negative, got {}",
                self.sigma
            )));
        }
        if self.max_iters == 0 {
            return Err(RegionError::InvalidParameters(
                "max_iters must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Output of [`snow_partitioning`].
#[derive(Debug, Clone)]
pub struct Partition {
    /// The input binary image
    pub im: BinaryImage,
    /// Unsmoothed distance transform of `im`
    pub dt: DistanceImage,
    /// Labeled watershed markers
    pub peaks: LabelImage,
    /// Region labels, contiguous from 1; 0 on solid
    pub regions: LabelImage,
}

impl Partition {
    /// Number of regions.
    pub fn num_regions(&self) -> u32 {
        porenet_core::max_label(&self.regions)
    }
}

/// Partition the void space of `im` into regions.
///
/// # Errors
///
/// Returns [`RegionError::EmptyImage`] for an image with no voxels, an
/// unsupported-dimension error for anything but 2-D or 3-D, and
/// [`RegionError::InvalidParameters`] for bad options.
pub fn snow_partitioning(im: &BinaryImage, options: &PartitionOptions) -> RegionResult<Partition> {
    options.validate()?;
    Dimensionality::of(im)?;
    if im.is_empty() {
        return Err(RegionError::EmptyImage);
    }

    let dt = distance_transform(im, options.boundary)?;
    let smoothed = gaussian_filter(&dt, options.sigma)?;

    let peaks = find_peaks(&smoothed, options.r_max)?;
    let peaks = trim_saddle_points(&peaks, &smoothed, options.max_iters)?;
    let peaks = trim_nearby_peaks(&peaks, &smoothed)?;
    let (markers, count) = label(&peaks, Connectivity::Faces)?;
    debug!(markers = count, "labeled watershed markers");

    // Flood unmasked: void pockets without a marker of their own are
    // reached through solid and join the neighboring basin.
    let cost = smoothed.mapv(|d| -d);
    let support = BinaryImage::from_elem(im.raw_dim(), true);
    let mut flooded = watershed(&cost, &markers, &support)?;
    Zip::from(&mut flooded).and(im).for_each(|l, &void| {
        if !void {
            *l = 0;
        }
    });
    let regions = make_contiguous(&flooded);
    debug!(
        regions = porenet_core::max_label(&regions),
        shape = ?im.shape(),
        "snow partitioning complete"
    );

    Ok(Partition {
        im: im.clone(),
        dt,
        peaks: markers,
        regions,
    })
}

/// Region source running [`snow_partitioning`] with fixed options.
#[derive(Debug, Clone, Default)]
pub struct SnowPartitioner {
    options: PartitionOptions,
}

impl SnowPartitioner {
    pub fn new(options: PartitionOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PartitionOptions {
        &self.options
    }

    pub fn partition(&self, im: &BinaryImage) -> RegionResult<Partition> {
        snow_partitioning(im, &self.options)
    }
}

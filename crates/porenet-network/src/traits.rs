//! Pipeline stage interfaces
//!
//! The extraction pipeline only relies on these traits, so each stage can be
//! replaced without touching the classifier and face labeler.

use crate::error::NetworkResult;
use crate::extract::{RegionGraphExtractor, regions_to_network};
use porenet_core::{BinaryImage, DistanceImage, FaceSet, LabelImage, Network};
use porenet_region::{CollarInjector, Partition, SnowPartitioner, add_boundary_regions, snow_partitioning};

/// Splits the void space of a binary image into labeled regions.
pub trait RegionSource {
    /// Partition `im`; region labels must be contiguous from 1.
    fn partition(&self, im: &BinaryImage) -> NetworkResult<Partition>;
}

/// Adds boundary regions in collars around a region image.
pub trait BoundaryInjector {
    /// Pad `regions` on `faces`, labeling the collars above every input
    /// label.
    fn inject(&self, regions: &LabelImage, faces: &FaceSet) -> NetworkResult<LabelImage>;
}

/// Converts a region image into a raw network.
pub trait GraphExtractor {
    /// Build a network with at least `pore.coords`, `pore.label` and
    /// `throat.conns`.
    fn extract(
        &self,
        regions: &LabelImage,
        dt: &DistanceImage,
        voxel_size: f64,
    ) -> NetworkResult<Network>;
}

impl RegionSource for SnowPartitioner {
    fn partition(&self, im: &BinaryImage) -> NetworkResult<Partition> {
        Ok(snow_partitioning(im, self.options())?)
    }
}

impl BoundaryInjector for CollarInjector {
    fn inject(&self, regions: &LabelImage, faces: &FaceSet) -> NetworkResult<LabelImage> {
        Ok(add_boundary_regions(regions, faces)?)
    }
}

impl GraphExtractor for RegionGraphExtractor {
    fn extract(
        &self,
        regions: &LabelImage,
        dt: &DistanceImage,
        voxel_size: f64,
    ) -> NetworkResult<Network> {
        regions_to_network(regions, dt, voxel_size)
    }
}

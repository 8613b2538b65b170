//! porenet-region - Region processing for porenet
//!
//! This crate splits the void space of a binary image into regions and
//! prepares region images for network extraction:
//!
//! - **Distance transform** - Exact Euclidean distance to the solid phase
//! - **Filters** - Gaussian smoothing, maximum filter, binary dilation
//! - **Connected component analysis** - Labeling, bounding boxes, centroids
//! - **Peak detection** - Distance-map maxima with saddle and proximity trimming
//! - **Watershed segmentation** - Marker-based priority flood
//! - **SNOW partitioning** - The full region source built from the above
//! - **Boundary regions** - Labeled collars on requested faces
//! - **Generators** - Seeded synthetic porous media
//!
//! # Examples
//!
//! ## Partitioning a void image
//!
//! ```
//! use porenet_region::{PartitionOptions, snow_partitioning};
//! use porenet_core::BinaryImage;
//! use porenet_core::ndarray::IxDyn;
//!
//! let im = BinaryImage::from_elem(IxDyn(&[12, 12]), true);
//! let part = snow_partitioning(&im, &PartitionOptions::default()).unwrap();
//! assert!(part.num_regions() >= 1);
//! assert_eq!(part.regions.shape(), &[12, 12]);
//! ```
//!
//! ## Adding boundary regions
//!
//! ```
//! use porenet_region::add_boundary_regions;
//! use porenet_core::{FaceSet, LabelImage};
//! use porenet_core::ndarray::IxDyn;
//!
//! let regions = LabelImage::from_elem(IxDyn(&[4, 4]), 1);
//! let faces = FaceSet::parse(["top"]).unwrap();
//! let padded = add_boundary_regions(&regions, &faces).unwrap();
//! assert_eq!(padded.shape(), &[7, 4]);
//! assert_eq!(padded[IxDyn(&[0, 0])], 2);
//! ```

pub mod boundary;
pub mod conncomp;
pub mod contiguous;
pub mod distance;
pub mod error;
pub mod filter;
pub mod generators;
pub mod partition;
pub mod peaks;
pub mod watershed;

// Re-export core types
pub use porenet_core;

// Re-export error types
pub use error::{RegionError, RegionResult};

// Re-export conncomp types and functions
pub use conncomp::{Bounds, center_of_mass, find_objects, label, region_voxels};

// Re-export distance and filter functions
pub use distance::{BoundaryCondition, distance_transform};
pub use filter::{Footprint, GAUSSIAN_TRUNCATE, binary_dilation, gaussian_filter, maximum_filter};

// Re-export peak and watershed functions
pub use peaks::{find_peaks, trim_nearby_peaks, trim_saddle_points};
pub use watershed::watershed;

// Re-export partitioning types and functions
pub use partition::{Partition, PartitionOptions, SnowPartitioner, snow_partitioning};

// Re-export boundary and relabeling functions
pub use boundary::{CollarInjector, add_boundary_regions};
pub use contiguous::make_contiguous;

// Re-export generators
pub use generators::{SphereOptions, random_spheres};

//! Porenet Core - Basic data structures for pore network extraction
//!
//! This crate provides the fundamental data structures used throughout
//! the porenet workspace:
//!
//! - [`BinaryImage`] / [`LabelImage`] / [`DistanceImage`] - N-D images
//! - [`Dimensionality`] - Checked 2-D / 3-D image dimensionality
//! - [`Face`] / [`FaceSet`] / [`FaceSelection`] - Domain faces and the
//!   padding and labeling axis tables
//! - [`PadWidths`] / [`pad_edge`] / [`pad_constant`] / [`pad_boundary`] - Image
//!   padding and boundary collars
//! - [`Grid`] / [`Connectivity`] - Flat-index voxel arithmetic
//! - [`Network`] / [`Property`] - The `"<entity>.<attribute>"` property map
//!
//! # Example
//!
//! ```
//! use porenet_core::{Dimensionality, FaceSet, PadWidths, BinaryImage, pad_edge, COLLAR_WIDTH};
//! use porenet_core::ndarray::IxDyn;
//!
//! let im = BinaryImage::from_elem(IxDyn(&[5, 5]), true);
//! let faces = FaceSet::parse(["left", "right"]).unwrap();
//! let widths = PadWidths::from_faces(&faces, Dimensionality::Two, COLLAR_WIDTH);
//! let padded = pad_edge(&im, &widths).unwrap();
//! assert_eq!(padded.shape(), &[5, 11]);
//! ```

pub mod border;
pub mod error;
pub mod face;
pub mod grid;
pub mod image;
pub mod network;

pub use border::{COLLAR_WIDTH, PadWidths, pad_boundary, pad_constant, pad_edge};
pub use error::{Error, Result};
pub use face::{
    Face, FaceSelection, FaceSet, LABEL_AXES_2D, LABEL_AXES_3D, PAD_AXES_2D, PAD_AXES_3D,
};
pub use grid::{Connectivity, Grid, MAX_NDIM, Offset};
pub use image::{
    BinaryImage, DistanceImage, Dimensionality, LabelImage, check_same_shape, max_label,
};
pub use network::{Entity, Network, Property, keys};

// Re-export the array crate so callers build images with matching versions
pub use ndarray;

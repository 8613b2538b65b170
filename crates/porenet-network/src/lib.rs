//! porenet-network - Pore network assembly for porenet
//!
//! This crate turns region images into classified pore networks:
//!
//! - **Graph extraction** - Pores, throats and their geometry from a region image
//! - **Classification** - Boundary and phase flags from a [`BoundaryThreshold`]
//! - **Face labeling** - Pores at the extreme of each face's axis
//! - **SNOW pipeline** - [`snow`] and the generic [`SnowExtractor`]
//!
//! # Examples
//!
//! ## Classifying a network
//!
//! ```
//! use porenet_network::{BoundaryThreshold, classify_network};
//! use porenet_core::{Network, keys};
//! use porenet_core::ndarray::array;
//!
//! let mut net = Network::new();
//! net.insert(keys::PORE_LABEL, array![1u32, 2, 3]);
//! net.insert(keys::THROAT_CONNS, array![[0usize, 1], [1, 2]]);
//! classify_network(&mut net, BoundaryThreshold::new(2)).unwrap();
//!
//! let boundary = net.flags(keys::THROAT_BOUNDARY).unwrap();
//! assert_eq!(boundary.to_vec(), vec![false, true]);
//! ```
//!
//! ## Extracting a network
//!
//! ```
//! use porenet_network::{SnowOptions, snow};
//! use porenet_core::{BinaryImage, keys};
//! use porenet_core::ndarray::IxDyn;
//!
//! let im = BinaryImage::from_elem(IxDyn(&[10, 10, 10]), true);
//! let net = snow(&im, &SnowOptions::default()).unwrap();
//! assert!(net.num_pores() > 0);
//! assert!(net.contains_key(keys::PORE_PHASE));
//! ```

pub mod classify;
pub mod error;
pub mod extract;
pub mod faces;
pub mod snow;
pub mod traits;

// Re-export lower crates
pub use porenet_core;
pub use porenet_region;

// Re-export error types
pub use error::{NetworkError, NetworkResult};

// Re-export classification and face labeling
pub use classify::{BoundaryThreshold, Classification, classify, classify_network};
pub use faces::{face_membership, label_faces};

// Re-export extraction
pub use extract::{RegionGraphExtractor, regions_to_network};
pub use traits::{BoundaryInjector, GraphExtractor, RegionSource};

// Re-export the pipeline
pub use snow::{SnowExtractor, SnowOptions, SnowOutput, snow};

//! Porenet - Pore network extraction for Rust
//!
//! Converts a segmented image of a porous medium (void `true`, solid
//! `false`) into a pore network: pores with sizes and positions, throats
//! joining adjacent pores, and flags marking boundary pores and the faces
//! they sit on.
//!
//! # Overview
//!
//! - Region partitioning of the void space (SNOW: distance transform,
//!   peak filtering, marker watershed)
//! - Boundary regions on chosen faces of the image
//! - Pore and throat geometry from labeled regions
//! - Boundary/phase classification and face labeling
//!
//! Networks are maps from `"<entity>.<attribute>"` keys to arrays, such as
//! `pore.coords`, `throat.conns` or `pore.left`.
//!
//! # Example
//!
//! ```
//! use porenet::{BinaryImage, FaceSet, SnowOptions, keys, snow};
//! use porenet::ndarray::IxDyn;
//!
//! let im = BinaryImage::from_elem(IxDyn(&[10, 10, 10]), true);
//! let faces = FaceSet::parse(["top", "bottom"]).unwrap();
//! let net = snow(&im, &SnowOptions::new().with_faces(faces)).unwrap();
//!
//! assert!(net.flags("pore.top").unwrap().iter().any(|&f| f));
//! assert!(net.flags(keys::PORE_BOUNDARY).unwrap().iter().any(|&b| b));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use porenet_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use porenet_network as network;
pub use porenet_region as region;

// The extraction entry point
pub use porenet_network::{SnowOptions, snow};

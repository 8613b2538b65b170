//! Synthetic porous media
//!
//! Seeded generators of binary test images.

use crate::error::{RegionError, RegionResult};
use ndarray::IxDyn;
use porenet_core::{BinaryImage, Dimensionality};
use rand::SeedableRng;
use rand::distr::{Distribution, Uniform};
use rand::rngs::StdRng;
use tracing::debug;

/// Parameters of [`random_spheres`].
#[derive(Debug, Clone)]
pub struct SphereOptions {
    /// Image shape (2 or 3 axes)
    pub shape: Vec<usize>,
    /// Sphere (disk in 2-D) radius in voxels
    pub radius: usize,
    /// Number of spheres to place
    pub count: usize,
    /// RNG seed; equal seeds give equal images
    pub seed: u64,
}

impl Default for SphereOptions {
    fn default() -> Self {
        Self {
            shape: vec![40, 40, 40],
            radius: 4,
            count: 30,
            seed: 0,
        }
    }
}

impl SphereOptions {
    pub fn new(shape: &[usize]) -> Self {
        Self {
            shape: shape.to_vec(),
            ..Self::default()
        }
    }

    pub fn with_radius(mut self, radius: usize) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Void image with solid spheres at uniformly random centers.
///
/// Spheres may overlap each other and the image border.
///
/// # Errors
///
/// Fails for shapes that are not 2-D or 3-D, and with
/// [`RegionError::InvalidParameters`] for an empty axis.
pub fn random_spheres(options: &SphereOptions) -> RegionResult<BinaryImage> {
    let dim = Dimensionality::from_ndim(options.shape.len())?;
    if options.shape.contains(&0) {
        return Err(RegionError::InvalidParameters(format!(
            "sphere image shape has an empty axis: {:?}",
            options.shape
        )));
    }

    let mut rng = StdRng::seed_from_u64(options.seed);
    let axes = options
        .shape
        .iter()
        .map(|&n| Uniform::new(0, n))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| RegionError::InvalidParameters(e.to_string()))?;

    let mut im = BinaryImage::from_elem(IxDyn(&options.shape), true);
    let r = options.radius as isize;
    for _ in 0..options.count {
        let center: Vec<isize> = axes.iter().map(|u| u.sample(&mut rng) as isize).collect();
        for (ix, voxel) in im.indexed_iter_mut() {
            let d2: isize = (0..dim.ndim())
                .map(|a| {
                    let d = ix[a] as isize - center[a];
                    d * d
                })
                .sum();
            if d2 <= r * r {
                *voxel = false;
            }
        }
    }

    let porosity = im.iter().filter(|&&v| v).count() as f64 / im.len() as f64;
    debug!(count = options.count, radius = options.radius, porosity, "generated spheres");
    Ok(im)
}

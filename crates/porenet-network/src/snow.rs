//! SNOW network extraction pipeline
//!
//! Runs the stages in order:
//!
//! 1. Partition the void space into regions
//! 2. Fix the [`BoundaryThreshold`] from the body regions
//! 3. Inject boundary regions on the requested faces
//! 4. Pad the distance map and binary image to match
//! 5. Mask the regions with the binary image and renumber them
//! 6. Extract the raw network
//! 7. Classify pores and throats, then flag pores on each face
//!
//! Steps 3 and 4, and the face flags, are skipped when no faces are
//! selected.

use crate::classify::{BoundaryThreshold, classify_network};
use crate::error::{NetworkError, NetworkResult};
use crate::extract::RegionGraphExtractor;
use crate::faces::label_faces;
use crate::traits::{BoundaryInjector, GraphExtractor, RegionSource};
use ndarray::Zip;
use porenet_core::{
    BinaryImage, Dimensionality, DistanceImage, FaceSelection, LabelImage, Network,
    check_same_shape, pad_boundary,
};
use porenet_region::{CollarInjector, PartitionOptions, SnowPartitioner, make_contiguous};
use tracing::{debug, info};

/// Parameters of a SNOW extraction.
#[derive(Debug, Clone)]
pub struct SnowOptions {
    /// Edge length of one voxel; scales every length, area and volume
    pub voxel_size: f64,
    /// Faces receiving boundary pores
    pub faces: FaceSelection,
    /// Partitioning parameters used by [`snow`]
    pub partition: PartitionOptions,
}

impl Default for SnowOptions {
    fn default() -> Self {
        Self {
            voxel_size: 1.0,
            faces: FaceSelection::AllFaces,
            partition: PartitionOptions::default(),
        }
    }
}

impl SnowOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_voxel_size(mut self, voxel_size: f64) -> Self {
        self.voxel_size = voxel_size;
        self
    }

    pub fn with_faces(mut self, faces: impl Into<FaceSelection>) -> Self {
        self.faces = faces.into();
        self
    }

    /// Disable boundary pores and face flags.
    pub fn without_faces(mut self) -> Self {
        self.faces = FaceSelection::NoFaces;
        self
    }

    pub fn with_partition(mut self, partition: PartitionOptions) -> Self {
        self.partition = partition;
        self
    }

    fn validate(&self) -> NetworkResult<()> {
        if !self.voxel_size.is_finite() || self.voxel_size <= 0.0 {
            return Err(NetworkError::InvalidParameters(format!(
                "voxel size must be positive and finite, got {}",
                self.voxel_size
            )));
        }
        Ok(())
    }
}

/// Network together with the images it was extracted from.
#[derive(Debug, Clone)]
pub struct SnowOutput {
    /// The classified, face-labeled network
    pub network: Network,
    /// Binary image, padded when faces were selected
    pub im: BinaryImage,
    /// Distance map, padded when faces were selected
    pub dt: DistanceImage,
    /// Contiguous region labels the network was extracted from
    pub regions: LabelImage,
    /// Largest body label, separating internal from boundary pores
    pub threshold: BoundaryThreshold,
}

/// SNOW extraction with replaceable stages.
#[derive(Debug, Clone)]
pub struct SnowExtractor<S = SnowPartitioner, I = CollarInjector, G = RegionGraphExtractor> {
    source: S,
    injector: I,
    extractor: G,
}

impl SnowExtractor {
    /// Extractor with the default stages and the given partitioning options.
    pub fn new(partition: PartitionOptions) -> Self {
        Self {
            source: SnowPartitioner::new(partition),
            injector: CollarInjector::new(),
            extractor: RegionGraphExtractor::new(),
        }
    }
}

impl Default for SnowExtractor {
    fn default() -> Self {
        Self::new(PartitionOptions::default())
    }
}

impl<S, I, G> SnowExtractor<S, I, G>
where
    S: RegionSource,
    I: BoundaryInjector,
    G: GraphExtractor,
{
    pub fn with_components(source: S, injector: I, extractor: G) -> Self {
        Self {
            source,
            injector,
            extractor,
        }
    }

    /// Extract the network of `im`.
    ///
    /// `options.partition` is not used here; the region source carries its
    /// own parameters.
    pub fn extract(&self, im: &BinaryImage, options: &SnowOptions) -> NetworkResult<Network> {
        Ok(self.extract_full(im, options)?.network)
    }

    /// Extract the network of `im`, keeping the intermediate images.
    ///
    /// # Errors
    ///
    /// Fails before any work for an invalid voxel size, an image that is not
    /// 2-D or 3-D, or a face the image has no axis for. Stage errors are
    /// propagated.
    pub fn extract_full(&self, im: &BinaryImage, options: &SnowOptions) -> NetworkResult<SnowOutput> {
        options.validate()?;
        let dim = Dimensionality::of(im)?;
        let faces = options.faces.resolve(dim)?;

        let partition = self.source.partition(im)?;
        check_same_shape(&partition.im, &partition.regions)?;
        let body = make_contiguous(&partition.regions);
        let threshold = BoundaryThreshold::capture(&body);
        debug!(body_regions = threshold.value(), "partitioned void space");

        let regions = match &faces {
            Some(set) => self.injector.inject(&body, set)?,
            None => body,
        };
        let (dt, padded) = pad_boundary(&partition.dt, &partition.im, faces.as_ref())?;
        check_same_shape(&padded, &regions)?;

        let mut regions = regions;
        Zip::from(&mut regions)
            .and(&padded)
            .for_each(|label, &void| {
                if !void {
                    *label = 0;
                }
            });
        let regions = make_contiguous(&regions);

        let mut network = self.extractor.extract(&regions, &dt, options.voxel_size)?;
        classify_network(&mut network, threshold)?;
        if let Some(set) = &faces {
            label_faces(&mut network, set, dim)?;
        }

        info!(
            pores = network.num_pores(),
            throats = network.num_throats(),
            boundary_faces = faces.as_ref().map_or(0, |f| f.len()),
            "extracted pore network"
        );
        Ok(SnowOutput {
            network,
            im: padded,
            dt,
            regions,
            threshold,
        })
    }
}

/// Extract a pore network from a binary image with the SNOW algorithm.
///
/// `true` voxels are void. The returned network holds the extractor's pore
/// and throat geometry, `pore.boundary`, `pore.phase`, `throat.boundary`,
/// `throat.phase`, and one `pore.<face>` flag per selected face.
///
/// # Arguments
///
/// * `im` - Binary image, 2-D or 3-D
/// * `options` - Voxel size, face selection and partitioning parameters
///
/// # Returns
///
/// The classified network. Use [`SnowExtractor::extract_full`] to keep the
/// padded images and region labels as well.
///
/// # Example
///
/// ```
/// use porenet_network::{SnowOptions, snow};
/// use porenet_core::{BinaryImage, FaceSet};
/// use porenet_core::ndarray::IxDyn;
///
/// let im = BinaryImage::from_elem(IxDyn(&[8, 8]), true);
/// let faces = FaceSet::parse(["left", "right"]).unwrap();
/// let net = snow(&im, &SnowOptions::new().with_faces(faces)).unwrap();
/// assert!(net.contains_key("pore.left"));
/// assert!(!net.contains_key("pore.top"));
/// ```
pub fn snow(im: &BinaryImage, options: &SnowOptions) -> NetworkResult<Network> {
    SnowExtractor::new(options.partition.clone()).extract(im, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use porenet_core::{Face, FaceSet, keys};
    use ndarray::IxDyn;

    #[test]
    fn test_options() {
        let opts = SnowOptions::default();
        assert_eq!(opts.voxel_size, 1.0);
        assert_eq!(opts.faces, FaceSelection::AllFaces);
        assert_eq!(SnowOptions::new().without_faces().faces, FaceSelection::NoFaces);
        assert!(SnowOptions::new().with_voxel_size(-1.0).validate().is_err());
        let opts = SnowOptions::new().with_partition(PartitionOptions::new().with_r_max(2));
        assert_eq!(opts.partition.r_max, 2);
    }

    #[test]
    fn test_with_components() {
        let im = BinaryImage::from_elem(IxDyn(&[8, 8]), true);
        let partition = PartitionOptions::new().with_r_max(2).with_sigma(0.0);
        let custom = SnowExtractor::with_components(
            SnowPartitioner::new(partition.clone()),
            CollarInjector::new(),
            RegionGraphExtractor::new(),
        );
        let options = SnowOptions::new().with_partition(partition.clone());
        let net = custom.extract(&im, &options).unwrap();
        assert_eq!(net, snow(&im, &options).unwrap());
        assert_eq!(net, SnowExtractor::new(partition).extract(&im, &options).unwrap());
    }

    #[test]
    fn test_full_output_shapes() {
        let im = BinaryImage::from_elem(IxDyn(&[6, 6]), true);
        let faces = FaceSet::new().with(Face::Top);
        let out = SnowExtractor::default()
            .extract_full(&im, &SnowOptions::new().with_faces(faces))
            .unwrap();
        assert_eq!(out.im.shape(), &[9, 6]);
        assert_eq!(out.dt.shape(), &[9, 6]);
        assert_eq!(out.regions.shape(), &[9, 6]);
        assert!(out.network.num_pores() > out.threshold.value() as usize);
        out.network.validate().unwrap();
        assert!(out.network.contains_key(&keys::face(Face::Top)));
    }

    #[test]
    fn test_no_faces() {
        let im = BinaryImage::from_elem(IxDyn(&[6, 6]), true);
        let out = SnowExtractor::default()
            .extract_full(&im, &SnowOptions::new().without_faces())
            .unwrap();
        assert_eq!(out.regions.shape(), &[6, 6]);
        let boundary = out.network.flags(keys::PORE_BOUNDARY).unwrap();
        assert!(boundary.iter().all(|&b| !b));
    }

    #[test]
    fn test_rejects_before_work() {
        let im = BinaryImage::from_elem(IxDyn(&[6, 6]), true);
        let faces = FaceSet::new().with(Face::Front);
        let err = snow(&im, &SnowOptions::new().with_faces(faces)).unwrap_err();
        assert!(matches!(
            err,
            NetworkError::Core(porenet_core::Error::FaceNotApplicable { .. })
        ));
    }
}

//! Region graph extraction
//!
//! Converts a labeled region image into a raw pore network: one pore per
//! label and one throat per pair of face-adjacent regions, with sizes
//! measured from the distance map.
//!
//! # Pore properties
//!
//! | key | value |
//! |---|---|
//! | `pore.coords`, `pore.centroid` | center of mass |
//! | `pore.volume` | voxel count × voxel volume |
//! | `pore.inscribed_diameter`, `pore.diameter` | twice the largest distance inside the isolated region |
//! | `pore.extended_diameter` | twice the largest distance of the full map over the region |
//! | `pore.equivalent_diameter` | diameter of the sphere (disk in 2-D) of equal volume |
//! | `pore.surface_area` | voxels on the region's surface × voxel face area |
//!
//! # Throat properties
//!
//! A throat's contact voxels are the voxels of the higher-numbered region
//! sharing a face with the lower-numbered one.
//!
//! | key | value |
//! |---|---|
//! | `throat.inscribed_diameter`, `throat.diameter` | twice the largest contact distance |
//! | `throat.area` | contact voxel count × voxel face area |
//! | `throat.perimeter` | contact voxels with distance below 2 × voxel size |
//! | `throat.equivalent_diameter` | square root of the area |
//! | `throat.centroid` | first contact voxel with the largest distance |
//! | `throat.total_length` | pore center to throat to pore center |
//! | `throat.length` | total length minus both pore radii |
//! | `throat.direct_length` | distance between pore centers |

use crate::error::{NetworkError, NetworkResult};
use ndarray::{Array1, Array2};
use porenet_core::{
    Connectivity, Dimensionality, DistanceImage, Grid, LabelImage, Network, check_same_shape, keys,
};
use porenet_region::{BoundaryCondition, center_of_mass, distance_transform, find_objects, region_voxels};
use std::collections::{BTreeMap, BTreeSet};
use std::f64::consts::PI;
use tracing::debug;

/// Measurements of one throat, in voxel units.
struct Throat {
    conn: [usize; 2],
    diameter: f64,
    area: f64,
    perimeter: f64,
    centroid: Vec<f64>,
}

/// Extract the raw network of a contiguous region image.
///
/// Pore `i` is region `i + 1`. Labels missing from the image yield pores
/// with zero volume and no throats. Throats are stored as `(low, high)`
/// pore pairs in ascending order.
///
/// # Errors
///
/// Returns [`NetworkError::InvalidParameters`] for a voxel size that is not
/// a positive finite number, and core errors for mismatched shapes or
/// unsupported dimensionality.
pub fn regions_to_network(
    regions: &LabelImage,
    dt: &DistanceImage,
    voxel_size: f64,
) -> NetworkResult<Network> {
    if !voxel_size.is_finite() || voxel_size <= 0.0 {
        return Err(NetworkError::InvalidParameters(format!(
            "voxel size must be positive and finite, got {voxel_size}"
        )));
    }
    let dim = Dimensionality::of(regions)?;
    check_same_shape(regions, dt)?;
    let ndim = dim.ndim();
    let grid = Grid::of(regions)?;
    let labels = grid.flatten(regions)?;
    let dist = grid.flatten(dt)?;
    let offsets = Connectivity::Faces.offsets(ndim);

    let voxels = region_voxels(regions);
    let bounds = find_objects(regions)?;
    let num_pores = voxels.len();

    let mut coords = vec![0.0; num_pores * ndim];
    let mut volume = vec![0.0; num_pores];
    let mut dia_local = vec![0.0; num_pores];
    let mut dia_global = vec![0.0; num_pores];
    let mut surface = vec![0.0; num_pores];
    let mut throats = Vec::new();

    for (pore, members) in voxels.iter().enumerate() {
        let Some(b) = bounds[pore] else { continue };
        let id = pore as u32 + 1;

        coords[pore * ndim..(pore + 1) * ndim].copy_from_slice(&center_of_mass(&grid, members));
        volume[pore] = members.len() as f64;

        let isolated = b.crop(regions).mapv(|l| l == id);
        let pore_dt = distance_transform(&isolated, BoundaryCondition::Background)?;
        dia_local[pore] = 2.0 * pore_dt.iter().copied().fold(0.0, f64::max);
        surface[pore] = pore_dt.iter().filter(|&&d| d == 1.0).count() as f64;
        dia_global[pore] = 2.0 * members.iter().map(|&v| dist[v]).fold(0.0, f64::max);

        let mut contacts: BTreeMap<u32, BTreeSet<usize>> = BTreeMap::new();
        for &v in members {
            grid.for_each_neighbor(v, &offsets, |n| {
                if labels[n] > id {
                    contacts.entry(labels[n]).or_default().insert(n);
                }
            });
        }
        for (neighbor, contact) in contacts {
            throats.push(measure_throat(pore, neighbor as usize - 1, &contact, &dist, &grid));
        }
    }

    let num_throats = throats.len();
    debug!(pores = num_pores, throats = num_throats, "extracted region graph");

    let vs = voxel_size;
    let face_area = vs.powi(ndim as i32 - 1);
    let coords = Array2::from_shape_vec((num_pores, ndim), coords)
        .map_err(|e| NetworkError::InvalidParameters(e.to_string()))?;
    let volume = Array1::from(volume) * vs.powi(ndim as i32);
    let equivalent = volume.mapv(|v| match dim {
        Dimensionality::Three => 2.0 * (3.0 / 4.0 * v / PI).cbrt(),
        Dimensionality::Two => 2.0 * (v / PI).sqrt(),
    });

    let mut conns = Array2::<usize>::zeros((num_throats, 2));
    let mut t_centroid = Array2::<f64>::zeros((num_throats, ndim));
    let mut total_length = Array1::<f64>::zeros(num_throats);
    let mut length = Array1::<f64>::zeros(num_throats);
    let mut direct_length = Array1::<f64>::zeros(num_throats);
    for (t, throat) in throats.iter().enumerate() {
        let [p1, p2] = throat.conn;
        conns[[t, 0]] = p1;
        conns[[t, 1]] = p2;
        for (a, &c) in throat.centroid.iter().enumerate() {
            t_centroid[[t, a]] = c * vs;
        }
        let c1 = coords.row(p1);
        let c2 = coords.row(p2);
        let pt1 = euclidean(c1.iter(), throat.centroid.iter()) * vs;
        let pt2 = euclidean(c2.iter(), throat.centroid.iter()) * vs;
        total_length[t] = pt1 + pt2;
        length[t] = (pt1 - dia_local[p1] / 2.0 * vs) + (pt2 - dia_local[p2] / 2.0 * vs);
        direct_length[t] = euclidean(c1.iter(), c2.iter()) * vs;
    }
    let t_diameter: Array1<f64> = throats.iter().map(|t| t.diameter * vs).collect();
    let t_area: Array1<f64> = throats.iter().map(|t| t.area * face_area).collect();
    let t_perimeter: Array1<f64> = throats.iter().map(|t| t.perimeter * vs).collect();

    let mut net = Network::new();
    net.insert(keys::PORE_ALL, Array1::from_elem(num_pores, true));
    net.insert(keys::PORE_LABEL, (1..=num_pores as u32).collect::<Array1<u32>>());
    net.insert(keys::PORE_COORDS, coords.mapv(|c| c * vs));
    net.insert(keys::PORE_CENTROID, coords.mapv(|c| c * vs));
    net.insert(keys::PORE_VOLUME, volume);
    net.insert(keys::PORE_DIAMETER, Array1::from(dia_local.clone()) * vs);
    net.insert(keys::PORE_INSCRIBED_DIAMETER, Array1::from(dia_local) * vs);
    net.insert(keys::PORE_EQUIVALENT_DIAMETER, equivalent);
    net.insert(keys::PORE_EXTENDED_DIAMETER, Array1::from(dia_global) * vs);
    net.insert(keys::PORE_SURFACE_AREA, Array1::from(surface) * face_area);

    net.insert(keys::THROAT_ALL, Array1::from_elem(num_throats, true));
    net.insert(keys::THROAT_CONNS, conns);
    net.insert(keys::THROAT_CENTROID, t_centroid);
    net.insert(keys::THROAT_VOLUME, Array1::<f64>::zeros(num_throats));
    net.insert(keys::THROAT_DIAMETER, t_diameter.clone());
    net.insert(keys::THROAT_INSCRIBED_DIAMETER, t_diameter);
    net.insert(keys::THROAT_EQUIVALENT_DIAMETER, t_area.mapv(f64::sqrt));
    net.insert(keys::THROAT_AREA, t_area);
    net.insert(keys::THROAT_PERIMETER, t_perimeter);
    net.insert(keys::THROAT_TOTAL_LENGTH, total_length);
    net.insert(keys::THROAT_LENGTH, length);
    net.insert(keys::THROAT_DIRECT_LENGTH, direct_length);
    Ok(net)
}

fn measure_throat(
    p1: usize,
    p2: usize,
    contact: &BTreeSet<usize>,
    dist: &[f64],
    grid: &Grid,
) -> Throat {
    let mut best = f64::NEG_INFINITY;
    let mut peak = 0;
    let mut perimeter = 0.0;
    for &v in contact {
        let d = dist[v];
        if d > best {
            best = d;
            peak = v;
        }
        if d < 2.0 {
            perimeter += 1.0;
        }
    }
    let centroid = grid.coords(peak)[..grid.ndim()]
        .iter()
        .map(|&c| c as f64)
        .collect();
    Throat {
        conn: [p1, p2],
        diameter: 2.0 * best,
        area: contact.len() as f64,
        perimeter,
        centroid,
    }
}

fn euclidean<'a>(a: impl Iterator<Item = &'a f64>, b: impl Iterator<Item = &'a f64>) -> f64 {
    a.zip(b).map(|(x, y)| (x - y) * (x - y)).sum::<f64>().sqrt()
}

/// Graph extractor backed by [`regions_to_network`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RegionGraphExtractor;

impl RegionGraphExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::IxDyn;

    /// Two 3x3 regions side by side in a 3x6 image.
    fn pair() -> (LabelImage, DistanceImage) {
        let regions = LabelImage::from_shape_fn(IxDyn(&[3, 6]), |ix| if ix[1] < 3 { 1 } else { 2 });
        let dt = DistanceImage::from_shape_fn(IxDyn(&[3, 6]), |ix| {
            let r = ix[0].min(2 - ix[0]) + 1;
            let c = ix[1].min(5 - ix[1]) + 1;
            r.min(c) as f64
        });
        (regions, dt)
    }

    #[test]
    fn test_two_regions() {
        let (regions, dt) = pair();
        let net = regions_to_network(&regions, &dt, 1.0).unwrap();
        net.validate().unwrap();
        assert_eq!(net.num_pores(), 2);
        assert_eq!(net.num_throats(), 1);
        assert_eq!(net.labels(keys::PORE_LABEL).unwrap().to_vec(), vec![1, 2]);

        let coords = net.vectors(keys::PORE_COORDS).unwrap();
        assert_eq!(coords.row(0).to_vec(), vec![1.0, 1.0]);
        assert_eq!(coords.row(1).to_vec(), vec![1.0, 4.0]);

        let conns = net.conns(keys::THROAT_CONNS).unwrap();
        assert_eq!(conns.row(0).to_vec(), vec![0, 1]);
        // Contact voxels are column 3
        assert_eq!(net.scalars(keys::THROAT_AREA).unwrap()[0], 3.0);
        assert_eq!(net.vectors(keys::THROAT_CENTROID).unwrap().row(0).to_vec(), vec![1.0, 3.0]);
        assert_eq!(net.scalars(keys::THROAT_DIAMETER).unwrap()[0], 4.0);
        assert_eq!(net.scalars(keys::THROAT_DIRECT_LENGTH).unwrap()[0], 3.0);
        assert_eq!(net.scalars(keys::THROAT_TOTAL_LENGTH).unwrap()[0], 3.0);

        assert_eq!(net.scalars(keys::PORE_VOLUME).unwrap()[0], 9.0);
        // Isolated 3x3 region: center distance 2
        assert_eq!(net.scalars(keys::PORE_INSCRIBED_DIAMETER).unwrap()[0], 4.0);
        assert_eq!(net.scalars(keys::PORE_SURFACE_AREA).unwrap()[0], 8.0);
        assert_eq!(net.scalars(keys::THROAT_LENGTH).unwrap()[0], -1.0);
    }

    #[test]
    fn test_voxel_size_scaling() {
        let (regions, dt) = pair();
        let net = regions_to_network(&regions, &dt, 2.0).unwrap();
        assert_eq!(net.vectors(keys::PORE_COORDS).unwrap().row(1).to_vec(), vec![2.0, 8.0]);
        assert_eq!(net.scalars(keys::PORE_VOLUME).unwrap()[0], 36.0);
        assert_eq!(net.scalars(keys::THROAT_AREA).unwrap()[0], 6.0);
        assert_eq!(net.scalars(keys::THROAT_DIRECT_LENGTH).unwrap()[0], 6.0);
        let eq = net.scalars(keys::PORE_EQUIVALENT_DIAMETER).unwrap()[0];
        assert!((eq - 2.0 * (36.0 / PI).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_missing_label_and_empty() {
        let regions = LabelImage::from_shape_vec(IxDyn(&[1, 3]), vec![1, 0, 3]).unwrap();
        let dt = DistanceImage::from_elem(IxDyn(&[1, 3]), 1.0);
        let net = regions_to_network(&regions, &dt, 1.0).unwrap();
        assert_eq!(net.num_pores(), 3);
        assert_eq!(net.num_throats(), 0);
        assert_eq!(net.scalars(keys::PORE_VOLUME).unwrap()[1], 0.0);

        let none = LabelImage::zeros(IxDyn(&[3, 3, 3]));
        let dt = DistanceImage::zeros(IxDyn(&[3, 3, 3]));
        let net = regions_to_network(&none, &dt, 1.0).unwrap();
        assert_eq!(net.num_pores(), 0);
        assert_eq!(net.vectors(keys::PORE_COORDS).unwrap().ncols(), 3);
        net.validate().unwrap();
    }

    #[test]
    fn test_rejects_bad_input() {
        let (regions, dt) = pair();
        assert!(regions_to_network(&regions, &dt, 0.0).is_err());
        assert!(regions_to_network(&regions, &dt, f64::NAN).is_err());
        let small = DistanceImage::zeros(IxDyn(&[3, 5]));
        assert!(regions_to_network(&regions, &small, 1.0).is_err());
    }
}

//! SNOW partitioning regression test
//!
//! Checks:
//! 1. Separated chambers become separate regions
//! 2. Every void voxel is assigned and no solid voxel is
//! 3. Regions are contiguous from 1 and the distance map is unsmoothed
//! 4. Random sphere packings partition into many regions, deterministically
//! 5. Dense packings leave no void voxel unlabeled
//!
//! Run with:
//! ```
//! cargo test -p porenet-region --test partition_reg
//! ```

use porenet_core::ndarray::IxDyn;
use porenet_core::{BinaryImage, max_label};
use porenet_region::{
    BoundaryCondition, PartitionOptions, SnowPartitioner, SphereOptions, distance_transform,
    random_spheres, snow_partitioning,
};
use porenet_test::{RegParams, image_from_rows, volume_from_slices};

fn check_assignment(rp: &mut RegParams, im: &BinaryImage, regions: &porenet_core::LabelImage) {
    let assigned = im
        .iter()
        .zip(regions.iter())
        .all(|(&void, &label)| void == (label > 0));
    rp.check(assigned, "void voxels labeled, solid voxels zero");

    let max = max_label(regions) as usize;
    let mut seen = vec![false; max];
    for &l in regions.iter().filter(|&&l| l > 0) {
        seen[l as usize - 1] = true;
    }
    rp.check(seen.iter().all(|&s| s), "labels contiguous from 1");
}

#[test]
fn partition_reg_chambers() {
    let mut rp = RegParams::new("partition_chambers");

    let im = image_from_rows(&[
        "###################",
        "#.......#.......###",
        "#.......#.......###",
        "#.......#.......###",
        "#...............###",
        "#.......#.......###",
        "#.......#.......###",
        "#.......#.......###",
        "###################",
    ])
    .unwrap();

    let part = snow_partitioning(&im, &PartitionOptions::default()).unwrap();
    eprintln!("  Regions: {}", part.num_regions());
    rp.compare_values(2.0, part.num_regions() as f64, 0.0);
    rp.check(
        part.regions[IxDyn(&[4, 4])] != part.regions[IxDyn(&[4, 12])],
        "chambers in different regions",
    );
    check_assignment(&mut rp, &im, &part.regions);

    let dt = distance_transform(&im, BoundaryCondition::Background).unwrap();
    rp.check(part.dt == dt, "partition keeps the unsmoothed distance map");
    rp.compare_shapes(im.shape(), part.peaks.shape());

    assert!(rp.cleanup(), "partition chambers test failed");
}

#[test]
fn partition_reg_volume() {
    let mut rp = RegParams::new("partition_volume");

    let slice = ["#####", "#...#", "#...#", "#...#", "#####"];
    let im = volume_from_slices(&[&slice, &slice, &slice, &slice, &slice]).unwrap();
    let part = SnowPartitioner::default().partition(&im).unwrap();

    rp.compare_shapes(&[5, 5, 5], part.regions.shape());
    rp.compare_values(1.0, part.num_regions() as f64, 0.0);
    check_assignment(&mut rp, &im, &part.regions);

    assert!(rp.cleanup(), "partition volume test failed");
}

#[test]
fn partition_reg_spheres() {
    let mut rp = RegParams::new("partition_spheres");

    let opts = SphereOptions::new(&[30, 30, 30])
        .with_radius(4)
        .with_count(20)
        .with_seed(42);
    let im = random_spheres(&opts).unwrap();
    let porosity = im.iter().filter(|&&v| v).count() as f64 / im.len() as f64;
    eprintln!("  Porosity: {porosity:.3}");
    rp.check(porosity > 0.2 && porosity < 1.0, "porosity in range");

    let part = snow_partitioning(&im, &PartitionOptions::default()).unwrap();
    eprintln!("  Regions: {}", part.num_regions());
    rp.check(part.num_regions() > 1, "several regions");
    check_assignment(&mut rp, &im, &part.regions);

    let again = snow_partitioning(&im, &PartitionOptions::default()).unwrap();
    rp.check(again.regions == part.regions, "partitioning is deterministic");

    let unsmoothed = snow_partitioning(&im, &PartitionOptions::new().with_sigma(0.0)).unwrap();
    check_assignment(&mut rp, &im, &unsmoothed.regions);

    assert!(rp.cleanup(), "partition spheres test failed");
}

#[test]
fn partition_reg_dense_packings() {
    let mut rp = RegParams::new("partition_dense_packings");

    // Dense packings leave small void pockets next to large cavities
    for seed in 0..6 {
        let opts = SphereOptions::new(&[30, 30, 30])
            .with_radius(4)
            .with_count(60)
            .with_seed(seed);
        let im = random_spheres(&opts).unwrap();
        let part = snow_partitioning(&im, &PartitionOptions::default()).unwrap();
        let unlabeled = im
            .iter()
            .zip(part.regions.iter())
            .filter(|&(&void, &label)| void && label == 0)
            .count();
        eprintln!(
            "  Seed {seed}: {} regions, {unlabeled} unlabeled void voxels",
            part.num_regions()
        );
        rp.compare_values(0.0, unlabeled as f64, 0.0);
        check_assignment(&mut rp, &im, &part.regions);
    }

    assert!(rp.cleanup(), "partition dense packings test failed");
}

#[test]
fn partition_reg_errors() {
    let mut rp = RegParams::new("partition_errors");

    let im = BinaryImage::from_elem(IxDyn(&[4, 4, 4, 4]), true);
    rp.check(
        snow_partitioning(&im, &PartitionOptions::default()).is_err(),
        "4-D image rejected",
    );

    let im = BinaryImage::from_elem(IxDyn(&[6, 6]), true);
    rp.check(
        snow_partitioning(&im, &PartitionOptions::new().with_sigma(f64::NAN)).is_err(),
        "NaN sigma rejected",
    );
    rp.check(
        snow_partitioning(&im, &PartitionOptions::new().with_max_iters(0)).is_err(),
        "zero iteration cap rejected",
    );

    let opts = PartitionOptions::new().with_boundary(BoundaryCondition::Foreground);
    rp.check(
        snow_partitioning(&im, &opts).is_err(),
        "void-exterior distance needs solid",
    );

    assert!(rp.cleanup(), "partition error handling test failed");
}

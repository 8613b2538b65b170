//! Boundary padding regression test
//!
//! Checks:
//! 1. Collar widths follow the 3-D and 2-D axis tables
//! 2. Edge replication copies the outermost values into the collar
//! 3. Padding with no faces is the identity
//! 4. Mismatched distance map and image are rejected
//!
//! Run with:
//! ```
//! cargo test -p porenet-core --test border_reg
//! ```

use porenet_core::ndarray::IxDyn;
use porenet_core::{
    COLLAR_WIDTH, Dimensionality, DistanceImage, Error, Face, FaceSet, PadWidths, pad_boundary,
};
use porenet_test::{RegParams, image_from_rows, void_image};

#[test]
fn border_reg_axis_tables() {
    let mut rp = RegParams::new("border_axis_tables");

    let cases: [(Face, usize, bool); 6] = [
        (Face::Front, 0, true),
        (Face::Back, 0, false),
        (Face::Top, 1, true),
        (Face::Bottom, 1, false),
        (Face::Left, 2, true),
        (Face::Right, 2, false),
    ];
    for (face, axis, low) in cases {
        let widths = PadWidths::from_faces(
            &FaceSet::new().with(face),
            Dimensionality::Three,
            COLLAR_WIDTH,
        );
        let expected = if low { (3, 0) } else { (0, 3) };
        rp.check(widths.axis(axis) == expected, face.as_str());
        let total: usize = widths.pairs().iter().map(|(l, h)| l + h).sum();
        rp.compare_values(3.0, total as f64, 0.0);
    }

    let widths = PadWidths::from_faces(
        &FaceSet::parse(["top", "right"]).unwrap(),
        Dimensionality::Two,
        COLLAR_WIDTH,
    );
    rp.check(widths.pairs() == [(3, 0), (0, 3)], "2-D top/right");

    assert!(rp.cleanup(), "border axis tables test failed");
}

#[test]
fn border_reg_pad_boundary() {
    let mut rp = RegParams::new("border_pad_boundary");

    let im = image_from_rows(&["#....", ".....", "....#"]).unwrap();
    let dt = DistanceImage::from_shape_fn(IxDyn(&[3, 5]), |ix| (ix[0] * 5 + ix[1]) as f64);

    let faces = FaceSet::parse(["left", "right"]).unwrap();
    let (pdt, pim) = pad_boundary(&dt, &im, Some(&faces)).unwrap();
    rp.compare_shapes(&[3, 11], pdt.shape());
    rp.compare_shapes(&[3, 11], pim.shape());
    // Left collar replicates column 0, right collar column 4
    rp.compare_values(0.0, pdt[IxDyn(&[0, 0])], 0.0);
    rp.compare_values(5.0, pdt[IxDyn(&[1, 2])], 0.0);
    rp.compare_values(14.0, pdt[IxDyn(&[2, 10])], 0.0);
    rp.check(!pim[IxDyn(&[0, 1])], "solid replicated on the left");
    rp.check(!pim[IxDyn(&[2, 9])], "solid replicated on the right");
    rp.check(pim[IxDyn(&[1, 0])], "void replicated");

    let (same_dt, same_im) = pad_boundary(&dt, &im, None).unwrap();
    rp.check(same_dt == dt && same_im == im, "no faces is the identity");

    let (zero_dt, _) = pad_boundary(&dt, &im, Some(&FaceSet::new())).unwrap();
    rp.check(zero_dt == dt, "empty face set is the identity");

    assert!(rp.cleanup(), "border pad boundary test failed");
}

#[test]
fn border_reg_errors() {
    let mut rp = RegParams::new("border_errors");

    let im = void_image(&[4, 4, 4]);
    let dt = DistanceImage::zeros(IxDyn(&[4, 4, 5]));
    rp.check(
        matches!(
            pad_boundary(&dt, &im, None),
            Err(Error::ShapeMismatch { .. })
        ),
        "shape mismatch",
    );

    let im = void_image(&[4, 4]);
    let dt = DistanceImage::zeros(IxDyn(&[4, 4]));
    let faces = FaceSet::parse(["back"]).unwrap();
    rp.check(
        matches!(
            pad_boundary(&dt, &im, Some(&faces)),
            Err(Error::FaceNotApplicable { face: Face::Back, ndim: 2 })
        ),
        "back on 2-D",
    );

    let im = void_image(&[4]);
    let dt = DistanceImage::zeros(IxDyn(&[4]));
    rp.check(
        matches!(
            pad_boundary(&dt, &im, Some(&FaceSet::all())),
            Err(Error::UnsupportedDimension(1))
        ),
        "1-D rejected",
    );

    assert!(rp.cleanup(), "border error handling test failed");
}

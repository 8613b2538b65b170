//! porenet-test - Regression test framework for porenet
//!
//! This crate provides the shared pieces of the workspace regression tests:
//!
//! - [`RegParams`]: numbered value/shape/flag comparisons that record
//!   failures instead of panicking, reported by [`RegParams::cleanup`]
//! - Fixture builders for small binary images drawn as text
//! - [`init_tracing`] to route `tracing` output into the test harness
//!
//! # Usage
//!
//! ```ignore
//! use porenet_test::{RegParams, image_from_rows};
//!
//! let mut rp = RegParams::new("snow");
//! let im = image_from_rows(&["..#", "..."]).unwrap();
//! rp.compare_shapes(&[2, 3], im.shape());
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: filter for the tracing subscriber (e.g. `porenet_network=debug`)

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::RegParams;

use ndarray::{Axis, IxDyn, stack};
use porenet_core::BinaryImage;
use std::sync::Once;

static TRACING: Once = Once::new();

/// Install a `tracing` subscriber writing through the test harness.
///
/// Safe to call from every test; only the first call installs.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Build a 2-D binary image from text rows: `.` is void, `#` is solid.
pub fn image_from_rows(rows: &[&str]) -> TestResult<BinaryImage> {
    let width = rows.first().map_or(0, |r| r.chars().count());
    let mut data = Vec::with_capacity(rows.len() * width);
    for (row, line) in rows.iter().enumerate() {
        if line.chars().count() != width {
            return Err(TestError::Ragged(format!(
                "row {row} has {} columns, expected {width}",
                line.chars().count()
            )));
        }
        for (col, c) in line.chars().enumerate() {
            match c {
                '.' => data.push(true),
                '#' => data.push(false),
                found => return Err(TestError::InvalidPixel { row, col, found }),
            }
        }
    }
    BinaryImage::from_shape_vec(IxDyn(&[rows.len(), width]), data)
        .map_err(|e| TestError::Ragged(e.to_string()))
}

/// Build a 3-D binary image by stacking 2-D slices along axis 0.
pub fn volume_from_slices(slices: &[&[&str]]) -> TestResult<BinaryImage> {
    let planes = slices
        .iter()
        .map(|rows| image_from_rows(rows))
        .collect::<TestResult<Vec<_>>>()?;
    let views: Vec<_> = planes.iter().map(|p| p.view()).collect();
    stack(Axis(0), &views).map_err(|e| TestError::Ragged(e.to_string()))
}

/// An all-void image of the given shape.
pub fn void_image(shape: &[usize]) -> BinaryImage {
    BinaryImage::from_elem(IxDyn(shape), true)
}

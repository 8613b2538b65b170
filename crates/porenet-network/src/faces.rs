//! Face membership of pores
//!
//! A pore lies on a face when its coordinate along the face's axis reaches
//! the extreme of all pores on that axis: the minimum for top, left and
//! front, the maximum for bottom, right and back. Ties are included.

use crate::error::NetworkResult;
use ndarray::{Array1, Array2};
use porenet_core::{Dimensionality, Face, FaceSet, Network, keys};
use tracing::debug;

/// Membership flags of one face over all pores.
///
/// # Errors
///
/// Returns [`porenet_core::Error::FaceNotApplicable`] when the face's axis
/// is beyond the coordinate width (front or back on a 2-D network).
pub fn face_membership(
    coords: &Array2<f64>,
    face: Face,
    dim: Dimensionality,
) -> NetworkResult<Array1<bool>> {
    let axis = face.label_axis(dim);
    if axis >= coords.ncols() {
        return Err(porenet_core::Error::FaceNotApplicable {
            face,
            ndim: dim.ndim(),
        }
        .into());
    }
    let column = coords.column(axis);
    let flags = if face.is_low_side() {
        let min = column.iter().copied().fold(f64::INFINITY, f64::min);
        column.mapv(|c| c <= min)
    } else {
        let max = column.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        column.mapv(|c| c >= max)
    };
    Ok(flags)
}

/// Flag the pores on each face of `faces` from `pore.coords`, writing one
/// `pore.<face>` property per face.
///
/// # Arguments
///
/// * `net` - Network holding `pore.coords`; receives the face flags
/// * `faces` - Faces to flag
/// * `dim` - Dimensionality of the image the network came from, selecting
///   the labeling axis table
///
/// # Errors
///
/// Returns [`porenet_core::Error::FaceNotApplicable`] for a face with no
/// axis at `dim` and [`porenet_core::Error::MissingProperty`] without
/// `pore.coords`. The network is left unchanged on error.
pub fn label_faces(net: &mut Network, faces: &FaceSet, dim: Dimensionality) -> NetworkResult<()> {
    faces.validate(dim)?;
    let coords = net.vectors(keys::PORE_COORDS)?;
    let flagged = faces
        .iter()
        .map(|face| Ok((face, face_membership(coords, face, dim)?)))
        .collect::<NetworkResult<Vec<_>>>()?;

    for (face, flags) in flagged {
        debug!(
            face = face.as_str(),
            pores = flags.iter().filter(|&&f| f).count(),
            "labeled face"
        );
        net.insert(keys::face(face), flags);
    }
    Ok(())
}

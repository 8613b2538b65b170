//! Boundary and phase classification
//!
//! Pores and throats are split into those of the physical sample and those
//! created by boundary collars, by comparing region labels with the largest
//! label that existed before the collars were added.

use crate::error::NetworkResult;
use ndarray::{Array1, Array2};
use porenet_core::{LabelImage, Network, keys, max_label};
use tracing::debug;

/// Largest region label of the sample body, fixed before boundary regions
/// are injected.
///
/// Labels up to and including the threshold are internal; larger labels
/// belong to boundary regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundaryThreshold(u32);

impl BoundaryThreshold {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// Threshold of a region image that has no boundary regions yet.
    pub fn capture(regions: &LabelImage) -> Self {
        Self(max_label(regions))
    }

    pub fn value(self) -> u32 {
        self.0
    }

    pub fn is_boundary(self, label: u32) -> bool {
        label > self.0
    }

    pub fn is_internal(self, label: u32) -> bool {
        label <= self.0
    }
}

/// Boundary and phase flags of every pore and throat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub pore_boundary: Array1<bool>,
    pub pore_phase: Array1<bool>,
    pub throat_boundary: Array1<bool>,
    pub throat_phase: Array1<bool>,
}

/// Classify pores by label and throats by the labels of their endpoints.
///
/// A throat is `boundary` when its first pore is internal and its second is
/// not, and `phase` when both are internal. Throats between two boundary
/// pores get neither flag.
///
/// # Arguments
///
/// * `labels` - Region label of each pore
/// * `conns` - Pore index pairs, one row per throat
/// * `threshold` - Largest label of an internal pore
///
/// # Returns
///
/// Four flag vectors: two over the pores, two over the throats.
///
/// # Errors
///
/// Returns [`porenet_core::Error::IndexOutOfBounds`] for a connection naming
/// a pore past the end of `labels`, and
/// [`porenet_core::Error::PropertyLength`] when `conns` does not have two
/// columns.
pub fn classify(
    labels: &Array1<u32>,
    conns: &Array2<usize>,
    threshold: BoundaryThreshold,
) -> NetworkResult<Classification> {
    if conns.ncols() != 2 {
        return Err(porenet_core::Error::PropertyLength {
            key: keys::THROAT_CONNS.to_string(),
            expected: 2,
            actual: conns.ncols(),
        }
        .into());
    }
    let lookup = |pore: usize| {
        labels
            .get(pore)
            .copied()
            .ok_or(porenet_core::Error::IndexOutOfBounds {
                index: pore,
                len: labels.len(),
            })
    };

    let mut throat_boundary = Vec::with_capacity(conns.nrows());
    let mut throat_phase = Vec::with_capacity(conns.nrows());
    for row in conns.rows() {
        let first = threshold.is_internal(lookup(row[0])?);
        let second = threshold.is_internal(lookup(row[1])?);
        throat_boundary.push(first && !second);
        throat_phase.push(first && second);
    }

    Ok(Classification {
        pore_boundary: labels.mapv(|l| threshold.is_boundary(l)),
        pore_phase: labels.mapv(|l| threshold.is_internal(l)),
        throat_boundary: Array1::from(throat_boundary),
        throat_phase: Array1::from(throat_phase),
    })
}

/// Classify a network in place, writing `pore.boundary`, `pore.phase`,
/// `throat.boundary` and `throat.phase`.
///
/// Existing flags are overwritten, so classifying twice gives the same
/// result as classifying once.
pub fn classify_network(net: &mut Network, threshold: BoundaryThreshold) -> NetworkResult<()> {
    net.validate()?;
    let labels = net.labels(keys::PORE_LABEL)?;
    let conns = net.conns(keys::THROAT_CONNS)?;
    let c = classify(labels, conns, threshold)?;

    debug!(
        threshold = threshold.value(),
        boundary_pores = c.pore_boundary.iter().filter(|&&b| b).count(),
        boundary_throats = c.throat_boundary.iter().filter(|&&b| b).count(),
        "classified network"
    );
    net.insert(keys::PORE_BOUNDARY, c.pore_boundary);
    net.insert(keys::PORE_PHASE, c.pore_phase);
    net.insert(keys::THROAT_BOUNDARY, c.throat_boundary);
    net.insert(keys::THROAT_PHASE, c.throat_phase);
    Ok(())
}

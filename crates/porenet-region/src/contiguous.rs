//! Label compaction

use porenet_core::LabelImage;

/// Renumber labels so the positive ones are exactly `1..=n`.
///
/// Order is preserved: the smallest positive label becomes 1, the next 2 and
/// so on. 0 stays 0.
pub fn make_contiguous(labels: &LabelImage) -> LabelImage {
    let mut present: Vec<u32> = labels.iter().copied().filter(|&l| l > 0).collect();
    present.sort_unstable();
    present.dedup();
    labels.mapv(|l| match present.binary_search(&l) {
        Ok(rank) if l > 0 => rank as u32 + 1,
        _ => 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::IxDyn;

    #[test]
    fn test_gaps_removed() {
        let labels =
            LabelImage::from_shape_vec(IxDyn(&[2, 3]), vec![0, 7, 7, 3, 0, 12]).unwrap();
        let out = make_contiguous(&labels);
        assert_eq!(out.iter().copied().collect::<Vec<_>>(), vec![0, 2, 2, 1, 0, 3]);
    }

    #[test]
    fn test_already_contiguous() {
        let labels = LabelImage::from_shape_vec(IxDyn(&[4]), vec![1, 2, 0, 3]).unwrap();
        assert_eq!(make_contiguous(&labels), labels);
    }

    #[test]
    fn test_all_zero() {
        let labels = LabelImage::zeros(IxDyn(&[3, 3]));
        assert_eq!(make_contiguous(&labels), labels);
    }
}

//! Read density estimation from the linear index.
//!
//! For regions too large to decode record by record, coverage is
//! approximated from how many compressed bytes of alignments fall between
//! consecutive linear index offsets. Byte counts are scaled by the
//! reference's reads-per-byte ratio and then resampled onto pixel buckets.

mod bins;
mod pixels;
mod session;

pub use session::DensitySession;

use crate::index::{
    ByteCursor, IndexSummary, MAX_POSITION, WINDOW_SIZE, compressed_offset, layout,
    linear_offset,
};
use crate::storage::IndexSource;
use crate::{Error, Result};
use std::sync::Arc;

/// Most pixel buckets a single estimate may produce.
pub const MAX_PIXEL_BUCKETS: u32 = 1 << 16;

/// Estimates per-pixel read density for one index.
///
/// Holds the scanned [`IndexSummary`]; every estimate reopens the index
/// through its [`IndexSource`] and drops the stream before returning.
pub struct CoverageEstimator<S> {
    source: S,
    summary: Arc<IndexSummary>,
}

impl<S: IndexSource> CoverageEstimator<S> {
    /// Scan the index once and keep the summary for later estimates.
    pub fn open(source: S, aligned_read_counts: &[u64]) -> Result<Self> {
        let summary = {
            let mut cursor = ByteCursor::new(source.open()?);
            IndexSummary::load(&mut cursor, aligned_read_counts)?
        };
        Ok(Self::with_summary(source, Arc::new(summary)))
    }

    pub fn with_summary(source: S, summary: Arc<IndexSummary>) -> Self {
        Self { source, summary }
    }

    pub fn summary(&self) -> &IndexSummary {
        &self.summary
    }

    /// Density for the 1-based inclusive region `start..=end` of `reference`,
    /// one value per `step` pixels of a `pixel_width` wide track.
    pub fn estimate_density(
        &self,
        reference: usize,
        start: u64,
        end: u64,
        pixel_width: u32,
        step: u32,
    ) -> Result<Vec<f64>> {
        if pixel_width == 0 || step == 0 || pixel_width / step == 0 {
            return Err(Error::InvalidInput(format!(
                "width {} and step {} leave no pixel buckets",
                pixel_width, step
            )));
        }
        if pixel_width / step > MAX_PIXEL_BUCKETS {
            return Err(Error::InvalidInput(format!(
                "width {} and step {} exceed {} pixel buckets",
                pixel_width, step, MAX_PIXEL_BUCKETS
            )));
        }

        let estimates = self.estimate_reads(reference, start, end)?;
        let size = (pixel_width / step) as usize;
        let first_base = (start - 1) & (WINDOW_SIZE - 1);

        tracing::debug!(
            reference,
            start,
            end,
            bins = estimates.len(),
            buckets = size,
            "estimated density"
        );

        Ok(pixels::interpolate(
            &estimates,
            first_base,
            end - start + 1,
            size,
        ))
    }

    /// Estimated reads for each linear window overlapping `start..=end`.
    pub fn estimate_reads(&self, reference: usize, start: u64, end: u64) -> Result<Vec<u64>> {
        if start == 0 || start > end {
            return Err(Error::InvalidRange(format!(
                "invalid region {}-{}",
                start, end
            )));
        }
        if end > MAX_POSITION {
            return Err(Error::InvalidRange(format!(
                "end {} is past the largest BAM position {}",
                end, MAX_POSITION
            )));
        }

        let info = self
            .summary
            .get(reference)
            .ok_or_else(|| Error::ReferenceNotFound(format!("reference #{}", reference)))?;

        let start_linear = linear_offset(start);
        let end_linear = linear_offset(end);
        let n_bins = (end_linear - start_linear + 1) as usize;

        if !info.has_alignments || start_linear >= info.linear_bin_count {
            return Ok(vec![0; n_bins]);
        }

        let mut offsets = self.read_offsets(reference, info.linear_bin_count, start_linear, n_bins)?;

        if offsets[0] == 0 {
            let fill = self.summary.preceding_span_marker(reference);
            tracing::debug!(reference, start_linear, fill, "repairing leading zero offsets");
            bins::repair_leading_zeros(&mut offsets, fill);
        }
        bins::carry_forward(&mut offsets);

        Ok(bins::estimate_reads(
            &offsets,
            info.first_alignment_offset,
            self.summary.next_first_alignment(reference),
            info.aligned_read_count,
        ))
    }

    /// Compressed offsets for `n_bins` windows from `start_linear`, plus the
    /// offset bounding the last one.
    ///
    /// Windows past the end of the reference's linear index carry no
    /// alignments and collapse onto that bound.
    fn read_offsets(
        &self,
        reference: usize,
        linear_bin_count: u64,
        start_linear: u64,
        n_bins: usize,
    ) -> Result<Vec<u64>> {
        let available = (linear_bin_count - start_linear).min(n_bins as u64) as usize;
        let mut offsets = vec![0u64; n_bins + 1];

        let mut cursor = ByteCursor::new(self.source.open()?);
        layout::seek_to_linear_bin(&mut cursor, reference, start_linear)?;
        for slot in offsets.iter_mut().take(available) {
            *slot = compressed_offset(cursor.read_u64_le()?);
        }

        let bound = if start_linear + (available as u64) < linear_bin_count {
            compressed_offset(cursor.read_u64_le()?)
        } else {
            self.summary.next_first_alignment(reference)
        };
        for slot in &mut offsets[available..] {
            *slot = bound;
        }

        Ok(offsets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::testing::IndexImage;
    use bytes::Bytes;

    const W: u64 = WINDOW_SIZE;

    fn estimator(image: IndexImage, counts: &[u64]) -> CoverageEstimator<Bytes> {
        CoverageEstimator::open(Bytes::from(image.build()), counts).unwrap()
    }

    /// Reference 1 has 100 windows; windows 10..=13 hold 5000, 5000, 7000, 8000.
    fn scenario() -> CoverageEstimator<Bytes> {
        let mut linear: Vec<u64> = (0..100).map(|i| 1000 + i * 100).collect();
        linear[10] = 5000;
        linear[11] = 5000;
        linear[12] = 7000;
        linear[13] = 8000;
        for offset in linear.iter_mut().skip(14) {
            *offset = 8000;
        }
        let image = IndexImage::new()
            .reference(&[(4681, 2)], &[10, 400, 900])
            .reference(&[(4681, 4), (37450, 2)], &linear)
            .reference(&[(0, 1)], &[11_000, 12_000]);
        estimator(image, &[20, 1000, 30])
    }

    #[test]
    fn test_flat_run_scenario() {
        let e = scenario();
        let estimates = e.estimate_reads(1, 10 * W + 1, 13 * W).unwrap();
        // span 11_000 - 1000 = 10_000 bytes for 1000 reads
        assert_eq!(estimates, vec![0, 0, 300]);
    }

    #[test]
    fn test_bucket_count_and_non_negative() {
        let e = scenario();
        for (start, end) in [(1, 50 * W), (7 * W + 13, 61 * W - 9), (1, 100 * W)] {
            let density = e.estimate_density(1, start, end, 800, 4).unwrap();
            assert_eq!(density.len(), 200);
            assert!(density.iter().all(|&v| v >= 0.0));
        }
    }

    #[test]
    fn test_repeated_estimates_are_identical() {
        let e = scenario();
        let a = e.estimate_density(1, 3 * W, 90 * W, 1000, 5).unwrap();
        let b = e.estimate_density(1, 3 * W, 90 * W, 1000, 5).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_region_reaching_last_window_uses_next_reference() {
        let image = IndexImage::new()
            .reference(&[], &[100, 200, 300])
            .reference(&[], &[0, 0])
            .reference(&[], &[700]);
        let e = estimator(image, &[60, 0, 5]);
        let estimates = e.estimate_reads(0, 1, 3 * W).unwrap();
        // bounded by reference 2's first alignment at 700; span 600
        assert_eq!(estimates, vec![10, 10, 40]);
    }

    #[test]
    fn test_last_reference_uses_end_marker() {
        let image = IndexImage::new().reference(&[], &[100, 200, 400]);
        let e = estimator(image, &[30]);
        let estimates = e.estimate_reads(0, 1, 3 * W).unwrap();
        // end marker is the last linear offset, so the final window gets nothing
        assert_eq!(estimates, vec![10, 20, 0]);
    }

    #[test]
    fn test_region_beyond_linear_index_is_zero_filled() {
        let e = scenario();
        let estimates = e.estimate_reads(0, 2 * W + 1, 6 * W).unwrap();
        // window 2 is the last indexed one; the rest collapse onto the bound
        assert_eq!(estimates.len(), 4);
        assert_eq!(&estimates[1..], &[0, 0, 0]);

        let density = e.estimate_density(0, 10 * W, 20 * W, 100, 1).unwrap();
        assert_eq!(density, vec![0.0; 100]);
    }

    #[test]
    fn test_leading_zero_repaired_from_preceding_reference() {
        let image = IndexImage::new()
            .reference(&[], &[100, 300])
            .reference(&[], &[0, 0])
            .reference(&[], &[0, 0, 1000, 1500])
            .reference(&[], &[2000]);
        let e = estimator(image, &[5, 0, 100, 1]);
        let estimates = e.estimate_reads(2, 1, 4 * W).unwrap();
        assert_eq!(estimates, vec![0, 0, 50, 50]);
        assert!(estimates.iter().sum::<u64>() <= 100);
    }

    #[test]
    fn test_per_bin_sum_never_exceeds_total() {
        let e = scenario();
        let estimates = e.estimate_reads(1, 1, 100 * W).unwrap();
        assert!(estimates.iter().sum::<u64>() <= 1000);
    }

    #[test]
    fn test_uniform_windows_give_uniform_buckets() {
        let linear: Vec<u64> = (0..=200).map(|i| 10_000 + i * 500).collect();
        let image = IndexImage::new().reference(&[], &linear);
        let e = estimator(image, &[20_000]);
        let density = e.estimate_density(0, 1, 200 * W, 800, 4).unwrap();
        assert_eq!(density.len(), 200);
        let first = density[0];
        assert!(first > 0.0);
        assert!(density.iter().all(|&v| (v - first).abs() < 1e-9));
    }

    #[test]
    fn test_unknown_reference_and_bad_arguments() {
        let e = scenario();
        assert!(matches!(
            e.estimate_density(9, 1, 100, 10, 1),
            Err(Error::ReferenceNotFound(_))
        ));
        assert!(matches!(
            e.estimate_density(1, 0, 100, 10, 1),
            Err(Error::InvalidRange(_))
        ));
        assert!(matches!(
            e.estimate_density(1, 200, 100, 10, 1),
            Err(Error::InvalidRange(_))
        ));
        assert!(matches!(
            e.estimate_density(1, 1, 100, 3, 4),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_oversized_requests_are_rejected() {
        let image = IndexImage::new().reference(&[], &[100, 200, 400]);
        let e = estimator(image, &[30]);
        assert!(matches!(
            e.estimate_density(0, 1, 1 << 60, 800, 4),
            Err(Error::InvalidRange(_))
        ));
        assert!(matches!(
            e.estimate_reads(0, 1, MAX_POSITION + 1),
            Err(Error::InvalidRange(_))
        ));
        assert!(matches!(
            e.estimate_density(0, 1, 3 * W, u32::MAX, 1),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_largest_position_is_zero_filled_past_index() {
        let image = IndexImage::new().reference(&[], &[100, 200, 400]);
        let e = estimator(image, &[30]);
        let estimates = e.estimate_reads(0, 1, MAX_POSITION).unwrap();
        assert_eq!(estimates.len(), 1 << 17);
        assert_eq!(&estimates[..3], &[10, 20, 0]);
        assert!(estimates[3..].iter().all(|&v| v == 0));

        let density = e
            .estimate_density(0, 1, MAX_POSITION, MAX_PIXEL_BUCKETS, 1)
            .unwrap();
        assert_eq!(density.len(), MAX_PIXEL_BUCKETS as usize);
    }

    #[test]
    fn test_truncated_index_surfaces_error() {
        let full = scenario();
        let mut bytes = IndexImage::new()
            .reference(&[], &[100, 200, 300, 400])
            .build();
        let summary = Arc::new(full.summary().clone());
        bytes.truncate(20);
        let e = CoverageEstimator::with_summary(Bytes::from(bytes), summary);
        assert!(matches!(
            e.estimate_reads(0, 1, 2 * W),
            Err(Error::TruncatedStream { .. })
        ));
    }
}

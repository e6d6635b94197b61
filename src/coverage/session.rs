use super::CoverageEstimator;
use crate::formats::ReferenceCatalog;
use crate::storage::IndexSource;
use crate::{Error, Result};
use std::path::PathBuf;

/// An estimator bound to the reference names of one alignment file.
///
/// The index is scanned once when the session opens; the summary is never
/// mutated afterwards, so a session can be shared across threads.
pub struct DensitySession<S = PathBuf> {
    catalog: ReferenceCatalog,
    estimator: CoverageEstimator<S>,
}

impl<S: IndexSource> DensitySession<S> {
    /// Scan `source` using counts from `catalog`. `data_size`, the alignment
    /// file size when known, bounds the last reference.
    pub fn open(source: S, catalog: ReferenceCatalog, data_size: Option<u64>) -> Result<Self> {
        let estimator = CoverageEstimator::open(source, catalog.aligned_read_counts())?;
        let estimator = match data_size {
            Some(size) => {
                let summary = estimator.summary().clone().with_data_size(size);
                CoverageEstimator::with_summary(estimator.source, summary.into())
            }
            None => estimator,
        };

        tracing::info!(
            references = estimator.summary().len(),
            "opened density session"
        );

        Ok(Self { catalog, estimator })
    }

    pub fn catalog(&self) -> &ReferenceCatalog {
        &self.catalog
    }

    pub fn estimator(&self) -> &CoverageEstimator<S> {
        &self.estimator
    }

    /// Density for `reference_name:start-end` (1-based, inclusive).
    pub fn estimate_density(
        &self,
        reference_name: &str,
        start: u64,
        end: u64,
        pixel_width: u32,
        step: u32,
    ) -> Result<Vec<f64>> {
        let reference = self
            .catalog
            .index_of(reference_name)
            .ok_or_else(|| Error::ReferenceNotFound(reference_name.to_string()))?;

        self.estimator
            .estimate_density(reference, start, end, pixel_width, step)
            .map_err(|e| match e {
                Error::ReferenceNotFound(_) => {
                    Error::ReferenceNotFound(reference_name.to_string())
                }
                e => e,
            })
    }
}

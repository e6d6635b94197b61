use super::ReferenceCatalog;
use crate::{Error, Result};
use noodles::bam;
use noodles::bam::bai;
use noodles::csi::binning_index::ReferenceSequence as _;
use noodles::sam;
use std::path::Path;
use tokio::fs::File;

pub struct BamCatalogReader;

impl BamCatalogReader {
    /// Reference names from the BAM header and mapped counts from its BAI
    pub async fn read_catalog(bam_path: &Path, index_path: &Path) -> Result<ReferenceCatalog> {
        let header = Self::read_header(bam_path).await?;
        let names: Vec<String> = header
            .reference_sequences()
            .keys()
            .map(|name| name.to_string())
            .collect();

        let counts = Self::mapped_record_counts(index_path).await?;
        if counts.len() != names.len() {
            return Err(Error::IndexFormat(format!(
                "index has {} references but header declares {}",
                counts.len(),
                names.len()
            )));
        }

        Ok(ReferenceCatalog::new(names, counts))
    }

    /// Read the BAM header from a file
    pub async fn read_header(bam_path: &Path) -> Result<sam::Header> {
        let file = File::open(bam_path)
            .await
            .map_err(|e| Error::Internal(format!("failed to open BAM file: {}", e)))?;

        // the reader adds its own BGZF layer
        let mut reader = bam::r#async::io::Reader::new(file);

        reader
            .read_header()
            .await
            .map_err(|e| Error::Internal(format!("failed to read BAM header: {}", e)))
    }

    /// Mapped read count per reference from the BAI metadata pseudo-bins.
    /// References without metadata count as zero.
    pub async fn mapped_record_counts(index_path: &Path) -> Result<Vec<u64>> {
        let index = bai::r#async::read(index_path)
            .await
            .map_err(|e| Error::IndexFormat(format!("failed to read BAI index: {}", e)))?;

        Ok(index
            .reference_sequences()
            .iter()
            .map(|reference_sequence| {
                reference_sequence
                    .metadata()
                    .map(|metadata| metadata.mapped_record_count())
                    .unwrap_or(0)
            })
            .collect())
    }
}

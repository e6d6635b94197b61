//! Alignment file collaborators built on noodles.
//!
//! The density path needs two facts it does not derive itself: the reference
//! names in header order, and how many mapped reads each reference holds.
//! Both come from the alignment library here.
//!
//! - [`BamCatalogReader`] - BAM header plus BAI metadata pseudo-bins

mod bam;

pub use bam::BamCatalogReader;

/// Reference names and mapped read counts, both in header order.
#[derive(Debug, Clone, Default)]
pub struct ReferenceCatalog {
    names: Vec<String>,
    aligned_read_counts: Vec<u64>,
}

impl ReferenceCatalog {
    pub fn new(names: Vec<String>, aligned_read_counts: Vec<u64>) -> Self {
        Self {
            names,
            aligned_read_counts,
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn aligned_read_counts(&self) -> &[u64] {
        &self.aligned_read_counts
    }

    /// Position of `name` in header order.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }
}

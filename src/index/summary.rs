use super::layout::{self, read_count};
use super::{ByteCursor, compressed_offset};
use crate::{Error, Result};
use std::io::Read;

const BAI_MAGIC: [u8; 4] = *b"BAI\x01";

/// Per-reference statistics used to scale byte deltas into read counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceIndexSummary {
    /// Number of 16 Kbp windows in the linear index.
    pub linear_bin_count: u64,
    /// Mapped reads on this reference, as reported by the alignment index metadata.
    pub aligned_read_count: u64,
    /// Compressed offset of the first alignment. References without alignments
    /// inherit the preceding reference's value.
    pub first_alignment_offset: u64,
    /// Compressed offset of the last linear bin, zero when the reference is empty.
    pub span_marker: u64,
    /// Whether any linear bin carries a non-zero offset.
    pub has_alignments: bool,
}

/// Immutable result of one forward scan over an index.
#[derive(Debug, Clone)]
pub struct IndexSummary {
    references: Vec<ReferenceIndexSummary>,
    end_marker: u64,
}

impl IndexSummary {
    /// Scan a whole index from its first byte.
    ///
    /// `aligned_read_counts` is matched to references by position; references
    /// past the end of the slice get a count of zero.
    pub fn load<R: Read>(cursor: &mut ByteCursor<R>, aligned_read_counts: &[u64]) -> Result<Self> {
        let magic = cursor.read_u32_le()?;
        if magic.to_le_bytes() != BAI_MAGIC {
            return Err(Error::IndexFormat(format!(
                "invalid BAI magic {:?}",
                magic.to_le_bytes()
            )));
        }

        let n_ref = read_count(cursor, "reference")?;
        if aligned_read_counts.len() as u64 != n_ref {
            tracing::warn!(
                "index declares {} references but {} read counts were supplied",
                n_ref,
                aligned_read_counts.len()
            );
        }

        let mut references = Vec::new();
        let mut end_marker = 0;
        let mut previous_first = 0;

        for i in 0..n_ref as usize {
            layout::skip_bins(cursor)?;
            let linear_bin_count = read_count(cursor, "linear bin")?;

            let mut first = None;
            let mut last_nonzero = 0;
            for _ in 0..linear_bin_count {
                let offset = compressed_offset(cursor.read_u64_le()?);
                if offset != 0 {
                    first.get_or_insert(offset);
                    last_nonzero = offset;
                }
            }

            let summary = match first {
                Some(first) => {
                    previous_first = first;
                    end_marker = last_nonzero;
                    ReferenceIndexSummary {
                        linear_bin_count,
                        aligned_read_count: aligned_read_counts.get(i).copied().unwrap_or(0),
                        first_alignment_offset: first,
                        span_marker: last_nonzero,
                        has_alignments: true,
                    }
                }
                None => ReferenceIndexSummary {
                    linear_bin_count,
                    aligned_read_count: aligned_read_counts.get(i).copied().unwrap_or(0),
                    first_alignment_offset: previous_first,
                    span_marker: 0,
                    has_alignments: false,
                },
            };
            references.push(summary);
        }

        tracing::debug!(
            references = references.len(),
            end_marker,
            bytes = cursor.position(),
            "scanned index"
        );

        Ok(Self {
            references,
            end_marker,
        })
    }

    /// Use the alignment file size as the upper bound of the last reference.
    pub fn with_data_size(mut self, size: u64) -> Self {
        self.end_marker = self.end_marker.max(size);
        self
    }

    pub fn references(&self) -> &[ReferenceIndexSummary] {
        &self.references
    }

    pub fn get(&self, reference: usize) -> Option<&ReferenceIndexSummary> {
        self.references.get(reference)
    }

    pub fn len(&self) -> usize {
        self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    /// Upper bound for the last populated reference.
    pub fn end_marker(&self) -> u64 {
        self.end_marker
    }

    /// First-alignment offset of the next reference after `reference` that
    /// holds alignments, or the end marker.
    pub fn next_first_alignment(&self, reference: usize) -> u64 {
        self.references
            .iter()
            .skip(reference + 1)
            .find(|r| r.has_alignments)
            .map(|r| r.first_alignment_offset)
            .unwrap_or(self.end_marker)
    }

    /// Nearest non-zero span marker strictly before `reference`, or zero.
    pub fn preceding_span_marker(&self, reference: usize) -> u64 {
        self.references[..reference.min(self.references.len())]
            .iter()
            .rev()
            .map(|r| r.span_marker)
            .find(|&marker| marker != 0)
            .unwrap_or(0)
    }

    /// Compressed bytes occupied by `reference`'s alignments.
    pub fn byte_span(&self, reference: usize) -> u64 {
        match self.references.get(reference) {
            Some(r) if r.has_alignments => self
                .next_first_alignment(reference)
                .saturating_sub(r.first_alignment_offset),
            _ => 0,
        }
    }
}

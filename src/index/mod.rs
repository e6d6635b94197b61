//! Direct access to BAM index (`.bai`) files.
//!
//! The density path never asks an alignment library to run a region query.
//! Instead it walks the index bytes itself:
//!
//! - [`ByteCursor`] - forward-only little-endian reads and skips
//! - [`layout`] - stepping over whole reference blocks and landing on a
//!   given linear bin
//! - [`IndexSummary`] - per-reference statistics gathered in one scan
//!
//! # Linear index
//!
//! Each reference carries one virtual file offset per 16 Kbp window, the
//! position of the first alignment overlapping that window. Only the
//! compressed block component (`virtual >> 16`) is used.

mod cursor;
pub mod layout;
mod summary;

pub use cursor::ByteCursor;
pub use summary::{IndexSummary, ReferenceIndexSummary};

/// log2 of the linear index window size.
pub const LINEAR_SHIFT: u32 = 14;

/// Bases covered by one linear index window.
pub const WINDOW_SIZE: u64 = 1 << LINEAR_SHIFT;

/// Largest 1-based position a BAM record can hold.
pub const MAX_POSITION: u64 = (1 << 31) - 1;

/// Linear bin holding a 1-based position.
pub fn linear_offset(position: u64) -> u64 {
    position.saturating_sub(1) >> LINEAR_SHIFT
}

/// Compressed block start of a virtual file offset.
pub fn compressed_offset(virtual_offset: u64) -> u64 {
    virtual_offset >> 16
}

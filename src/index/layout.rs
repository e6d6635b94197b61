//! Navigation over the on-disk BAI layout.
//!
//! ```text
//! magic[4] n_ref[4]
//! per reference:
//!   n_bin[4]
//!   per bin:  bin[4] n_chunk[4] chunk[16 * n_chunk]
//!   n_intv[4] ioffset[8 * n_intv]
//! ```
//!
//! Nothing here decodes bins or chunks; the navigator only needs their
//! counts to step over them.

use super::ByteCursor;
use crate::{Error, Result};
use std::io::Read;

/// Magic plus reference count.
pub const HEADER_LEN: u64 = 8;
const BIN_ID_LEN: u64 = 4;
const CHUNK_LEN: u64 = 16;
const OFFSET_LEN: u64 = 8;

/// Read an `int32` count field, rejecting negative values.
pub(crate) fn read_count<R: Read>(cursor: &mut ByteCursor<R>, what: &str) -> Result<u64> {
    let offset = cursor.position();
    let n = cursor.read_i32_le()?;
    u64::try_from(n).map_err(|_| {
        Error::IndexFormat(format!("negative {} count {} at offset {}", what, n, offset))
    })
}

/// Skip one reference's hierarchical bin section.
pub fn skip_bins<R: Read>(cursor: &mut ByteCursor<R>) -> Result<()> {
    let n_bin = read_count(cursor, "bin")?;
    for _ in 0..n_bin {
        cursor.skip(BIN_ID_LEN)?;
        let n_chunk = read_count(cursor, "chunk")?;
        cursor.skip(CHUNK_LEN * n_chunk)?;
    }
    Ok(())
}

/// Skip `count` complete reference blocks, bins then linear index.
pub fn skip_references<R: Read>(cursor: &mut ByteCursor<R>, count: usize) -> Result<()> {
    for _ in 0..count {
        skip_bins(cursor)?;
        let n_intv = read_count(cursor, "linear bin")?;
        cursor.skip(OFFSET_LEN * n_intv)?;
    }
    Ok(())
}

/// Position a cursor sitting at the start of the file on the raw offset of
/// linear bin `bin_offset` of reference `reference`.
///
/// Returns the reference's linear bin count. `bin_offset` may equal the count,
/// which leaves the cursor just past the reference's linear index.
pub fn seek_to_linear_bin<R: Read>(
    cursor: &mut ByteCursor<R>,
    reference: usize,
    bin_offset: u64,
) -> Result<u64> {
    cursor.skip(HEADER_LEN)?;
    skip_references(cursor, reference)?;
    skip_bins(cursor)?;

    let n_intv = read_count(cursor, "linear bin")?;
    if bin_offset > n_intv {
        return Err(Error::IndexFormat(format!(
            "linear bin {} out of range for reference {} with {} linear bins",
            bin_offset, reference, n_intv
        )));
    }

    cursor.skip(OFFSET_LEN * bin_offset)?;
    Ok(n_intv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::testing::IndexImage;

    fn image() -> Vec<u8> {
        IndexImage::new()
            .reference(&[(4681, 2), (37450, 2)], &[100, 100, 300])
            .reference(&[(0, 5)], &[1000, 2000, 3000, 4000])
            .reference(&[], &[])
            .reference(&[(1, 1)], &[9000, 9500])
            .build()
    }

    #[test]
    fn test_seek_to_linear_bin_lands_on_offset() {
        let bytes = image();
        let mut cursor = ByteCursor::new(&bytes[..]);
        let n_intv = seek_to_linear_bin(&mut cursor, 1, 2).unwrap();
        assert_eq!(n_intv, 4);
        assert_eq!(cursor.read_u64_le().unwrap() >> 16, 3000);
    }

    #[test]
    fn test_seek_past_empty_reference() {
        let bytes = image();
        let mut cursor = ByteCursor::new(&bytes[..]);
        seek_to_linear_bin(&mut cursor, 3, 1).unwrap();
        assert_eq!(cursor.read_u64_le().unwrap() >> 16, 9500);
    }

    #[test]
    fn test_skip_references_consumes_whole_blocks() {
        let bytes = image();
        let mut cursor = ByteCursor::new(&bytes[..]);
        cursor.skip(HEADER_LEN).unwrap();
        skip_references(&mut cursor, 4).unwrap();
        assert_eq!(cursor.position(), bytes.len() as u64);
    }

    #[test]
    fn test_bin_offset_beyond_linear_count_is_rejected() {
        let bytes = image();
        let mut cursor = ByteCursor::new(&bytes[..]);
        let err = seek_to_linear_bin(&mut cursor, 0, 4).unwrap_err();
        assert!(matches!(err, Error::IndexFormat(_)));
    }

    #[test]
    fn test_negative_count_is_rejected() {
        let mut bytes = IndexImage::new().reference(&[], &[]).build();
        // n_bin of the first reference
        bytes[8..12].copy_from_slice(&(-1i32).to_le_bytes());
        let mut cursor = ByteCursor::new(&bytes[..]);
        let err = seek_to_linear_bin(&mut cursor, 0, 0).unwrap_err();
        assert!(matches!(err, Error::IndexFormat(_)));
    }

    #[test]
    fn test_truncated_chunk_section() {
        let mut bytes = image();
        bytes.truncate(30);
        let mut cursor = ByteCursor::new(&bytes[..]);
        let err = seek_to_linear_bin(&mut cursor, 1, 0).unwrap_err();
        assert!(matches!(err, Error::TruncatedStream { .. }));
    }
}

//! Raw linear offsets to per-window read estimates.

/// Fill the leading run of zero offsets with `fill`.
///
/// The trailing sentinel is never touched.
pub fn repair_leading_zeros(offsets: &mut [u64], fill: u64) {
    let body = offsets.len().saturating_sub(1);
    for offset in offsets[..body].iter_mut().take_while(|o| **o == 0) {
        *offset = fill;
    }
}

/// Carry offsets forward so the array never decreases.
///
/// Interior zeros left by indexers that do not backfill empty windows take
/// the preceding offset.
pub fn carry_forward(offsets: &mut [u64]) {
    for i in 1..offsets.len() {
        if offsets[i] < offsets[i - 1] {
            offsets[i] = offsets[i - 1];
        }
    }
}

/// Estimate reads per window from `offsets` (one per window plus a sentinel).
///
/// Bytes between consecutive offsets are clamped to `lower..=upper`, the
/// reference's own byte range, then scaled by `total_reads / (upper - lower)`
/// and truncated. A window whose offset repeats its predecessor's belongs to
/// a flat run; the run's bytes go to the window that ends it, or back to the
/// window that opened it when the run reaches the end of the range.
pub fn estimate_reads(offsets: &[u64], lower: u64, upper: u64, total_reads: u64) -> Vec<u64> {
    let n = offsets.len().saturating_sub(1);
    if upper <= lower || total_reads == 0 {
        return vec![0; n];
    }

    let clamp = |offset: u64| offset.clamp(lower, upper);
    let mut bytes = vec![0u64; n];
    let mut pending = 0;
    let mut owner = 0;

    for i in 0..n {
        let delta = clamp(offsets[i + 1]).saturating_sub(clamp(offsets[i]));
        if i > 0 && offsets[i - 1] == offsets[i] {
            pending += delta;
        } else {
            bytes[i] = pending + delta;
            pending = 0;
            owner = i;
        }
    }
    if pending > 0 {
        bytes[owner] += pending;
    }

    let span = (upper - lower) as u128;
    bytes
        .into_iter()
        .map(|b| (b as u128 * total_reads as u128 / span) as u64)
        .collect()
}

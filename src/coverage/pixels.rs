use crate::index::WINDOW_SIZE;

/// Spread per-window estimates over `size` equal-width pixel buckets.
///
/// `first_base` is the region start's offset inside the first window and
/// `region_len` the number of bases covered by the buckets. Each bucket
/// collects `overlap / WINDOW_SIZE * estimate` from every window it touches.
pub fn interpolate(estimates: &[u64], first_base: u64, region_len: u64, size: usize) -> Vec<f64> {
    let mut buckets = vec![0.0; size];
    if estimates.is_empty() || size == 0 {
        return buckets;
    }

    let window = WINDOW_SIZE as f64;
    let width = region_len as f64 / size as f64;
    let origin = first_base as f64;
    let mut bin = 0usize;

    for (i, bucket) in buckets.iter_mut().enumerate() {
        let lo = origin + i as f64 * width;
        let hi = origin + (i + 1) as f64 * width;

        while bin + 1 < estimates.len() && (bin + 1) as f64 * window <= lo {
            bin += 1;
        }

        let mut b = bin;
        while b < estimates.len() && (b as f64) * window < hi {
            let overlap = hi.min((b + 1) as f64 * window) - lo.max(b as f64 * window);
            if overlap > 0.0 {
                *bucket += overlap / window * estimates[b] as f64;
            }
            b += 1;
        }
    }

    buckets
}

//! Hash combination for small tuples of integers.

/// 64-bit golden ratio.
const GOLDEN_RATIO: u64 = 0x9e37_79b9_7f4a_7c15;

/// Finalizer from splitmix64. Spreads adjacent inputs across the output space.
fn mix(mut value: u64) -> u64 {
    value = (value ^ (value >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    value = (value ^ (value >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    value ^ (value >> 31)
}

/// Fold `values` into a single hash, starting from a zero seed.
///
/// Order matters: `hash_combine(&[a, b]) != hash_combine(&[b, a])` in general.
pub fn hash_combine(values: &[u64]) -> u64 {
    values.iter().fold(0u64, |seed, &value| {
        seed ^ mix(value)
            .wrapping_add(GOLDEN_RATIO)
            .wrapping_add(seed << 6)
            .wrapping_add(seed >> 2)
    })
}

use rand::Rng;

/// Apply integer-percentage multiplicative jitter to every sample
///
/// Each value gets its own draw `pct` from `[-bound_pct, bound_pct]` and
/// becomes `value + value * pct / 100`.
pub fn apply_jitter<R: Rng + ?Sized>(values: &[f64], bound_pct: i32, rng: &mut R) -> Vec<f64> {
    values
        .iter()
        .map(|&value| {
            let pct = rng.gen_range(-bound_pct..=bound_pct);
            value + (pct as f64 * value) / 100.0
        })
        .collect()
}

/// Draw `len` uniform integer background counts from `[min, max]`
pub fn background<R: Rng + ?Sized>(len: usize, min: i64, max: i64, rng: &mut R) -> Vec<f64> {
    (0..len).map(|_| rng.gen_range(min..=max) as f64).collect()
}

use rand::Rng;

/// Clamp a raw weight to the sampler's domain: finite and ≥ 0, else 0.
pub fn sanitize_weight(w: f64) -> f64 {
    if w.is_finite() && w > 0.0 {
        w
    } else {
        0.0
    }
}

/// Weighted random permutation without replacement (Efraimidis–Spirakis).
///
/// Each item draws `u = 1 - rng() ∈ (0,1]` and gets the key `u^(1/w)`;
/// zero-weight items get `-∞` so they sink behind every positive-weight item
/// without ever being dropped. Sorting descending by key yields an ordering
/// where the chance of ranking earlier is proportional to weight.
///
/// Pure: the input slice is not mutated and the output is the same multiset.
pub fn weighted_shuffle<T, F, R>(items: &[T], weight_fn: F, rng: &mut R) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> f64,
    R: Rng,
{
    let mut keyed: Vec<(f64, &T)> = items
        .iter()
        .map(|it| {
            let w = sanitize_weight(weight_fn(it));
            let u: f64 = 1.0 - rng.gen::<f64>(); // (0,1]
            let k = if w > 0.0 {
                u.powf(1.0 / w)
            } else {
                f64::NEG_INFINITY
            };
            (k, it)
        })
        .collect();
    keyed.sort_by(|a, b| b.0.total_cmp(&a.0));
    keyed.into_iter().map(|(_, it)| it.clone()).collect()
}

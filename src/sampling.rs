//! Random sampling primitives used across the genetic operators.

use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::index;
use rand::Rng;
use std::collections::HashSet;

/// Sample `k` distinct integers from `[low, high)` with Robert Floyd's
/// algorithm for sampling without replacement.
///
/// The order of the result is unspecified; it is normalized here so that
/// callers iterating over it stay deterministic under a fixed seed.
///
/// # Panics
///
/// Panics if `k > high - low`.
pub fn sample_indexes<R: Rng>(low: usize, high: usize, k: usize, rng: &mut R) -> Vec<usize> {
    assert!(k <= high - low, "cannot sample {} indexes from [{}, {})", k, low, high);

    let mut picked = HashSet::with_capacity(k);

    for i in (high - k)..high {
        let v = rng.gen_range(low..=i);

        // If v was already picked, i definitely wasn't: this is the first
        // iteration that could have produced a value that large.
        if !picked.insert(v) {
            picked.insert(i);
        }
    }

    let mut indexes: Vec<usize> = picked.into_iter().collect();
    indexes.sort_unstable();
    indexes
}

/// Sample two distinct integers from `[low, high)`.
///
/// When `sorted` is set the first component is the smaller one; otherwise
/// the two components come in random order.
pub fn sample_pair<R: Rng>(low: usize, high: usize, sorted: bool, rng: &mut R) -> (usize, usize) {
    let pair = sample_indexes(low, high, 2, rng);
    let (mut a, mut b) = (pair[0], pair[1]);

    if !sorted && rng.gen_bool(0.5) {
        std::mem::swap(&mut a, &mut b);
    }

    (a, b)
}

/// Draw `n` independent uniforms from `[0, 1)`.
pub fn sample_probabilities<R: Rng>(n: usize, rng: &mut R) -> Vec<f64> {
    (0..n).map(|_| rng.gen::<f64>()).collect()
}

/// Draw a window `(a1, a2)` with `low <= a1 <= a2 <= high` whose width lies
/// in `[delta_min, delta_max]`.
///
/// Two uniforms `u1 <= u2` are mapped onto `space = high - low - delta_min`,
/// the minimum width is added to the upper endpoint, and the result is
/// clipped to the maximum width.
///
/// # Panics
///
/// Panics if `high < low + delta_min`.
pub fn sample_constrained_window<R: Rng>(
    low: usize,
    high: usize,
    delta_min: usize,
    delta_max: usize,
    rng: &mut R,
) -> (usize, usize) {
    assert!(high >= low + delta_min, "window range too narrow for delta_min");

    let space = (high - low - delta_min) as f64;

    let mut u1 = rng.gen::<f64>();
    let mut u2 = rng.gen::<f64>();
    if u1 > u2 {
        std::mem::swap(&mut u1, &mut u2);
    }

    let a1 = low + (u1 * space) as usize;
    let mut a2 = low + (u2 * space) as usize + delta_min;

    // clip the upper bound
    if a2 > a1 + delta_max {
        a2 = a1 + delta_max;
    }

    (a1, a2)
}

/// Draw `k` indices with probability proportional to `weights`.
///
/// With replacement the same index may appear multiple times; without
/// replacement all returned indices are distinct.
///
/// # Panics
///
/// Panics if the weights are not usable as sampling weights (negative
/// values, a zero sum) or if `k` exceeds `weights.len()` when drawing
/// without replacement.
pub fn weighted_sample<R: Rng>(
    weights: &[f64],
    k: usize,
    with_replacement: bool,
    rng: &mut R,
) -> Vec<usize> {
    if with_replacement {
        let distribution = WeightedIndex::new(weights)
            .expect("weights must be non-negative with a positive sum");
        (0..k).map(|_| distribution.sample(rng)).collect()
    } else {
        index::sample_weighted(rng, weights.len(), |i| weights[i], k)
            .expect("weights must be non-negative with a positive sum")
            .into_vec()
    }
}

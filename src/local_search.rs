//! Variable-neighborhood local search over permutation tours.

use crate::sampling;
use crate::tour::Tour;
use rand::Rng;

/// The cheapest of the four neighbors of `tour` at the index pair `(i, j)`:
/// swap, left rotation, right rotation and inversion. Requires `i < j`.
fn find_best_neighbor<'a>(tour: &Tour<'a>, i: usize, j: usize) -> Tour<'a> {
    let mut swap_neighbor = tour.clone();
    swap_neighbor.swap(i, j);

    let mut left_rotation_neighbor = tour.clone();
    left_rotation_neighbor.left_rotation(i, j);

    let mut right_rotation_neighbor = tour.clone();
    right_rotation_neighbor.right_rotation(i, j);

    let mut inversion_neighbor = tour.clone();
    inversion_neighbor.inversion(i, j);

    [
        swap_neighbor,
        left_rotation_neighbor,
        right_rotation_neighbor,
        inversion_neighbor,
    ]
    .into_iter()
    .min_by(|a, b| a.cost().partial_cmp(&b.cost()).unwrap())
    .expect("neighbor candidates must not be empty")
}

/// Descend over every index pair `(i, j)` with `0 <= i < j < n`, replacing
/// the tour whenever the best neighbor at the pair improves on it.
///
/// The enumeration starts at position `0` and may move the depot; the tour
/// is re-aligned before it is handed back.
pub fn complete_search(tour: &mut Tour<'_>) {
    let n = tour.len();
    let mut best_cost = tour.cost();

    for i in 0..n.saturating_sub(1) {
        for j in (i + 1)..n {
            let best_neighbor = find_best_neighbor(tour, i, j);

            if best_neighbor.cost() < best_cost {
                best_cost = best_neighbor.cost();
                *tour = best_neighbor;
            }
        }
    }

    tour.align_to_depot();
}

/// Descend over the index pairs `lb <= i < j <= ub` of a window.
pub fn windowed_search(tour: &mut Tour<'_>, window: (usize, usize)) {
    let (lb, ub) = window;
    let mut best_cost = tour.cost();

    for i in lb..ub {
        for j in (i + 1)..=ub {
            let best_neighbor = find_best_neighbor(tour, i, j);

            if best_neighbor.cost() < best_cost {
                best_cost = best_neighbor.cost();
                *tour = best_neighbor;
            }
        }
    }
}

/// Apply the complete descent to every tour of the population pool. This is
/// quadratic per individual and is used sparingly, to polish the initial
/// population.
pub fn improve_generation_complete(population_pool: &mut [Tour<'_>]) {
    for tour in population_pool.iter_mut() {
        complete_search(tour);
    }
}

/// Apply the windowed descent to every tour of the population pool, each
/// over its own constrained random window.
///
/// The window deltas derive from `log2(2n / 5)`: they cover almost the
/// entire path when `n` is small and increasingly smaller subpaths as `n`
/// grows. Less effective than the complete descent but much faster.
pub fn improve_generation_greedy<R: Rng>(population_pool: &mut [Tour<'_>], rng: &mut R) {
    let n = population_pool[0].len();
    let low = 1;
    let high = n - 1;

    let log_threshold = (2.0 * n as f64 / 5.0).log2().max(0.0);

    let delta_min = log_threshold as usize;
    let delta_max = (3.5 * log_threshold) as usize;

    for tour in population_pool.iter_mut() {
        let window = sampling::sample_constrained_window(low, high, delta_min, delta_max, rng);
        windowed_search(tour, window);
    }
}

//! Initial population generation and pool statistics.

use crate::tour::Tour;
use rand::Rng;

/// Generate the initial population pool of size μ.
///
/// When `include_heuristic` is set the heuristic tour itself joins the pool;
/// the remaining slots are filled with random shuffles of it that keep the
/// depot at position `0`.
pub fn generate_initial<'a, R: Rng>(
    heuristic_tour: &Tour<'a>,
    mu: usize,
    include_heuristic: bool,
    rng: &mut R,
) -> Vec<Tour<'a>> {
    let mut population_pool = Vec::with_capacity(mu);

    if include_heuristic {
        population_pool.push(heuristic_tour.clone());
    }

    while population_pool.len() < mu {
        let mut candidate = heuristic_tour.clone();
        candidate.reset_cost();
        candidate.shuffle_tail(rng);
        population_pool.push(candidate);
    }

    population_pool
}

/// Sum of the circuit costs over the pool.
pub fn sum_cost(population_pool: &[Tour<'_>]) -> f64 {
    population_pool.iter().map(|tour| tour.cost()).sum()
}

/// Average circuit cost over the pool.
pub fn average_cost(population_pool: &[Tour<'_>]) -> f64 {
    sum_cost(population_pool) / population_pool.len() as f64
}

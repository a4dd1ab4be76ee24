//! Parent selection and generational replacement.

use crate::sampling;
use crate::tour::Tour;
use rand::Rng;

/// Tournament selection: pick λ parents from the population.
///
/// Each round samples `k` distinct members with uniform probability and
/// emits the one of minimum cost.
///
/// # Panics
///
/// Panics if `k` exceeds the population size.
pub fn tournament<'a, R: Rng>(
    population: &[Tour<'a>],
    lambda: usize,
    k: usize,
    rng: &mut R,
) -> Vec<Tour<'a>> {
    let mut mating_pool = Vec::with_capacity(lambda);

    while mating_pool.len() < lambda {
        let candidates = sampling::sample_indexes(0, population.len(), k, rng);

        let best = candidates
            .iter()
            .map(|&index| &population[index])
            .min_by(|a, b| a.cost().partial_cmp(&b.cost()).unwrap())
            .expect("tournament candidates must not be empty");

        mating_pool.push(best.clone());
    }

    mating_pool
}

/// Exponential ranking selection: pick λ parents with replacement.
///
/// The population is sorted in descending cost order, so the most expensive
/// tour has rank `0` and the cheapest has rank `mu - 1`. Rank `r` receives
/// weight `1 - exp(-r)`, normalized over the pool.
pub fn exponential_ranking<'a, R: Rng>(
    population: &mut [Tour<'a>],
    lambda: usize,
    rng: &mut R,
) -> Vec<Tour<'a>> {
    population.sort_by(|a, b| b.cost().partial_cmp(&a.cost()).unwrap());

    let mu = population.len();

    let mut weights_by_rank: Vec<f64> = (0..mu).map(|rank| 1.0 - (-(rank as f64)).exp()).collect();

    let normalization: f64 = weights_by_rank.iter().sum();
    for weight in &mut weights_by_rank {
        *weight /= normalization;
    }

    sampling::weighted_sample(&weights_by_rank, lambda, true, rng)
        .into_iter()
        .map(|index| population[index].clone())
        .collect()
}

/// (μ, λ) generational replacement.
///
/// Draw μ survivors from the offspring pool without replacement, with
/// probability proportional to cost, so expensive offspring are the more
/// likely ones to survive. Elitism keeps the best-so-far monotone.
pub fn generational_replacement<'a, R: Rng>(
    offspring_pool: &[Tour<'a>],
    mu: usize,
    rng: &mut R,
) -> Vec<Tour<'a>> {
    let costs: Vec<f64> = offspring_pool.iter().map(|tour| tour.cost()).collect();

    sampling::weighted_sample(&costs, mu, false, rng)
        .into_iter()
        .map(|index| offspring_pool[index].clone())
        .collect()
}

/// Carry the best parent over when the new population regressed.
///
/// If every member of the new population costs more than the cheapest tour
/// of the mating pool, that tour overwrites position `1`. Position `0` is
/// reserved for the current best to survive through subsequent iterations.
pub fn apply_elitism<'a>(population: &mut [Tour<'a>], mating_pool: &[Tour<'a>]) {
    let best_parent = mating_pool
        .iter()
        .min_by(|a, b| a.cost().partial_cmp(&b.cost()).unwrap())
        .expect("mating pool must not be empty");

    let best_new_cost = population
        .iter()
        .map(|tour| tour.cost())
        .fold(f64::INFINITY, f64::min);

    if best_new_cost > best_parent.cost() {
        population[1] = best_parent.clone();
    }
}

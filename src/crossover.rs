//! Order crossover (OX) for permutation tours.

use crate::sampling;
use crate::tour::Tour;
use rand::Rng;
use std::collections::HashSet;

/// Build one offspring: keep `keeper[x..=y]` in place and fill the rest by
/// scanning `donor` cyclically from the position after `donor_cut_end`,
/// skipping values already present. The open positions are filled in order,
/// `0..x` first and then `y+1..n`.
fn offspring_of<'a>(
    keeper: &Tour<'a>,
    donor: &Tour<'a>,
    cut: (usize, usize),
    donor_cut_end: usize,
) -> Tour<'a> {
    let n = keeper.len();
    let (x, y) = cut;

    let mut child = vec![0; n];
    child[x..=y].copy_from_slice(&keeper.cities()[x..=y]);

    let kept: HashSet<usize> = keeper.cities()[x..=y].iter().copied().collect();

    let fill = (0..n)
        .map(|offset| donor[(donor_cut_end + 1 + offset) % n])
        .filter(|value| !kept.contains(value));

    for (position, value) in (0..x).chain(y + 1..n).zip(fill) {
        child[position] = value;
    }

    let mut offspring = Tour::new(child, keeper.matrix());
    offspring.align_to_depot();
    offspring
}

/// Single-cut order crossover.
///
/// Both parents share the sorted cut `(x, y)`. Offspring 1 preserves
/// `parent_1[x..=y]` and is completed from `parent_2`; offspring 2 is
/// produced symmetrically. Each offspring is rotated so that city `0` sits
/// at position `0`, with its cost unset.
pub fn order<'a>(
    parent_1: &Tour<'a>,
    parent_2: &Tour<'a>,
    cut: (usize, usize),
) -> (Tour<'a>, Tour<'a>) {
    let (_, y) = cut;
    (
        offspring_of(parent_1, parent_2, cut, y),
        offspring_of(parent_2, parent_1, cut, y),
    )
}

/// Variation of Davis' order crossover with one cut pair per parent.
///
/// Offspring 1 preserves `parent_1[x..=y]` and is completed with the
/// remaining values in the order they appear in `parent_2` read cyclically
/// from past its own cut `(w, z)`; offspring 2 swaps the roles.
pub fn order_two_cut<'a>(
    parent_1: &Tour<'a>,
    parent_2: &Tour<'a>,
    cut_1: (usize, usize),
    cut_2: (usize, usize),
) -> (Tour<'a>, Tour<'a>) {
    (
        offspring_of(parent_1, parent_2, cut_1, cut_2.1),
        offspring_of(parent_2, parent_1, cut_2, cut_1.1),
    )
}

/// Recombine consecutive pairs of the mating pool into the offspring pool.
///
/// For each pair a uniform draw is compared against `crossover_rate`: a draw
/// of at least the rate recombines the parents with two-cut OX, a smaller
/// draw copies both parents unchanged. The offspring pool has the same size
/// as the mating pool, whose length must be even.
pub fn sequential_crossover<'a, R: Rng>(
    mating_pool: &[Tour<'a>],
    crossover_rate: f64,
    rng: &mut R,
) -> Vec<Tour<'a>> {
    let n = mating_pool[0].len();
    let mut offspring_pool = Vec::with_capacity(mating_pool.len());

    for pair in mating_pool.chunks_exact(2) {
        let should_recombine = rng.gen::<f64>() >= crossover_rate;

        if should_recombine {
            let cut_1 = sampling::sample_pair(0, n, true, rng);
            let cut_2 = sampling::sample_pair(0, n, true, rng);

            let (offspring_1, offspring_2) = order_two_cut(&pair[0], &pair[1], cut_1, cut_2);
            offspring_pool.push(offspring_1);
            offspring_pool.push(offspring_2);
        } else {
            offspring_pool.push(pair[0].clone());
            offspring_pool.push(pair[1].clone());
        }
    }

    offspring_pool
}

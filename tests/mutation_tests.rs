//! Unit tests for mutation operators and the offspring mutation procedure.

use ga_tsp::config::MutationOp;
use ga_tsp::matrix::DistanceMatrix;
use ga_tsp::mutation::mutate_pool;
use ga_tsp::tour::Tour;
use rand::SeedableRng;
use rand_pcg::Pcg64;

fn line_matrix(n: usize) -> DistanceMatrix {
    DistanceMatrix::from_fn(n, |i, j| (j - i) as f64)
}

fn assert_is_permutation_with_depot(tour: &Tour<'_>) {
    assert_eq!(tour.cities()[0], 0, "depot must stay at position 0");

    let mut present = vec![false; tour.len()];
    for &city in tour.cities() {
        assert!(!present[city], "city {} present more than once", city);
        present[city] = true;
    }
    assert!(present.into_iter().all(|p| p));
}

#[test]
fn test_operator_variants_dispatch() {
    let matrix = line_matrix(5);

    let mut tour = Tour::new(vec![0, 1, 2, 3, 4], &matrix);
    MutationOp::Swap.apply(&mut tour, 1, 3);
    assert_eq!(tour.cities(), &[0, 3, 2, 1, 4]);

    let mut tour = Tour::new(vec![0, 1, 2, 3, 4], &matrix);
    MutationOp::LeftRotation.apply(&mut tour, 1, 3);
    assert_eq!(tour.cities(), &[0, 2, 3, 1, 4]);

    let mut tour = Tour::new(vec![0, 1, 2, 3, 4], &matrix);
    MutationOp::RightRotation.apply(&mut tour, 1, 3);
    assert_eq!(tour.cities(), &[0, 3, 1, 2, 4]);

    let mut tour = Tour::new(vec![0, 1, 2, 3, 4], &matrix);
    MutationOp::Inversion.apply(&mut tour, 1, 3);
    assert_eq!(tour.cities(), &[0, 3, 2, 1, 4]);
}

#[test]
fn test_mutate_pool_with_zero_probability_changes_nothing() {
    let matrix = line_matrix(8);
    let mut rng = Pcg64::seed_from_u64(42);

    let mut pool = vec![Tour::new((0..8).collect(), &matrix)];
    mutate_pool(&mut pool, 0.0, MutationOp::LeftRotation, &mut rng);

    assert_eq!(pool[0].cities(), &[0, 1, 2, 3, 4, 5, 6, 7]);
}

#[test]
fn test_mutate_pool_with_certain_probability_pairs_anchors() {
    let matrix = line_matrix(6);
    let mut rng = Pcg64::seed_from_u64(42);

    // Every draw lands below probability 1.0, so the anchors are all five
    // positions after the depot; the odd trailing anchor is dropped and the
    // pairs (1, 2) and (3, 4) are mutated.
    let mut pool = vec![Tour::new(vec![0, 1, 2, 3, 4, 5], &matrix)];
    mutate_pool(&mut pool, 1.0, MutationOp::Swap, &mut rng);

    assert_eq!(pool[0].cities(), &[0, 2, 1, 4, 3, 5]);
}

#[test]
fn test_mutate_pool_preserves_permutation_invariant() {
    let matrix = line_matrix(30);
    let mut rng = Pcg64::seed_from_u64(42);

    for op in [
        MutationOp::Swap,
        MutationOp::LeftRotation,
        MutationOp::RightRotation,
        MutationOp::Inversion,
    ] {
        let mut pool: Vec<Tour<'_>> = (0..10).map(|_| Tour::new((0..30).collect(), &matrix)).collect();

        mutate_pool(&mut pool, 0.5, op, &mut rng);

        for tour in &pool {
            assert_is_permutation_with_depot(tour);
        }
    }
}

#[test]
fn test_mutated_cost_matches_recomputation() {
    let matrix = line_matrix(12);
    let mut rng = Pcg64::seed_from_u64(42);

    let mut pool = vec![Tour::new((0..12).collect(), &matrix)];
    pool[0].cost();

    mutate_pool(&mut pool, 0.8, MutationOp::Inversion, &mut rng);

    let cities = pool[0].cities().to_vec();
    let n = cities.len();
    let expected: f64 = (0..n)
        .map(|i| matrix.at(cities[i], cities[(i + 1) % n]))
        .sum();

    assert_eq!(pool[0].cost(), expected);
}

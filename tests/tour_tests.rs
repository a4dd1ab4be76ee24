//! Unit tests for the tour entity and its mutation primitives.

use ga_tsp::matrix::DistanceMatrix;
use ga_tsp::tour::Tour;
use rand::SeedableRng;
use rand_pcg::Pcg64;

/// Distance matrix for points on a line at x = 0, 1, ..., n - 1.
fn line_matrix(n: usize) -> DistanceMatrix {
    DistanceMatrix::from_fn(n, |i, j| (j - i) as f64)
}

/// Recompute the closed-circuit cost directly from the matrix.
fn recompute_cost(tour: &Tour<'_>) -> f64 {
    let cities = tour.cities();
    let n = cities.len();
    (0..n)
        .map(|i| tour.matrix().at(cities[i], cities[(i + 1) % n]))
        .sum()
}

#[test]
fn test_cost_is_lazy_and_memoized() {
    let matrix = line_matrix(5);
    let tour = Tour::new(vec![0, 1, 2, 3, 4], &matrix);

    // 1 + 1 + 1 + 1 + 4, closing the circuit back to the depot
    assert_eq!(tour.cost(), 8.0);
    assert_eq!(tour.cost(), 8.0);
    assert_eq!(tour.cost(), recompute_cost(&tour));
}

#[test]
fn test_swap_invalidates_cached_cost() {
    let matrix = line_matrix(5);
    let mut tour = Tour::new(vec![0, 1, 2, 3, 4], &matrix);
    assert_eq!(tour.cost(), 8.0);

    tour.swap(1, 3);

    assert_eq!(tour.cities(), &[0, 3, 2, 1, 4]);
    assert_eq!(tour.cost(), recompute_cost(&tour));
    assert_eq!(tour.cost(), 12.0);
}

#[test]
fn test_swap_same_position_is_noop() {
    let matrix = line_matrix(5);
    let mut tour = Tour::new(vec![0, 1, 2, 3, 4], &matrix);

    tour.swap(2, 2);

    assert_eq!(tour.cities(), &[0, 1, 2, 3, 4]);
    assert_eq!(tour.cost(), 8.0);
}

#[test]
fn test_left_rotation() {
    let matrix = line_matrix(5);
    let mut tour = Tour::new(vec![0, 1, 2, 3, 4], &matrix);

    tour.left_rotation(1, 3);

    assert_eq!(tour.cities(), &[0, 2, 3, 1, 4]);
    assert_eq!(tour.cost(), recompute_cost(&tour));
}

#[test]
fn test_right_rotation() {
    let matrix = line_matrix(5);
    let mut tour = Tour::new(vec![0, 1, 2, 3, 4], &matrix);

    tour.right_rotation(1, 3);

    assert_eq!(tour.cities(), &[0, 3, 1, 2, 4]);
    assert_eq!(tour.cost(), recompute_cost(&tour));
}

#[test]
fn test_left_then_right_rotation_round_trips() {
    let matrix = line_matrix(6);
    let mut tour = Tour::new(vec![0, 1, 2, 3, 4, 5], &matrix);

    tour.left_rotation(1, 4);
    tour.right_rotation(1, 4);
    assert_eq!(tour.cities(), &[0, 1, 2, 3, 4, 5]);

    tour.right_rotation(2, 5);
    tour.left_rotation(2, 5);
    assert_eq!(tour.cities(), &[0, 1, 2, 3, 4, 5]);
}

#[test]
fn test_inversion_round_trips() {
    let matrix = line_matrix(6);
    let mut tour = Tour::new(vec![0, 1, 2, 3, 4, 5], &matrix);

    tour.inversion(1, 4);
    assert_eq!(tour.cities(), &[0, 4, 3, 2, 1, 5]);

    tour.inversion(1, 4);
    assert_eq!(tour.cities(), &[0, 1, 2, 3, 4, 5]);
}

#[test]
fn test_inversion_of_adjacent_pair_equals_swap() {
    let matrix = line_matrix(5);

    let mut inverted = Tour::new(vec![0, 1, 2, 3, 4], &matrix);
    inverted.inversion(2, 3);

    let mut swapped = Tour::new(vec![0, 1, 2, 3, 4], &matrix);
    swapped.swap(2, 3);

    assert_eq!(inverted.cities(), swapped.cities());
}

#[test]
fn test_inversion_cost_matches_recomputation() {
    let matrix = line_matrix(6);
    let mut tour = Tour::new(vec![0, 1, 2, 3, 4, 5], &matrix);
    tour.cost();

    tour.inversion(1, 4);

    assert_eq!(tour.cities(), &[0, 4, 3, 2, 1, 5]);
    assert_eq!(tour.cost(), recompute_cost(&tour));
}

#[test]
fn test_align_to_depot_preserves_cost() {
    let matrix = line_matrix(4);
    let mut tour = Tour::new(vec![2, 3, 0, 1], &matrix);
    let cost_before = tour.cost();

    tour.align_to_depot();

    assert_eq!(tour.cities()[0], 0);
    assert_eq!(tour.cities(), &[0, 1, 2, 3]);
    assert_eq!(tour.cost(), cost_before);
}

#[test]
fn test_shuffle_tail_keeps_depot_and_permutation() {
    let matrix = line_matrix(10);
    let mut rng = Pcg64::seed_from_u64(42);
    let mut tour = Tour::new((0..10).collect(), &matrix);

    tour.shuffle_tail(&mut rng);

    assert_eq!(tour.cities()[0], 0);

    let mut present = vec![false; 10];
    for &city in tour.cities() {
        assert!(!present[city], "city {} present more than once", city);
        present[city] = true;
    }
    assert!(present.into_iter().all(|p| p));

    assert_eq!(tour.cost(), recompute_cost(&tour));
}

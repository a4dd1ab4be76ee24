//! Integration tests for the genetic solver.

use ga_tsp::config::{MetaHeuristicParams, ParentSelection};
use ga_tsp::matrix::DistanceMatrix;
use ga_tsp::problem::{euclidean_distance, Point};
use ga_tsp::tour::Tour;
use ga_tsp::TspSolver;

fn line_matrix(n: usize) -> DistanceMatrix {
    DistanceMatrix::from_fn(n, |i, j| (j - i) as f64)
}

/// Irregular Euclidean instance with deterministic coordinates.
fn scattered_matrix(n: usize) -> DistanceMatrix {
    let points: Vec<Point> = (0..n)
        .map(|i| Point {
            x: (i * 37 % 100) as f64,
            y: (i * 53 % 100) as f64,
        })
        .collect();
    DistanceMatrix::from_fn(n, |i, j| euclidean_distance(&points[i], &points[j]))
}

fn small_params() -> MetaHeuristicParams {
    MetaHeuristicParams::new()
        .with_mu(4)
        .with_lambda(6)
        .with_tournament_k(2)
}

fn assert_is_permutation_with_depot(tour: &Tour<'_>) {
    assert_eq!(tour.cities()[0], 0, "depot must sit at position 0");

    let mut present = vec![false; tour.len()];
    for &city in tour.cities() {
        assert!(!present[city], "city {} present more than once", city);
        present[city] = true;
    }
    assert!(present.into_iter().all(|p| p));
}

#[test]
fn test_unit_square_is_solved_in_one_generation() {
    let points = [
        Point { x: 0.0, y: 0.0 },
        Point { x: 0.0, y: 1.0 },
        Point { x: 1.0, y: 1.0 },
        Point { x: 1.0, y: 0.0 },
    ];
    let matrix = DistanceMatrix::from_fn(4, |i, j| euclidean_distance(&points[i], &points[j]));

    let params = small_params().with_max_n_generations(1);
    let mut solver = TspSolver::new(&matrix, params, 42).unwrap();
    let best = solver.solve();

    assert_eq!(best.cost(), 4.0);
    assert_is_permutation_with_depot(&best);
}

#[test]
fn test_colinear_instance_keeps_the_seed_optimum() {
    let matrix = line_matrix(5);

    let params = small_params().with_max_n_generations(50);
    let mut solver = TspSolver::new(&matrix, params, 42).unwrap();
    let best = solver.solve();

    // The farthest-insertion seed already costs 8 and the best-so-far never
    // degrades, so the final tour costs 8 as well.
    assert_eq!(best.cost(), 8.0);
    assert_is_permutation_with_depot(&best);
}

#[test]
fn test_best_cost_is_monotone_across_generations() {
    let matrix = scattered_matrix(10);

    let mut solver = TspSolver::new(&matrix, small_params(), 42).unwrap();
    solver.initialize();

    let mut previous = solver.best_cost().unwrap();
    for _ in 0..100 {
        solver.perform_iteration();
        let current = solver.best_cost().unwrap();
        assert!(
            current <= previous,
            "best cost regressed from {} to {}",
            previous,
            current
        );
        previous = current;
    }
}

#[test]
fn test_population_invariants_hold_after_a_run() {
    let matrix = scattered_matrix(12);

    let params = small_params().with_max_n_generations(30);
    let mut solver = TspSolver::new(&matrix, params, 42).unwrap();
    solver.solve();

    assert_eq!(solver.population.len(), solver.params().mu);
    for tour in &solver.population {
        assert_is_permutation_with_depot(tour);
    }
}

#[test]
fn test_fixed_seed_reproduces_the_search() {
    let matrix = scattered_matrix(15);
    let params = small_params().with_max_n_generations(30);

    let mut first = TspSolver::new(&matrix, params.clone(), 7).unwrap();
    let mut second = TspSolver::new(&matrix, params, 7).unwrap();

    let best_first = first.solve();
    let best_second = second.solve();

    assert_eq!(best_first.cities(), best_second.cities());
    assert_eq!(best_first.cost(), best_second.cost());
    assert_eq!(first.n_generations, second.n_generations);
}

#[test]
fn test_stagnation_cutoff_terminates_the_search() {
    let matrix = line_matrix(6);

    let params = small_params()
        .with_max_n_generations(1_000_000)
        .with_max_n_generations_without_improvement(5);
    let mut solver = TspSolver::new(&matrix, params, 42).unwrap();
    solver.solve();

    assert!(solver.n_generations < 1_000_000);
    assert!(solver.n_generations_without_improvement >= 5);
}

#[test]
fn test_exponential_ranking_strategy_runs() {
    let matrix = scattered_matrix(10);

    let params = small_params()
        .with_parent_selection(ParentSelection::ExponentialRanking)
        .with_max_n_generations(20);
    let mut solver = TspSolver::new(&matrix, params, 42).unwrap();
    let best = solver.solve();

    assert_is_permutation_with_depot(&best);
}

#[test]
fn test_invalid_parameters_are_rejected() {
    let matrix = line_matrix(6);

    assert!(TspSolver::new(&matrix, small_params().with_mu(3), 42).is_err());
    assert!(TspSolver::new(&matrix, small_params().with_lambda(4), 42).is_err());
    assert!(TspSolver::new(&matrix, small_params().with_tournament_k(5), 42).is_err());
    assert!(TspSolver::new(&matrix, small_params().with_mutation_probability(1.5), 42).is_err());
    assert!(TspSolver::new(&matrix, small_params().with_crossover_rate(-0.1), 42).is_err());
}

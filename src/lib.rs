//! # GA-TSP
//!
//! An evolutionary metaheuristic solver for the symmetric Traveling
//! Salesman Problem over permutation-encoded tours.
//!
//! The search is seeded by the farthest-insertion constructive heuristic,
//! then iterates parent selection, order crossover, positional mutation,
//! (μ, λ) generational replacement with elitism and a periodic
//! variable-neighborhood local search, until a stagnation cutoff, a
//! generation cap or a cooperative stop flag ends it. The best tour found so
//! far is always available and never degrades.

pub mod config;
pub mod crossover;
pub mod deadline;
pub mod farthest_insertion;
pub mod local_search;
pub mod matrix;
pub mod mutation;
pub mod population;
pub mod problem;
pub mod sampling;
pub mod selection;
pub mod tour;

use crate::config::{ConfigError, MetaHeuristicParams, ParentSelection};
use crate::deadline::StopFlag;
use crate::matrix::DistanceMatrix;
use crate::tour::Tour;

use log::{debug, info};
use rand::SeedableRng;
use rand_pcg::Pcg64;

/// The genetic solver that orchestrates the evolutionary search.
pub struct TspSolver<'a> {
    matrix: &'a DistanceMatrix,
    params: MetaHeuristicParams,
    /// Current population pool of μ tours.
    pub population: Vec<Tour<'a>>,
    /// Best solution found so far. Present after initialization.
    pub best_solution: Option<Tour<'a>>,
    /// Number of generations performed.
    pub n_generations: usize,
    /// Number of consecutive generations without strict improvement.
    pub n_generations_without_improvement: usize,
    rng: Pcg64,
    stop_flag: StopFlag,
}

impl<'a> TspSolver<'a> {
    /// Create a solver for the given distance matrix.
    ///
    /// The parameters are validated here; the RNG is seeded from `seed`, so
    /// two solvers built with the same matrix, parameters and seed walk the
    /// same search trajectory.
    pub fn new(
        matrix: &'a DistanceMatrix,
        params: MetaHeuristicParams,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        params.validate()?;

        Ok(TspSolver {
            matrix,
            params,
            population: Vec::new(),
            best_solution: None,
            n_generations: 0,
            n_generations_without_improvement: 0,
            rng: Pcg64::seed_from_u64(seed),
            stop_flag: StopFlag::new(),
        })
    }

    /// Attach an externally owned stop flag.
    ///
    /// Tripping the flag ends the search at the next generation boundary;
    /// no operator is interrupted mid-generation.
    pub fn with_stop_flag(mut self, stop_flag: StopFlag) -> Self {
        self.stop_flag = stop_flag;
        self
    }

    /// The parameters this solver runs with.
    pub fn params(&self) -> &MetaHeuristicParams {
        &self.params
    }

    /// Cost of the best solution found so far, if any.
    pub fn best_cost(&self) -> Option<f64> {
        self.best_solution.as_ref().map(|tour| tour.cost())
    }

    /// Build the initial population and polish it.
    ///
    /// The farthest-insertion tour seeds the pool (plus μ − 1 depot-fixed
    /// shuffles of it), and one complete local-search pass is run over the
    /// whole pool before the first generation.
    pub fn initialize(&mut self) {
        let heuristic_tour = Tour::new(farthest_insertion::farthest_insertion(self.matrix), self.matrix);

        info!(
            "farthest-insertion seed: cost {:.2} over {} cities",
            heuristic_tour.cost(),
            heuristic_tour.len()
        );

        self.population = population::generate_initial(
            &heuristic_tour,
            self.params.mu,
            self.params.include_heuristic,
            &mut self.rng,
        );

        local_search::improve_generation_complete(&mut self.population);

        self.best_solution = Some(self.current_best().clone());

        debug!("gen #i | best_(i-1) | best_i | avg_cost | generations_without_improvement");
    }

    /// Run the search until a stop condition trips, then return the best
    /// solution found.
    pub fn solve(&mut self) -> Tour<'a> {
        self.initialize();

        while self.should_continue() {
            self.perform_iteration();
        }

        self.finalize()
    }

    /// Whether another generation should run.
    ///
    /// This is the only point where the stop flag is read; the search exits
    /// gracefully between generations with a valid best solution.
    pub fn should_continue(&self) -> bool {
        !self.stop_flag.is_tripped()
            && self.n_generations_without_improvement
                < self.params.max_n_generations_without_improvement
            && self.n_generations < self.params.max_n_generations
    }

    /// Run a single generation.
    pub fn perform_iteration(&mut self) {
        let mating_pool = match self.params.parent_selection {
            ParentSelection::Tournament => selection::tournament(
                &self.population,
                self.params.lambda,
                self.params.tournament_k,
                &mut self.rng,
            ),
            ParentSelection::ExponentialRanking => selection::exponential_ranking(
                &mut self.population,
                self.params.lambda,
                &mut self.rng,
            ),
        };

        let mut offspring_pool =
            crossover::sequential_crossover(&mating_pool, self.params.crossover_rate, &mut self.rng);

        mutation::mutate_pool(
            &mut offspring_pool,
            self.params.mutation_probability,
            self.params.mutation_op,
            &mut self.rng,
        );

        self.population =
            selection::generational_replacement(&offspring_pool, self.params.mu, &mut self.rng);
        selection::apply_elitism(&mut self.population, &mating_pool);

        self.n_generations += 1;

        if self.n_generations_without_improvement % 20 != 0 {
            local_search::improve_generation_greedy(&mut self.population, &mut self.rng);
        }

        let previous_best_cost = self
            .best_cost()
            .expect("best solution is set after initialization");

        self.update_best_solution();

        debug!(
            "#{} | {:.2} | {:.2} | {:.2} | {}",
            self.n_generations,
            previous_best_cost,
            self.best_cost().unwrap_or(previous_best_cost),
            population::average_cost(&self.population),
            self.n_generations_without_improvement
        );
    }

    /// One last windowed polish, then hand out the best solution.
    fn finalize(&mut self) -> Tour<'a> {
        local_search::improve_generation_greedy(&mut self.population, &mut self.rng);
        self.update_best_solution();

        self.best_solution
            .clone()
            .expect("best solution is set after initialization")
    }

    /// Cheapest member of the current population.
    fn current_best(&self) -> &Tour<'a> {
        self.population
            .iter()
            .min_by(|a, b| a.cost().partial_cmp(&b.cost()).unwrap())
            .expect("population must not be empty")
    }

    /// Compare the population's best against the best-so-far and update the
    /// stagnation counter accordingly.
    fn update_best_solution(&mut self) {
        let current_best = self.current_best().clone();

        let improved = match self.best_cost() {
            Some(best_cost) => current_best.cost() < best_cost,
            None => true,
        };

        if improved {
            self.best_solution = Some(current_best);
            self.n_generations_without_improvement = 0;
        } else {
            self.n_generations_without_improvement += 1;
        }
    }
}

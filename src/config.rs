//! Configuration parameters for the evolutionary TSP solver.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Parent selection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParentSelection {
    /// Tournament of size `tournament_k`.
    Tournament,
    /// Exponential ranking with weights `1 - exp(-rank)`.
    ExponentialRanking,
}

/// Positional mutation operator applied to offspring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MutationOp {
    Swap,
    LeftRotation,
    RightRotation,
    Inversion,
}

/// Invalid parameter errors, detected before the search starts.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("mutation_probability must lie in [0, 1], got {0}")]
    MutationProbability(f64),
    #[error("crossover_rate must lie in [0, 1], got {0}")]
    CrossoverRate(f64),
    #[error("mu must be an even integer >= 2, got {0}")]
    Mu(usize),
    #[error("lambda must be an even integer >= mu + 1, got lambda={lambda} with mu={mu}")]
    Lambda { lambda: usize, mu: usize },
    #[error("tournament_k must lie in [2, mu], got k={k} with mu={mu}")]
    TournamentK { k: usize, mu: usize },
    #[error("max_n_generations_without_improvement must be positive")]
    MaxGenerationsWithoutImprovement,
    #[error("max_n_generations must be positive")]
    MaxGenerations,
}

/// Settings that regulate the metaheuristic search strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaHeuristicParams {
    /// Per-position chance that a position becomes a mutation anchor.
    /// Acceptable range: `[0, 1]`.
    pub mutation_probability: f64,
    /// Probability gate deciding whether a selected parent pair is
    /// recombined or simply copied. Acceptable range: `[0, 1]`.
    pub crossover_rate: f64,
    /// Size of the population pool (μ). Must be an even number >= 2.
    pub mu: usize,
    /// Size of the offspring pool (λ). Must be an even number >= μ + 1.
    pub lambda: usize,
    /// Size of the tournament. Acceptable range: `[2, mu]`.
    pub tournament_k: usize,
    /// Maximum number of generations without improvement.
    pub max_n_generations_without_improvement: usize,
    /// Maximum total number of generations.
    pub max_n_generations: usize,
    /// Seed the initial population with the farthest-insertion tour.
    pub include_heuristic: bool,
    /// Parent selection strategy.
    pub parent_selection: ParentSelection,
    /// Mutation operator applied to offspring anchors.
    pub mutation_op: MutationOp,
}

impl Default for MetaHeuristicParams {
    fn default() -> Self {
        MetaHeuristicParams {
            mutation_probability: 0.018317703302043006,
            crossover_rate: 0.9254767404002548,
            mu: 40,
            lambda: 60,
            tournament_k: 13,
            max_n_generations_without_improvement: 177,
            max_n_generations: 408,
            include_heuristic: true,
            parent_selection: ParentSelection::Tournament,
            mutation_op: MutationOp::LeftRotation,
        }
    }
}

impl MetaHeuristicParams {
    /// Create parameters with the calibrated default values.
    pub fn new() -> Self {
        MetaHeuristicParams::default()
    }

    /// Set the per-position mutation probability.
    pub fn with_mutation_probability(mut self, p: f64) -> Self {
        self.mutation_probability = p;
        self
    }

    /// Set the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Set the population pool size.
    pub fn with_mu(mut self, mu: usize) -> Self {
        self.mu = mu;
        self
    }

    /// Set the offspring pool size.
    pub fn with_lambda(mut self, lambda: usize) -> Self {
        self.lambda = lambda;
        self
    }

    /// Set the tournament size.
    pub fn with_tournament_k(mut self, k: usize) -> Self {
        self.tournament_k = k;
        self
    }

    /// Set the stagnation cutoff.
    pub fn with_max_n_generations_without_improvement(mut self, n: usize) -> Self {
        self.max_n_generations_without_improvement = n;
        self
    }

    /// Set the hard generation cap.
    pub fn with_max_n_generations(mut self, n: usize) -> Self {
        self.max_n_generations = n;
        self
    }

    /// Choose whether the heuristic tour joins the initial population.
    pub fn with_include_heuristic(mut self, include: bool) -> Self {
        self.include_heuristic = include;
        self
    }

    /// Set the parent selection strategy.
    pub fn with_parent_selection(mut self, strategy: ParentSelection) -> Self {
        self.parent_selection = strategy;
        self
    }

    /// Set the mutation operator.
    pub fn with_mutation_op(mut self, op: MutationOp) -> Self {
        self.mutation_op = op;
        self
    }

    /// Check every parameter against its acceptable domain.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.mutation_probability) {
            return Err(ConfigError::MutationProbability(self.mutation_probability));
        }

        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(ConfigError::CrossoverRate(self.crossover_rate));
        }

        if self.mu < 2 || self.mu % 2 != 0 {
            return Err(ConfigError::Mu(self.mu));
        }

        if self.lambda < self.mu + 1 || self.lambda % 2 != 0 {
            return Err(ConfigError::Lambda {
                lambda: self.lambda,
                mu: self.mu,
            });
        }

        if self.tournament_k < 2 || self.tournament_k > self.mu {
            return Err(ConfigError::TournamentK {
                k: self.tournament_k,
                mu: self.mu,
            });
        }

        if self.max_n_generations_without_improvement == 0 {
            return Err(ConfigError::MaxGenerationsWithoutImprovement);
        }

        if self.max_n_generations == 0 {
            return Err(ConfigError::MaxGenerations);
        }

        Ok(())
    }
}

//! Command-line driver for the evolutionary TSP solver.

use clap::Parser;
use ga_tsp::config::MetaHeuristicParams;
use ga_tsp::deadline::run_with_deadline;
use ga_tsp::problem::TspInstance;

use std::path::PathBuf;
use std::process;
use std::time::{Duration, Instant};

/// Metaheuristic solver for the symmetric TSP.
#[derive(Parser, Debug)]
#[command(name = "ga-tsp")]
struct Args {
    /// Name of the TSP instance file
    #[arg(short = 'f', long)]
    filename: PathBuf,

    /// Timeout in milliseconds
    #[arg(short = 't', long, default_value_t = 1000)]
    timeout_ms: u64,

    /// GA mutation probability
    #[arg(short = 'm', long, default_value_t = 0.018317703302043006)]
    mutation_probability: f64,

    /// GA crossover rate
    #[arg(short = 'c', long, default_value_t = 0.9254767404002548)]
    crossover_rate: f64,

    /// GA population pool size
    #[arg(long, default_value_t = 40)]
    mu: usize,

    /// GA offspring pool size
    #[arg(long, default_value_t = 60)]
    lambda: usize,

    /// Maximum number of generations without solution improvement
    #[arg(short = 'N', long = "max-gen-no-improvement", default_value_t = 177)]
    max_gen_no_improvement: usize,

    /// Maximum number of generations
    #[arg(short = 'M', long = "max-gen", default_value_t = 408)]
    max_gen: usize,

    /// Size of the GA tournament
    #[arg(short = 'k', long = "tournament-k", default_value_t = 13)]
    tournament_k: usize,

    /// Print the best tour, one city per line
    #[arg(short = 's', long = "show-path")]
    show_path: bool,

    /// RNG seed; drawn from entropy when absent
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    env_logger::init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(error) => {
            let _ = error.print();
            process::exit(if error.use_stderr() { 1 } else { 0 });
        }
    };

    let started = Instant::now();

    let instance = match TspInstance::from_file(&args.filename) {
        Ok(instance) => instance,
        Err(error) => {
            eprintln!("{error}");
            process::exit(1);
        }
    };

    let matrix = instance.distance_matrix();
    println!("N: {}", matrix.size());

    let params = MetaHeuristicParams::new()
        .with_mutation_probability(args.mutation_probability)
        .with_crossover_rate(args.crossover_rate)
        .with_mu(args.mu)
        .with_lambda(args.lambda)
        .with_tournament_k(args.tournament_k)
        .with_max_n_generations_without_improvement(args.max_gen_no_improvement)
        .with_max_n_generations(args.max_gen);

    let seed = args.seed.unwrap_or_else(rand::random);
    let budget = Duration::from_millis(args.timeout_ms);

    let outcome = match run_with_deadline(&matrix, params, seed, budget) {
        Ok(outcome) => outcome,
        Err(error) => {
            eprintln!("{error}");
            process::exit(1);
        }
    };

    println!("program_time_ms: {}", started.elapsed().as_millis());
    println!("was_interrupted: {}", outcome.was_interrupted);
    println!("solution_cost: {:.6}", outcome.best.cost());

    if args.show_path {
        for &city in outcome.best.cities() {
            println!("{city}");
        }
    }
}

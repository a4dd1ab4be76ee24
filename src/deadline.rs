//! Cooperative time-bounded execution of the solver.
//!
//! The search runs on a single worker thread; the supervisor on the calling
//! thread enforces the wall-clock budget and signals a cooperative stop. The
//! only datum crossing the thread boundary during the search is the stop
//! flag; the worker's result becomes visible through the join.

use crate::config::{ConfigError, MetaHeuristicParams};
use crate::matrix::DistanceMatrix;
use crate::tour::Tour;
use crate::TspSolver;

use log::info;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread;
use std::time::{Duration, Instant};

/// One-way latch signalling the solver to stop.
///
/// The flag only ever goes from unset to set. It is read by the worker at
/// generation boundaries and written by the supervisor (or any other
/// holder of a clone); relaxed ordering suffices because the worker's
/// result is published by the join, not by the flag.
#[derive(Clone, Debug, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    /// Create an untripped flag.
    pub fn new() -> Self {
        StopFlag::default()
    }

    /// Trip the latch.
    pub fn trip(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether the latch has been tripped.
    pub fn is_tripped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Result of a deadline-supervised run.
pub struct SearchOutcome<'a> {
    /// The best tour found.
    pub best: Tour<'a>,
    /// Whether the supervisor tripped the stop flag before the search
    /// completed naturally.
    pub was_interrupted: bool,
    /// Number of generations the worker performed.
    pub n_generations: usize,
    /// Wall-clock time spent inside the harness.
    pub elapsed: Duration,
}

/// Run the full search on a worker thread under a wall-clock budget.
///
/// The supervisor waits on a condition variable until the worker reports
/// completion or the budget elapses, trips the stop flag either way and
/// joins the worker. On a timeout the worker finishes its current
/// generation, so it returns within one iteration past the deadline, still
/// carrying a valid best solution.
pub fn run_with_deadline<'a>(
    matrix: &'a DistanceMatrix,
    params: MetaHeuristicParams,
    seed: u64,
    budget: Duration,
) -> Result<SearchOutcome<'a>, ConfigError> {
    let stop_flag = StopFlag::new();
    let mut solver = TspSolver::new(matrix, params, seed)?.with_stop_flag(stop_flag.clone());

    let started = Instant::now();
    let finished = (Mutex::new(false), Condvar::new());

    let (best, n_generations, was_interrupted) = thread::scope(|scope| {
        let finished = &finished;

        let worker = scope.spawn(move || {
            let best = solver.solve();
            let n_generations = solver.n_generations;

            let (lock, condvar) = finished;
            *lock.lock().unwrap() = true;
            condvar.notify_one();

            (best, n_generations)
        });

        let (lock, condvar) = finished;
        let guard = lock.lock().unwrap();
        let (guard, wait) = condvar
            .wait_timeout_while(guard, budget, |done| !*done)
            .unwrap();
        let was_interrupted = wait.timed_out();
        drop(guard);

        stop_flag.trip();
        let (best, n_generations) = worker.join().expect("search worker panicked");

        (best, n_generations, was_interrupted)
    });

    if was_interrupted {
        info!("search interrupted after {:?}", started.elapsed());
    }

    Ok(SearchOutcome {
        best,
        was_interrupted,
        n_generations,
        elapsed: started.elapsed(),
    })
}

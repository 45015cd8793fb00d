//! Tabu Search execution engine.
//!
//! # Algorithm
//!
//! 1. Generate initial solution, record it as best and as tabu
//! 2. At each iteration:
//!    a. Generate the neighborhood and shuffle it
//!    b. Drop neighbors present in the tabu memory
//!    c. Select the cheapest remaining neighbor (first seen wins ties)
//!    d. Move there, even if worse, and push it onto the tabu memory
//!    e. Update global best if strictly improved
//! 3. Terminate after the iteration budget, when every neighbor is tabu
//!    (or none exists), or on cancellation
//!
//! # Reference
//!
//! Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! Glover, F. (1990). "Tabu Search—Part II", *ORSA Journal on Computing* 2(1), 4-32.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::config::TabuConfig;
use super::list::TabuList;
use super::observer::{NoopObserver, Progress, SearchObserver};
use super::types::TabuProblem;
use crate::error::{Error, Result};

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// `max_iterations` steps were taken.
    IterationBudget,
    /// Every neighbor was tabu, or the neighborhood was empty.
    Stagnation,
    /// The cancellation flag was raised.
    Cancelled,
}

/// Result of a Tabu Search run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabuResult<S: Clone> {
    /// Best solution found.
    pub best: S,
    /// Cost of the best solution.
    pub best_cost: f64,
    /// Number of moves taken.
    pub iterations: usize,
    /// Moves taken when the best solution was reached (0 = initial solution).
    pub best_iteration: usize,
    /// Why the run stopped.
    pub termination: Termination,
    /// Best cost after initialization and after every move.
    pub cost_history: Vec<f64>,
}

/// Tabu Search runner.
pub struct TabuRunner;

impl TabuRunner {
    /// Executes Tabu Search on the given problem.
    pub fn run<P: TabuProblem>(
        problem: &P,
        config: &TabuConfig,
    ) -> Result<TabuResult<P::Solution>> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs with an optional cancellation token, checked between iterations.
    pub fn run_with_cancel<P: TabuProblem>(
        problem: &P,
        config: &TabuConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<TabuResult<P::Solution>> {
        Self::run_observed(problem, config, cancel, &mut NoopObserver)
    }

    /// Runs with cancellation and a progress observer.
    ///
    /// The observer is called on iterations `0, k, 2k, ...` where `k` is
    /// `config.report_interval`.
    #[tracing::instrument(
        level = "debug",
        name = "Tabu Search",
        skip_all,
        fields(max_iterations = config.max_iterations, tabu_capacity = config.tabu_capacity)
    )]
    pub fn run_observed<P, O>(
        problem: &P,
        config: &TabuConfig,
        cancel: Option<Arc<AtomicBool>>,
        observer: &mut O,
    ) -> Result<TabuResult<P::Solution>>
    where
        P: TabuProblem,
        O: SearchObserver + ?Sized,
    {
        config.validate()?;

        let mut rng = match config.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::seed_from_u64(rand::random()),
        };

        // Initialize
        let mut current = problem.initial_solution(&mut rng);
        let mut best = current.clone();
        let mut best_cost = problem.cost(&current);
        let mut best_iteration = 0;

        let mut tabu = TabuList::new(config.tabu_capacity);
        tabu.push(current.clone());

        let mut cost_history = Vec::with_capacity(config.max_iterations + 1);
        cost_history.push(best_cost);

        let mut termination = Termination::IterationBudget;

        for iteration in 0..config.max_iterations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    tracing::debug!(iteration, "tabu search cancelled");
                    termination = Termination::Cancelled;
                    break;
                }
            }

            let mut candidates = problem.neighbors(&current);
            candidates.shuffle(&mut rng);
            candidates.retain(|c| !tabu.contains(c));

            let costs = score_candidates(problem, &candidates, config.parallel);
            let Some((index, move_cost)) = first_minimum(&costs) else {
                tracing::debug!(iteration, "no admissible neighbor; stopping");
                termination = Termination::Stagnation;
                break;
            };

            // Move to neighbor
            current = candidates.swap_remove(index);
            tabu.push(current.clone());

            // Update global best
            if move_cost < best_cost {
                best = current.clone();
                best_cost = move_cost;
                best_iteration = iteration + 1;
            }

            cost_history.push(best_cost);

            if iteration % config.report_interval == 0 {
                tracing::info!(
                    iteration,
                    current_cost = move_cost,
                    best_cost,
                    "tabu search progress"
                );
                observer.on_progress(&Progress {
                    iteration,
                    current_cost: move_cost,
                    best_cost,
                });
            }
        }

        let iterations = cost_history.len() - 1;
        tracing::info!(
            iterations,
            best_iteration,
            best_cost,
            ?termination,
            "tabu search finished"
        );

        Ok(TabuResult {
            best,
            best_cost,
            iterations,
            best_iteration,
            termination,
            cost_history,
        })
    }

    /// Runs one independent search per seed and keeps the cheapest result.
    ///
    /// With the `parallel` feature the runs execute on the rayon pool.
    /// Ties go to the earliest seed.
    pub fn run_portfolio<P: TabuProblem>(
        problem: &P,
        config: &TabuConfig,
        seeds: &[u64],
    ) -> Result<TabuResult<P::Solution>> {
        if seeds.is_empty() {
            return Err(Error::InvalidConfig(
                "portfolio needs at least one seed".into(),
            ));
        }

        let results = run_seeds(problem, config, seeds)?;
        let mut best: Option<TabuResult<P::Solution>> = None;
        for result in results {
            if best.as_ref().is_none_or(|b| result.best_cost < b.best_cost) {
                best = Some(result);
            }
        }
        best.ok_or_else(|| Error::InvalidConfig("portfolio produced no result".into()))
    }
}

/// Index and cost of the first strictly smallest entry.
fn first_minimum(costs: &[f64]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &c) in costs.iter().enumerate() {
        if best.is_none_or(|(_, b)| c < b) {
            best = Some((i, c));
        }
    }
    best
}

#[cfg(feature = "parallel")]
fn score_candidates<P: TabuProblem>(
    problem: &P,
    candidates: &[P::Solution],
    parallel: bool,
) -> Vec<f64> {
    if parallel {
        candidates.par_iter().map(|c| problem.cost(c)).collect()
    } else {
        candidates.iter().map(|c| problem.cost(c)).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn score_candidates<P: TabuProblem>(
    problem: &P,
    candidates: &[P::Solution],
    _parallel: bool,
) -> Vec<f64> {
    candidates.iter().map(|c| problem.cost(c)).collect()
}

#[cfg(feature = "parallel")]
fn run_seeds<P: TabuProblem>(
    problem: &P,
    config: &TabuConfig,
    seeds: &[u64],
) -> Result<Vec<TabuResult<P::Solution>>> {
    seeds
        .par_iter()
        .map(|&seed| TabuRunner::run(problem, &config.clone().with_seed(seed)))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn run_seeds<P: TabuProblem>(
    problem: &P,
    config: &TabuConfig,
    seeds: &[u64],
) -> Result<Vec<TabuResult<P::Solution>>> {
    seeds
        .iter()
        .map(|&seed| TabuRunner::run(problem, &config.clone().with_seed(seed)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tabu::{TabuConfig, TabuProblem};
    use rand::Rng;

    // ---- Quadratic minimization: f(x) = (x - 5)^2, minimum at x = 5 ----

    struct DiscretizedQuadratic;

    impl TabuProblem for DiscretizedQuadratic {
        type Solution = i32;

        fn initial_solution<R: Rng>(&self, rng: &mut R) -> i32 {
            rng.random_range(-50..50)
        }

        fn cost(&self, &x: &i32) -> f64 {
            let d = x as f64 - 5.0;
            d * d
        }

        fn neighbors(&self, &x: &i32) -> Vec<i32> {
            vec![x - 1, x + 1]
        }
    }

    #[test]
    fn test_tabu_quadratic_finds_optimum() {
        let config = TabuConfig::default()
            .with_max_iterations(200)
            .with_tabu_capacity(3)
            .with_seed(42);

        let result = TabuRunner::run(&DiscretizedQuadratic, &config).unwrap();

        assert_eq!(result.best, 5, "expected optimum at x=5, got {}", result.best);
        assert!(result.best_cost < 1e-10);
    }

    #[test]
    fn test_tabu_cost_history_non_increasing() {
        let config = TabuConfig::default()
            .with_max_iterations(100)
            .with_tabu_capacity(5)
            .with_seed(42);

        let result = TabuRunner::run(&DiscretizedQuadratic, &config).unwrap();

        assert_eq!(result.cost_history.len(), result.iterations + 1);
        for window in result.cost_history.windows(2) {
            assert!(
                window[1] <= window[0],
                "best cost history should be non-increasing: {} > {}",
                window[1],
                window[0]
            );
        }
    }

    #[test]
    fn test_tabu_accepts_worsening_moves() {
        // With a long memory the walk cannot turn back at x = 5 and keeps
        // going uphill, yet the best stays at the optimum.
        let config = TabuConfig::default()
            .with_max_iterations(150)
            .with_tabu_capacity(1000)
            .with_seed(1);

        let result = TabuRunner::run(&DiscretizedQuadratic, &config).unwrap();

        assert_eq!(result.best, 5);
        assert_eq!(result.iterations, 150);
        assert!(result.best_iteration < result.iterations);
    }

    // ---- Permutation sorting with swap neighborhoods ----

    struct PermSortTabu {
        n: usize,
    }

    impl TabuProblem for PermSortTabu {
        type Solution = Vec<usize>;

        fn initial_solution<R: Rng>(&self, rng: &mut R) -> Vec<usize> {
            let mut perm: Vec<usize> = (0..self.n).collect();
            perm.shuffle(rng);
            perm
        }

        fn cost(&self, perm: &Vec<usize>) -> f64 {
            perm.iter().enumerate().filter(|&(i, &v)| i != v).count() as f64
        }

        fn neighbors(&self, perm: &Vec<usize>) -> Vec<Vec<usize>> {
            let n = perm.len();
            let mut out = Vec::new();
            for i in 0..n {
                for j in (i + 1)..n {
                    let mut next = perm.clone();
                    next.swap(i, j);
                    out.push(next);
                }
            }
            out
        }
    }

    #[test]
    fn test_tabu_permutation_sort() {
        let config = TabuConfig::default()
            .with_max_iterations(500)
            .with_tabu_capacity(5)
            .with_seed(42);

        let result = TabuRunner::run(&PermSortTabu { n: 8 }, &config).unwrap();

        assert!(
            result.best_cost < 1e-10,
            "expected sorted permutation (cost 0), got cost {}",
            result.best_cost
        );
    }

    #[test]
    fn test_tabu_empty_neighborhood() {
        struct EmptyNeighborhood;

        impl TabuProblem for EmptyNeighborhood {
            type Solution = i32;

            fn initial_solution<R: Rng>(&self, _rng: &mut R) -> i32 {
                0
            }

            fn cost(&self, &x: &i32) -> f64 {
                x as f64
            }

            fn neighbors(&self, _sol: &i32) -> Vec<i32> {
                vec![]
            }
        }

        let config = TabuConfig::default().with_seed(42);
        let result = TabuRunner::run(&EmptyNeighborhood, &config).unwrap();

        assert_eq!(result.best, 0);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.termination, Termination::Stagnation);
    }

    #[test]
    fn test_tabu_all_neighbors_tabu_stops() {
        // Two states flipping into each other: after one move the only
        // neighbor is the tabu initial state.
        struct Toggle;

        impl TabuProblem for Toggle {
            type Solution = bool;

            fn initial_solution<R: Rng>(&self, _rng: &mut R) -> bool {
                false
            }

            fn cost(&self, &b: &bool) -> f64 {
                if b {
                    1.0
                } else {
                    2.0
                }
            }

            fn neighbors(&self, &b: &bool) -> Vec<bool> {
                vec![!b]
            }
        }

        let config = TabuConfig::default().with_seed(3);
        let result = TabuRunner::run(&Toggle, &config).unwrap();
        assert!(result.best);
        assert_eq!(result.iterations, 1);
        assert_eq!(result.termination, Termination::Stagnation);
    }

    #[test]
    fn test_zero_capacity_runs_full_budget() {
        let config = TabuConfig::default()
            .with_max_iterations(37)
            .with_tabu_capacity(0)
            .with_seed(9);
        let result = TabuRunner::run(&DiscretizedQuadratic, &config).unwrap();
        assert_eq!(result.iterations, 37);
        assert_eq!(result.termination, Termination::IterationBudget);
    }

    #[test]
    fn test_zero_budget_returns_initial() {
        let config = TabuConfig::default().with_max_iterations(0).with_seed(4);
        let result = TabuRunner::run(&DiscretizedQuadratic, &config).unwrap();
        assert_eq!(result.iterations, 0);
        assert_eq!(result.best_iteration, 0);
        assert_eq!(result.cost_history, vec![result.best_cost]);
    }

    #[test]
    fn test_same_seed_is_reproducible() {
        let config = TabuConfig::default()
            .with_max_iterations(60)
            .with_tabu_capacity(4)
            .with_seed(77);
        let a = TabuRunner::run(&PermSortTabu { n: 7 }, &config).unwrap();
        let b = TabuRunner::run(&PermSortTabu { n: 7 }, &config).unwrap();
        assert_eq!(a.best, b.best);
        assert_eq!(a.cost_history, b.cost_history);
    }

    #[test]
    fn test_cancelled_before_first_iteration() {
        let flag = Arc::new(AtomicBool::new(true));
        let config = TabuConfig::default().with_seed(42);
        let result =
            TabuRunner::run_with_cancel(&DiscretizedQuadratic, &config, Some(flag)).unwrap();
        assert_eq!(result.termination, Termination::Cancelled);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_observer_called_every_interval() {
        let config = TabuConfig::default()
            .with_max_iterations(25)
            .with_tabu_capacity(0)
            .with_report_interval(10)
            .with_seed(42);

        let mut seen = Vec::new();
        let mut observer = |p: &Progress| seen.push(p.iteration);
        TabuRunner::run_observed(&DiscretizedQuadratic, &config, None, &mut observer).unwrap();

        assert_eq!(seen, vec![0, 10, 20]);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = TabuConfig::default().with_report_interval(0);
        assert!(matches!(
            TabuRunner::run(&DiscretizedQuadratic, &config),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_portfolio_keeps_cheapest() {
        let config = TabuConfig::default()
            .with_max_iterations(5)
            .with_tabu_capacity(5);
        let seeds = [1, 2, 3, 4];

        let portfolio = TabuRunner::run_portfolio(&DiscretizedQuadratic, &config, &seeds).unwrap();
        for &seed in &seeds {
            let single =
                TabuRunner::run(&DiscretizedQuadratic, &config.clone().with_seed(seed)).unwrap();
            assert!(portfolio.best_cost <= single.best_cost);
        }
    }

    #[test]
    fn test_portfolio_requires_seeds() {
        let config = TabuConfig::default();
        assert!(TabuRunner::run_portfolio(&DiscretizedQuadratic, &config, &[]).is_err());
    }

    #[test]
    fn test_first_minimum_prefers_first_tie() {
        assert_eq!(first_minimum(&[3.0, 1.0, 2.0, 1.0]), Some((1, 1.0)));
        assert_eq!(first_minimum(&[]), None);
    }
}

//! Mate allocation as a Tabu Search problem.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use rand::Rng;

use crate::caps::UsageCaps;
use crate::cost;
use crate::error::{Error, Result};
use crate::initial;
use crate::matrix::RelatednessMatrix;
use crate::neighborhood;
use crate::tabu::{SearchObserver, TabuConfig, TabuProblem, TabuResult, TabuRunner};

/// A validated mate allocation instance: relatedness matrix plus caps.
///
/// Solutions are assignments `p` with `p[f]` the male for female `f`.
#[derive(Debug, Clone)]
pub struct MatingProblem {
    matrix: RelatednessMatrix,
    caps: UsageCaps,
}

impl MatingProblem {
    /// Pairs a matrix with caps covering exactly its males.
    ///
    /// Caps whose total is below the female count are accepted here;
    /// [`solve`](Self::solve) decides whether to run on them.
    pub fn new(matrix: RelatednessMatrix, caps: UsageCaps) -> Result<Self> {
        caps.check_males(matrix.males())?;
        Ok(Self { matrix, caps })
    }

    /// Relatedness matrix of this instance.
    pub fn matrix(&self) -> &RelatednessMatrix {
        &self.matrix
    }

    /// Per-male usage caps.
    pub fn caps(&self) -> &UsageCaps {
        &self.caps
    }

    /// Number of females (NF).
    pub fn females(&self) -> usize {
        self.matrix.females()
    }

    /// Number of males (NM).
    pub fn males(&self) -> usize {
        self.matrix.males()
    }

    /// Whether the caps can cover every female.
    pub fn is_feasible(&self) -> bool {
        self.caps.is_feasible_for(self.females())
    }

    /// Fails with [`Error::InfeasibleCapacity`] if the caps cannot cover
    /// every female.
    pub fn check_feasible(&self) -> Result<()> {
        if !self.is_feasible() {
            return Err(Error::InfeasibleCapacity {
                capacity: self.caps.total(),
                females: self.females(),
            });
        }
        Ok(())
    }

    /// Bounds-checked cost of a caller-supplied assignment.
    pub fn evaluate(&self, assignment: &[usize]) -> Result<f64> {
        cost::evaluate(&self.matrix, assignment)
    }

    /// Runs Tabu Search on this instance.
    pub fn solve(&self, config: &TabuConfig) -> Result<TabuResult<Vec<usize>>> {
        self.solve_with_cancel(config, None)
    }

    /// Runs Tabu Search with an optional cancellation token.
    pub fn solve_with_cancel(
        &self,
        config: &TabuConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<TabuResult<Vec<usize>>> {
        self.preflight(config)?;
        TabuRunner::run_with_cancel(self, config, cancel)
    }

    /// Runs Tabu Search, reporting progress to `observer`.
    pub fn solve_observed<O: SearchObserver + ?Sized>(
        &self,
        config: &TabuConfig,
        cancel: Option<Arc<AtomicBool>>,
        observer: &mut O,
    ) -> Result<TabuResult<Vec<usize>>> {
        self.preflight(config)?;
        TabuRunner::run_observed(self, config, cancel, observer)
    }

    /// Independent runs, one per seed; returns the cheapest.
    pub fn solve_portfolio(
        &self,
        config: &TabuConfig,
        seeds: &[u64],
    ) -> Result<TabuResult<Vec<usize>>> {
        self.preflight(config)?;
        TabuRunner::run_portfolio(self, config, seeds)
    }

    fn preflight(&self, config: &TabuConfig) -> Result<()> {
        if self.is_feasible() {
            return Ok(());
        }
        if !config.allow_infeasible {
            return self.check_feasible();
        }
        tracing::warn!(
            capacity = self.caps.total(),
            females = self.females(),
            "usage caps cannot cover every female; initial assignment will overflow"
        );
        Ok(())
    }
}

impl TabuProblem for MatingProblem {
    type Solution = Vec<usize>;

    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Vec<usize> {
        initial::build(self.females(), self.males(), &self.caps, rng)
    }

    fn cost(&self, assignment: &Vec<usize>) -> f64 {
        cost::total_coancestry(&self.matrix, assignment)
    }

    fn neighbors(&self, assignment: &Vec<usize>) -> Vec<Vec<usize>> {
        neighborhood::neighbors(assignment, self.males(), &self.caps)
    }
}

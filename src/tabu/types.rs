//! Core trait for Tabu Search problems.

use std::hash::Hash;

use rand::Rng;

/// Defines a combinatorial optimization problem for Tabu Search.
///
/// Users implement this trait to specify:
/// - How to create an initial solution
/// - How to evaluate a solution's cost
/// - How to enumerate the neighborhood of a solution
///
/// Tabu memory stores whole solutions, so `Solution` must be hashable and
/// comparable for exact equality.
pub trait TabuProblem: Send + Sync {
    /// The solution type.
    type Solution: Clone + Eq + Hash + Send + Sync;

    /// Creates an initial solution.
    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Self::Solution;

    /// Evaluates the cost of a solution (lower is better).
    fn cost(&self, solution: &Self::Solution) -> f64;

    /// Every solution one move away from `solution`.
    ///
    /// Order does not matter; the runner shuffles before selection.
    /// Must never contain `solution` itself.
    fn neighbors(&self, solution: &Self::Solution) -> Vec<Self::Solution>;
}

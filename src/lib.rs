//! Mate allocation by Tabu Search.
//!
//! Assigns one male to every female, each male usable at most a fixed
//! number of times, so that the total coancestry among the resulting
//! offspring is as low as possible.
//!
//! - **Matrix**: symmetric coancestry between the offspring of every pair
//!   of prospective matings, indexed by pair index `f * nm + m`.
//! - **Catalog**: female/male labels and matrix construction from
//!   pairwise records.
//! - **Cost**: total coancestry of an assignment.
//! - **Neighborhood**: single reassignments under usage caps, plus
//!   pairwise swaps.
//! - **Initial**: cap-respecting starting assignment.
//! - **Tabu Search (TS)**: generic short-term-memory local search driver.
//!
//! # Examples
//!
//! ```
//! use u_mating::{search, RelatednessMatrix, TabuConfig, UsageCaps};
//!
//! let mut c = RelatednessMatrix::zeros(2, 2).unwrap();
//! c.set_symmetric(0, 2, 0.5).unwrap(); // both females with male 0
//! c.set_symmetric(1, 3, 0.5).unwrap(); // both females with male 1
//!
//! let result = search(c, UsageCaps::uniform(2, 2), &TabuConfig::default().with_seed(1)).unwrap();
//! assert_ne!(result.best[0], result.best[1]);
//! assert_eq!(result.best_cost, 0.0);
//! ```

pub mod caps;
pub mod catalog;
pub mod cost;
pub mod error;
pub mod initial;
pub mod matrix;
pub mod neighborhood;
pub mod problem;
pub mod tabu;

pub use caps::UsageCaps;
pub use error::{Error, Result};
pub use matrix::RelatednessMatrix;
pub use problem::MatingProblem;
pub use tabu::{TabuConfig, TabuResult, Termination};

/// Searches for a low-coancestry assignment.
///
/// Returns the best assignment visited (male index per female) and its
/// cost, with run statistics.
pub fn search(
    matrix: RelatednessMatrix,
    caps: UsageCaps,
    config: &TabuConfig,
) -> Result<TabuResult<Vec<usize>>> {
    MatingProblem::new(matrix, caps)?.solve(config)
}

//! Tabu Search (TS).
//!
//! A single-solution trajectory metaheuristic that keeps a bounded memory
//! (the tabu list) of recently visited solutions and forbids revisiting
//! them, so the search can walk out of local optima without cycling.
//!
//! # References
//!
//! - Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! - Glover, F. (1990). "Tabu Search—Part II", *ORSA Journal on Computing* 2(1), 4-32.

mod config;
mod list;
mod observer;
mod runner;
mod types;

pub use config::TabuConfig;
pub use list::TabuList;
pub use observer::{NoopObserver, Progress, SearchObserver};
pub use runner::{TabuResult, TabuRunner, Termination};
pub use types::TabuProblem;

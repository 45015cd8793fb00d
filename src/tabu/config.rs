//! Tabu Search configuration.

use crate::error::{Error, Result};

/// Configuration parameters for Tabu Search.
///
/// # Examples
///
/// ```
/// use u_mating::tabu::TabuConfig;
///
/// let config = TabuConfig::default()
///     .with_max_iterations(500)
///     .with_tabu_capacity(10)
///     .with_seed(7);
/// assert_eq!(config.max_iterations, 500);
/// assert_eq!(config.tabu_capacity, 10);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabuConfig {
    /// Iteration budget.
    pub max_iterations: usize,
    /// How many recently visited solutions stay forbidden. 0 disables
    /// the tabu memory entirely.
    pub tabu_capacity: usize,
    /// Progress is reported every `report_interval` iterations.
    pub report_interval: usize,
    /// Score candidates in parallel (requires the `parallel` feature;
    /// ignored otherwise).
    pub parallel: bool,
    /// Accept caps whose total is below the female count. The initial
    /// assignment then overflows some caps.
    pub allow_infeasible: bool,
    /// Random seed (None for random).
    pub seed: Option<u64>,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            tabu_capacity: 20,
            report_interval: 100,
            parallel: false,
            allow_infeasible: false,
            seed: None,
        }
    }
}

impl TabuConfig {
    /// Sets the iteration budget.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the tabu memory capacity.
    pub fn with_tabu_capacity(mut self, capacity: usize) -> Self {
        self.tabu_capacity = capacity;
        self
    }

    /// Sets the progress reporting interval.
    pub fn with_report_interval(mut self, n: usize) -> Self {
        self.report_interval = n;
        self
    }

    /// Enables or disables parallel candidate scoring.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Allows or rejects caps that cannot cover every female.
    pub fn with_allow_infeasible(mut self, allow: bool) -> Self {
        self.allow_infeasible = allow;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.report_interval == 0 {
            return Err(Error::InvalidConfig(
                "report_interval must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

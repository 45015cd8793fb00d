//! Error types for mate allocation.

use thiserror::Error;

/// Errors raised while building or validating a mate allocation problem.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Female or male count is zero.
    #[error("problem needs at least one female and one male, got {females} x {males}")]
    EmptyDimensions { females: usize, males: usize },

    /// `(nf * nm)^2` does not fit in `usize`.
    #[error("{females} females x {males} males is too large for a relatedness matrix")]
    DimensionOverflow { females: usize, males: usize },

    /// Matrix value buffer does not hold `(nf * nm)^2` entries.
    #[error("relatedness matrix must have {expected} entries, got {actual}")]
    MatrixSize { expected: usize, actual: usize },

    /// `C[i, j] != C[j, i]`.
    #[error("relatedness matrix is not symmetric at ({row}, {col}): {a} vs {b}")]
    Asymmetric { row: usize, col: usize, a: f64, b: f64 },

    /// Negative, NaN or infinite coefficient.
    #[error("invalid coefficient {value} at ({row}, {col}): must be finite and non-negative")]
    InvalidCoefficient { row: usize, col: usize, value: f64 },

    /// Pair index outside the matrix.
    #[error("pair index ({row}, {col}) out of bounds for dimension {dim}")]
    PairIndexOutOfRange { row: usize, col: usize, dim: usize },

    /// Assignment length differs from the female count.
    #[error("assignment has {actual} entries, expected one per female ({expected})")]
    AssignmentLength { expected: usize, actual: usize },

    /// Assignment refers to a male that does not exist.
    #[error("female {female} is assigned male {male}, but only {males} males exist")]
    MaleOutOfRange { female: usize, male: usize, males: usize },

    /// Usage caps do not cover exactly the male set.
    #[error("usage caps cover {actual} males, expected {expected}")]
    CapsLength { expected: usize, actual: usize },

    /// Total capacity cannot cover every female.
    #[error("total usage capacity {capacity} is below the female count {females}")]
    InfeasibleCapacity { capacity: usize, females: usize },

    /// Pair label lacks the `male_female` separator.
    #[error("malformed pair label {0:?}: expected \"<male>_<female>\"")]
    MalformedLabel(String),

    /// Label not present in the catalog.
    #[error("unknown pair label {0:?}")]
    UnknownLabel(String),

    /// Search configuration rejected by `validate`.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

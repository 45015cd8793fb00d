//! Relatedness (coancestry) matrix over female x male pairings.
//!
//! Rows and columns are *pair indices*: the pairing of female `f` with
//! male `m` lives at `f * nm + m` (female-major order). Entry `(i, j)` is
//! the coancestry between the offspring of pairing `i` and pairing `j`.
//!
//! The matrix is symmetric, finite and non-negative. A small uniform
//! jitter (see [`JITTER_AMPLITUDE`]) is usually blended in so that no
//! entry is structurally zero and ties between candidates become rare.

use rand::Rng;

use crate::error::{Error, Result};

/// Default upper bound of the jitter added by [`RelatednessMatrix::apply_jitter`].
pub const JITTER_AMPLITUDE: f64 = 0.001;

const SYMMETRY_TOLERANCE: f64 = 1e-12;

/// Dense symmetric matrix of size `(nf * nm) x (nf * nm)`.
///
/// # Examples
///
/// ```
/// use u_mating::RelatednessMatrix;
///
/// let mut c = RelatednessMatrix::zeros(2, 2).unwrap();
/// c.set_symmetric(0, 1, 0.5).unwrap();
/// assert_eq!(c.dim(), 4);
/// assert_eq!(c.get(1, 0), 0.5);
/// assert_eq!(c.pair_index(1, 1), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RelatednessMatrix {
    females: usize,
    males: usize,
    dim: usize,
    values: Vec<f64>,
}

impl RelatednessMatrix {
    /// Builds a matrix from row-major values, validating shape, symmetry
    /// and coefficient range.
    pub fn new(females: usize, males: usize, values: Vec<f64>) -> Result<Self> {
        let (dim, len) = checked_dim(females, males)?;
        if values.len() != len {
            return Err(Error::MatrixSize {
                expected: len,
                actual: values.len(),
            });
        }

        for row in 0..dim {
            for col in row..dim {
                let a = values[row * dim + col];
                let b = values[col * dim + row];
                for (r, c, v) in [(row, col, a), (col, row, b)] {
                    if !v.is_finite() || v < 0.0 {
                        return Err(Error::InvalidCoefficient {
                            row: r,
                            col: c,
                            value: v,
                        });
                    }
                }
                if (a - b).abs() > SYMMETRY_TOLERANCE {
                    return Err(Error::Asymmetric { row, col, a, b });
                }
            }
        }

        Ok(Self {
            females,
            males,
            dim,
            values,
        })
    }

    /// All-zero matrix for incremental filling with [`set_symmetric`](Self::set_symmetric).
    pub fn zeros(females: usize, males: usize) -> Result<Self> {
        let (dim, len) = checked_dim(females, males)?;
        Ok(Self {
            females,
            males,
            dim,
            values: vec![0.0; len],
        })
    }

    /// Number of females (NF).
    pub fn females(&self) -> usize {
        self.females
    }

    /// Number of males (NM).
    pub fn males(&self) -> usize {
        self.males
    }

    /// Side length, `nf * nm`.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Pair index of female `female` mated with male `male`.
    #[inline]
    pub fn pair_index(&self, female: usize, male: usize) -> usize {
        female * self.males + male
    }

    /// Entry at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if either index is `>= dim()`. Use [`try_get`](Self::try_get)
    /// for caller-supplied indices.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.dim + col]
    }

    /// Bounds-checked entry lookup.
    pub fn try_get(&self, row: usize, col: usize) -> Result<f64> {
        if row >= self.dim || col >= self.dim {
            return Err(Error::PairIndexOutOfRange {
                row,
                col,
                dim: self.dim,
            });
        }
        Ok(self.get(row, col))
    }

    /// Writes `value` to both `(row, col)` and `(col, row)`.
    pub fn set_symmetric(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        if row >= self.dim || col >= self.dim {
            return Err(Error::PairIndexOutOfRange {
                row,
                col,
                dim: self.dim,
            });
        }
        if !value.is_finite() || value < 0.0 {
            return Err(Error::InvalidCoefficient { row, col, value });
        }
        self.values[row * self.dim + col] = value;
        self.values[col * self.dim + row] = value;
        Ok(())
    }

    /// Adds uniform noise in `[0, amplitude)` to every entry.
    ///
    /// One draw is shared by `(i, j)` and `(j, i)` so the matrix stays
    /// symmetric. A non-positive or non-finite amplitude leaves the matrix
    /// unchanged.
    pub fn apply_jitter<R: Rng>(&mut self, rng: &mut R, amplitude: f64) {
        if !amplitude.is_finite() || amplitude <= 0.0 {
            return;
        }
        for row in 0..self.dim {
            for col in row..self.dim {
                let noise = rng.random_range(0.0..amplitude);
                self.values[row * self.dim + col] += noise;
                if row != col {
                    self.values[col * self.dim + row] += noise;
                }
            }
        }
    }

    /// Row-major view of the raw values.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

/// Side length and entry count, `(nf * nm, (nf * nm)^2)`.
fn checked_dim(females: usize, males: usize) -> Result<(usize, usize)> {
    if females == 0 || males == 0 {
        return Err(Error::EmptyDimensions { females, males });
    }
    females
        .checked_mul(males)
        .and_then(|dim| dim.checked_mul(dim).map(|len| (dim, len)))
        .ok_or(Error::DimensionOverflow { females, males })
}

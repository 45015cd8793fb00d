//! Per-male usage caps.

use crate::error::{Error, Result};

/// Maximum number of females each male may be assigned to.
///
/// Dense, indexed by male ordinal.
///
/// # Examples
///
/// ```
/// use u_mating::UsageCaps;
///
/// let caps = UsageCaps::uniform(3, 2);
/// assert_eq!(caps.total(), 6);
/// assert!(caps.is_feasible_for(6));
/// assert!(!caps.is_feasible_for(7));
/// assert_eq!(caps.usage_counts(&[0, 2, 2]), vec![1, 0, 2]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UsageCaps {
    caps: Vec<usize>,
}

impl UsageCaps {
    /// Same cap for every one of `males` males.
    pub fn uniform(males: usize, cap: usize) -> Self {
        Self {
            caps: vec![cap; males],
        }
    }

    /// Caps given per male ordinal.
    pub fn from_vec(caps: Vec<usize>) -> Self {
        Self { caps }
    }

    /// Number of males covered.
    pub fn males(&self) -> usize {
        self.caps.len()
    }

    /// Cap of `male`. Males outside the table have cap 0.
    #[inline]
    pub fn cap(&self, male: usize) -> usize {
        self.caps.get(male).copied().unwrap_or(0)
    }

    /// Sum of all caps.
    pub fn total(&self) -> usize {
        self.caps.iter().sum()
    }

    /// Whether the caps can cover `females` females at all.
    pub fn is_feasible_for(&self, females: usize) -> bool {
        self.total() >= females
    }

    /// Occurrence count of every male in `assignment`.
    ///
    /// Values outside `0..males()` are ignored.
    pub fn usage_counts(&self, assignment: &[usize]) -> Vec<usize> {
        let mut counts = vec![0usize; self.caps.len()];
        for &m in assignment {
            if let Some(c) = counts.get_mut(m) {
                *c += 1;
            }
        }
        counts
    }

    /// True if no male exceeds its cap in `assignment`.
    pub fn satisfied_by(&self, assignment: &[usize]) -> bool {
        assignment.iter().all(|&m| m < self.caps.len())
            && self
                .usage_counts(assignment)
                .iter()
                .zip(&self.caps)
                .all(|(used, cap)| used <= cap)
    }

    /// Checks the table covers exactly `males` males.
    pub fn check_males(&self, males: usize) -> Result<()> {
        if self.caps.len() != males {
            return Err(Error::CapsLength {
                expected: males,
                actual: self.caps.len(),
            });
        }
        Ok(())
    }

    /// Caps indexed by male ordinal.
    pub fn as_slice(&self) -> &[usize] {
        &self.caps
    }
}

//! Neighborhood of an assignment under usage caps.
//!
//! Two move families are generated on every call:
//!
//! - **Reassign**: female `i` switches to a male `m != p[i]` whose current
//!   usage in `p` is strictly below its cap.
//! - **Swap**: two females with different males exchange them. Per-male
//!   usage is conserved, so no cap check is needed.
//!
//! Usage counts are recomputed from `p` on every call. Candidates reached
//! by different moves are not deduplicated.

use crate::caps::UsageCaps;

/// A single neighborhood move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    /// Female `female` is reassigned to `male`.
    Reassign { female: usize, male: usize },
    /// Females `a < b` exchange their males.
    Swap { a: usize, b: usize },
}

impl Move {
    /// Applies the move to a copy of `assignment`.
    pub fn apply(&self, assignment: &[usize]) -> Vec<usize> {
        let mut next = assignment.to_vec();
        match *self {
            Move::Reassign { female, male } => next[female] = male,
            Move::Swap { a, b } => next.swap(a, b),
        }
        next
    }
}

/// Enumerates every reassign and swap move admissible from `assignment`.
///
/// Reassign moves come first (by female, then male), followed by swaps
/// (by `a`, then `b`). Callers that care about tie-breaking shuffle the
/// result.
pub fn moves(assignment: &[usize], males: usize, caps: &UsageCaps) -> Vec<Move> {
    let nf = assignment.len();
    let usage = caps.usage_counts(assignment);
    let mut out = Vec::new();

    for (female, &current) in assignment.iter().enumerate() {
        for male in 0..males {
            if male != current && usage.get(male).copied().unwrap_or(0) < caps.cap(male) {
                out.push(Move::Reassign { female, male });
            }
        }
    }

    for a in 0..nf {
        for b in (a + 1)..nf {
            if assignment[a] != assignment[b] {
                out.push(Move::Swap { a, b });
            }
        }
    }

    out
}

/// Every candidate assignment one move away from `assignment`.
///
/// # Examples
///
/// ```
/// use u_mating::{neighborhood, UsageCaps};
///
/// let caps = UsageCaps::from_vec(vec![1, 1, 1]);
/// let next = neighborhood::neighbors(&[0, 1], 3, &caps);
/// // Two reassignments to the idle male 2, one swap.
/// assert_eq!(next, vec![vec![2, 1], vec![0, 2], vec![1, 0]]);
/// ```
pub fn neighbors(assignment: &[usize], males: usize, caps: &UsageCaps) -> Vec<Vec<usize>> {
    moves(assignment, males, caps)
        .iter()
        .map(|mv| mv.apply(assignment))
        .collect()
}

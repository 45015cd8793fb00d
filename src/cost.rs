//! Assignment cost: total coancestry among all produced offspring.
//!
//! For an assignment `p` (male `p[f]` for female `f`) the cost is
//!
//! ```text
//! cost(p) = sum_{i < nf} sum_{j < nf} C[i*nm + p[i], j*nm + p[j]]
//! ```
//!
//! over the full `nf x nf` grid: self terms (`i == j`) are included and
//! every unordered pair is counted in both directions. Lower is better.

use crate::error::{Error, Result};
use crate::matrix::RelatednessMatrix;

/// Bounds-checked cost of `assignment`.
///
/// Fails if the assignment does not have one entry per female or names a
/// male outside `0..nm`.
///
/// # Examples
///
/// ```
/// use u_mating::{cost, RelatednessMatrix};
///
/// let mut c = RelatednessMatrix::zeros(2, 2).unwrap();
/// c.set_symmetric(0, 0, 0.1).unwrap();
/// c.set_symmetric(3, 3, 0.1).unwrap();
/// let total = cost::evaluate(&c, &[0, 1]).unwrap();
/// assert!((total - 0.2).abs() < 1e-12);
/// assert!(cost::evaluate(&c, &[0, 2]).is_err());
/// ```
pub fn evaluate(matrix: &RelatednessMatrix, assignment: &[usize]) -> Result<f64> {
    validate_assignment(matrix.females(), matrix.males(), assignment)?;
    Ok(total_coancestry(matrix, assignment))
}

/// Checks length and male range of `assignment`.
pub fn validate_assignment(females: usize, males: usize, assignment: &[usize]) -> Result<()> {
    if assignment.len() != females {
        return Err(Error::AssignmentLength {
            expected: females,
            actual: assignment.len(),
        });
    }
    if let Some((female, &male)) = assignment.iter().enumerate().find(|&(_, &m)| m >= males) {
        return Err(Error::MaleOutOfRange {
            female,
            male,
            males,
        });
    }
    Ok(())
}

/// Cost of an assignment already known to be valid for `matrix`.
///
/// O(nf^2). Panics on out-of-range male indices.
pub(crate) fn total_coancestry(matrix: &RelatednessMatrix, assignment: &[usize]) -> f64 {
    let rows: Vec<usize> = assignment
        .iter()
        .enumerate()
        .map(|(f, &m)| matrix.pair_index(f, m))
        .collect();

    let mut total = 0.0;
    for &i in &rows {
        for &j in &rows {
            total += matrix.get(i, j);
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// NF = 2, NM = 2 scenario: self terms 0.1, female 0 cross term 0.5.
    fn small_matrix() -> RelatednessMatrix {
        let mut c = RelatednessMatrix::zeros(2, 2).unwrap();
        for i in 0..4 {
            c.set_symmetric(i, i, 0.1).unwrap();
        }
        c.set_symmetric(0, 1, 0.5).unwrap();
        c
    }

    #[test]
    fn test_counts_self_terms_and_both_directions() {
        let mut c = RelatednessMatrix::zeros(2, 1).unwrap();
        c.set_symmetric(0, 0, 0.2).unwrap();
        c.set_symmetric(1, 1, 0.3).unwrap();
        c.set_symmetric(0, 1, 0.25).unwrap();
        // 0.2 + 0.3 + 2 * 0.25
        let total = evaluate(&c, &[0, 0]).unwrap();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_small_scenario_costs() {
        let c = small_matrix();
        let distinct = evaluate(&c, &[0, 1]).unwrap();
        let mirrored = evaluate(&c, &[1, 0]).unwrap();
        assert!((distinct - 0.2).abs() < 1e-12);
        assert!((mirrored - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_length_mismatch() {
        let c = small_matrix();
        assert_eq!(
            evaluate(&c, &[0]),
            Err(Error::AssignmentLength {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_rejects_male_out_of_range() {
        let c = small_matrix();
        assert_eq!(
            evaluate(&c, &[1, 2]),
            Err(Error::MaleOutOfRange {
                female: 1,
                male: 2,
                males: 2
            })
        );
    }

    fn matrix_and_assignment() -> impl Strategy<Value = (RelatednessMatrix, Vec<usize>)> {
        (1usize..5, 1usize..4).prop_flat_map(|(nf, nm)| {
            let dim = nf * nm;
            (
                prop::collection::vec(0.0f64..1.0, dim * dim),
                prop::collection::vec(0..nm, nf),
            )
                .prop_map(move |(raw, p)| {
                    let mut c = RelatednessMatrix::zeros(nf, nm).unwrap();
                    for i in 0..dim {
                        for j in i..dim {
                            c.set_symmetric(i, j, raw[i * dim + j]).unwrap();
                        }
                    }
                    (c, p)
                })
        })
    }

    proptest! {
        #[test]
        fn prop_cost_is_non_negative((c, p) in matrix_and_assignment()) {
            prop_assert!(evaluate(&c, &p).unwrap() >= 0.0);
        }

        #[test]
        fn prop_cost_matches_double_sum((c, p) in matrix_and_assignment()) {
            let nm = c.males();
            let mut expected = 0.0;
            for i in 0..p.len() {
                for j in 0..p.len() {
                    expected += c.get(i * nm + p[i], j * nm + p[j]);
                }
            }
            prop_assert!((evaluate(&c, &p).unwrap() - expected).abs() < 1e-9);
        }

        #[test]
        fn prop_cost_is_order_independent_over_pairs((c, p) in matrix_and_assignment()) {
            // Summing the grid transposed gives the same total on a symmetric matrix.
            let nm = c.males();
            let rows: Vec<usize> = p.iter().enumerate().map(|(f, &m)| f * nm + m).collect();
            let mut transposed = 0.0;
            for &j in &rows {
                for &i in &rows {
                    transposed += c.get(j, i);
                }
            }
            prop_assert!((evaluate(&c, &p).unwrap() - transposed).abs() < 1e-9);
        }
    }
}

//! Initial assignment construction.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::caps::UsageCaps;

/// Builds a starting assignment of length `females`.
///
/// The male list is shuffled once. Each female, in order, takes the
/// first male in that shuffled order with remaining capacity. When no
/// male has capacity left (only possible if `caps.total() < females`)
/// the female gets a uniformly random male regardless of its cap, and a
/// warning is logged.
///
/// With `caps.total() >= females` the result always satisfies the caps.
///
/// # Panics
///
/// Panics if `males == 0` while `females > 0`: no assignment exists.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use u_mating::{initial, UsageCaps};
///
/// let caps = UsageCaps::uniform(3, 2);
/// let p = initial::build(5, 3, &caps, &mut StdRng::seed_from_u64(1));
/// assert_eq!(p.len(), 5);
/// assert!(caps.satisfied_by(&p));
/// ```
pub fn build<R: Rng>(females: usize, males: usize, caps: &UsageCaps, rng: &mut R) -> Vec<usize> {
    assert!(
        males > 0 || females == 0,
        "cannot assign {females} females without any male"
    );

    let mut order: Vec<usize> = (0..males).collect();
    order.shuffle(rng);

    let mut used = vec![0usize; males];
    let mut assignment = Vec::with_capacity(females);
    let mut overflow = 0usize;

    for _ in 0..females {
        match order.iter().copied().find(|&m| used[m] < caps.cap(m)) {
            Some(m) => {
                used[m] += 1;
                assignment.push(m);
            }
            None => {
                overflow += 1;
                assignment.push(rng.random_range(0..males));
            }
        }
    }

    if overflow > 0 {
        tracing::warn!(
            females,
            capacity = caps.total(),
            overflow,
            "usage caps exhausted; assigned males beyond their cap"
        );
    }

    assignment
}

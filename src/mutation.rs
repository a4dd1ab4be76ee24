//! Mutation of offspring tours.

use crate::config::MutationOp;
use crate::sampling;
use crate::tour::Tour;
use rand::Rng;

impl MutationOp {
    /// Apply this operator to `tour` at positions `(x, y)`.
    ///
    /// The rotation operators require `x < y`; callers that collect anchor
    /// positions in ascending order satisfy this by construction.
    pub fn apply(self, tour: &mut Tour<'_>, x: usize, y: usize) {
        match self {
            MutationOp::Swap => tour.swap(x, y),
            MutationOp::LeftRotation => tour.left_rotation(x, y),
            MutationOp::RightRotation => tour.right_rotation(x, y),
            MutationOp::Inversion => tour.inversion(x, y),
        }
    }
}

/// Mutate every tour of the offspring pool in place.
///
/// For each tour, one uniform draw per position after the depot selects the
/// mutation anchors: a position is an anchor when its draw is at most
/// `mutation_probability`. An odd trailing anchor is dropped, and the
/// operator is applied to every consecutive anchor pair. The depot at
/// position `0` is never an anchor, so it stays in place.
pub fn mutate_pool<R: Rng>(
    pool: &mut [Tour<'_>],
    mutation_probability: f64,
    op: MutationOp,
    rng: &mut R,
) {
    for tour in pool.iter_mut() {
        let draws = sampling::sample_probabilities(tour.len() - 1, rng);

        let mut anchors: Vec<usize> = draws
            .iter()
            .enumerate()
            .filter(|(_, &p)| p <= mutation_probability)
            .map(|(index, _)| index + 1)
            .collect();

        if anchors.len() % 2 == 1 {
            anchors.pop();
        }

        for pair in anchors.chunks_exact(2) {
            op.apply(tour, pair[0], pair[1]);
        }
    }
}

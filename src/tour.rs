//! Tour representation for the genetic algorithm.

use crate::matrix::DistanceMatrix;
use std::cell::Cell;
use std::fmt;

/// A TSP tour encoded as a permutation of `[0, n)`.
///
/// The tour references the distance matrix it was created against for its
/// whole lifetime; assigning tours across different matrices is a
/// programming error. The closed-circuit cost is expensive to compute, so it
/// is evaluated lazily and memoized. Every mutating operation exposed here
/// clears the memoized cost, which keeps the cache from drifting out of sync
/// with the permutation.
///
/// By convention city `0` is the depot and sits at position `0` in every
/// tour stored in the population; operators that disturb it restore the
/// convention with [`Tour::align_to_depot`] before the tour re-enters the
/// pool.
#[derive(Clone)]
pub struct Tour<'a> {
    perm: Vec<usize>,
    matrix: &'a DistanceMatrix,
    cached_cost: Cell<Option<f64>>,
}

impl<'a> Tour<'a> {
    /// Create a tour from a permutation. The cost starts uncomputed.
    pub fn new(perm: Vec<usize>, matrix: &'a DistanceMatrix) -> Self {
        Tour {
            perm,
            matrix,
            cached_cost: Cell::new(None),
        }
    }

    /// The distance matrix this tour is bound to.
    pub fn matrix(&self) -> &'a DistanceMatrix {
        self.matrix
    }

    /// The underlying permutation of city indices.
    pub fn cities(&self) -> &[usize] {
        &self.perm
    }

    /// Number of cities in the tour.
    pub fn len(&self) -> usize {
        self.perm.len()
    }

    /// Whether the tour is empty.
    pub fn is_empty(&self) -> bool {
        self.perm.is_empty()
    }

    /// Iterate over the cities in visiting order.
    pub fn iter(&self) -> std::slice::Iter<'_, usize> {
        self.perm.iter()
    }

    /// Closed-circuit cost of the tour, memoized after the first call.
    pub fn cost(&self) -> f64 {
        if let Some(cost) = self.cached_cost.get() {
            return cost;
        }

        let n = self.perm.len();
        let mut cost = 0.0;
        for i in 0..n {
            cost += self.matrix.at(self.perm[i], self.perm[(i + 1) % n]);
        }

        self.cached_cost.set(Some(cost));
        cost
    }

    /// Invalidate the memoized cost.
    pub fn reset_cost(&mut self) {
        self.cached_cost.set(None);
    }

    /// Exchange the cities at positions `a` and `b`.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.perm.swap(a, b);
        self.cached_cost.set(None);
    }

    /// Left-rotate the subrange `[x, y]` by one position.
    ///
    /// `[0, 1, 2, 3, 4]` with `(1, 3)` becomes `[0, 2, 3, 1, 4]`.
    /// Requires `x < y`.
    pub fn left_rotation(&mut self, x: usize, y: usize) {
        debug_assert!(x < y);
        self.perm[x..=y].rotate_left(1);
        self.cached_cost.set(None);
    }

    /// Right-rotate the subrange `[x, y]` by one position.
    ///
    /// `[0, 1, 2, 3, 4]` with `(1, 3)` becomes `[0, 3, 1, 2, 4]`.
    /// Requires `x < y`.
    pub fn right_rotation(&mut self, x: usize, y: usize) {
        debug_assert!(x < y);
        self.perm[x..=y].rotate_right(1);
        self.cached_cost.set(None);
    }

    /// Reverse the subrange `[x, y]`, a 2-opt move.
    ///
    /// `[0, 1, 2, 3, 4]` with `(1, 3)` becomes `[0, 3, 2, 1, 4]`.
    pub fn inversion(&mut self, x: usize, y: usize) {
        debug_assert!(x <= y);
        self.perm[x..=y].reverse();
        self.cached_cost.set(None);
    }

    /// Cyclically rotate the permutation so that city `0` sits at position
    /// `0`. The memoized cost survives: a closed circuit has the same cost
    /// from every starting point.
    pub fn align_to_depot(&mut self) {
        let pos = self
            .perm
            .iter()
            .position(|&city| city == 0)
            .expect("tour must contain city 0");

        if pos != 0 {
            self.perm.rotate_left(pos);
        }
    }

    /// Shuffle every position except the depot at position `0`.
    pub fn shuffle_tail<R: rand::Rng>(&mut self, rng: &mut R) {
        use rand::seq::SliceRandom;

        self.perm[1..].shuffle(rng);
        self.cached_cost.set(None);
    }
}

impl PartialEq for Tour<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.perm == other.perm
    }
}

impl Eq for Tour<'_> {}

impl std::ops::Index<usize> for Tour<'_> {
    type Output = usize;

    fn index(&self, i: usize) -> &usize {
        &self.perm[i]
    }
}

impl fmt::Debug for Tour<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tour")
            .field("perm", &self.perm)
            .field("cached_cost", &self.cached_cost.get())
            .finish()
    }
}

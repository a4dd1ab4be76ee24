//! Dense distance matrix for a complete weighted undirected graph.

use serde::{Deserialize, Serialize};

/// Symmetric distance matrix with a zero main diagonal.
///
/// Values are stored in a contiguous row-major vector. The matrix is built
/// once, before the search starts, and is only read afterwards, so it can be
/// shared by reference across threads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Build an `n` by `n` matrix from a distance function.
    ///
    /// `distance(i, j)` is evaluated only for the strict upper triangle; the
    /// lower triangle is mirrored from it and the diagonal stays zero.
    pub fn from_fn<F>(n: usize, distance: F) -> Self
    where
        F: Fn(usize, usize) -> f64,
    {
        let mut data = vec![0.0; n * n];

        for i in 0..n {
            for j in (i + 1)..n {
                let d = distance(i, j);
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }

        DistanceMatrix { n, data }
    }

    /// Build a matrix directly from row-major data. Test constructor.
    ///
    /// # Panics
    ///
    /// Panics if `data.len() != n * n`.
    pub fn from_vec(data: Vec<f64>, n: usize) -> Self {
        assert_eq!(data.len(), n * n, "distance matrix data must be n * n");
        DistanceMatrix { n, data }
    }

    /// Distance between vertices `i` and `j`.
    #[inline]
    pub fn at(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    /// Number of vertices.
    #[inline]
    pub fn size(&self) -> usize {
        self.n
    }

    /// Return a pair `(i, j)` with `i < j` maximizing `at(i, j)` over the
    /// strict upper triangle.
    ///
    /// # Panics
    ///
    /// Panics if the matrix has fewer than two vertices.
    pub fn two_farthest_vertices(&self) -> (usize, usize) {
        assert!(self.n >= 2, "need at least two vertices");

        let mut best = (0, 1);
        let mut best_distance = self.at(0, 1);

        for i in 0..self.n {
            for j in (i + 1)..self.n {
                let d = self.at(i, j);
                if d > best_distance {
                    best_distance = d;
                    best = (i, j);
                }
            }
        }

        best
    }
}

//! Farthest-insertion constructive heuristic for the initial tour.

use crate::matrix::DistanceMatrix;

/// Build a Hamiltonian circuit over `[0, n)` by farthest insertion.
///
/// The two farthest vertices open the partial circuit; each step then picks
/// the remaining vertex whose minimum distance to the circuit is largest and
/// inserts it at the position causing the smallest increase in circuit cost.
/// The result is shifted so that city `0` comes first.
///
/// Farthest insertion yields good starting tours and concentrates the
/// diversity of the initial population around them.
pub fn farthest_insertion(matrix: &DistanceMatrix) -> Vec<usize> {
    let n = matrix.size();

    if n == 1 {
        return vec![0];
    }

    let (i, j) = matrix.two_farthest_vertices();

    let mut circuit = Vec::with_capacity(n);
    circuit.push(i);
    circuit.push(j);

    // Vertices not yet in the partial circuit, kept in ascending order so
    // that ties break the same way on every run.
    let mut remaining: Vec<usize> = (0..n).filter(|&v| v != i && v != j).collect();

    while !remaining.is_empty() {
        let next = select_farthest(&remaining, &circuit, matrix);
        let r = remaining.remove(next);
        insert_at_cheapest_position(r, &mut circuit, matrix);
    }

    shift_to_value(&mut circuit, 0);
    circuit
}

/// Index into `remaining` of the vertex maximizing the minimum distance to
/// the circuit.
fn select_farthest(remaining: &[usize], circuit: &[usize], matrix: &DistanceMatrix) -> usize {
    let mut best_index = 0;
    let mut best_distance = f64::NEG_INFINITY;

    for (index, &r) in remaining.iter().enumerate() {
        let min_to_circuit = circuit
            .iter()
            .map(|&h| matrix.at(h, r))
            .fold(f64::INFINITY, f64::min);

        if min_to_circuit > best_distance {
            best_distance = min_to_circuit;
            best_index = index;
        }
    }

    best_index
}

/// Insert `r` between the consecutive circuit vertices `(h, next)` for which
/// the insertion causes the minimum increase in total circuit cost.
fn insert_at_cheapest_position(r: usize, circuit: &mut Vec<usize>, matrix: &DistanceMatrix) {
    let len = circuit.len();
    let mut best_position = 0;
    let mut best_delta = f64::INFINITY;

    for position in 0..len {
        let h = circuit[position];
        let next = circuit[(position + 1) % len];
        let delta = matrix.at(h, r) + matrix.at(r, next) - matrix.at(h, next);

        if delta < best_delta {
            best_delta = delta;
            best_position = position;
        }
    }

    circuit.insert(best_position + 1, r);
}

/// Cyclically shift `values` so that `value` is placed first.
fn shift_to_value(values: &mut [usize], value: usize) {
    if let Some(position) = values.iter().position(|&v| v == value) {
        values.rotate_left(position);
    }
}

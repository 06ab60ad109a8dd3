/* ************************************************************************ **
** This file is part of bridgecv, and is licensed under EITHER the MIT      **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
**                                                                          **
** Be aware that not all of bridgecv is provided under this permissive      **
** license, and that the project as a whole is licensed under the GPL 3.0.  **
** ************************************************************************ */

//! Displacements under periodic boundary conditions.

use crate::FailResult;
use bridgecv_array_types::{dot, M3, M33, V3};
use std::cmp::Ordering;

/// The simulation volume, which decides how displacement vectors are computed.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Plain cartesian differences.
    NonPeriodic,
    /// Minimum-image differences under a lattice.
    Periodic(Lattice),
}

impl Default for Cell {
    fn default() -> Self { Cell::NonPeriodic }
}

impl Cell {
    /// A periodic cell whose rows are the lattice vectors.
    pub fn periodic(matrix: &M33) -> FailResult<Self>
    { Lattice::new(matrix).map(Cell::Periodic) }

    /// The displacement from `from` to `to` (i.e. `to - from`), reduced to its
    /// shortest periodic image.
    #[inline]
    pub fn displacement(&self, from: V3, to: V3) -> V3 {
        let delta = to - from;
        match self {
            Cell::NonPeriodic => delta,
            Cell::Periodic(lattice) => lattice.minimum_image(delta),
        }
    }

    pub fn lattice(&self) -> Option<&Lattice> {
        match self {
            Cell::NonPeriodic => None,
            Cell::Periodic(lattice) => Some(lattice),
        }
    }
}

/// A lattice with its inverse precomputed.
///
/// Image searches run on a size-reduced basis for the same lattice, so that strongly
/// skewed cells (e.g. ones related to a cube by a large unimodular transform) still
/// produce the true minimum image.
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    matrix: M33,
    inverse: M33,
    orthorhombic: bool,
    reduced: M33,
    reduced_inverse: M33,
    /// Nonzero lattice vectors that can shorten a vector already wrapped into the
    /// reduced cell, with their norms, sorted by norm.
    images: Vec<(V3, f64)>,
}

impl Lattice {
    /// Rows of `matrix` are the lattice vectors.
    pub fn new(matrix: &M33) -> FailResult<Self> {
        let scale: f64 = matrix.iter().map(|v| v.norm()).product();
        let det = matrix.det();
        ensure!(
            det.abs() > 1e-10 * scale,
            "lattice is singular or nearly so (det = {}): {:?}", det, matrix,
        );
        let inverse = match matrix.inv() {
            Some(inverse) => inverse,
            None => bail!("lattice is singular: {:?}", matrix),
        };

        let orthorhombic = (0..3).all(|r| (0..3).all(|c| r == c || matrix[r][c] == 0.0));

        let reduced = reduce_basis(matrix);
        let reduced_inverse = match reduced.inv() {
            Some(inverse) => inverse,
            None => bail!("lattice became singular during reduction: {:?}", matrix),
        };
        let images = candidate_images(&reduced, &reduced_inverse);
        trace!("lattice reduced to {:?} ({} candidate images)", reduced, images.len());

        Ok(Lattice { matrix: *matrix, inverse, orthorhombic, reduced, reduced_inverse, images })
    }

    pub fn orthorhombic(a: f64, b: f64, c: f64) -> FailResult<Self>
    { Lattice::new(&M33::from_rows(&[[a, 0.0, 0.0], [0.0, b, 0.0], [0.0, 0.0, c]])) }

    pub fn matrix(&self) -> &M33 { &self.matrix }
    pub fn inverse_matrix(&self) -> &M33 { &self.inverse }
    /// A basis for the same lattice whose vectors have been shortened against each other.
    pub fn reduced_matrix(&self) -> &M33 { &self.reduced }
    pub fn volume(&self) -> f64 { self.matrix.det().abs() }

    /// The shortest periodic image of a cartesian vector.
    pub fn minimum_image(&self, cart: V3) -> V3 {
        let frac = cart * &self.reduced_inverse;
        let wrapped = frac.map(|x| x - x.round()) * &self.reduced;
        if self.orthorhombic {
            return wrapped;
        }

        // Adding `v` can only help if |v| <= |wrapped| + |best|.
        let reach = wrapped.norm();
        let mut best = wrapped;
        let mut best_norm = reach;
        for &(image, norm) in &self.images {
            if norm > reach + best_norm {
                break;
            }
            let candidate = wrapped + image;
            let candidate_norm = candidate.norm();
            if candidate_norm < best_norm {
                best = candidate;
                best_norm = candidate_norm;
            }
        }
        best
    }
}

/// Pairwise size reduction: subtract integer multiples of each basis vector from the
/// others until none of them gets shorter.  Every step is unimodular, so the result
/// spans the same lattice.
fn reduce_basis(matrix: &M33) -> M33 {
    let mut rows = matrix.0;
    loop {
        let mut changed = false;
        for from in 0..3 {
            for to in 0..3 {
                if from == to {
                    continue;
                }
                let mul = (dot(&rows[to], &rows[from]) / rows[from].sqnorm()).round();
                if mul == 0.0 {
                    continue;
                }
                let shorter = rows[to] - rows[from] * mul;
                // strict decrease, so that ties at a half-integer cannot cycle
                if shorter.sqnorm() < rows[to].sqnorm() * (1.0 - 1e-12) {
                    rows[to] = shorter;
                    changed = true;
                }
            }
        }
        if !changed {
            return M3(rows);
        }
    }
}

/// Every nonzero lattice vector short enough to improve a vector whose reduced fractional
/// coordinates lie in `[-1/2, 1/2]`, sorted by length.
fn candidate_images(reduced: &M33, reduced_inverse: &M33) -> Vec<(V3, f64)> {
    // |wrapped| is at most half the sum of the basis lengths, and only lattice vectors
    // no longer than twice that can shorten it.
    let max_wrapped: f64 = 0.5 * reduced.iter().map(|v| v.norm()).sum::<f64>();
    let max_image = 2.0 * max_wrapped;

    // The integer coordinate `n_k` of a lattice vector `v` is `v · (column k of the
    // inverse)`, which bounds how far along each axis to look.
    let columns = reduced_inverse.t();
    let bounds: Vec<i64> = columns.iter()
        .map(|col| (max_image * col.norm()).ceil() as i64)
        .collect();

    let mut images = vec![];
    for a in -bounds[0]..=bounds[0] {
        for b in -bounds[1]..=bounds[1] {
            for c in -bounds[2]..=bounds[2] {
                if (a, b, c) == (0, 0, 0) {
                    continue;
                }
                let image = V3([a as f64, b as f64, c as f64]) * reduced;
                let norm = image.norm();
                if norm <= max_image {
                    images.push((image, norm));
                }
            }
        }
    }
    images.sort_by(|x, y| x.1.partial_cmp(&y.1).unwrap_or(Ordering::Equal));
    images
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Only valid for mildly skewed `matrix`.
    fn brute_force_shortest(matrix: &M33, cart: V3) -> f64 {
        let cart = (cart * &matrix.inv().unwrap()).map(|x| x - x.round()) * matrix;
        let mut best = std::f64::INFINITY;
        for a in -4..=4 {
            for b in -4..=4 {
                for c in -4..=4 {
                    let image = V3([a as f64, b as f64, c as f64]) * matrix;
                    best = best.min((cart + image).sqnorm());
                }
            }
        }
        best
    }

    #[test]
    fn non_periodic() {
        let cell = Cell::NonPeriodic;
        assert_eq!(cell.displacement(V3([1.0, 2.0, 3.0]), V3([11.0, 2.0, 0.0])), V3([10.0, 0.0, -3.0]));
    }

    #[test]
    fn orthorhombic_wraps() {
        let cell = Cell::Periodic(Lattice::orthorhombic(10.0, 8.0, 6.0).unwrap());
        let d = cell.displacement(V3([0.5, 0.5, 0.5]), V3([9.5, 7.5, 3.0]));
        assert_close!(abs=1e-12, d, V3([-1.0, -1.0, 2.5]));

        // images separated by whole lattice vectors are the same point
        let d = cell.displacement(V3([1.0, 1.0, 1.0]), V3([21.0, -15.0, 13.0]));
        assert_close!(abs=1e-12, d, V3([0.0, 0.0, 0.0]));
    }

    #[test]
    fn skewed_cell_finds_shortest_image() {
        let lattice = Lattice::new(&M33::from_rows(&[
            [5.0, 0.0, 0.0],
            [4.0, 3.0, 0.0],
            [1.0, 1.5, 4.0],
        ])).unwrap();

        for _ in 0..200 {
            let cart = V3::from_fn(|_| rand::random::<f64>() * 20.0 - 10.0);
            let reduced = lattice.minimum_image(cart);
            assert_close!(rel=1e-10, abs=1e-10, reduced.sqnorm(), brute_force_shortest(lattice.matrix(), cart));

            // still the same point modulo the lattice
            let frac_diff = (reduced - cart) * lattice.inverse_matrix();
            for &x in &frac_diff.0 {
                assert_close!(abs=1e-9, x, x.round());
            }
        }
    }

    #[test]
    fn unimodular_skew_of_a_cube() {
        // the unit cube in disguise
        let lattice = Lattice::new(&M33::from_rows(&[
            [1.0, 0.0, 0.0],
            [5.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ])).unwrap();
        assert_close!(abs=1e-12, lattice.minimum_image(V3([0.4, 0.4, 0.0])), V3([0.4, 0.4, 0.0]));
        assert_close!(abs=1e-12, lattice.minimum_image(V3([2.4, -0.7, 3.1])), V3([0.4, 0.3, 0.1]));

        let cell = Cell::Periodic(lattice.clone());
        for _ in 0..200 {
            let from = V3::from_fn(|_| rand::random::<f64>() * 20.0 - 10.0);
            let to = V3::from_fn(|_| rand::random::<f64>() * 20.0 - 10.0);
            let expected = (to - from).map(|x| x - x.round());
            assert_close!(abs=1e-9, cell.displacement(from, to).sqnorm(), expected.sqnorm());
        }
    }

    #[test]
    fn strongly_skewed_basis_of_a_general_lattice() {
        let base = M33::from_rows(&[
            [5.0, 0.0, 0.0],
            [4.0, 3.0, 0.0],
            [1.0, 1.5, 4.0],
        ]);
        // same lattice, much worse basis
        let transform = M33::from_rows(&[
            [1.0, 0.0, 0.0],
            [3.0, 1.0, 0.0],
            [-2.0, 4.0, 1.0],
        ]);
        let lattice = Lattice::new(&(&transform * &base)).unwrap();
        assert_close!(rel=1e-10, lattice.volume(), base.det().abs());
        assert_close!(rel=1e-10, lattice.reduced_matrix().det().abs(), base.det().abs());

        for _ in 0..200 {
            let cart = V3::from_fn(|_| rand::random::<f64>() * 40.0 - 20.0);
            let reduced = lattice.minimum_image(cart);
            assert_close!(rel=1e-10, abs=1e-10, reduced.sqnorm(), brute_force_shortest(&base, cart));

            let frac_diff = (reduced - cart) * lattice.inverse_matrix();
            for &x in &frac_diff.0 {
                assert_close!(abs=1e-8, x, x.round());
            }
        }
    }

    #[test]
    fn singular_lattice() {
        let result = Lattice::new(&M33::from_rows(&[
            [1.0, 0.0, 0.0],
            [2.0, 0.0, 0.0],
            [0.0, 0.0, 1.0],
        ]));
        assert!(result.is_err());
        assert!(Lattice::orthorhombic(1.0, 0.0, 1.0).is_err());
    }
}

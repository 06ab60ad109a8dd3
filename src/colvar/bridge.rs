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

//! The triple loop over bridging, A and B particles.

use crate::{Cell, ColvarOutput, Switch};
use crate::atoms::CombinedList;
use bridgecv_array_types::{outer, V3};

/// Evaluate the bridging coordinate over the bridging tail of `list`.
///
/// `positions` are those of `list`, in order.  Every term is
/// `f_A(|r_j - r_i|) f_B(|r_k - r_i|)` for bridging `i`, `j` in A and `k` in B,
/// with displacements taken by minimum image.
///
/// A pair (i, j) with zero weight and zero slope skips the loop over B entirely, and
/// likewise for individual (i, k) pairs.  Switching functions that are exactly zero
/// beyond their support make this cheap.
pub fn accumulate<SA, SB>(
    list: &CombinedList,
    positions: &[V3],
    cell: &Cell,
    switch_a: &SA,
    switch_b: &SB,
) -> ColvarOutput
where
    SA: Switch + ?Sized,
    SB: Switch + ?Sized,
{
    assert_eq!(positions.len(), list.len());

    let mut out = ColvarOutput::zero(list.len());
    for i in list.bridging_range() {
        for j in list.a_range() {
            let d_ij = cell.displacement(positions[i], positions[j]);
            let (w1, dw1) = switch_a.calculate_sqr(d_ij.sqnorm());
            if w1 == 0.0 && dw1 == 0.0 {
                continue;
            }

            for k in list.b_range() {
                let d_ik = cell.displacement(positions[i], positions[k]);
                let (w2, dw2) = switch_b.calculate_sqr(d_ik.sqnorm());
                if w2 == 0.0 && dw2 == 0.0 {
                    continue;
                }

                out.value += w1 * w2;

                let grad_j = w2 * dw1 * d_ij;
                let grad_k = w1 * dw2 * d_ik;
                out.derivatives[j] += grad_j;
                out.derivatives[k] += grad_k;
                out.derivatives[i] -= grad_j + grad_k;

                out.virial -= w1 * dw2 * outer(&d_ik, &d_ik);
                out.virial -= w2 * dw1 * outer(&d_ij, &d_ij);
            }
        }
    }
    out
}

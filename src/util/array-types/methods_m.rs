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

use crate::types::*;

impl M33 {
    /// Get a zero matrix.
    #[inline(always)]
    pub fn zero() -> Self
    { M3([V3::zero(); 3]) }

    /// Get the identity matrix.
    #[inline(always)]
    pub fn eye() -> Self
    { M33::from_fn(V3::axis_unit) }

    /// Construct a matrix from a function that produces each row.
    #[inline(always)]
    pub fn from_fn(mut f: impl FnMut(usize) -> V3) -> Self
    { M3([f(0), f(1), f(2)]) }

    /// Construct a matrix from nested arrays of rows.
    #[inline(always)]
    pub fn from_rows(rows: &[[f64; 3]; 3]) -> Self
    { M33::from_fn(|r| V3(rows[r])) }

    /// Get the transpose.
    #[inline]
    pub fn t(&self) -> Self
    { M33::from_fn(|r| V3::from_fn(|c| self[c][r])) }

    /// Sum of the diagonal.
    #[inline]
    pub fn trace(&self) -> f64
    { self[0][0] + self[1][1] + self[2][2] }

    #[inline]
    pub fn det(&self) -> f64 {
        let M3([V3([a, b, c]), V3([d, e, f]), V3([g, h, i])]) = *self;
        a * (e * i - f * h) - b * (d * i - f * g) + c * (d * h - e * g)
    }

    /// Matrix inverse by cofactors.
    ///
    /// Returns `None` when the determinant is exactly zero; callers that care about
    /// near-singular matrices should check `det` against their own tolerance.
    pub fn inv(&self) -> Option<Self> {
        let det = self.det();
        if det == 0.0 {
            return None;
        }
        let M3([V3([a, b, c]), V3([d, e, f]), V3([g, h, i])]) = *self;
        let adjugate = M3([
            V3([e * i - f * h, c * h - b * i, b * f - c * e]),
            V3([f * g - d * i, a * i - c * g, c * d - a * f]),
            V3([d * h - e * g, b * g - a * h, a * e - b * d]),
        ]);
        Some(adjugate / det)
    }

    /// Apply a function to each element.
    #[inline]
    pub fn map(&self, mut f: impl FnMut(f64) -> f64) -> Self
    { M33::from_fn(|r| self[r].map(&mut f)) }

    /// Get the rows as nested arrays.
    #[inline]
    pub fn into_array(self) -> [[f64; 3]; 3]
    { [self[0].0, self[1].0, self[2].0] }
}

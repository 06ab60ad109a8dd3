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

impl V3 {
    /// Get a zero vector.
    #[inline(always)]
    pub fn zero() -> Self
    { V3([0.0; 3]) }

    /// Construct a vector from a function on indices.
    #[inline(always)]
    pub fn from_fn(mut f: impl FnMut(usize) -> f64) -> Self
    { V3([f(0), f(1), f(2)]) }

    /// Get the inner product of two vectors.
    ///
    /// It is recommended you write this as `V3::dot(a, b)`, rather than `a.dot(b)`.
    #[inline(always)]
    pub fn dot(&self, other: &V3) -> f64
    { dot(self, other) }

    /// Get the vector's squared magnitude.
    #[inline(always)]
    pub fn sqnorm(&self) -> f64
    { dot(self, self) }

    /// Get the vector's magnitude.
    #[inline(always)]
    pub fn norm(&self) -> f64
    { self.sqnorm().sqrt() }

    /// Apply a function to each element.
    #[inline(always)]
    pub fn map(&self, mut f: impl FnMut(f64) -> f64) -> Self
    { V3::from_fn(|i| f(self[i])) }

    /// Get a basis vector.
    #[inline(always)]
    pub fn axis_unit(i: usize) -> Self {
        assert!(i < 3, "Invalid axis for 3d vector: {}", i);
        V3::from_fn(|k| if k == i { 1.0 } else { 0.0 })
    }
}

/// Inner product of two vectors.
#[inline(always)]
pub fn dot(a: &V3, b: &V3) -> f64
{ a[0] * b[0] + a[1] * b[1] + a[2] * b[2] }

/// Outer product `a ⊗ b`, whose element `(r, c)` is `a[r] * b[c]`.
#[inline(always)]
pub fn outer(a: &V3, b: &V3) -> M33
{ M33::from_fn(|r| b * a[r]) }

impl<'a> std::ops::Mul<f64> for &'a V3 {
    type Output = V3;

    #[inline(always)]
    fn mul(self, scale: f64) -> V3
    { *self * scale }
}

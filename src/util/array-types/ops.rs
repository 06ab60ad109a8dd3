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
use std::ops::{Add, Sub, Neg, Mul, Div, AddAssign, SubAssign, MulAssign};

// ---------------------------------------------------------------------------
// elementwise binary operators, for owned and borrowed operands

macro_rules! impl_elementwise {
    ($Ty:ty, $Trait:ident, $method:ident, $AssignTrait:ident, $assign:ident, $op:tt) => {
        impl $Trait<$Ty> for $Ty {
            type Output = $Ty;

            #[inline]
            fn $method(self, other: $Ty) -> $Ty
            { <$Ty>::from_fn(|i| self[i] $op other[i]) }
        }

        impl<'a> $Trait<&'a $Ty> for &'a $Ty {
            type Output = $Ty;

            #[inline]
            fn $method(self, other: &'a $Ty) -> $Ty
            { *self $op *other }
        }

        impl $AssignTrait<$Ty> for $Ty {
            #[inline]
            fn $assign(&mut self, other: $Ty)
            { *self = *self $op other; }
        }
    };
}

impl_elementwise!(V3, Add, add, AddAssign, add_assign, +);
impl_elementwise!(V3, Sub, sub, SubAssign, sub_assign, -);
impl_elementwise!(M33, Add, add, AddAssign, add_assign, +);
impl_elementwise!(M33, Sub, sub, SubAssign, sub_assign, -);

// ---------------------------------------------------------------------------
// scalar operators

macro_rules! impl_scalar {
    ($Ty:ty) => {
        impl Neg for $Ty {
            type Output = $Ty;

            #[inline]
            fn neg(self) -> $Ty
            { <$Ty>::from_fn(|i| -self[i]) }
        }

        impl Mul<f64> for $Ty {
            type Output = $Ty;

            #[inline]
            fn mul(self, scale: f64) -> $Ty
            { <$Ty>::from_fn(|i| self[i] * scale) }
        }

        impl Mul<$Ty> for f64 {
            type Output = $Ty;

            #[inline]
            fn mul(self, value: $Ty) -> $Ty
            { value * self }
        }

        impl<'a> Mul<&'a $Ty> for f64 {
            type Output = $Ty;

            #[inline]
            fn mul(self, value: &'a $Ty) -> $Ty
            { *value * self }
        }

        impl Div<f64> for $Ty {
            type Output = $Ty;

            #[inline]
            fn div(self, scale: f64) -> $Ty
            { <$Ty>::from_fn(|i| self[i] / scale) }
        }

        impl MulAssign<f64> for $Ty {
            #[inline]
            fn mul_assign(&mut self, scale: f64)
            { *self = *self * scale; }
        }
    };
}

impl_scalar!(V3);
impl_scalar!(M33);

// ---------------------------------------------------------------------------
// matrix products

/// Row vector times matrix.
impl<'a> Mul<&'a M33> for V3 {
    type Output = V3;

    #[inline]
    fn mul(self, m: &'a M33) -> V3
    { V3::from_fn(|c| (0..3).map(|r| self[r] * m[r][c]).sum()) }
}

impl<'a> Mul<&'a M33> for &'a M33 {
    type Output = M33;

    #[inline]
    fn mul(self, other: &'a M33) -> M33
    { M3([self[0] * other, self[1] * other, self[2] * other]) }
}

impl std::iter::Sum for V3 {
    fn sum<I: Iterator<Item=V3>>(iter: I) -> V3
    { iter.fold(V3::zero(), |acc, v| acc + v) }
}

impl std::iter::Sum for M33 {
    fn sum<I: Iterator<Item=M33>>(iter: I) -> M33
    { iter.fold(M33::zero(), |acc, m| acc + m) }
}

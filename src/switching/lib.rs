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

//! Switching functions: smooth weights in `[0, 1]` that decay with distance.
//!
//! Everything downstream consumes them through the [`Switch`] trait, which only promises
//! a weight and a slope for a given squared distance.  The [`SwitchingFunction`] type
//! implements the usual functional forms, and can be parsed from the keyword form
//! `"RATIONAL R_0=0.3 NN=6 MM=12 D_MAX=1.0"`.

#[macro_use] extern crate failure;
#[macro_use] extern crate log;
#[cfg(test)] #[macro_use] extern crate bridgecv_assert_close;

use std::fmt;

mod function;
mod parse;

pub use crate::function::{SwitchingFunction, SwitchKind};
pub use crate::parse::SwitchParseError;

/// A weight and slope as a function of squared distance.
///
/// Implementations must return exactly `(0.0, 0.0)` for distances beyond their support,
/// since callers use that to skip work.
pub trait Switch: fmt::Debug + Send + Sync {
    /// Evaluate at the squared distance `r²`.
    ///
    /// Returns `(w, dfunc)`, where `dfunc = (dw/dr) / r`.  With this convention, the
    /// gradient of `w` with respect to the far end of a displacement `d` is `dfunc * d`.
    fn calculate_sqr(&self, distance_sq: f64) -> (f64, f64);

    /// Human-readable summary for logs.
    fn description(&self) -> String
    { format!("{:?}", self) }

    /// Distance beyond which the weight is guaranteed to be exactly zero, if there is one.
    fn support(&self) -> Option<f64>
    { None }
}

impl<'a, S: Switch + ?Sized> Switch for &'a S {
    fn calculate_sqr(&self, distance_sq: f64) -> (f64, f64) { (**self).calculate_sqr(distance_sq) }
    fn description(&self) -> String { (**self).description() }
    fn support(&self) -> Option<f64> { (**self).support() }
}

impl<S: Switch + ?Sized> Switch for Box<S> {
    fn calculate_sqr(&self, distance_sq: f64) -> (f64, f64) { (**self).calculate_sqr(distance_sq) }
    fn description(&self) -> String { (**self).description() }
    fn support(&self) -> Option<f64> { (**self).support() }
}

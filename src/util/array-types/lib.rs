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

//! Fixed-size linear algebra types.
//!
//! Vectors are row vectors. A matrix is stored as an array of rows, and products with
//! vectors are written `v * &m` (a row vector times a matrix), which is the convention
//! used for lattices: `cart = frac * &lattice`.

#[macro_use] extern crate bridgecv_assert_close;

mod types;
mod ops;
mod methods_v;
mod methods_m;
mod check_close;

pub use crate::types::*;
pub use crate::methods_v::{dot, outer};

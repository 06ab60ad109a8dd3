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

//! The bridging collective variable.
//!
//! Counts configurations where a particle from the bridging set sits close to both a
//! particle of group A and a particle of group B:
//!
//! ```text
//! s = Σ_{i ∈ bridging} Σ_{j ∈ A} Σ_{k ∈ B}  f_A(|r_ij|) f_B(|r_ik|)
//! ```
//!
//! * [`bridge`] is the triple loop producing the value, gradient and virial.
//! * [`neighbor`] decides which bridging particles are worth evaluating, rebuilding its
//!   reduced list on a fixed stride.
//! * [`BridgeSimple`] ties the two together behind the host-facing [`Colvar`] trait.

#[cfg(test)] #[macro_use] extern crate bridgecv_assert_close;
#[macro_use] extern crate failure;
#[macro_use] extern crate log;

pub mod atoms;
pub mod bridge;
pub mod cell;
pub mod neighbor;

mod bridge_simple;
mod colvar;
mod error;


pub use crate::atoms::{AtomIndex, CombinedList, Groups};
pub use crate::bridge_simple::{BridgeOptions, BridgeSimple};
pub use crate::cell::{Cell, Lattice};
pub use crate::colvar::{Colvar, ColvarOutput};
pub use crate::error::BridgeError;
pub use crate::neighbor::{CandidateSelector, ListStatus, NeighborListParams};

pub use bridgecv_switching::{Switch, SwitchingFunction};

pub type FailResult<T> = Result<T, failure::Error>;

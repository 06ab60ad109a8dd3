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

use crate::{AtomIndex, Cell, FailResult};
use bridgecv_array_types::{M33, V3};

/// What a colvar hands back to the host each step.
#[derive(Debug, Clone, PartialEq)]
pub struct ColvarOutput {
    pub value: f64,
    /// Gradient of `value` with respect to each requested atom, in the order of
    /// [`Colvar::requested_atoms`].
    pub derivatives: Vec<V3>,
    pub virial: M33,
}

impl ColvarOutput {
    pub fn zero(num_atoms: usize) -> Self {
        ColvarOutput {
            value: 0.0,
            derivatives: vec![V3::zero(); num_atoms],
            virial: M33::zero(),
        }
    }

    pub fn max_derivative_norm(&self) -> f64
    { self.derivatives.iter().map(|d| d.norm()).fold(0.0, f64::max) }
}

/// A collective variable, as seen by the code that steps through a simulation.
///
/// Each step, the host calls `prepare`, then supplies positions for exactly the atoms in
/// `requested_atoms` (in that order) to `calculate`.
pub trait Colvar: Send {
    /// Whether the value lives on a periodic domain.
    fn is_periodic(&self) -> bool;

    fn prepare(&mut self, step: u64, is_exchange: bool) -> FailResult<()>;

    /// Atoms needed by the next `calculate`.  Only meaningful after `prepare`.
    fn requested_atoms(&self) -> &[AtomIndex];

    fn calculate(&mut self, positions: &[V3], cell: &Cell) -> FailResult<ColvarOutput>;
}

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

//! Reduction of the bridging group to the particles near both A and B.
//!
//! The reduced list is rebuilt from the full list every `stride` steps and reused in
//! between.  Rebuilds happen on "fresh" steps, where the host has supplied positions for
//! the full list.

use crate::{BridgeError, Cell};
use crate::atoms::{CombinedList, Groups};
use bridgecv_array_types::V3;

/// Settings of the neighbor list (`NL_CUTOFF`, `NL_STRIDE`).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct NeighborListParams {
    pub cutoff: f64,
    pub stride: u64,
}

impl NeighborListParams {
    /// Validate raw user input.  Both values are required and must be positive.
    pub fn new(cutoff: Option<f64>, stride: Option<i64>) -> Result<Self, BridgeError> {
        let cutoff = match cutoff {
            Some(c) if c > 0.0 => c,
            _ => return Err(BridgeError::BadNeighborCutoff(cutoff)),
        };
        let stride = match stride {
            Some(s) if s > 0 => s as u64,
            _ => return Err(BridgeError::BadNeighborStride(stride)),
        };
        Ok(NeighborListParams { cutoff, stride })
    }
}

/// Which list was requested from the host for the current step.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ListStatus {
    /// The full list; the reduced list will be rebuilt from these positions.
    Fresh,
    /// The reduced list from the last rebuild.
    Reused,
}

/// Decides, step by step, whether to request the full list or the cached reduced one.
#[derive(Debug, Clone)]
pub struct CandidateSelector {
    params: Option<NeighborListParams>,
    full: CombinedList,
    reduced: CombinedList,
    first_time: bool,
    status: ListStatus,
}

impl CandidateSelector {
    /// `params` of `None` disables the neighbor list, so that every step uses the full list.
    pub fn new(groups: &Groups, params: Option<NeighborListParams>) -> Self {
        let full = groups.combined();
        CandidateSelector {
            params,
            reduced: full.clone(),
            full,
            first_time: true,
            status: ListStatus::Fresh,
        }
    }

    pub fn params(&self) -> Option<NeighborListParams> { self.params }
    pub fn status(&self) -> ListStatus { self.status }
    pub fn full_list(&self) -> &CombinedList { &self.full }
    pub fn reduced_list(&self) -> &CombinedList { &self.reduced }

    /// Choose the list for `step`.
    ///
    /// Exchange steps must always be fresh, since the configuration may have been replaced
    /// wholesale; a reused step that lands on an exchange is an error.  After an exchange,
    /// the next step is forced to be fresh.
    pub fn prepare(&mut self, step: u64, is_exchange: bool) -> Result<ListStatus, BridgeError> {
        let params = match self.params {
            Some(params) => params,
            None => return Ok(self.status),
        };

        if self.first_time || step % params.stride == 0 {
            self.status = ListStatus::Fresh;
            self.first_time = false;
        } else {
            self.status = ListStatus::Reused;
            if is_exchange {
                return Err(BridgeError::StaleListOnExchange { step });
            }
        }

        if is_exchange {
            self.first_time = true;
        }
        trace!("step {}: {:?} neighbor list", step, self.status);
        Ok(self.status)
    }

    /// The list whose positions the host should supply for this step.
    pub fn active_list(&self) -> &CombinedList {
        match self.status {
            ListStatus::Fresh => &self.full,
            ListStatus::Reused => &self.reduced,
        }
    }

    pub fn needs_rebuild(&self) -> bool
    { self.params.is_some() && self.status == ListStatus::Fresh }

    /// Rebuild the reduced list from positions of the full list.
    ///
    /// A bridging particle is kept when it is within the cutoff of at least one particle
    /// of A and at least one particle of B.
    ///
    /// # Panics
    ///
    /// Panics if the neighbor list is disabled or if `positions` does not match the full list.
    pub fn rebuild(&mut self, positions: &[V3], cell: &Cell) {
        let params = self.params.expect("rebuild called without a neighbor list");
        assert_eq!(positions.len(), self.full.len(), "rebuild needs positions of the full list");

        let cutoff_sq = params.cutoff * params.cutoff;
        let within = |i: usize, j: usize| cell.displacement(positions[i], positions[j]).sqnorm() <= cutoff_sq;

        self.reduced.clear_bridging();
        for i in self.full.bridging_range() {
            let near_a = self.full.a_range().any(|j| within(i, j));
            if near_a && self.full.b_range().any(|k| within(i, k)) {
                self.reduced.push_bridging(self.full.atoms()[i]);
            }
        }
        debug!(
            "neighbor list rebuilt: {} of {} bridging atoms kept",
            self.reduced.num_bridging(), self.full.num_bridging(),
        );
    }
}

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

use crate::{AtomIndex, BridgeError, Cell, Colvar, ColvarOutput, FailResult};
use crate::atoms::Groups;
use crate::bridge;
use crate::neighbor::{CandidateSelector, NeighborListParams};
use bridgecv_array_types::V3;
use bridgecv_switching::{Switch, SwitchingFunction};

/// Raw keyword input for [`BridgeSimple`], before validation.
#[derive(Debug, Clone, Default)]
pub struct BridgeOptions {
    pub group_a: Vec<AtomIndex>,
    pub group_b: Vec<AtomIndex>,
    pub bridging: Vec<AtomIndex>,
    /// Shared switching function for both groups.
    pub switch: Option<String>,
    pub switch_a: Option<String>,
    pub switch_b: Option<String>,
    pub nlist: bool,
    pub nl_cutoff: Option<f64>,
    pub nl_stride: Option<i64>,
}

/// Counts bridges between two groups through a third, using switching functions of distance.
///
/// With a neighbor list, bridging particles are only evaluated if they were within the
/// cutoff of both groups at the last rebuild.  This is only exact if the cutoff is at least
/// as long as the support of both switching functions, and the particles do not move too
/// far between rebuilds.
#[derive(Debug)]
pub struct BridgeSimple {
    groups: Groups,
    selector: CandidateSelector,
    switch_a: Box<dyn Switch>,
    switch_b: Box<dyn Switch>,
}

impl BridgeSimple {
    pub fn from_options(options: BridgeOptions) -> Result<Self, BridgeError> {
        let BridgeOptions {
            group_a, group_b, bridging,
            switch, switch_a, switch_b,
            nlist, nl_cutoff, nl_stride,
        } = options;

        let groups = Groups::new(group_a, group_b, bridging)?;
        let nl_params = match nlist {
            true => Some(NeighborListParams::new(nl_cutoff, nl_stride)?),
            false => None,
        };

        let parse = |keyword: &'static str, text: &str| {
            text.parse::<SwitchingFunction>()
                .map_err(|cause| BridgeError::BadSwitch { keyword, cause })
        };
        let (switch_a, switch_b) = match (switch, switch_a, switch_b) {
            (Some(_), Some(_), _) |
            (Some(_), _, Some(_)) => return Err(BridgeError::ConflictingSwitches),
            (Some(shared), None, None) => {
                let func = parse("SWITCH", &shared)?;
                (func.clone(), func)
            },
            (None, Some(a), Some(b)) => (parse("SWITCHA", &a)?, parse("SWITCHB", &b)?),
            (None, Some(_), None) => return Err(BridgeError::MissingSwitchB),
            (None, None, Some(_)) => return Err(BridgeError::MissingSwitchA),
            (None, None, None) => return Err(BridgeError::MissingSwitches),
        };

        Ok(BridgeSimple::with_switches(groups, nl_params, Box::new(switch_a), Box::new(switch_b)))
    }

    /// Build from validated parts, with arbitrary switching functions.
    pub fn with_switches(
        groups: Groups,
        nl_params: Option<NeighborListParams>,
        switch_a: Box<dyn Switch>,
        switch_b: Box<dyn Switch>,
    ) -> Self {
        info!(
            "Bridging {} atoms of group A and {} atoms of group B through {} atoms",
            groups.group_a().len(), groups.group_b().len(), groups.bridging().len(),
        );
        info!("  between bridging atoms and group A: {}", switch_a.description());
        info!("  between bridging atoms and group B: {}", switch_b.description());

        if let Some(NeighborListParams { cutoff, stride }) = nl_params {
            info!("  using neighbor lists with cutoff {} and stride {}", cutoff, stride);
            for &(name, switch) in &[("A", &switch_a), ("B", &switch_b)] {
                match switch.support() {
                    Some(support) if support <= cutoff => {},
                    Some(support) => warn!(
                        "NL_CUTOFF ({}) is shorter than the range of switching function {} ({}); \
                         some bridges may be missed", cutoff, name, support,
                    ),
                    None => warn!(
                        "switching function {} has no D_MAX; the neighbor list will neglect \
                         contributions from beyond NL_CUTOFF ({})", name, cutoff,
                    ),
                }
            }
        }

        let selector = CandidateSelector::new(&groups, nl_params);
        BridgeSimple { groups, selector, switch_a, switch_b }
    }

    pub fn groups(&self) -> &Groups { &self.groups }
    pub fn selector(&self) -> &CandidateSelector { &self.selector }
    pub fn switch_a(&self) -> &dyn Switch { &*self.switch_a }
    pub fn switch_b(&self) -> &dyn Switch { &*self.switch_b }
}

impl Colvar for BridgeSimple {
    fn is_periodic(&self) -> bool { false }

    fn prepare(&mut self, step: u64, is_exchange: bool) -> FailResult<()> {
        self.selector.prepare(step, is_exchange)?;
        Ok(())
    }

    fn requested_atoms(&self) -> &[AtomIndex]
    { self.selector.active_list().atoms() }

    fn calculate(&mut self, positions: &[V3], cell: &Cell) -> FailResult<ColvarOutput> {
        let expected = self.selector.active_list().len();
        ensure!(
            positions.len() == expected,
            "expected positions for {} atoms, got {}", expected, positions.len(),
        );

        if self.selector.needs_rebuild() {
            self.selector.rebuild(positions, cell);
        }

        // On a rebuild step this is still the full list.
        let list = self.selector.active_list();
        Ok(bridge::accumulate(list, positions, cell, &*self.switch_a, &*self.switch_b))
    }
}

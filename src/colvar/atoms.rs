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

//! Particle groups and the combined list requested from the host.

use crate::BridgeError;
use std::collections::HashMap;
use std::fmt;
use std::ops::Range;

/// Zero-based index into the host's full array of positions.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AtomIndex(pub usize);

impl fmt::Display for AtomIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result
    { fmt::Display::fmt(&self.0, f) }
}

pub(crate) const GROUP_A: &str = "GROUPA";
pub(crate) const GROUP_B: &str = "GROUPB";
pub(crate) const BRIDGING: &str = "BRIDGING_ATOMS";

/// The three particle groups.
///
/// Each is non-empty, free of repeats, and disjoint from the others.  The order within
/// each group fixes where its particles appear in the combined list.
#[derive(Debug, Clone, PartialEq)]
pub struct Groups {
    group_a: Vec<AtomIndex>,
    group_b: Vec<AtomIndex>,
    bridging: Vec<AtomIndex>,
}

impl Groups {
    pub fn new(
        group_a: Vec<AtomIndex>,
        group_b: Vec<AtomIndex>,
        bridging: Vec<AtomIndex>,
    ) -> Result<Self, BridgeError> {
        let named = [(GROUP_A, &group_a), (GROUP_B, &group_b), (BRIDGING, &bridging)];

        let mut owner = HashMap::new();
        for &(name, atoms) in &named {
            if atoms.is_empty() {
                return Err(BridgeError::EmptyGroup(name));
            }
            for &atom in atoms.iter() {
                match owner.insert(atom, name) {
                    None => {},
                    Some(prev) if prev == name => {
                        return Err(BridgeError::DuplicateAtom { group: name, atom: atom.0 });
                    },
                    Some(prev) => {
                        return Err(BridgeError::OverlappingGroups { atom: atom.0, first: prev, second: name });
                    },
                }
            }
        }
        Ok(Groups { group_a, group_b, bridging })
    }

    pub fn group_a(&self) -> &[AtomIndex] { &self.group_a }
    pub fn group_b(&self) -> &[AtomIndex] { &self.group_b }
    pub fn bridging(&self) -> &[AtomIndex] { &self.bridging }

    /// The full combined list, `A ++ B ++ bridging`.
    pub fn combined(&self) -> CombinedList {
        let atoms = {
            self.group_a.iter()
                .chain(&self.group_b)
                .chain(&self.bridging)
                .cloned().collect()
        };
        CombinedList { atoms, num_a: self.group_a.len(), num_b: self.group_b.len() }
    }
}

/// An ordered list of atoms laid out as `A ++ B ++ bridging`.
///
/// The A and B prefix is fixed; the bridging tail may be a subset of the full bridging
/// group (as in a neighbor list).
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedList {
    atoms: Vec<AtomIndex>,
    num_a: usize,
    num_b: usize,
}

impl CombinedList {
    pub fn atoms(&self) -> &[AtomIndex] { &self.atoms }
    pub fn len(&self) -> usize { self.atoms.len() }

    pub fn a_range(&self) -> Range<usize> { 0..self.num_a }
    pub fn b_range(&self) -> Range<usize> { self.num_a..self.bridging_start() }
    pub fn bridging_range(&self) -> Range<usize> { self.bridging_start()..self.len() }

    pub fn bridging_start(&self) -> usize { self.num_a + self.num_b }
    pub fn num_bridging(&self) -> usize { self.len() - self.bridging_start() }

    /// Drop the bridging tail, keeping only the A and B prefix.
    pub fn clear_bridging(&mut self) {
        let start = self.bridging_start();
        self.atoms.truncate(start);
    }

    pub fn push_bridging(&mut self, atom: AtomIndex) { self.atoms.push(atom) }
}

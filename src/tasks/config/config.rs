/* ********************************************************************** **
**  This file is part of bridgecv.                                        **
**                                                                        **
**  bridgecv is free software: you can redistribute it and/or modify it   **
**  under the terms of the GNU General Public License as published by the **
**  Free Software Foundation, either version 3 of the License, or (at     **
**  your option) any later version.                                       **
**                                                                        **
**      http://www.gnu.org/licenses/                                      **
**                                                                        **
** Do note that, while the whole of bridgecv is licensed under the GPL,   **
** many parts of it are licensed under more permissive terms.             **
** ********************************************************************** */

//! Types that make up the config file.
//!
//! ```yaml
//! cell: [[10, 0, 0], [0, 10, 0], [0, 0, 10]]
//! exchange-stride: 100
//! colvars:
//!   - action: BRIDGE_SIMPLE
//!     label: bridge
//!     group-a: "1-3"
//!     group-b: [4]
//!     bridging-atoms: "5-20"
//!     switch: "RATIONAL R_0=0.3"
//!     nlist: true
//!     nl-cutoff: 1.2
//!     nl-stride: 10
//! ```

use crate::{AtomList, YamlRead};
use serde::de;

/// Root settings object.
///
/// This is what you should deserialize.
#[derive(Serialize)]
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSettings(pub Settings);

impl std::ops::Deref for ValidatedSettings {
    type Target = Settings;

    fn deref(&self) -> &Settings { &self.0 }
}

/// Raw deserialized form of settings.
///
/// You shouldn't deserialize this type directly; deserialize `ValidatedSettings` instead.
#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
    /// Rows are the lattice vectors.  `None` means no periodic boundary conditions.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell: Option<[[f64; 3]; 3]>,

    /// Steps that are nonzero multiples of this are replica exchange steps.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange_stride: Option<i64>,

    pub colvars: Vec<ColvarSettings>,
}
derive_yaml_read!{Settings}

derive_yaml_read!{ValidatedSettings}

impl<'de> de::Deserialize<'de> for ValidatedSettings {
    fn deserialize<D: de::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let cereal: Settings = de::Deserialize::deserialize(deserializer)?;

        cereal.validate().map_err(de::Error::custom)
    }
}

/// One collective variable, selected by its `action` name.
#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq)]
#[serde(tag = "action")]
pub enum ColvarSettings {
    /// Bridges between two groups of atoms through a third.
    #[serde(rename = "BRIDGE_SIMPLE")]
    BridgeSimple(BridgeSimpleSettings),
}

impl ColvarSettings {
    pub fn label(&self) -> &str {
        match self {
            ColvarSettings::BridgeSimple(settings) => &settings.label,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct BridgeSimpleSettings {
    /// Column name in the output.
    pub label: String,

    pub group_a: AtomList,
    pub group_b: AtomList,
    pub bridging_atoms: AtomList,

    /// Switching function used for both groups, e.g. `"RATIONAL R_0=0.3 D_MAX=1.0"`.
    ///
    /// Give either this or both of `switch-a` and `switch-b`.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub switch: Option<String>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub switch_a: Option<String>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub switch_b: Option<String>,

    /// Use a neighbor list of bridging atoms.  Requires `nl-cutoff` and `nl-stride`.
    #[serde(default)]
    pub nlist: bool,

    /// Should be no shorter than the `D_MAX` of both switching functions.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nl_cutoff: Option<f64>,

    /// Steps between neighbor list rebuilds.  Must divide `exchange-stride`.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nl_stride: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::YamlRead;

    const EXAMPLE: &str = r#"
cell: [[10, 0, 0], [0, 10, 0], [0, 0, 10]]
exchange-stride: 100
colvars:
  - action: BRIDGE_SIMPLE
    label: bridge
    group-a: "1-3"
    group-b: [4]
    bridging-atoms: "5-9:2"
    switch: "RATIONAL R_0=0.3"
    nlist: true
    nl-cutoff: 1.2
    nl-stride: 10
  - action: BRIDGE_SIMPLE
    label: other
    group-a: 2
    group-b: 3
    bridging-atoms: [5, 6]
    switch-a: "EXP R_0=0.2"
    switch-b: "GAUSSIAN R_0=0.2"
"#;

    #[test]
    fn example() {
        let settings = ValidatedSettings::from_str(EXAMPLE).unwrap();
        assert_eq!(settings.cell.unwrap()[1], [0.0, 10.0, 0.0]);
        assert_eq!(settings.exchange_stride, Some(100));
        assert_eq!(settings.colvars.len(), 2);
        assert_eq!(settings.colvars[1].label(), "other");

        let ColvarSettings::BridgeSimple(first) = &settings.colvars[0];
        assert_eq!(first.group_a, AtomList(vec![1, 2, 3]));
        assert_eq!(first.group_b, AtomList(vec![4]));
        assert_eq!(first.bridging_atoms, AtomList(vec![5, 7, 9]));
        assert_eq!(first.switch.as_ref().map(|s| &s[..]), Some("RATIONAL R_0=0.3"));
        assert_eq!(first.switch_a, None);
        assert!(first.nlist);
        assert_eq!(first.nl_cutoff, Some(1.2));
        assert_eq!(first.nl_stride, Some(10));

        let ColvarSettings::BridgeSimple(second) = &settings.colvars[1];
        assert!(!second.nlist);
        assert_eq!(second.nl_cutoff, None);
        assert_eq!(second.switch_b.as_ref().map(|s| &s[..]), Some("GAUSSIAN R_0=0.2"));
    }

    #[test]
    fn defaults() {
        let settings = ValidatedSettings::from_str(r#"
colvars:
  - action: BRIDGE_SIMPLE
    label: b
    group-a: 1
    group-b: 2
    bridging-atoms: 3
    switch: "RATIONAL R_0=0.3"
"#).unwrap();
        assert_eq!(settings.cell, None);
        assert_eq!(settings.exchange_stride, None);
    }

    #[test]
    fn unknown_action() {
        assert!(ValidatedSettings::from_str(r#"
colvars:
  - action: COORDINATION
    label: b
"#).is_err());
    }

    #[test]
    fn missing_group() {
        assert!(ValidatedSettings::from_str(r#"
colvars:
  - action: BRIDGE_SIMPLE
    label: b
    group-a: 1
    bridging-atoms: 3
    switch: "RATIONAL R_0=0.3"
"#).is_err());
    }
}

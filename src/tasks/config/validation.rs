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

//! Checks performed after deserialization that serde cannot express.

use crate::config::*;
use failure::Error;
use std::collections::HashSet;

impl Settings {
    pub fn validate(self) -> Result<ValidatedSettings, Error> {
        ensure!(!self.colvars.is_empty(), "no colvars were given");

        let mut labels = HashSet::new();
        for colvar in &self.colvars {
            let label = colvar.label();
            ensure!(!label.trim().is_empty(), "colvar labels must not be empty");
            ensure!(!label.contains(char::is_whitespace), "colvar label '{}' contains whitespace", label);
            ensure!(labels.insert(label), "colvar label '{}' is used more than once", label);
        }

        if let Some(stride) = self.exchange_stride {
            ensure!(stride > 0, "exchange-stride must be positive (got {})", stride);
        }

        if let Some(cell) = &self.cell {
            check_cell(cell)?;
        }

        Ok(ValidatedSettings(self))
    }
}

fn check_cell(rows: &[[f64; 3]; 3]) -> Result<(), Error> {
    ensure!(
        rows.iter().flat_map(|row| row.iter()).all(|x| x.is_finite()),
        "cell contains non-finite values: {:?}", rows,
    );

    let [a, b, c] = *rows;
    let det = {
        a[0] * (b[1] * c[2] - b[2] * c[1])
        - a[1] * (b[0] * c[2] - b[2] * c[0])
        + a[2] * (b[0] * c[1] - b[1] * c[0])
    };
    let norm = |v: [f64; 3]| f64::sqrt(v[0] * v[0] + v[1] * v[1] + v[2] * v[2]);
    ensure!(
        det.abs() > 1e-10 * norm(a) * norm(b) * norm(c),
        "cell is singular (determinant {}): {:?}", det, rows,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::{ValidatedSettings, YamlRead};

    fn read(text: &str) -> Result<ValidatedSettings, serde_yaml::Error>
    { ValidatedSettings::from_str(text) }

    fn colvar(label: &str) -> String {
        format!("
  - action: BRIDGE_SIMPLE
    label: {}
    group-a: 1
    group-b: 2
    bridging-atoms: 3
    switch: \"RATIONAL R_0=0.3\"", label)
    }

    #[test]
    fn labels() {
        assert!(read(&format!("colvars:{}{}", colvar("a"), colvar("b"))).is_ok());
        assert!(read(&format!("colvars:{}{}", colvar("a"), colvar("a"))).is_err());
        assert!(read(&format!("colvars:{}", colvar("'a b'"))).is_err());
    }

    #[test]
    fn no_colvars() {
        assert!(read("colvars: []").is_err());
    }

    #[test]
    fn exchange_stride() {
        assert!(read(&format!("exchange-stride: 5\ncolvars:{}", colvar("a"))).is_ok());
        assert!(read(&format!("exchange-stride: 0\ncolvars:{}", colvar("a"))).is_err());
        assert!(read(&format!("exchange-stride: -2\ncolvars:{}", colvar("a"))).is_err());
    }

    #[test]
    fn cells() {
        let with_cell = |cell: &str| read(&format!("cell: {}\ncolvars:{}", cell, colvar("a")));
        assert!(with_cell("[[3, 0, 0], [1, 3, 0], [0, 0, 3]]").is_ok());
        assert!(with_cell("[[3, 0, 0], [6, 0, 0], [0, 0, 3]]").is_err());
        assert!(with_cell("[[3, 0, 0], [0, 3, 0], [0, 0, 0]]").is_err());
        assert!(with_cell("[[3, 0], [0, 3, 0], [0, 0, 3]]").is_err());
    }
}

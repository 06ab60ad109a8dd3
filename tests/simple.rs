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

#[macro_use] extern crate bridgecv_assert_close;

use failure::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempdir::TempDir;

fn resource(name: &str) -> PathBuf
{ Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/resources").join(name) }

fn bridgecv(args: &[&dyn AsRef<std::ffi::OsStr>]) -> Result<Output, Error> {
    let mut command = Command::new(env!("CARGO_BIN_EXE_bridgecv"));
    for arg in args {
        command.arg(arg);
    }
    Ok(command.output()?)
}

fn read_table(path: &Path) -> Result<(String, Vec<Vec<f64>>), Error> {
    let text = fs::read_to_string(path)?;
    let mut lines = text.lines();
    let header = lines.next().ok_or_else(|| failure::err_msg("empty output"))?.to_string();
    let rows = {
        lines.map(|line| {
            line.split_whitespace()
                .map(|word| word.parse::<f64>().map_err(Error::from))
                .collect::<Result<Vec<_>, _>>()
        }).collect::<Result<Vec<_>, _>>()?
    };
    Ok((header, rows))
}

#[test]
fn simple_test() {
    let dir = TempDir::new("bridgecv-test").unwrap();
    let out = dir.path().join("COLVAR");
    let output = bridgecv(&[
        &"-c", &resource("bridge.yaml"),
        &resource("bridge.xyz"),
        &"-o", &out,
    ]).unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let (header, rows) = read_table(&out).unwrap();
    assert_eq!(header, "#! FIELDS step bridge bridge_nl");
    assert_eq!(rows.len(), 3);

    let expected = [0.25, 1.0 / 81.0, 0.5];
    for (step, (row, &value)) in rows.iter().zip(&expected).enumerate() {
        assert_eq!(row.len(), 3);
        assert_eq!(row[0], step as f64);
        assert_close!(rel=1e-8, row[1], value);
        assert_close!(rel=1e-8, row[2], value);
    }
}

#[test]
fn table_on_stdout() {
    let output = bridgecv(&[&"-c", &resource("bridge.yaml"), &resource("bridge.xyz")]).unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("#! FIELDS step bridge bridge_nl\n"));
    assert_eq!(stdout.lines().count(), 4);
}

#[test]
fn bad_config_fails() {
    let dir = TempDir::new("bridgecv-test").unwrap();
    let config = dir.path().join("bad.yaml");
    fs::write(&config, "\
colvars:
  - action: BRIDGE_SIMPLE
    label: bridge
    group-a: 1
    group-b: 2
    bridging-atoms: 3
    switch-a: \"RATIONAL R_0=0.5\"
").unwrap();

    let output = bridgecv(&[&"-c", &config, &resource("bridge.xyz")]).unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("SWITCHA was given without SWITCHB"), "{}", stderr);
}

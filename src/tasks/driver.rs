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

//! Steps each colvar through a trajectory, the way an MD engine would.

use crate::FailResult;
use crate::trajectory::Frame;
use bridgecv_array_types::{M33, V3};
use bridgecv_colvar::{AtomIndex, BridgeOptions, BridgeSimple, Cell, Colvar};
use bridgecv_tasks_config::{AtomList, ColvarSettings, ValidatedSettings};

use failure::ResultExt;
use itertools::Itertools;
use std::io::Write;

struct Labeled {
    label: String,
    colvar: Box<dyn Colvar>,
}

pub struct Driver {
    colvars: Vec<Labeled>,
    cell: Cell,
    exchange_stride: Option<u64>,
}

impl Driver {
    pub fn from_settings(settings: &ValidatedSettings) -> FailResult<Self> {
        let cell = match settings.cell {
            Some(rows) => Cell::periodic(&M33::from_rows(&rows))?,
            None => Cell::NonPeriodic,
        };
        let exchange_stride = settings.exchange_stride.map(|s| s as u64);

        let colvars = {
            settings.colvars.iter()
                .map(|settings| -> FailResult<_> {
                    let label = settings.label().to_string();
                    info!("Setting up colvar '{}'", label);
                    let colvar = make_colvar(settings)
                        .with_context(|_| format!("while setting up colvar '{}'", label))?;
                    Ok(Labeled { label, colvar })
                })
                .collect::<FailResult<Vec<_>>>()?
        };
        Ok(Driver { colvars, cell, exchange_stride })
    }

    pub fn labels(&self) -> Vec<&str>
    { self.colvars.iter().map(|c| &c.label[..]).collect() }

    /// Replica exchanges are attempted at nonzero multiples of the exchange stride.
    pub fn is_exchange_step(&self, step: u64) -> bool {
        match self.exchange_stride {
            Some(stride) => step > 0 && step % stride == 0,
            None => false,
        }
    }

    /// Evaluate every colvar on one frame.
    pub fn step(&mut self, step: u64, frame: &Frame) -> FailResult<Vec<f64>> {
        let is_exchange = self.is_exchange_step(step);
        let frame_cell;
        let cell = match frame.cell {
            Some(matrix) => {
                frame_cell = Cell::periodic(&matrix).with_context(|_| format!("bad cell in frame {}", step))?;
                &frame_cell
            },
            None => &self.cell,
        };

        let mut values = Vec::with_capacity(self.colvars.len());
        for Labeled { label, colvar } in &mut self.colvars {
            colvar.prepare(step, is_exchange)
                .with_context(|_| format!("colvar '{}' at step {}", label, step))?;

            let positions = gather(colvar.requested_atoms(), &frame.positions)
                .with_context(|_| format!("colvar '{}' at step {}", label, step))?;
            let output = colvar.calculate(&positions, cell)
                .with_context(|_| format!("colvar '{}' at step {}", label, step))?;

            debug!(
                "step {}: {} = {} (max |gradient| {:.3e}, virial trace {:.3e})",
                step, label, output.value, output.max_derivative_norm(), output.virial.trace(),
            );
            values.push(output.value);
        }
        Ok(values)
    }

    /// Run over a whole trajectory, writing a table with one row per frame.
    ///
    /// Returns the number of frames processed.
    pub fn run<W: Write>(
        &mut self,
        frames: impl IntoIterator<Item=FailResult<Frame>>,
        mut out: W,
    ) -> FailResult<u64> {
        writeln!(out, "#! FIELDS step {}", self.labels().iter().join(" "))?;

        let mut num_frames = 0;
        for (step, frame) in frames.into_iter().enumerate() {
            let step = step as u64;
            let frame = frame.with_context(|_| format!("while reading frame {}", step))?;
            trace!("step {}: {} atoms", step, frame.positions.len());

            let values = self.step(step, &frame)?;
            write!(out, "{}", step)?;
            for value in values {
                write!(out, " {:.10}", value)?;
            }
            writeln!(out)?;
            num_frames += 1;
        }
        out.flush()?;
        Ok(num_frames)
    }
}

fn gather(atoms: &[AtomIndex], positions: &[V3]) -> FailResult<Vec<V3>> {
    atoms.iter().map(|&AtomIndex(i)| match positions.get(i) {
        Some(&position) => Ok(position),
        None => bail!("atom {} was requested, but the frame only has {} atoms", i + 1, positions.len()),
    }).collect()
}

fn make_colvar(settings: &ColvarSettings) -> FailResult<Box<dyn Colvar>> {
    let atoms = |list: &AtomList| -> Vec<AtomIndex> { list.indices().into_iter().map(AtomIndex).collect() };
    match settings {
        ColvarSettings::BridgeSimple(settings) => {
            let colvar = BridgeSimple::from_options(BridgeOptions {
                group_a: atoms(&settings.group_a),
                group_b: atoms(&settings.group_b),
                bridging: atoms(&settings.bridging_atoms),
                switch: settings.switch.clone(),
                switch_a: settings.switch_a.clone(),
                switch_b: settings.switch_b.clone(),
                nlist: settings.nlist,
                nl_cutoff: settings.nl_cutoff,
                nl_stride: settings.nl_stride,
            })?;
            Ok(Box::new(colvar))
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridgecv_colvar::BridgeError;
    use bridgecv_tasks_config::YamlRead;

    fn driver(yaml: &str) -> Driver {
        let settings = ValidatedSettings::from_str(yaml).unwrap();
        Driver::from_settings(&settings).unwrap()
    }

    fn frame(positions: &[[f64; 3]]) -> Frame {
        Frame {
            elements: vec!["X".to_string(); positions.len()],
            positions: positions.iter().map(|&v| V3(v)).collect(),
            cell: None,
        }
    }

    const SIMPLE: &str = r#"
colvars:
  - action: BRIDGE_SIMPLE
    label: bridge
    group-a: 1
    group-b: 2
    bridging-atoms: "3-4"
    switch: "RATIONAL R_0=0.5"
"#;

    #[test]
    fn writes_a_table() {
        let mut driver = driver(SIMPLE);
        let frames = vec![
            // one bridge with x = 1 on both sides, each weighing 1/2
            Ok(frame(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.5, 0.0, 0.0], [50.0, 0.0, 0.0]])),
            Ok(frame(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [50.0, 0.0, 0.0], [0.5, 0.0, 0.0]])),
        ];
        let mut out = vec![];
        assert_eq!(driver.run(frames, &mut out).unwrap(), 2);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "#! FIELDS step bridge");
        assert_eq!(lines.len(), 3);
        for (step, line) in lines[1..].iter().enumerate() {
            let words: Vec<_> = line.split_whitespace().collect();
            assert_eq!(words[0], step.to_string());
            assert_close!(rel=1e-8, words[1].parse::<f64>().unwrap(), 0.25);
        }
    }

    #[test]
    fn frame_cell_overrides_config() {
        let mut driver = driver(&format!("cell: [[100, 0, 0], [0, 100, 0], [0, 0, 100]]\n{}", SIMPLE));
        let mut frame = frame(&[[0.0, 0.0, 0.0], [-1.0, 0.0, 0.0], [9.5, 0.0, 0.0], [55.0, 0.0, 0.0]]);
        // far apart in the config's cell
        assert!(driver.step(0, &frame).unwrap()[0] < 1e-6);

        // but images of each other in this one
        frame.cell = Some(M33::from_rows(&[[10.0, 0.0, 0.0], [0.0, 10.0, 0.0], [0.0, 0.0, 10.0]]));
        assert_close!(rel=1e-6, driver.step(1, &frame).unwrap()[0], 0.25);
    }

    #[test]
    fn exchange_steps() {
        let driver = driver(&format!("exchange-stride: 4\n{}", SIMPLE));
        let exchanges: Vec<_> = (0..10).filter(|&s| driver.is_exchange_step(s)).collect();
        assert_eq!(exchanges, vec![4, 8]);
    }

    #[test]
    fn stride_mismatch_is_fatal() {
        let mut driver = driver(r#"
exchange-stride: 4
colvars:
  - action: BRIDGE_SIMPLE
    label: bridge
    group-a: 1
    group-b: 2
    bridging-atoms: "3-4"
    switch: "RATIONAL R_0=0.5"
    nlist: true
    nl-cutoff: 2.0
    nl-stride: 3
"#);
        let positions = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.5, 0.0, 0.0], [50.0, 0.0, 0.0]];
        let frames = (0..6).map(|_| Ok(frame(&positions)));
        let mut out = vec![];
        let error = driver.run(frames, &mut out).unwrap_err();
        assert!(error.iter_chain().any(|cause| match cause.downcast_ref::<BridgeError>() {
            Some(BridgeError::StaleListOnExchange { step: 4 }) => true,
            _ => false,
        }));

        // steps before the failure were written
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1 + 4);
    }

    #[test]
    fn missing_atoms() {
        let mut driver = driver(SIMPLE);
        assert!(driver.step(0, &frame(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.5, 0.0, 0.0]])).is_err());
    }

    #[test]
    fn bad_colvar() {
        let settings = ValidatedSettings::from_str(r#"
colvars:
  - action: BRIDGE_SIMPLE
    label: bridge
    group-a: 1
    group-b: 1
    bridging-atoms: 3
    switch: "RATIONAL R_0=0.5"
"#).unwrap();
        assert!(Driver::from_settings(&settings).is_err());
    }
}

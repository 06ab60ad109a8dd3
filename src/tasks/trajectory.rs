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

//! Multi-frame XYZ files.
//!
//! Each frame is an atom count, a comment line, then one `ELEMENT X Y Z` line per atom.
//! Extra columns after the coordinates are ignored.  The comment line is free text, except
//! that an extended-XYZ style `Lattice="..."` entry in it gives the cell of that frame:
//! nine numbers are the rows of the lattice matrix, three are orthorhombic lengths.

use crate::FailResult;
use bridgecv_array_types::{M33, V3};

use failure::ResultExt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub elements: Vec<String>,
    pub positions: Vec<V3>,
    /// Cell from a `Lattice="..."` entry in the comment line, if there was one.
    pub cell: Option<M33>,
}

/// Reads frames lazily, one per call to `next`.
pub struct XyzReader<R> {
    lines: io::Lines<R>,
    line_number: usize,
    done: bool,
}

impl XyzReader<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> FailResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|_| format!("could not open trajectory '{}'", path.display()))?;
        Ok(XyzReader::new(BufReader::new(file)))
    }
}

impl<R: BufRead> XyzReader<R> {
    pub fn new(reader: R) -> Self
    { XyzReader { lines: reader.lines(), line_number: 0, done: false } }

    fn next_line(&mut self) -> FailResult<Option<String>> {
        match self.lines.next() {
            None => Ok(None),
            Some(line) => {
                self.line_number += 1;
                Ok(Some(line?))
            },
        }
    }

    fn expect_line(&mut self) -> FailResult<String> {
        match self.next_line()? {
            Some(line) => Ok(line),
            None => bail!("unexpected end of file after line {}", self.line_number),
        }
    }

    fn read_frame(&mut self) -> FailResult<Option<Frame>> {
        let count_line = loop {
            match self.next_line()? {
                None => return Ok(None),
                Some(ref line) if line.trim().is_empty() => continue,
                Some(line) => break line,
            }
        };
        let count: usize = match count_line.trim().parse() {
            Ok(count) => count,
            Err(_) => bail!("line {}: expected an atom count, got '{}'", self.line_number, count_line.trim()),
        };

        let comment = self.expect_line()?;
        let cell = {
            cell_from_comment(&comment)
                .with_context(|_| format!("line {}: bad Lattice in comment", self.line_number))?
        };

        let mut elements = Vec::with_capacity(count);
        let mut positions = Vec::with_capacity(count);
        for _ in 0..count {
            let line = self.expect_line()?;
            let mut words = line.split_whitespace();
            let element = match words.next() {
                Some(element) => element.to_string(),
                None => bail!("line {}: expected an atom, got an empty line", self.line_number),
            };
            let mut coords = [0.0; 3];
            for coord in &mut coords {
                *coord = match words.next().map(str::parse::<f64>) {
                    Some(Ok(x)) => x,
                    _ => bail!("line {}: expected three coordinates in '{}'", self.line_number, line.trim()),
                };
            }
            elements.push(element);
            positions.push(V3(coords));
        }
        Ok(Some(Frame { elements, positions, cell }))
    }
}

impl<R: BufRead> Iterator for XyzReader<R> {
    type Item = FailResult<Frame>;

    fn next(&mut self) -> Option<FailResult<Frame>> {
        if self.done {
            return None;
        }
        match self.read_frame() {
            Ok(Some(frame)) => Some(Ok(frame)),
            Ok(None) => {
                self.done = true;
                None
            },
            Err(e) => {
                self.done = true;
                Some(Err(e))
            },
        }
    }
}

const LATTICE_KEY: &str = "Lattice=\"";

fn cell_from_comment(comment: &str) -> FailResult<Option<M33>> {
    let rest = match comment.find(LATTICE_KEY) {
        Some(start) => &comment[start + LATTICE_KEY.len()..],
        None => return Ok(None),
    };
    let text = match rest.find('"') {
        Some(end) => &rest[..end],
        None => bail!("unterminated quote after Lattice="),
    };
    let numbers = {
        text.split_whitespace()
            .map(|word| word.parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .with_context(|_| format!("expected numbers, got '{}'", text))?
    };
    match numbers.len() {
        3 => Ok(Some(M33::from_fn(|r| V3::from_fn(|c| if r == c { numbers[r] } else { 0.0 })))),
        9 => Ok(Some(M33::from_fn(|r| V3::from_fn(|c| numbers[3 * r + c])))),
        n => bail!("expected 3 or 9 numbers, got {}", n),
    }
}

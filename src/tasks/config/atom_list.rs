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

//! Lists of atoms, written with one-based serial numbers.

use failure::Error;
use serde::de;
use std::fmt;

/// A list of atoms, as one-based serial numbers in the order given.
///
/// In a config file this is either a YAML list (of serials or range strings), a single
/// serial, or a string like `"1,4,7-9 12-20:2"`.
#[derive(Serialize)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomList(pub Vec<usize>);

impl AtomList {
    pub fn serials(&self) -> &[usize] { &self.0 }

    /// Zero-based indices.
    pub fn indices(&self) -> Vec<usize>
    { self.0.iter().map(|&serial| serial - 1).collect() }
}

/// Parse a comma- or whitespace-separated list of serials and ranges.
///
/// `a-b` is inclusive of both ends, and `a-b:s` takes every `s`th serial starting from `a`.
pub fn parse_serials(s: &str) -> Result<Vec<usize>, Error> {
    let mut out = vec![];
    for token in s.split(|c: char| c == ',' || c.is_whitespace()).filter(|t| !t.is_empty()) {
        parse_token(token, &mut out)?;
    }
    ensure!(!out.is_empty(), "no atoms in list '{}'", s);
    Ok(out)
}

fn parse_token(token: &str, out: &mut Vec<usize>) -> Result<(), Error> {
    let serial = |word: &str| -> Result<usize, Error> {
        let serial: usize = match word.trim().parse() {
            Ok(serial) => serial,
            Err(_) => bail!("could not read atom serial from '{}' in '{}'", word, token),
        };
        ensure!(serial > 0, "atom serials start at 1 (got 0 in '{}')", token);
        Ok(serial)
    };

    let (range, stride) = match token.find(':') {
        Some(pos) => (&token[..pos], Some(&token[pos + 1..])),
        None => (token, None),
    };
    let stride = match stride {
        None => 1,
        Some(word) => match word.parse::<usize>() {
            Ok(0) => bail!("range stride must be positive in '{}'", token),
            Ok(stride) => stride,
            Err(_) => bail!("could not read range stride from '{}'", token),
        },
    };

    match range.find('-') {
        None => {
            ensure!(stride == 1, "a stride needs a range (in '{}')", token);
            out.push(serial(range)?);
        },
        Some(pos) => {
            let start = serial(&range[..pos])?;
            let end = serial(&range[pos + 1..])?;
            ensure!(start <= end, "range '{}' is backwards", token);
            out.extend((start..=end).step_by(stride));
        },
    }
    Ok(())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListItem {
    Serial(usize),
    Text(String),
}

// Manual impl, because #[derive(Deserialize)] on untagged enums discard
// all error messages.
impl<'de> de::Deserialize<'de> for AtomList {
    fn deserialize<D: de::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MyVisitor;

        impl<'de> de::Visitor<'de> for MyVisitor {
            type Value = AtomList;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                write!(formatter, "an atom serial, a list of them, or a string like \"1,4,7-9\"")
            }

            fn visit_u64<E: de::Error>(self, serial: u64) -> Result<Self::Value, E> {
                if serial == 0 {
                    return Err(E::custom("atom serials start at 1"));
                }
                Ok(AtomList(vec![serial as usize]))
            }

            fn visit_i64<E: de::Error>(self, serial: i64) -> Result<Self::Value, E> {
                if serial <= 0 {
                    return Err(E::custom(format!("atom serials start at 1 (got {})", serial)));
                }
                self.visit_u64(serial as u64)
            }

            fn visit_str<E: de::Error>(self, s: &str) -> Result<Self::Value, E> {
                parse_serials(s).map(AtomList).map_err(E::custom)
            }

            fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut out = vec![];
                while let Some(item) = seq.next_element()? {
                    match item {
                        ListItem::Serial(0) => return Err(de::Error::custom("atom serials start at 1")),
                        ListItem::Serial(serial) => out.push(serial),
                        ListItem::Text(text) => {
                            parse_token(text.trim(), &mut out).map_err(de::Error::custom)?;
                        },
                    }
                }
                if out.is_empty() {
                    return Err(de::Error::custom("empty list of atoms"));
                }
                Ok(AtomList(out))
            }
        }

        deserializer.deserialize_any(MyVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serials() {
        assert_eq!(parse_serials("1,4,7-9").unwrap(), vec![1, 4, 7, 8, 9]);
        assert_eq!(parse_serials("1-10:3").unwrap(), vec![1, 4, 7, 10]);
        assert_eq!(parse_serials(" 5  2, 3-3 ").unwrap(), vec![5, 2, 3]);
        assert_eq!(AtomList(vec![1, 4, 2]).indices(), vec![0, 3, 1]);
    }

    #[test]
    fn bad_serials() {
        for &bad in &["", " , ", "0", "3-1", "1-5:0", "1:2", "a", "2-x", "1-", "-3", "4-5:b"] {
            assert!(parse_serials(bad).is_err(), "{:?}", bad);
        }
    }

    #[test]
    fn from_yaml() {
        let read = |s: &str| serde_yaml::from_str::<AtomList>(s);
        assert_eq!(read("\"1-3,7\"").unwrap(), AtomList(vec![1, 2, 3, 7]));
        assert_eq!(read("[4, 2, \"8-10\"]").unwrap(), AtomList(vec![4, 2, 8, 9, 10]));
        assert_eq!(read("6").unwrap(), AtomList(vec![6]));
        assert!(read("0").is_err());
        assert!(read("[1, 0]").is_err());
        assert!(read("[]").is_err());
        assert!(read("\"2-1\"").is_err());
    }
}

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

//! The keyword form of a switching function: `NAME KEY=VALUE ... FLAG ...`,
//! optionally wrapped in braces.

use crate::function::{SwitchingFunction, SwitchKind};
use std::str::FromStr;

#[derive(Debug, Fail, Clone, PartialEq)]
pub enum SwitchParseError {
    #[fail(display = "missing all input for switching function")]
    Empty,

    #[fail(display = "cannot understand switching function type '{}'", _0)]
    UnknownKind(String),

    #[fail(display = "{} is required", _0)]
    MissingKey(&'static str),

    #[fail(display = "could not parse {} from '{}'", key, word)]
    BadValue { key: &'static str, word: String },

    #[fail(display = "found the following rogue keywords in switching function input : {}", _0)]
    RogueKeywords(String),

    #[fail(display = "{}", _0)]
    BadParameters(String),
}

pub(crate) fn parse(input: &str) -> Result<SwitchingFunction, SwitchParseError> {
    let input = strip_braces(input.trim());
    let mut words = input.split_whitespace();
    let name = words.next().ok_or(SwitchParseError::Empty)?;
    let mut keywords = Keywords(words.map(Keyword::from_word).collect());

    let d_0 = keywords.take_parsed("D_0")?.unwrap_or(0.0);
    let d_max = keywords.take_parsed("D_MAX")?;
    // STRETCH is accepted for old inputs, but stretching is the default anyway.
    keywords.take_flag("STRETCH")?;
    let stretch = !keywords.take_flag("NOSTRETCH")?;

    let kind = match &name.to_uppercase()[..] {
        "RATIONAL" => {
            let nn = keywords.take_parsed("NN")?.unwrap_or(6);
            let mm = keywords.take_parsed("MM")?.unwrap_or(0);
            SwitchKind::Rational { nn, mm: if mm == 0 { 2 * nn } else { mm } }
        },
        "EXP" => SwitchKind::Exponential,
        "GAUSSIAN" => SwitchKind::Gaussian,
        "SMAP" => {
            let a = keywords.take_parsed("A")?.ok_or(SwitchParseError::MissingKey("A"))?;
            let b = keywords.take_parsed("B")?.ok_or(SwitchParseError::MissingKey("B"))?;
            SwitchKind::Smap { a, b }
        },
        "CUBIC" => SwitchKind::Cubic,
        "TANH" => SwitchKind::Tanh,
        _ => return Err(SwitchParseError::UnknownKind(name.to_string())),
    };

    let r_0 = match kind {
        // derived from D_0 and D_MAX
        SwitchKind::Cubic => 0.0,
        _ => keywords.take_parsed("R_0")?.ok_or(SwitchParseError::MissingKey("R_0"))?,
    };

    keywords.finish()?;
    SwitchingFunction::new(kind, d_0, r_0, d_max, stretch)
}

fn strip_braces(s: &str) -> &str {
    match s.starts_with('{') && s.ends_with('}') {
        true => s[1..s.len() - 1].trim(),
        false => s,
    }
}

#[derive(Debug)]
struct Keyword<'a> {
    word: &'a str,
    key: &'a str,
    value: Option<&'a str>,
}

impl<'a> Keyword<'a> {
    fn from_word(word: &'a str) -> Self {
        let mut split = word.splitn(2, '=');
        let key = split.next().unwrap_or(word);
        Keyword { word, key, value: split.next() }
    }
}

/// Keywords not yet consumed, in input order.
struct Keywords<'a>(Vec<Keyword<'a>>);

impl<'a> Keywords<'a> {
    fn take(&mut self, key: &str) -> Option<Keyword<'a>> {
        let index = self.0.iter().position(|kw| kw.key == key)?;
        Some(self.0.remove(index))
    }

    fn take_parsed<T: FromStr>(&mut self, key: &'static str) -> Result<Option<T>, SwitchParseError> {
        let kw = match self.take(key) {
            Some(kw) => kw,
            None => return Ok(None),
        };
        let bad_value = || SwitchParseError::BadValue { key, word: kw.word.to_string() };
        let value = kw.value.ok_or_else(bad_value)?;
        value.parse().map(Some).map_err(|_| bad_value())
    }

    fn take_flag(&mut self, key: &'static str) -> Result<bool, SwitchParseError> {
        match self.take(key) {
            None => Ok(false),
            Some(Keyword { value: None, .. }) => Ok(true),
            Some(Keyword { word, .. }) => Err(SwitchParseError::BadValue { key, word: word.to_string() }),
        }
    }

    fn finish(self) -> Result<(), SwitchParseError> {
        if self.0.is_empty() {
            return Ok(());
        }
        let words: Vec<_> = self.0.iter().map(|kw| kw.word).collect();
        Err(SwitchParseError::RogueKeywords(words.join(" ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Switch;

    #[test]
    fn rational_defaults() {
        let func: SwitchingFunction = "RATIONAL R_0=0.3".parse().unwrap();
        assert_eq!(func.kind(), SwitchKind::Rational { nn: 6, mm: 12 });
        assert_eq!(func.r_0(), 0.3);
        assert_eq!(func.d_0(), 0.0);
        assert_eq!(func.d_max(), None);

        let func: SwitchingFunction = "RATIONAL R_0=0.3 NN=8".parse().unwrap();
        assert_eq!(func.kind(), SwitchKind::Rational { nn: 8, mm: 16 });
    }

    #[test]
    fn braces_and_order() {
        let a: SwitchingFunction = "{RATIONAL D_MAX=1.0 MM=10 R_0=0.25 NN=5 D_0=0.05}".parse().unwrap();
        let b: SwitchingFunction = "  RATIONAL R_0=0.25 D_0=0.05 NN=5 MM=10 D_MAX=1.0 ".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.support(), Some(1.0));
    }

    #[test]
    fn other_kinds() {
        let parse = |s: &str| s.parse::<SwitchingFunction>().unwrap().kind();
        assert_eq!(parse("EXP R_0=0.5"), SwitchKind::Exponential);
        assert_eq!(parse("gaussian R_0=0.5 D_MAX=2"), SwitchKind::Gaussian);
        assert_eq!(parse("SMAP R_0=0.5 A=4 B=6"), SwitchKind::Smap { a: 4.0, b: 6.0 });
        assert_eq!(parse("CUBIC D_0=0.2 D_MAX=0.8"), SwitchKind::Cubic);
        assert_eq!(parse("TANH R_0=0.5 NOSTRETCH STRETCH"), SwitchKind::Tanh);
    }

    #[test]
    fn nostretch() {
        let stretched: SwitchingFunction = "GAUSSIAN R_0=0.5 D_MAX=1.0".parse().unwrap();
        let raw: SwitchingFunction = "GAUSSIAN R_0=0.5 D_MAX=1.0 NOSTRETCH".parse().unwrap();
        assert_eq!(stretched.calculate(1.0).0, 0.0);
        assert!(raw.calculate(1.0).0 > 0.0);
    }

    #[test]
    fn errors() {
        let err = |s: &str| s.parse::<SwitchingFunction>().unwrap_err();
        assert_eq!(err(""), SwitchParseError::Empty);
        assert_eq!(err("{}"), SwitchParseError::Empty);
        assert_eq!(err("LINEAR R_0=1"), SwitchParseError::UnknownKind("LINEAR".into()));
        assert_eq!(err("RATIONAL NN=6"), SwitchParseError::MissingKey("R_0"));
        assert_eq!(err("SMAP R_0=1 A=2"), SwitchParseError::MissingKey("B"));
        assert_eq!(err("CUBIC D_0=0.1"), SwitchParseError::MissingKey("D_MAX"));
        assert_eq!(
            err("RATIONAL R_0=abc"),
            SwitchParseError::BadValue { key: "R_0", word: "R_0=abc".into() },
        );
        assert_eq!(
            err("RATIONAL R_0"),
            SwitchParseError::BadValue { key: "R_0", word: "R_0".into() },
        );
        assert_eq!(
            err("EXP R_0=1 NOSTRETCH=yes"),
            SwitchParseError::BadValue { key: "NOSTRETCH", word: "NOSTRETCH=yes".into() },
        );
        assert_eq!(
            err("RATIONAL R_0=0.3 BOGUS=1 EXTRA"),
            SwitchParseError::RogueKeywords("BOGUS=1 EXTRA".into()),
        );
        match err("RATIONAL R_0=-0.3") {
            SwitchParseError::BadParameters(_) => {},
            e => panic!("unexpected error: {}", e),
        }
    }

    #[test]
    fn error_messages() {
        let e = "RATIONAL R_0=0.3 BOGUS=1".parse::<SwitchingFunction>().unwrap_err();
        assert_eq!(e.to_string(), "found the following rogue keywords in switching function input : BOGUS=1");
    }
}

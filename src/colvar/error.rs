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

use bridgecv_switching::SwitchParseError;

/// Conditions specific to the bridging colvar.
///
/// Everything here is fatal; the type exists so that callers can tell the cases apart
/// after downcasting a `failure::Error`.
#[derive(Debug, Fail)]
pub enum BridgeError {
    #[fail(display = "NL_CUTOFF must be given and positive when NLIST is used (got {:?})", _0)]
    BadNeighborCutoff(Option<f64>),

    #[fail(display = "NL_STRIDE must be given and positive when NLIST is used (got {:?})", _0)]
    BadNeighborStride(Option<i64>),

    #[fail(display = "missing definition of switching functions")]
    MissingSwitches,

    #[fail(display = "SWITCHB was given without SWITCHA")]
    MissingSwitchA,

    #[fail(display = "SWITCHA was given without SWITCHB")]
    MissingSwitchB,

    #[fail(display = "SWITCH cannot be combined with SWITCHA/SWITCHB")]
    ConflictingSwitches,

    #[fail(display = "problem reading {} keyword: {}", keyword, cause)]
    BadSwitch {
        keyword: &'static str,
        #[cause] cause: SwitchParseError,
    },

    #[fail(display = "{} is empty", _0)]
    EmptyGroup(&'static str),

    #[fail(display = "atom {} appears in both {} and {}", atom, first, second)]
    OverlappingGroups {
        atom: usize,
        first: &'static str,
        second: &'static str,
    },

    #[fail(display = "{} lists atom {} more than once", group, atom)]
    DuplicateAtom { group: &'static str, atom: usize },

    #[fail(display = "Neighbor lists should be updated on exchange steps - choose a NL_STRIDE which divides the exchange stride! (step {})", step)]
    StaleListOnExchange { step: u64 },
}

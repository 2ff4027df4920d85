//! Named lunar phases and their four-bucket simplification.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// One of the eight named phases of the synodic cycle, in cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema)]
pub enum Phase {
    #[serde(rename = "New Moon")]
    NewMoon,
    #[serde(rename = "Waxing Crescent")]
    WaxingCrescent,
    #[serde(rename = "First Quarter")]
    FirstQuarter,
    #[serde(rename = "Waxing Gibbous")]
    WaxingGibbous,
    #[serde(rename = "Full Moon")]
    FullMoon,
    #[serde(rename = "Waning Gibbous")]
    WaningGibbous,
    #[serde(rename = "Last Quarter")]
    LastQuarter,
    #[serde(rename = "Waning Crescent")]
    WaningCrescent,
}

impl Phase {
    /// All phases in the order they occur after a new moon.
    pub const ALL: [Phase; 8] = [
        Phase::NewMoon,
        Phase::WaxingCrescent,
        Phase::FirstQuarter,
        Phase::WaxingGibbous,
        Phase::FullMoon,
        Phase::WaningGibbous,
        Phase::LastQuarter,
        Phase::WaningCrescent,
    ];

    /// Human-readable name, also the persisted form.
    pub fn name(self) -> &'static str {
        match self {
            Phase::NewMoon => "New Moon",
            Phase::WaxingCrescent => "Waxing Crescent",
            Phase::FirstQuarter => "First Quarter",
            Phase::WaxingGibbous => "Waxing Gibbous",
            Phase::FullMoon => "Full Moon",
            Phase::WaningGibbous => "Waning Gibbous",
            Phase::LastQuarter => "Last Quarter",
            Phase::WaningCrescent => "Waning Crescent",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Phase::NewMoon => "🌑",
            Phase::WaxingCrescent => "🌒",
            Phase::FirstQuarter => "🌓",
            Phase::WaxingGibbous => "🌔",
            Phase::FullMoon => "🌕",
            Phase::WaningGibbous => "🌖",
            Phase::LastQuarter => "🌗",
            Phase::WaningCrescent => "🌘",
        }
    }

    /// Collapse into the four-bucket form.
    ///
    /// Quarters fall into the bucket of the arc they sit in.
    pub fn simplified(self) -> SimplifiedPhase {
        match self {
            Phase::NewMoon => SimplifiedPhase::New,
            Phase::WaxingCrescent | Phase::FirstQuarter | Phase::WaxingGibbous => SimplifiedPhase::Waxing,
            Phase::FullMoon => SimplifiedPhase::Full,
            Phase::WaningGibbous | Phase::LastQuarter | Phase::WaningCrescent => SimplifiedPhase::Waning,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Phase {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Phase::ALL
            .into_iter()
            .find(|phase| phase.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownPhase(s.to_string()))
    }
}

/// Four-bucket phase used to tag journal entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SimplifiedPhase {
    New,
    Waxing,
    Full,
    Waning,
}

impl SimplifiedPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            SimplifiedPhase::New => "new",
            SimplifiedPhase::Waxing => "waxing",
            SimplifiedPhase::Full => "full",
            SimplifiedPhase::Waning => "waning",
        }
    }

    /// Strict keyword match on a phase name.
    ///
    /// Keywords are tried in the order `new`, `full`, `waxing`, `waning`
    /// against the lowercased name. Returns `Error::UnknownPhase` when none
    /// of them occur.
    pub fn from_phase_name(name: &str) -> Result<Self, Error> {
        let lower = name.to_lowercase();
        [
            ("new", SimplifiedPhase::New),
            ("full", SimplifiedPhase::Full),
            ("waxing", SimplifiedPhase::Waxing),
            ("waning", SimplifiedPhase::Waning),
        ]
        .into_iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, simplified)| simplified)
        .ok_or_else(|| Error::UnknownPhase(name.to_string()))
    }
}

impl fmt::Display for SimplifiedPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SimplifiedPhase {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "new" => Ok(SimplifiedPhase::New),
            "waxing" => Ok(SimplifiedPhase::Waxing),
            "full" => Ok(SimplifiedPhase::Full),
            "waning" => Ok(SimplifiedPhase::Waning),
            _ => Err(Error::UnknownPhase(s.to_string())),
        }
    }
}

/// Lenient simplification of a phase name.
///
/// Same matching as [`SimplifiedPhase::from_phase_name`], but a name with no
/// recognised keyword maps to `New` instead of failing.
pub fn simplified_phase(name: &str) -> SimplifiedPhase {
    SimplifiedPhase::from_phase_name(name).unwrap_or(SimplifiedPhase::New)
}

//! Persisted lunar phase record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::calculator::{PhaseReading, compute_phase};
use super::phase::Phase;

/// Text form of a record's date, as stored and accepted on input.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Phase information for one calendar date.
///
/// This is the unit stored in the phase cache, keyed by `date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoonPhaseRecord {
    pub date: NaiveDate,
    pub phase: Phase,
    pub illumination: u8,
    pub phase_emoji: String,
}

impl MoonPhaseRecord {
    pub fn from_reading(date: NaiveDate, reading: &PhaseReading) -> Self {
        Self {
            date,
            phase: reading.phase,
            illumination: reading.illumination,
            phase_emoji: reading.emoji.to_string(),
        }
    }

    /// Compute a fresh record for `date`.
    pub fn compute(date: NaiveDate) -> Self {
        Self::from_reading(date, &compute_phase(date))
    }
}

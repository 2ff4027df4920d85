//! Deterministic date → lunar phase mapping.
//!
//! The moon's age is measured from a fixed reference new moon and reduced
//! modulo the mean synodic month. Every calendar date is pinned to 12:00 UTC
//! before differencing, so the result never depends on the caller's timezone.

use chrono::{Datelike, NaiveDate};

use super::phase::Phase;

/// Mean synodic month in days.
pub const SYNODIC_MONTH_DAYS: f64 = 29.53058770576;

/// Reference new moon, 2025-10-21T12:00:00Z, as Unix milliseconds.
pub const REFERENCE_NEW_MOON_MS: i64 = 1_761_048_000_000;

const MS_PER_DAY: i64 = 86_400_000;
const NOON_MS: i64 = 43_200_000;

/// `num_days_from_ce` of 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i64 = 719_163;

/// Upper edges of each phase's age range, in cycle order.
const PHASE_BOUNDARIES: [(f64, Phase); 8] = [
    (1.84566, Phase::NewMoon),
    (7.38264, Phase::WaxingCrescent),
    (9.22830, Phase::FirstQuarter),
    (14.76528, Phase::WaxingGibbous),
    (16.61094, Phase::FullMoon),
    (22.14792, Phase::WaningGibbous),
    (23.99358, Phase::LastQuarter),
    (29.53058, Phase::WaningCrescent),
];

/// Length of the arc from a quarter to the next peak.
const QUARTER_ARC_DAYS: f64 = 7.38264;

/// Calculator output for a single date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseReading {
    pub phase: Phase,
    /// Percentage in `[0, 100]`.
    pub illumination: u8,
    pub emoji: &'static str,
    /// Days since the most recent new moon, in `[0, SYNODIC_MONTH_DAYS)`.
    pub age: f64,
}

impl PhaseReading {
    /// Classify a moon age (days since new moon).
    ///
    /// Ages at or past the last boundary are treated as the next new moon.
    pub fn from_age(age: f64) -> Self {
        let phase = PHASE_BOUNDARIES
            .iter()
            .find(|(upper, _)| age < *upper)
            .map(|(_, phase)| *phase)
            .unwrap_or(Phase::NewMoon);

        let percent = match phase {
            Phase::NewMoon => 0.0,
            Phase::WaxingCrescent => age / QUARTER_ARC_DAYS * 50.0,
            Phase::FirstQuarter | Phase::LastQuarter => 50.0,
            Phase::WaxingGibbous => 50.0 + (age - 7.38264) / QUARTER_ARC_DAYS * 50.0,
            Phase::FullMoon => 100.0,
            Phase::WaningGibbous => 100.0 - (age - 14.76528) / QUARTER_ARC_DAYS * 50.0,
            Phase::WaningCrescent => 50.0 - (age - 22.14792) / QUARTER_ARC_DAYS * 50.0,
        };

        Self { phase, illumination: percent.round().clamp(0.0, 100.0) as u8, emoji: phase.emoji(), age }
    }
}

/// Unix milliseconds of 12:00 UTC on `date`.
fn noon_utc_ms(date: NaiveDate) -> i64 {
    (i64::from(date.num_days_from_ce()) - UNIX_EPOCH_DAYS_FROM_CE) * MS_PER_DAY + NOON_MS
}

/// Reduce elapsed days since the reference new moon into `[0, SYNODIC_MONTH_DAYS)`.
pub fn phase_age(elapsed_days: f64) -> f64 {
    let age = elapsed_days % SYNODIC_MONTH_DAYS;
    if age < 0.0 { age + SYNODIC_MONTH_DAYS } else { age }
}

/// Moon age in days at noon UTC on `date`.
pub fn moon_age(date: NaiveDate) -> f64 {
    let elapsed = (noon_utc_ms(date) - REFERENCE_NEW_MOON_MS) as f64 / MS_PER_DAY as f64;
    phase_age(elapsed)
}

/// Compute the lunar phase for a calendar date.
pub fn compute_phase(date: NaiveDate) -> PhaseReading {
    PhaseReading::from_age(moon_age(date))
}

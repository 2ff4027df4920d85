//! Read-through phase lookup.
//!
//! [`PhaseService`] answers "what phase is the moon on this date" from an
//! injected [`PhaseStore`], computing and writing back on a miss. The
//! calculation is authoritative: store failures degrade to recomputation and
//! are reported on the returned [`PhaseLookup`], never as errors.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::Error;
use crate::cache::PhaseStore;
use crate::lunar::{DATE_FORMAT, MoonPhaseRecord, PhaseReading, compute_phase};

/// Date → phase function used on cache misses.
pub type PhaseFn = fn(NaiveDate) -> PhaseReading;

/// Outcome of a single lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct PhaseLookup {
    pub record: MoonPhaseRecord,
    /// The record came from the store.
    pub cache_hit: bool,
    /// The record is known to be in the store after this call.
    pub persisted: bool,
}

/// Cached lunar phase lookup over a [`PhaseStore`].
#[derive(Clone)]
pub struct PhaseService {
    store: Arc<dyn PhaseStore>,
    calculator: PhaseFn,
    write_back: bool,
}

impl PhaseService {
    pub fn new(store: Arc<dyn PhaseStore>) -> Self {
        Self { store, calculator: compute_phase, write_back: true }
    }

    /// Replace the calculator used on misses.
    pub fn with_calculator(mut self, calculator: PhaseFn) -> Self {
        self.calculator = calculator;
        self
    }

    /// Enable or disable writing computed records back to the store.
    pub fn with_write_back(mut self, write_back: bool) -> Self {
        self.write_back = write_back;
        self
    }

    /// Look up the phase for `date`.
    ///
    /// A read error is logged and handled as a miss; a write error is logged
    /// and reported through [`PhaseLookup::persisted`].
    pub async fn lookup(&self, date: NaiveDate) -> PhaseLookup {
        match self.store.get_phase(date).await {
            Ok(Some(record)) => {
                tracing::debug!(%date, store = self.store.name(), "phase cache hit");
                return PhaseLookup { record, cache_hit: true, persisted: true };
            }
            Ok(None) => tracing::debug!(%date, store = self.store.name(), "phase cache miss"),
            Err(e) => tracing::warn!(%date, store = self.store.name(), error = %e, "phase cache read failed"),
        }

        let record = MoonPhaseRecord::from_reading(date, &(self.calculator)(date));

        let persisted = self.write_back
            && match self.store.upsert_phase(&record).await {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(%date, store = self.store.name(), error = %e, "failed to cache moon phase");
                    false
                }
            };

        PhaseLookup { record, cache_hit: false, persisted }
    }

    /// Look up a `YYYY-MM-DD` date string.
    ///
    /// Returns `None` only when the string does not parse.
    pub async fn fetch_moon_phase(&self, date: &str) -> Option<MoonPhaseRecord> {
        match parse_date(date) {
            Ok(date) => Some(self.lookup(date).await.record),
            Err(e) => {
                tracing::warn!(error = %e, "error fetching moon phase");
                None
            }
        }
    }

    /// Phase for the current UTC date.
    pub async fn todays_moon_phase(&self) -> Option<MoonPhaseRecord> {
        Some(self.lookup(today()).await.record)
    }
}

/// Current calendar date in UTC.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(date: &str) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).map_err(|_| Error::InvalidDate(date.to_string()))
}

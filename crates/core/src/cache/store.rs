//! Storage seam for the phase lookup.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::connection::CacheDb;
use crate::Error;
use crate::lunar::MoonPhaseRecord;

/// Key-value store for [`MoonPhaseRecord`]s keyed by calendar date.
///
/// Implementations must support point lookup and upsert-by-key. The lookup
/// service treats every error as a cache miss (on read) or a failed
/// write-back (on write), never as a failed lookup.
#[async_trait]
pub trait PhaseStore: Send + Sync {
    async fn get_phase(&self, date: NaiveDate) -> Result<Option<MoonPhaseRecord>, Error>;

    async fn upsert_phase(&self, record: &MoonPhaseRecord) -> Result<(), Error>;

    /// Backend name for log fields.
    fn name(&self) -> &'static str;
}

#[async_trait]
impl PhaseStore for CacheDb {
    async fn get_phase(&self, date: NaiveDate) -> Result<Option<MoonPhaseRecord>, Error> {
        self.get_moon_phase(date).await
    }

    async fn upsert_phase(&self, record: &MoonPhaseRecord) -> Result<(), Error> {
        self.upsert_moon_phase(record).await
    }

    fn name(&self) -> &'static str {
        "sqlite"
    }
}

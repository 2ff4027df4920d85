//! In-memory [`PhaseStore`] with call counters and failure switches.
//!
//! Used as a stand-in for the SQLite store wherever a test needs to observe
//! or sabotage store traffic.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::NaiveDate;

use super::store::PhaseStore;
use crate::Error;
use crate::lunar::MoonPhaseRecord;

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<NaiveDate, MoonPhaseRecord>>,
    reads: AtomicUsize,
    writes: AtomicUsize,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `get_phase` fail with `Error::Unavailable`.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent `upsert_phase` fail with `Error::Unavailable`.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of `get_phase` calls, failed ones included.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of `upsert_phase` calls, failed ones included.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Put a record directly, bypassing counters.
    pub fn seed(&self, record: MoonPhaseRecord) {
        self.records().insert(record.date, record);
    }

    fn records(&self) -> MutexGuard<'_, HashMap<NaiveDate, MoonPhaseRecord>> {
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl PhaseStore for MemoryStore {
    async fn get_phase(&self, date: NaiveDate) -> Result<Option<MoonPhaseRecord>, Error> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Error::Unavailable("memory store read disabled".into()));
        }
        Ok(self.records().get(&date).cloned())
    }

    async fn upsert_phase(&self, record: &MoonPhaseRecord) -> Result<(), Error> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::Unavailable("memory store write disabled".into()));
        }
        self.records().insert(record.date, record.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_counts_and_failures() {
        let store = MemoryStore::new();
        let date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();

        assert!(store.get_phase(date).await.unwrap().is_none());
        store.upsert_phase(&MoonPhaseRecord::compute(date)).await.unwrap();
        assert!(store.get_phase(date).await.unwrap().is_some());

        store.fail_writes(true);
        assert!(store.upsert_phase(&MoonPhaseRecord::compute(date)).await.is_err());
        store.fail_reads(true);
        assert!(matches!(store.get_phase(date).await, Err(Error::Unavailable(_))));

        assert_eq!(store.reads(), 3);
        assert_eq!(store.writes(), 2);
        assert_eq!(store.len(), 1);
    }
}

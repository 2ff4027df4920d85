//! Per-date lunar phase rows.

use super::connection::CacheDb;
use crate::Error;
use crate::lunar::{DATE_FORMAT, MoonPhaseRecord, Phase};
use chrono::NaiveDate;
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite;

/// Raw column values as stored, before validation.
struct PhaseRow {
    date: String,
    phase: String,
    illumination: i64,
    phase_emoji: String,
}

impl TryFrom<PhaseRow> for MoonPhaseRecord {
    type Error = Error;

    fn try_from(row: PhaseRow) -> Result<Self, Self::Error> {
        let date = NaiveDate::parse_from_str(&row.date, DATE_FORMAT)
            .map_err(|e| Error::Malformed(format!("date {:?}: {e}", row.date)))?;
        let phase: Phase = row
            .phase
            .parse()
            .map_err(|_| Error::Malformed(format!("phase {:?} for {}", row.phase, row.date)))?;
        let illumination = u8::try_from(row.illumination)
            .ok()
            .filter(|pct| *pct <= 100)
            .ok_or_else(|| Error::Malformed(format!("illumination {} for {}", row.illumination, row.date)))?;

        Ok(MoonPhaseRecord { date, phase, illumination, phase_emoji: row.phase_emoji })
    }
}

impl CacheDb {
    /// Get the cached record for `date`.
    ///
    /// Returns `Ok(None)` if no row exists and `Error::Malformed` if the
    /// stored row does not decode.
    pub async fn get_moon_phase(&self, date: NaiveDate) -> Result<Option<MoonPhaseRecord>, Error> {
        let key = date.format(DATE_FORMAT).to_string();
        let row = self
            .conn
            .call(move |conn| -> Result<Option<PhaseRow>, Error> {
                let result = conn.query_row(
                    "SELECT date, phase, illumination, phase_emoji FROM moon_phases WHERE date = ?1",
                    params![key],
                    |row| {
                        Ok(PhaseRow {
                            date: row.get(0)?,
                            phase: row.get(1)?,
                            illumination: row.get(2)?,
                            phase_emoji: row.get(3)?,
                        })
                    },
                );

                match result {
                    Ok(row) => Ok(Some(row)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)?;

        row.map(MoonPhaseRecord::try_from).transpose()
    }

    /// Insert or replace the record for its date.
    pub async fn upsert_moon_phase(&self, record: &MoonPhaseRecord) -> Result<(), Error> {
        let key = record.date.format(DATE_FORMAT).to_string();
        let phase = record.phase.name();
        let illumination = i64::from(record.illumination);
        let phase_emoji = record.phase_emoji.clone();
        let computed_at = chrono::Utc::now().to_rfc3339();

        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute(
                    "INSERT INTO moon_phases (date, phase, illumination, phase_emoji, computed_at)
                    VALUES (?1, ?2, ?3, ?4, ?5)
                    ON CONFLICT(date) DO UPDATE SET
                        phase = excluded.phase,
                        illumination = excluded.illumination,
                        phase_emoji = excluded.phase_emoji,
                        computed_at = excluded.computed_at",
                    params![key, phase, illumination, phase_emoji, computed_at],
                )?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    /// Number of cached dates.
    pub async fn count_moon_phases(&self) -> Result<u64, Error> {
        self.conn
            .call(|conn| -> Result<u64, Error> {
                let count: i64 = conn.query_row("SELECT COUNT(*) FROM moon_phases", [], |row| row.get(0))?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }
}

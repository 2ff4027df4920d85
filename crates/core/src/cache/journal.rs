//! Moon log journal entries.
//!
//! Each entry records how the body felt on a day, the intended action, and
//! the simplified lunar phase the day was tagged with.

use super::connection::CacheDb;
use crate::Error;
use crate::lunar::{DATE_FORMAT, SimplifiedPhase};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite;

/// A journal entry to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJournalEntry {
    pub date: NaiveDate,
    pub body_feeling: String,
    pub lunar_phase: SimplifiedPhase,
    pub action: String,
}

impl NewJournalEntry {
    /// Check both text fields are non-blank and at most `max_len` characters.
    pub fn validate(&self, max_len: usize) -> Result<(), Error> {
        for (field, value) in [("body_feeling", &self.body_feeling), ("action", &self.action)] {
            let value = value.trim();
            if value.is_empty() {
                return Err(Error::InvalidInput(format!("{field} cannot be empty")));
            }
            if value.chars().count() > max_len {
                return Err(Error::InvalidInput(format!("{field} exceeds {max_len} characters")));
            }
        }
        Ok(())
    }
}

/// A stored journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct JournalEntry {
    pub id: i64,
    pub date: NaiveDate,
    pub body_feeling: String,
    pub lunar_phase: SimplifiedPhase,
    pub action: String,
    pub created_at: String,
}

struct EntryRow {
    id: i64,
    date: String,
    body_feeling: String,
    lunar_phase: String,
    action: String,
    created_at: String,
}

impl EntryRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            date: row.get(1)?,
            body_feeling: row.get(2)?,
            lunar_phase: row.get(3)?,
            action: row.get(4)?,
            created_at: row.get(5)?,
        })
    }
}

impl TryFrom<EntryRow> for JournalEntry {
    type Error = Error;

    fn try_from(row: EntryRow) -> Result<Self, Self::Error> {
        let date = NaiveDate::parse_from_str(&row.date, DATE_FORMAT)
            .map_err(|e| Error::Malformed(format!("journal entry {} date {:?}: {e}", row.id, row.date)))?;
        let lunar_phase = row
            .lunar_phase
            .parse()
            .map_err(|_| Error::Malformed(format!("journal entry {} phase {:?}", row.id, row.lunar_phase)))?;

        Ok(JournalEntry {
            id: row.id,
            date,
            body_feeling: row.body_feeling,
            lunar_phase,
            action: row.action,
            created_at: row.created_at,
        })
    }
}

const SELECT_COLUMNS: &str = "SELECT id, date, body_feeling, lunar_phase, action, created_at FROM moon_log_entries";

impl CacheDb {
    /// Validate and insert a journal entry, returning the stored row.
    ///
    /// Text fields are stored trimmed.
    pub async fn add_journal_entry(&self, entry: &NewJournalEntry, max_len: usize) -> Result<JournalEntry, Error> {
        entry.validate(max_len)?;

        let date = entry.date;
        let body_feeling = entry.body_feeling.trim().to_string();
        let action = entry.action.trim().to_string();
        let lunar_phase = entry.lunar_phase;
        let created_at = chrono::Utc::now().to_rfc3339();

        self.conn
            .call(move |conn| -> Result<JournalEntry, Error> {
                conn.execute(
                    "INSERT INTO moon_log_entries (date, body_feeling, lunar_phase, action, created_at)
                    VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![
                        date.format(DATE_FORMAT).to_string(),
                        &body_feeling,
                        lunar_phase.as_str(),
                        &action,
                        &created_at
                    ],
                )?;

                Ok(JournalEntry { id: conn.last_insert_rowid(), date, body_feeling, lunar_phase, action, created_at })
            })
            .await
            .map_err(Error::from)
    }

    /// List entries, newest date first (ties broken by newest insert).
    pub async fn list_journal_entries(&self, limit: Option<usize>) -> Result<Vec<JournalEntry>, Error> {
        // SQLite treats a negative LIMIT as unbounded.
        let limit = limit.map_or(-1, |n| n as i64);
        let rows = self
            .conn
            .call(move |conn| -> Result<Vec<EntryRow>, Error> {
                let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY date DESC, id DESC LIMIT ?1"))?;
                let rows = stmt
                    .query_map(params![limit], EntryRow::from_row)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(rows)
            })
            .await
            .map_err(Error::from)?;

        rows.into_iter().map(JournalEntry::try_from).collect()
    }

    /// Get a single entry by id.
    pub async fn get_journal_entry(&self, id: i64) -> Result<Option<JournalEntry>, Error> {
        let row = self
            .conn
            .call(move |conn| -> Result<Option<EntryRow>, Error> {
                let result = conn.query_row(&format!("{SELECT_COLUMNS} WHERE id = ?1"), params![id], EntryRow::from_row);
                match result {
                    Ok(row) => Ok(Some(row)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)?;

        row.map(JournalEntry::try_from).transpose()
    }

    /// Delete an entry. Returns false if no entry had that id.
    pub async fn delete_journal_entry(&self, id: i64) -> Result<bool, Error> {
        self.conn
            .call(move |conn| -> Result<bool, Error> {
                let deleted = conn.execute("DELETE FROM moon_log_entries WHERE id = ?1", params![id])?;
                Ok(deleted > 0)
            })
            .await
            .map_err(Error::from)
    }
}

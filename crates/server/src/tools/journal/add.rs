//! journal_add tool implementation.
//!
//! Records a journal entry, tagging it with the day's simplified phase unless
//! one is given.

use moonlog_core::{AppConfig, CacheDb, JournalEntry, NewJournalEntry, PhaseService, SimplifiedPhase, lookup};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::tools::json_result;

/// Parameters for the journal_add tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct JournalAddParams {
    /// How the body feels today.
    pub body_feeling: String,

    /// The action or intention for the day.
    pub action: String,

    /// Entry date as YYYY-MM-DD. Defaults to today (UTC).
    #[serde(default)]
    pub date: Option<String>,

    /// One of new, waxing, full, waning. Defaults to the date's moon phase.
    #[serde(default)]
    pub lunar_phase: Option<String>,
}

/// Output from the journal_add tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct JournalAddOutput {
    pub entry: JournalEntry,
}

/// Implementation of the journal_add tool.
pub async fn add_impl(
    db: &CacheDb, phases: &PhaseService, config: &AppConfig, params: JournalAddParams,
) -> Result<CallToolResult, McpError> {
    let date = match params.date.as_deref() {
        Some(date) => lookup::parse_date(date)?,
        None => lookup::today(),
    };

    let lunar_phase = match params.lunar_phase.as_deref() {
        Some(phase) => phase.parse::<SimplifiedPhase>()?,
        None => phases.lookup(date).await.record.phase.simplified(),
    };

    let entry = NewJournalEntry { date, body_feeling: params.body_feeling, lunar_phase, action: params.action };
    let entry = db.add_journal_entry(&entry, config.journal_max_len).await?;
    tracing::info!(id = entry.id, date = %entry.date, phase = %entry.lunar_phase, "journal entry added");

    json_result(&JournalAddOutput { entry })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::parse_output;
    use std::sync::Arc;

    async fn setup() -> (CacheDb, PhaseService, AppConfig) {
        let db = CacheDb::open_in_memory().await.unwrap();
        let phases = PhaseService::new(Arc::new(db.clone()));
        (db, phases, AppConfig::default())
    }

    #[tokio::test]
    async fn test_add_infers_phase_from_date() {
        let (db, phases, config) = setup().await;
        let params = JournalAddParams {
            body_feeling: "heavy".into(),
            action: "early night".into(),
            date: Some("2025-11-05".into()),
            lunar_phase: None,
        };

        let output: JournalAddOutput = parse_output(&add_impl(&db, &phases, &config, params).await.unwrap());
        assert_eq!(output.entry.lunar_phase, SimplifiedPhase::Full);
        assert_eq!(db.count_moon_phases().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_add_quarter_day_uses_enclosing_bucket() {
        let (db, phases, config) = setup().await;
        let params = JournalAddParams {
            body_feeling: "restless".into(),
            action: "journal".into(),
            date: Some("2025-10-29".into()),
            lunar_phase: None,
        };

        let output: JournalAddOutput = parse_output(&add_impl(&db, &phases, &config, params).await.unwrap());
        assert_eq!(output.entry.lunar_phase, SimplifiedPhase::Waxing);
    }

    #[tokio::test]
    async fn test_add_explicit_phase() {
        let (db, phases, config) = setup().await;
        let params = JournalAddParams {
            body_feeling: "light".into(),
            action: "swim".into(),
            date: Some("2025-11-05".into()),
            lunar_phase: Some("waning".into()),
        };

        let output: JournalAddOutput = parse_output(&add_impl(&db, &phases, &config, params).await.unwrap());
        assert_eq!(output.entry.lunar_phase, SimplifiedPhase::Waning);
        assert_eq!(db.count_moon_phases().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_add_rejects_bad_input() {
        let (db, phases, config) = setup().await;

        let params = JournalAddParams { body_feeling: "".into(), action: "rest".into(), ..Default::default() };
        assert!(add_impl(&db, &phases, &config, params).await.is_err());

        let params = JournalAddParams {
            body_feeling: "ok".into(),
            action: "rest".into(),
            lunar_phase: Some("gibbous".into()),
            ..Default::default()
        };
        assert!(add_impl(&db, &phases, &config, params).await.is_err());
    }
}

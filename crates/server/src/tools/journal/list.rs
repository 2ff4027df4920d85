//! journal_list tool implementation.

use moonlog_core::{AppConfig, CacheDb, JournalEntry};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::tools::json_result;

/// Parameters for the journal_list tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct JournalListParams {
    /// Maximum number of entries, newest first. Defaults to the configured limit.
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Output from the journal_list tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct JournalListOutput {
    pub entries: Vec<JournalEntry>,
}

/// Implementation of the journal_list tool.
pub async fn list_impl(db: &CacheDb, config: &AppConfig, params: JournalListParams) -> Result<CallToolResult, McpError> {
    let limit = params.limit.unwrap_or(config.journal_list_limit);
    let entries = db.list_journal_entries(Some(limit)).await?;

    json_result(&JournalListOutput { entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::parse_output;
    use chrono::NaiveDate;
    use moonlog_core::{NewJournalEntry, SimplifiedPhase};

    async fn seeded(count: u32) -> CacheDb {
        let db = CacheDb::open_in_memory().await.unwrap();
        for day in 1..=count {
            let entry = NewJournalEntry {
                date: NaiveDate::from_ymd_opt(2025, 12, day).unwrap(),
                body_feeling: format!("day {day}"),
                lunar_phase: SimplifiedPhase::New,
                action: "breathe".into(),
            };
            db.add_journal_entry(&entry, 100).await.unwrap();
        }
        db
    }

    #[tokio::test]
    async fn test_list_uses_config_limit() {
        let db = seeded(5).await;
        let config = AppConfig { journal_list_limit: 3, ..Default::default() };

        let output: JournalListOutput = parse_output(&list_impl(&db, &config, JournalListParams::default()).await.unwrap());
        assert_eq!(output.entries.len(), 3);
        assert_eq!(output.entries[0].body_feeling, "day 5");
    }

    #[tokio::test]
    async fn test_list_explicit_limit() {
        let db = seeded(5).await;
        let config = AppConfig::default();

        let output: JournalListOutput =
            parse_output(&list_impl(&db, &config, JournalListParams { limit: Some(1) }).await.unwrap());
        assert_eq!(output.entries.len(), 1);
    }

    #[tokio::test]
    async fn test_list_empty() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let output: JournalListOutput =
            parse_output(&list_impl(&db, &AppConfig::default(), JournalListParams::default()).await.unwrap());
        assert!(output.entries.is_empty());
    }
}

//! journal_delete tool implementation.

use moonlog_core::{CacheDb, Error};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::tools::json_result;

/// Parameters for the journal_delete tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct JournalDeleteParams {
    /// Id of the entry to delete.
    pub id: i64,
}

/// Output from the journal_delete tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct JournalDeleteOutput {
    pub deleted: bool,
}

/// Implementation of the journal_delete tool.
pub async fn delete_impl(db: &CacheDb, params: JournalDeleteParams) -> Result<CallToolResult, McpError> {
    if !db.delete_journal_entry(params.id).await? {
        return Err(Error::NotFound(format!("journal entry {}", params.id)).into());
    }
    tracing::info!(id = params.id, "journal entry deleted");

    json_result(&JournalDeleteOutput { deleted: true })
}

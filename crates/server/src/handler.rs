//! MCP server handler implementation.
//!
//! Routes tool calls to the lunar phase and journal implementations.
use std::sync::Arc;

use crate::tools::{
    journal::{self, JournalAddParams, JournalDeleteParams, JournalListParams},
    moon_phase::{MoonPhaseParams, phase_impl},
    simplified_phase::{SimplifiedPhaseParams, simplify_impl},
};

use moonlog_core::{AppConfig, CacheDb, PhaseService};
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

/// The main MCP server handler for moonlog.
#[derive(Clone)]
pub struct MoonLogServer {
    tool_router: ToolRouter<Self>,
    db: CacheDb,
    phases: PhaseService,
    config: Arc<AppConfig>,
}

#[tool_router]
impl MoonLogServer {
    /// Create a handler over an opened database.
    ///
    /// The database doubles as the phase cache behind the lookup service.
    pub fn new(db: CacheDb, config: AppConfig) -> Self {
        let phases = PhaseService::new(Arc::new(db.clone())).with_write_back(config.persist_phases);
        Self { tool_router: Self::tool_router(), db, phases, config: Arc::new(config) }
    }

    #[tool(
        description = "Lunar phase for a date (YYYY-MM-DD, default today UTC). Returns phase, illumination, emoji, simplified phase and cache status."
    )]
    async fn moon_phase(&self, params: Parameters<MoonPhaseParams>) -> Result<CallToolResult, McpError> {
        phase_impl(&self.phases, params.0).await
    }

    #[tool(description = "Collapse a phase name into new, waxing, full or waning.")]
    async fn simplified_phase(&self, params: Parameters<SimplifiedPhaseParams>) -> Result<CallToolResult, McpError> {
        simplify_impl(params.0)
    }

    #[tool(description = "Add a moon log journal entry. The lunar phase defaults to the entry date's phase.")]
    async fn journal_add(&self, params: Parameters<JournalAddParams>) -> Result<CallToolResult, McpError> {
        journal::add_impl(&self.db, &self.phases, &self.config, params.0).await
    }

    #[tool(description = "List moon log journal entries, newest first.")]
    async fn journal_list(&self, params: Parameters<JournalListParams>) -> Result<CallToolResult, McpError> {
        journal::list_impl(&self.db, &self.config, params.0).await
    }

    #[tool(description = "Delete a moon log journal entry by id.")]
    async fn journal_delete(&self, params: Parameters<JournalDeleteParams>) -> Result<CallToolResult, McpError> {
        journal::delete_impl(&self.db, params.0).await
    }
}

impl ServerHandler for MoonLogServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "moonlog".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_registers_all_tools() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let server = MoonLogServer::new(db, AppConfig::default());

        let mut names: Vec<String> = server.tool_router.list_all().into_iter().map(|t| t.name.to_string()).collect();
        names.sort();
        assert_eq!(names, ["journal_add", "journal_delete", "journal_list", "moon_phase", "simplified_phase"]);
    }

    #[tokio::test]
    async fn test_server_info() {
        let server = MoonLogServer::new(CacheDb::open_in_memory().await.unwrap(), AppConfig::default());
        let info = server.get_info();
        assert_eq!(info.server_info.name, "moonlog");
        assert!(info.capabilities.tools.is_some());
    }
}

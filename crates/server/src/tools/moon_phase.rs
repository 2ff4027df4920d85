//! moon_phase tool implementation.
//!
//! Looks up the lunar phase for a date through the phase cache.

use moonlog_core::{MoonPhaseRecord, PhaseService, SimplifiedPhase, lookup};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::json_result;

/// Input parameters for the moon_phase tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct MoonPhaseParams {
    /// Calendar date as YYYY-MM-DD. Defaults to today (UTC).
    #[serde(default)]
    pub date: Option<String>,
}

/// Output structure for the moon_phase tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MoonPhaseOutput {
    pub record: MoonPhaseRecord,
    /// Four-bucket form of the phase.
    pub simplified: SimplifiedPhase,
    /// Whether the record was served from the cache.
    pub cache_hit: bool,
    /// Whether the record is stored in the cache after this call.
    pub persisted: bool,
}

/// Implementation of the moon_phase tool.
pub async fn phase_impl(phases: &PhaseService, params: MoonPhaseParams) -> Result<CallToolResult, McpError> {
    let date = match params.date.as_deref() {
        Some(date) => lookup::parse_date(date)?,
        None => lookup::today(),
    };

    let result = phases.lookup(date).await;
    let simplified = result.record.phase.simplified();
    let output =
        MoonPhaseOutput { record: result.record, simplified, cache_hit: result.cache_hit, persisted: result.persisted };

    json_result(&output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::parse_output;
    use moonlog_core::{CacheDb, Phase};
    use std::sync::Arc;

    async fn service() -> PhaseService {
        PhaseService::new(Arc::new(CacheDb::open_in_memory().await.unwrap()))
    }

    #[tokio::test]
    async fn test_phase_for_date() {
        let phases = service().await;
        let params = MoonPhaseParams { date: Some("2025-11-05".into()) };

        let output: MoonPhaseOutput = parse_output(&phase_impl(&phases, params).await.unwrap());
        assert_eq!(output.record.phase, Phase::FullMoon);
        assert_eq!(output.record.illumination, 100);
        assert_eq!(output.simplified, SimplifiedPhase::Full);
        assert!(!output.cache_hit);
        assert!(output.persisted);
    }

    #[tokio::test]
    async fn test_second_call_is_cache_hit() {
        let phases = service().await;
        let params = MoonPhaseParams { date: Some("2025-10-28".into()) };

        phase_impl(&phases, params.clone()).await.unwrap();
        let output: MoonPhaseOutput = parse_output(&phase_impl(&phases, params).await.unwrap());
        assert!(output.cache_hit);
        assert_eq!(output.record.phase, Phase::WaxingCrescent);
    }

    #[tokio::test]
    async fn test_defaults_to_today() {
        let phases = service().await;
        let output: MoonPhaseOutput = parse_output(&phase_impl(&phases, MoonPhaseParams::default()).await.unwrap());
        assert_eq!(output.record.date, lookup::today());
    }

    #[tokio::test]
    async fn test_invalid_date() {
        let phases = service().await;
        let params = MoonPhaseParams { date: Some("21/10/2025".into()) };

        let err = phase_impl(&phases, params).await.unwrap_err();
        assert_eq!(err.code.0, -32602);
    }
}

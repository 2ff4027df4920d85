//! simplified_phase tool implementation.
//!
//! Collapses a phase name into new / waxing / full / waning.

use moonlog_core::{SimplifiedPhase, simplified_phase};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::json_result;

/// Input parameters for the simplified_phase tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SimplifiedPhaseParams {
    /// Phase name, e.g. "Waxing Gibbous".
    pub phase: String,

    /// Fail on names without a phase keyword instead of answering "new".
    #[serde(default)]
    pub strict: bool,
}

/// Output structure for the simplified_phase tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SimplifiedPhaseOutput {
    pub simplified: SimplifiedPhase,
}

/// Implementation of the simplified_phase tool.
pub fn simplify_impl(params: SimplifiedPhaseParams) -> Result<CallToolResult, McpError> {
    let simplified = if params.strict {
        SimplifiedPhase::from_phase_name(&params.phase)?
    } else {
        simplified_phase(&params.phase)
    };

    json_result(&SimplifiedPhaseOutput { simplified })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::parse_output;

    fn simplify(phase: &str, strict: bool) -> Result<SimplifiedPhase, McpError> {
        simplify_impl(SimplifiedPhaseParams { phase: phase.into(), strict })
            .map(|result| parse_output::<SimplifiedPhaseOutput>(&result).simplified)
    }

    #[test]
    fn test_lenient() {
        assert_eq!(simplify("Waxing Gibbous", false).unwrap(), SimplifiedPhase::Waxing);
        assert_eq!(simplify("Full Moon", false).unwrap(), SimplifiedPhase::Full);
        assert_eq!(simplify("unrecognized", false).unwrap(), SimplifiedPhase::New);
    }

    #[test]
    fn test_strict_rejects_unknown() {
        assert_eq!(simplify("Waning Crescent", true).unwrap(), SimplifiedPhase::Waning);
        let err = simplify("unrecognized", true).unwrap_err();
        assert_eq!(err.code.0, -32602);
    }
}

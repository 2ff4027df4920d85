//! Unified error types for moonlog.

use rmcp::model::{ErrorCode, ErrorData as McpError};
use tokio_rusqlite::rusqlite;

/// Unified error types for the moonlog server.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., empty journal text).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// A date string that is not `YYYY-MM-DD`.
    #[error("INVALID_DATE: {0}")]
    InvalidDate(String),

    /// A phase name with no recognised keyword.
    #[error("UNKNOWN_PHASE: {0}")]
    UnknownPhase(String),

    /// No journal entry with the given id.
    #[error("NOT_FOUND: {0}")]
    NotFound(String),

    /// Database operation failed.
    #[error("CACHE_ERROR: {0}")]
    Database(tokio_rusqlite::Error),

    /// Migration failed to apply.
    #[error("CACHE_ERROR: migration failed: {0}")]
    MigrationFailed(String),

    /// A stored row that does not decode into a valid record.
    #[error("MALFORMED_RECORD: {0}")]
    Malformed(String),

    /// The store is unreachable (used by test doubles and closed connections).
    #[error("STORE_UNAVAILABLE: {0}")]
    Unavailable(String),
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let (code, message) = match &err {
            Error::InvalidInput(msg) => (-32602, msg.clone()),
            Error::InvalidDate(msg) => (-32602, format!("invalid date (expected YYYY-MM-DD): {msg}")),
            Error::UnknownPhase(msg) => (-32602, format!("unknown phase: {msg}")),
            Error::NotFound(msg) => (-32001, msg.clone()),
            Error::Database(e) => (-32002, e.to_string()),
            Error::MigrationFailed(msg) => (-32002, msg.clone()),
            Error::Malformed(msg) => (-32003, msg.clone()),
            Error::Unavailable(msg) => (-32004, msg.clone()),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NotFound("journal entry 7".to_string());
        assert!(err.to_string().contains("NOT_FOUND"));
        assert!(err.to_string().contains("journal entry 7"));
    }

    #[test]
    fn test_error_to_mcp_error() {
        let err = Error::InvalidDate("2025-13-01".to_string());
        let mcp_err: McpError = err.into();
        assert_eq!(mcp_err.code.0, -32602);
        assert!(mcp_err.message.contains("2025-13-01"));
    }

    #[test]
    fn test_rusqlite_error_maps_to_database() {
        let err: Error = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, Error::Database(_)));
        let mcp_err: McpError = err.into();
        assert_eq!(mcp_err.code.0, -32002);
    }
}

//! Core types and shared functionality for moonlog.
//!
//! This crate provides:
//! - Lunar phase calculation
//! - Read-through phase lookup over a pluggable store
//! - SQLite storage for the phase cache and the journal
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;
pub mod lookup;
pub mod lunar;

pub use cache::{CacheDb, JournalEntry, MemoryStore, NewJournalEntry, PhaseStore};
pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use lookup::{PhaseLookup, PhaseService};
pub use lunar::{MoonPhaseRecord, Phase, PhaseReading, SimplifiedPhase, compute_phase, simplified_phase};

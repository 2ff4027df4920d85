//! SQLite-backed storage for lunar phases and the moon log journal.
//!
//! - Per-date phase cache (`moon_phases`), exposed through [`PhaseStore`]
//! - Journal entries (`moon_log_entries`)
//! - Versioned schema migrations, WAL mode
//!
//! [`MemoryStore`] is an in-process [`PhaseStore`] for tests.

pub mod connection;
pub mod journal;
pub mod memory;
pub mod migrations;
pub mod moon_phases;
pub mod store;

pub use crate::Error;

pub use connection::CacheDb;
pub use journal::{JournalEntry, NewJournalEntry};
pub use memory::MemoryStore;
pub use store::PhaseStore;

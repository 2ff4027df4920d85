//! Lunar phase computation.
//!
//! - [`calculator`]: pure date → phase mapping
//! - [`phase`]: the eight named phases and the four-bucket simplification
//! - [`record`]: the persisted per-date record

pub mod calculator;
pub mod phase;
pub mod record;

pub use calculator::{PhaseReading, SYNODIC_MONTH_DAYS, compute_phase};
pub use phase::{Phase, SimplifiedPhase, simplified_phase};
pub use record::{DATE_FORMAT, MoonPhaseRecord};

//! Shared domain core for the Regional Weather Dashboard
//!
//! Everything in this crate is pure: deterministic forecast synthesis,
//! per-region field visibility, slot resolution, period aggregation and
//! the Thai display formatting used by the API. The backend adds storage
//! and HTTP on top.

pub mod display;
pub mod error;
pub mod fields;
pub mod models;
pub mod period;
pub mod rng;
pub mod slot;
pub mod synth;
pub mod types;
pub mod validation;

pub use error::DomainError;
pub use fields::{region_fields, FieldSet, RegionFieldCache};
pub use models::*;
pub use period::{PeriodSample, RegionAverages, WeekOfMonth, YearMonth};
pub use rng::SeededRng;
pub use slot::{ResolvedSlot, SlotSchedule};
pub use synth::ForecastSynthesizer;
pub use types::*;
pub use validation::*;

//! Domain errors for the forecast core

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown region: {0}")]
    UnknownRegion(String),

    #[error("Invalid {field}: {value}")]
    InvalidValue { field: &'static str, value: String },

    #[error("Invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),

    #[error("Slot hour {0} is outside 0-23")]
    InvalidSlotHour(u32),

    #[error("Slot schedule must contain at least one hour")]
    EmptySchedule,

    #[error("Province table is empty but nearby areas are required")]
    EmptyProvinceTable,
}

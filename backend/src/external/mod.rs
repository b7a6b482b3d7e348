//! External API integrations

pub mod czp;

pub use czp::{CitizenProfile, CzpClient, CzpSettings};

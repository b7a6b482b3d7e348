//! HTTP request handlers

pub mod auth;
pub mod dashboard;
pub mod health;

pub use auth::login;
pub use dashboard::{get_daily, get_monthly, get_weekly};
pub use health::health_check;

//! Business logic services for the Regional Weather Dashboard

pub mod dashboard;
pub mod forecast;
pub mod seeding;
pub mod session;
pub mod sso;

pub use dashboard::DashboardService;
pub use forecast::ForecastService;
pub use seeding::{SeedPlan, SeedService, SeedSummary};
pub use session::{SessionClaims, SessionService};
pub use sso::SsoService;

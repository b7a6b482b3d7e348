//! Domain models for the regional weather dashboard

mod forecast;
mod province;
mod region;

pub use forecast::*;
pub use province::*;
pub use region::*;

//! Infrastructure layer: the in-process site store and its seed fixtures.

pub mod seed;
pub mod store;
pub mod views;

pub use seed::{SeedData, SeedError};
pub use store::SiteStore;
pub use views::{DashboardSummary, ProjectOverview};

//! Projects domain module.
//!
//! Construction projects (sites) with client, schedule, budget tracking and
//! progress. Other modules reference projects by [`ProjectId`] only.

pub mod project;
pub mod registry;

pub use project::{NewProject, Project, ProjectStatus};
pub use registry::{ProjectFilter, ProjectRegistry};
pub use siteerp_core::ProjectId;

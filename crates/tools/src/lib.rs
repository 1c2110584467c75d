//! Tool tracking module.
//!
//! Site equipment (cranes, mixers, breakers...) identified by a scannable
//! code, with check-out/check-in to workers and maintenance tracking.

pub mod crib;
pub mod tool;

pub use crib::{ToolCrib, ToolFilter, ToolStats};
pub use tool::{AddTool, CheckOut, DEFAULT_OPERATOR, Tool, ToolId, ToolStatus};

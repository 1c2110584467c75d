//! `siteerp-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by every site
//! management module (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod filter;
pub mod id;
pub mod value_object;

pub use entity::{Entity, find_by_id, find_by_id_mut};
pub use error::{DomainError, DomainResult};
pub use filter::{Selector, text_matches};
pub use id::{MovementId, ProjectId, sequential_code};
pub use value_object::{EvidenceRef, Quantity, ValueObject};

//! Inventory domain module: the stock ledger.
//!
//! This crate contains business rules for site inventory, implemented purely
//! as deterministic domain logic (no IO, no HTTP, no storage): product stock
//! status derivation, scan-driven stock movements, movement history and
//! listing filters.

pub mod export;
pub mod filter;
pub mod history;
pub mod ledger;
pub mod movement;
pub mod product;
pub mod status;

pub use export::InventoryExportRow;
pub use filter::{ProductFilter, filter_products};
pub use history::HistoryWindow;
pub use ledger::{StockLedger, StockStats};
pub use movement::{MovementAction, MovementOutcome, RecordMovement, RecordMovementInput, StockMovement};
pub use product::{AddProduct, AddProductInput, Product, ProductId};
pub use status::StockStatus;

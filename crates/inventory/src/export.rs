use serde::Serialize;

use crate::status::StockStatus;

/// One row of the inventory spreadsheet export.
///
/// `project_name` is empty when the product is not assigned to a project (or
/// the project could not be resolved).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryExportRow {
    pub name: String,
    pub sku: String,
    pub quantity: u64,
    pub status: StockStatus,
    pub project_name: String,
}

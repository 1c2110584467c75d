use serde::{Deserialize, Serialize};

use siteerp_core::{DomainError, DomainResult, Entity, ProjectId, Quantity, business_code};

use crate::status::StockStatus;

business_code!(
    /// Product identifier (`PRD-001`), stable for the lifetime of the product.
    ProductId,
    "PRD"
);

/// A stocked product.
///
/// Quantity and threshold are private: the status is recomputed every time
/// the quantity changes, so it can never drift from `(quantity, min_stock)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    id: ProductId,
    name: String,
    sku: String,
    quantity: Quantity,
    min_stock: Quantity,
    location: String,
    project_id: Option<ProjectId>,
    status: StockStatus,
}

impl Product {
    pub(crate) fn create(id: ProductId, cmd: AddProduct) -> Self {
        let status = StockStatus::derive(cmd.quantity, cmd.min_stock);
        Self {
            id,
            name: cmd.name.trim().to_string(),
            sku: cmd.sku.trim().to_string(),
            quantity: cmd.quantity,
            min_stock: cmd.min_stock,
            location: cmd.location.trim().to_string(),
            project_id: cmd.project_id,
            status,
        }
    }

    pub fn id_typed(&self) -> &ProductId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn min_stock(&self) -> Quantity {
        self.min_stock
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn project_id(&self) -> Option<&ProjectId> {
        self.project_id.as_ref()
    }

    pub fn status(&self) -> StockStatus {
        self.status
    }

    /// Case-insensitive exact SKU comparison, ignoring surrounding blanks.
    pub fn sku_matches(&self, sku: &str) -> bool {
        self.sku.trim().to_lowercase() == sku.trim().to_lowercase()
    }

    pub(crate) fn set_quantity(&mut self, quantity: Quantity) {
        self.quantity = quantity;
        self.status = StockStatus::derive(self.quantity, self.min_stock);
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Command: AddProduct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddProduct {
    pub name: String,
    pub sku: String,
    pub quantity: Quantity,
    pub min_stock: Quantity,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub project_id: Option<ProjectId>,
}

impl AddProduct {
    pub(crate) fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if self.sku.trim().is_empty() {
            return Err(DomainError::validation("SKU cannot be empty"));
        }
        Ok(())
    }
}

/// Raw "add product" form input, every field as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AddProductInput {
    pub name: String,
    pub sku: String,
    #[serde(deserialize_with = "siteerp_core::value_object::string_or_number")]
    pub quantity: String,
    #[serde(deserialize_with = "siteerp_core::value_object::string_or_number")]
    pub min_stock: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub project_id: String,
}

impl AddProductInput {
    /// Parse into a command; numeric fields are rejected rather than coerced.
    pub fn parse(self) -> DomainResult<AddProduct> {
        let quantity: Quantity = self.quantity.parse()?;
        let min_stock: Quantity = self
            .min_stock
            .parse()
            .map_err(|e| DomainError::validation(format!("minimum stock: {e}")))?;
        let project_id = match self.project_id.trim() {
            "" => None,
            raw => Some(raw.parse()?),
        };

        Ok(AddProduct {
            name: self.name.trim().to_string(),
            sku: self.sku.trim().to_string(),
            quantity,
            min_stock,
            location: self.location.trim().to_string(),
            project_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> AddProductInput {
        AddProductInput {
            name: "Ciment Portland".to_string(),
            sku: "CIM-POR".to_string(),
            quantity: "25".to_string(),
            min_stock: "50".to_string(),
            location: "Zone B1".to_string(),
            project_id: "PRJ-002".to_string(),
        }
    }

    #[test]
    fn parse_builds_typed_command() {
        let cmd = input().parse().unwrap();
        assert_eq!(cmd.quantity, Quantity::new(25));
        assert_eq!(cmd.min_stock, Quantity::new(50));
        assert_eq!(cmd.project_id, Some(ProjectId::sequential(2)));
    }

    #[test]
    fn parse_rejects_non_numeric_quantity() {
        let mut raw = input();
        raw.quantity = "beaucoup".to_string();
        assert!(matches!(raw.parse(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn parse_rejects_negative_min_stock() {
        let mut raw = input();
        raw.min_stock = "-10".to_string();
        let err = raw.parse().unwrap_err();
        assert!(err.to_string().contains("minimum stock"));
    }

    #[test]
    fn blank_project_means_unassigned() {
        let mut raw = input();
        raw.project_id = "  ".to_string();
        assert_eq!(raw.parse().unwrap().project_id, None);
    }

    #[test]
    fn created_product_derives_status() {
        let product = Product::create(ProductId::sequential(1), input().parse().unwrap());
        assert_eq!(product.status(), StockStatus::LowStock);
        assert_eq!(product.id_typed().as_str(), "PRD-001");
    }

    #[test]
    fn set_quantity_recomputes_status() {
        let mut product = Product::create(ProductId::sequential(1), input().parse().unwrap());
        product.set_quantity(Quantity::ZERO);
        assert_eq!(product.status(), StockStatus::OutOfStock);
        product.set_quantity(Quantity::new(50));
        assert_eq!(product.status(), StockStatus::InStock);
    }

    #[test]
    fn sku_matching_ignores_case_but_not_content() {
        let product = Product::create(ProductId::sequential(1), input().parse().unwrap());
        assert!(product.sku_matches("cim-por"));
        assert!(product.sku_matches(" CIM-POR "));
        assert!(!product.sku_matches("CIM"));
    }

    #[test]
    fn typed_command_sku_is_stored_trimmed() {
        let cmd = AddProduct {
            name: " Béton C30 ".to_string(),
            sku: " BET-C30 ".to_string(),
            quantity: Quantity::new(12),
            min_stock: Quantity::new(5),
            location: "Zone A ".to_string(),
            project_id: None,
        };
        let product = Product::create(ProductId::sequential(1), cmd);
        assert_eq!(product.sku(), "BET-C30");
        assert_eq!(product.name(), "Béton C30");
        assert_eq!(product.location(), "Zone A");
        assert!(product.sku_matches("bet-c30"));
    }

    #[test]
    fn json_numbers_are_accepted_for_numeric_fields() {
        let raw: AddProductInput = serde_json::from_str(
            r#"{"name":"Ciment Portland","sku":"CIM-POR","quantity":25,"min_stock":"50"}"#,
        )
        .unwrap();
        let cmd = raw.parse().unwrap();
        assert_eq!(cmd.quantity, Quantity::new(25));
        assert_eq!(cmd.min_stock, Quantity::new(50));

        let raw: AddProductInput = serde_json::from_str(
            r#"{"name":"Ciment Portland","sku":"CIM-POR","quantity":25,"min_stock":-3}"#,
        )
        .unwrap();
        let err = raw.parse().unwrap_err();
        assert!(err.to_string().contains("minimum stock"));
        assert!(err.to_string().contains("cannot be negative"));
    }
}

//! The stock ledger: products plus the append-only movement log.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use siteerp_core::{DomainError, DomainResult, MovementId, ProjectId, find_by_id};
use siteerp_events::EventLog;

use crate::export::InventoryExportRow;
use crate::filter::{ProductFilter, filter_products};
use crate::history::HistoryWindow;
use crate::movement::{MovementOutcome, RecordMovement, StockMovement};
use crate::product::{AddProduct, Product, ProductId};
use crate::status::StockStatus;

/// Product counts per stock status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StockStats {
    pub total: usize,
    pub in_stock: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
}

/// Owns the product list and the movement log.
///
/// Product quantities change only through [`StockLedger::apply_movement`],
/// and every applied movement is appended to the log in the same call.
#[derive(Debug, Default)]
pub struct StockLedger {
    products: Vec<Product>,
    movements: EventLog<StockMovement>,
}

impl StockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only snapshot of all products, in creation order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn movements(&self) -> &EventLog<StockMovement> {
        &self.movements
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        find_by_id(&self.products, id)
    }

    /// The single product whose SKU matches (case-insensitive).
    pub fn find_by_sku(&self, sku: &str) -> DomainResult<&Product> {
        self.locate(sku).map(|idx| &self.products[idx])
    }

    fn locate(&self, sku: &str) -> DomainResult<usize> {
        let mut matches = self
            .products
            .iter()
            .enumerate()
            .filter(|(_, p)| p.sku_matches(sku))
            .map(|(idx, _)| idx);

        let first = matches
            .next()
            .ok_or_else(|| DomainError::not_found(format!("product with SKU {:?}", sku.trim())))?;
        if matches.next().is_some() {
            return Err(DomainError::conflict(format!(
                "SKU {:?} matches more than one product",
                sku.trim()
            )));
        }
        Ok(first)
    }

    /// Register a new product; its id is `PRD-` + the next sequence number
    /// and its status is derived from the initial quantity.
    ///
    /// SKU uniqueness is not checked here.
    pub fn add_product(&mut self, cmd: AddProduct) -> DomainResult<&Product> {
        cmd.validate()?;

        let id = ProductId::sequential(self.products.len() + 1);
        let product = Product::create(id, cmd);
        info!(
            product_id = %product.id_typed(),
            sku = %product.sku(),
            quantity = product.quantity().get(),
            min_stock = product.min_stock().get(),
            status = %product.status(),
            "product added"
        );
        self.products.push(product);
        Ok(&self.products[self.products.len() - 1])
    }

    /// Apply one scan to the matching product and record the movement.
    ///
    /// Nothing is mutated unless the whole operation succeeds: an unknown or
    /// ambiguous SKU, a zero quantity or an overflowing delivery leave both
    /// the products and the log untouched.
    pub fn apply_movement(&mut self, cmd: RecordMovement) -> DomainResult<MovementOutcome> {
        match self.try_apply(cmd.clone()) {
            Ok(outcome) => {
                info!(
                    sku = %outcome.movement.sku,
                    action = %outcome.movement.action,
                    quantity = outcome.movement.quantity.get(),
                    resulting_quantity = outcome.movement.resulting_quantity.get(),
                    status = %outcome.product.status(),
                    "stock movement applied"
                );
                Ok(outcome)
            }
            Err(e) => {
                warn!(sku = %cmd.sku, action = %cmd.action, error = %e, "stock movement rejected");
                Err(e)
            }
        }
    }

    fn try_apply(&mut self, cmd: RecordMovement) -> DomainResult<MovementOutcome> {
        if cmd.quantity.is_zero() {
            return Err(DomainError::validation("quantity must be greater than zero"));
        }
        let idx = self.locate(&cmd.sku)?;

        let product = &self.products[idx];
        let resulting_quantity = cmd.action.apply(product.quantity(), cmd.quantity)?;
        let movement = StockMovement {
            id: MovementId::new(),
            product_id: product.id_typed().clone(),
            sku: product.sku().to_string(),
            action: cmd.action,
            quantity: cmd.quantity,
            resulting_quantity,
            occurred_at: cmd.occurred_at.unwrap_or_else(Utc::now),
            evidence: cmd.evidence,
        };

        let product = &mut self.products[idx];
        product.set_quantity(resulting_quantity);
        let product = product.clone();
        self.movements.append(movement.clone());

        Ok(MovementOutcome { product, movement })
    }

    /// Movements for `sku` within `window` of `now`, most recent first.
    ///
    /// Movements sharing a timestamp are listed latest-recorded first.
    pub fn query_history(&self, sku: &str, window: HistoryWindow, now: DateTime<Utc>) -> Vec<&StockMovement> {
        let mut hits: Vec<_> = self
            .movements
            .iter()
            .filter(|e| e.payload().sku_matches(sku) && window.contains(now, e.payload().occurred_at))
            .collect();
        hits.sort_by(|a, b| {
            (b.payload().occurred_at, b.sequence_number()).cmp(&(a.payload().occurred_at, a.sequence_number()))
        });
        hits.into_iter().map(|e| e.payload()).collect()
    }

    pub fn filter(&self, filter: &ProductFilter) -> Vec<&Product> {
        filter_products(&self.products, filter)
    }

    pub fn stats(&self) -> StockStats {
        let mut stats = StockStats {
            total: self.products.len(),
            ..StockStats::default()
        };
        for p in &self.products {
            match p.status() {
                StockStatus::InStock => stats.in_stock += 1,
                StockStatus::LowStock => stats.low_stock += 1,
                StockStatus::OutOfStock => stats.out_of_stock += 1,
            }
        }
        stats
    }

    /// Low and out-of-stock products, in creation order.
    pub fn alerts(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.status().is_critical()).collect()
    }

    /// Rows for the spreadsheet export; `project_name` resolves a project
    /// reference to its display name.
    pub fn export_rows<F>(&self, project_name: F) -> Vec<InventoryExportRow>
    where
        F: Fn(&ProjectId) -> Option<String>,
    {
        self.products
            .iter()
            .map(|p| InventoryExportRow {
                name: p.name().to_string(),
                sku: p.sku().to_string(),
                quantity: p.quantity().get(),
                status: p.status(),
                project_name: p.project_id().and_then(&project_name).unwrap_or_default(),
            })
            .collect()
    }
}

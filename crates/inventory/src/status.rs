use core::str::FromStr;
use serde::{Deserialize, Serialize};

use siteerp_core::{DomainError, Quantity};

/// Stock-level classification of a product.
///
/// Always derived from `(quantity, min_stock)` via [`StockStatus::derive`];
/// never set directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    /// - `quantity == 0` → out of stock
    /// - `0 < quantity < min_stock` → low stock
    /// - `quantity >= min_stock` → in stock
    pub fn derive(quantity: Quantity, min_stock: Quantity) -> Self {
        if quantity.is_zero() {
            StockStatus::OutOfStock
        } else if quantity < min_stock {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }

    /// Low or out of stock: shown in the dashboard's stock alerts.
    pub fn is_critical(self) -> bool {
        !matches!(self, StockStatus::InStock)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StockStatus::InStock => "in-stock",
            StockStatus::LowStock => "low-stock",
            StockStatus::OutOfStock => "out-of-stock",
        }
    }
}

impl core::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StockStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "in-stock" => Ok(StockStatus::InStock),
            "low-stock" => Ok(StockStatus::LowStock),
            "out-of-stock" => Ok(StockStatus::OutOfStock),
            other => Err(DomainError::validation(format!(
                "stock status must be one of: in-stock, low-stock, out-of-stock (got {other:?})"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(v: u64) -> Quantity {
        Quantity::new(v)
    }

    #[test]
    fn zero_is_out_of_stock_even_with_zero_threshold() {
        assert_eq!(StockStatus::derive(q(0), q(0)), StockStatus::OutOfStock);
        assert_eq!(StockStatus::derive(q(0), q(200)), StockStatus::OutOfStock);
    }

    #[test]
    fn below_threshold_is_low_stock() {
        assert_eq!(StockStatus::derive(q(25), q(50)), StockStatus::LowStock);
        assert_eq!(StockStatus::derive(q(1), q(2)), StockStatus::LowStock);
    }

    #[test]
    fn at_or_above_threshold_is_in_stock() {
        assert_eq!(StockStatus::derive(q(50), q(50)), StockStatus::InStock);
        assert_eq!(StockStatus::derive(q(450), q(100)), StockStatus::InStock);
    }

    #[test]
    fn serializes_as_kebab_case() {
        let json = serde_json::to_string(&StockStatus::OutOfStock).unwrap();
        assert_eq!(json, "\"out-of-stock\"");
        assert_eq!("Low-Stock".parse::<StockStatus>().unwrap(), StockStatus::LowStock);
        assert!("unknown".parse::<StockStatus>().is_err());
    }
}

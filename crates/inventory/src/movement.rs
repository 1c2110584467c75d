use chrono::{DateTime, Utc};
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use siteerp_core::{DomainError, DomainResult, EvidenceRef, MovementId, Quantity};
use siteerp_events::Event;

use crate::product::{Product, ProductId};

/// Kind of scan-driven stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementAction {
    /// Goods delivered to site: adds stock.
    Delivery,
    /// Goods received back into the store: adds stock.
    Receipt,
    /// Goods taken out of stock: removes stock, floored at zero.
    Return,
}

impl MovementAction {
    pub fn is_inbound(self) -> bool {
        matches!(self, MovementAction::Delivery | MovementAction::Receipt)
    }

    /// Quantity after applying a movement of `delta` units.
    ///
    /// Removing more than is on hand leaves zero; it is not an error.
    pub fn apply(self, current: Quantity, delta: Quantity) -> DomainResult<Quantity> {
        if self.is_inbound() {
            current
                .get()
                .checked_add(delta.get())
                .map(Quantity::new)
                .ok_or_else(|| DomainError::validation("quantity overflow"))
        } else {
            Ok(Quantity::new(current.get().saturating_sub(delta.get())))
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MovementAction::Delivery => "delivery",
            MovementAction::Receipt => "receipt",
            MovementAction::Return => "return",
        }
    }
}

impl core::fmt::Display for MovementAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovementAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "delivery" => Ok(MovementAction::Delivery),
            "receipt" => Ok(MovementAction::Receipt),
            "return" => Ok(MovementAction::Return),
            other => Err(DomainError::validation(format!(
                "action must be one of: delivery, receipt, return (got {other:?})"
            ))),
        }
    }
}

/// Event: a stock movement applied to one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockMovement {
    pub id: MovementId,
    pub product_id: ProductId,
    pub sku: String,
    pub action: MovementAction,
    /// Requested movement size (for returns, possibly more than was on hand).
    pub quantity: Quantity,
    pub resulting_quantity: Quantity,
    pub occurred_at: DateTime<Utc>,
    pub evidence: Option<EvidenceRef>,
}

impl StockMovement {
    pub fn sku_matches(&self, sku: &str) -> bool {
        self.sku.trim().to_lowercase() == sku.trim().to_lowercase()
    }
}

impl Event for StockMovement {
    fn event_type(&self) -> &'static str {
        match self.action {
            MovementAction::Delivery => "inventory.stock.delivery",
            MovementAction::Receipt => "inventory.stock.receipt",
            MovementAction::Return => "inventory.stock.return",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

/// Command: RecordMovement (one scan).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMovement {
    pub sku: String,
    pub action: MovementAction,
    pub quantity: Quantity,
    /// Business time of the scan; `None` means "now".
    #[serde(default)]
    pub occurred_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub evidence: Option<EvidenceRef>,
}

/// Raw scanner dialog input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RecordMovementInput {
    pub sku: String,
    pub action: String,
    #[serde(deserialize_with = "siteerp_core::value_object::string_or_number")]
    pub quantity: String,
    #[serde(default)]
    pub occurred_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub evidence: Option<String>,
}

impl RecordMovementInput {
    pub fn parse(self) -> DomainResult<RecordMovement> {
        let sku = self.sku.trim();
        if sku.is_empty() {
            return Err(DomainError::validation("SKU cannot be empty"));
        }
        Ok(RecordMovement {
            sku: sku.to_string(),
            action: self.action.parse()?,
            quantity: Quantity::parse_positive(&self.quantity)?,
            occurred_at: self.occurred_at,
            evidence: EvidenceRef::from_optional(self.evidence),
        })
    }
}

/// Result of a successful scan: the product after the change and the
/// movement that was recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovementOutcome {
    pub product: Product,
    pub movement: StockMovement,
}

impl MovementOutcome {
    /// Requested change as shown to the operator (`+10`, `-5`).
    pub fn signed_delta(&self) -> i128 {
        let q = i128::from(self.movement.quantity.get());
        if self.movement.action.is_inbound() { q } else { -q }
    }

    /// One-line confirmation message for the scanner dialog.
    pub fn summary(&self) -> String {
        let name = self.product.name();
        let q = self.movement.quantity;
        match self.movement.action {
            MovementAction::Delivery => format!("+{q} {name} added to stock"),
            MovementAction::Receipt => format!("+{q} {name} received"),
            MovementAction::Return => format!("-{q} {name} removed from stock"),
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
    fn inbound_actions_add() {
        assert_eq!(MovementAction::Delivery.apply(q(25), q(30)).unwrap(), q(55));
        assert_eq!(MovementAction::Receipt.apply(q(0), q(7)).unwrap(), q(7));
    }

    #[test]
    fn return_clamps_at_zero() {
        assert_eq!(MovementAction::Return.apply(q(450), q(500)).unwrap(), q(0));
        assert_eq!(MovementAction::Return.apply(q(10), q(4)).unwrap(), q(6));
    }

    #[test]
    fn inbound_overflow_is_rejected() {
        assert!(MovementAction::Delivery.apply(q(u64::MAX), q(1)).is_err());
    }

    #[test]
    fn action_parses_case_insensitively() {
        assert_eq!("RETURN".parse::<MovementAction>().unwrap(), MovementAction::Return);
        assert!("transfer".parse::<MovementAction>().is_err());
    }

    #[test]
    fn input_parse_requires_positive_quantity() {
        let raw = RecordMovementInput {
            sku: "BET-C30".to_string(),
            action: "delivery".to_string(),
            quantity: "0".to_string(),
            ..Default::default()
        };
        assert!(matches!(raw.parse(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn input_parse_rejects_garbage_quantity() {
        let raw = RecordMovementInput {
            sku: "BET-C30".to_string(),
            action: "delivery".to_string(),
            quantity: "dix".to_string(),
            ..Default::default()
        };
        assert!(raw.parse().is_err());
    }

    #[test]
    fn json_quantity_may_be_a_number_or_a_string() {
        let raw: RecordMovementInput =
            serde_json::from_str(r#"{"sku":"CIM-POR","action":"delivery","quantity":30}"#).unwrap();
        assert_eq!(raw.parse().unwrap().quantity, q(30));

        let raw: RecordMovementInput =
            serde_json::from_str(r#"{"sku":"CIM-POR","action":"delivery","quantity":" 30 "}"#)
                .unwrap();
        assert_eq!(raw.parse().unwrap().quantity, q(30));
    }

    #[test]
    fn json_numbers_are_classified_not_coerced() {
        let cases = [("-5", "cannot be negative"), ("1.5", "whole number"), ("0", "greater than zero")];
        for (number, expected) in cases {
            let json = format!(r#"{{"sku":"CIM-POR","action":"return","quantity":{number}}}"#);
            let raw: RecordMovementInput = serde_json::from_str(&json).unwrap();
            let err = raw.parse().unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)), "{number}");
            assert!(err.to_string().contains(expected), "{number}: {err}");
        }
    }

    #[test]
    fn input_parse_keeps_evidence_verbatim() {
        let raw = RecordMovementInput {
            sku: " bet-c30 ".to_string(),
            action: "receipt".to_string(),
            quantity: "3".to_string(),
            evidence: Some("https://files.example/bl-7781.pdf".to_string()),
            ..Default::default()
        };
        let cmd = raw.parse().unwrap();
        assert_eq!(cmd.sku, "bet-c30");
        assert_eq!(cmd.evidence.unwrap().as_str(), "https://files.example/bl-7781.pdf");
    }
}

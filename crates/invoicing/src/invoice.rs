use chrono::NaiveDate;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use siteerp_core::{DomainError, DomainResult, Entity, ProjectId, business_code};

business_code!(
    /// Invoice identifier, scoped by year (`INV-2025-001`).
    InvoiceId,
    "INV"
);

/// Invoice status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
}

impl InvoiceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Sent => "sent",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Overdue => "overdue",
        }
    }
}

impl core::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Ok(InvoiceStatus::Draft),
            "sent" => Ok(InvoiceStatus::Sent),
            "paid" => Ok(InvoiceStatus::Paid),
            "overdue" => Ok(InvoiceStatus::Overdue),
            other => Err(DomainError::validation(format!(
                "invoice status must be one of: draft, sent, paid, overdue (got {other:?})"
            ))),
        }
    }
}

/// A priced invoice line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub description: String,
    pub quantity: u64,
    /// Price in smallest currency unit (e.g., cents).
    pub unit_price: u64,
}

impl InvoiceLine {
    pub fn total(&self) -> DomainResult<u64> {
        self.quantity
            .checked_mul(self.unit_price)
            .ok_or_else(|| DomainError::invariant("invoice line amount overflow"))
    }

    fn validate(&self, line_no: usize) -> DomainResult<()> {
        if self.description.trim().is_empty() {
            return Err(DomainError::validation(format!(
                "invoice line {line_no}: description cannot be empty"
            )));
        }
        if self.quantity == 0 {
            return Err(DomainError::validation(format!(
                "invoice line {line_no}: quantity must be positive"
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invoice {
    id: InvoiceId,
    project_id: ProjectId,
    client: String,
    amount: u64,
    status: InvoiceStatus,
    due_date: NaiveDate,
    created_date: NaiveDate,
    lines: Vec<InvoiceLine>,
}

impl Invoice {
    pub(crate) fn create(
        id: InvoiceId,
        cmd: NewInvoice,
        client: String,
        amount: u64,
        today: NaiveDate,
    ) -> Self {
        Self {
            id,
            project_id: cmd.project_id,
            client,
            amount,
            status: InvoiceStatus::Draft,
            due_date: cmd.due_date,
            created_date: today,
            lines: cmd.lines,
        }
    }

    pub fn id_typed(&self) -> &InvoiceId {
        &self.id
    }

    pub fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    pub fn client(&self) -> &str {
        &self.client
    }

    /// Total in cents: the sum of every line total.
    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn status(&self) -> InvoiceStatus {
        self.status
    }

    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    pub fn created_date(&self) -> NaiveDate {
        self.created_date
    }

    pub fn lines(&self) -> &[InvoiceLine] {
        &self.lines
    }

    pub fn is_past_due(&self, today: NaiveDate) -> bool {
        self.status == InvoiceStatus::Sent && self.due_date < today
    }

    /// Invariant: a paid invoice never changes status again.
    pub(crate) fn set_status(&mut self, status: InvoiceStatus) -> DomainResult<()> {
        if self.status == InvoiceStatus::Paid && status != InvoiceStatus::Paid {
            return Err(DomainError::conflict(format!(
                "invoice {} is already paid",
                self.id
            )));
        }
        self.status = status;
        Ok(())
    }
}

impl Entity for Invoice {
    type Id = InvoiceId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Command: draft a new invoice for a project.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewInvoice {
    pub project_id: ProjectId,
    pub due_date: NaiveDate,
    pub lines: Vec<InvoiceLine>,
}

impl NewInvoice {
    /// Validate the lines and compute the invoice amount.
    pub(crate) fn total(&self) -> DomainResult<u64> {
        if self.lines.is_empty() {
            return Err(DomainError::validation("cannot create invoice without lines"));
        }
        let mut total: u64 = 0;
        for (i, line) in self.lines.iter().enumerate() {
            line.validate(i + 1)?;
            total = total
                .checked_add(line.total()?)
                .ok_or_else(|| DomainError::invariant("invoice total overflow"))?;
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(description: &str, quantity: u64, unit_price: u64) -> InvoiceLine {
        InvoiceLine { description: description.into(), quantity, unit_price }
    }

    fn new_invoice(lines: Vec<InvoiceLine>) -> NewInvoice {
        NewInvoice {
            project_id: ProjectId::sequential(1),
            due_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            lines,
        }
    }

    #[test]
    fn total_sums_line_totals() {
        let cmd = new_invoice(vec![line("Gros œuvre", 1, 8_500_000), line("Ciment", 50, 850)]);
        assert_eq!(cmd.total().unwrap(), 8_542_500);
    }

    #[test]
    fn empty_invoice_is_rejected() {
        assert!(matches!(new_invoice(vec![]).total(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn invalid_lines_are_rejected() {
        let blank = new_invoice(vec![line("  ", 1, 100)]);
        assert!(matches!(blank.total(), Err(DomainError::Validation(_))));

        let zero = new_invoice(vec![line("Sable", 0, 100)]);
        let err = zero.total().unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn overflowing_totals_are_invariant_violations() {
        let cmd = new_invoice(vec![line("a", u64::MAX, 2)]);
        assert!(matches!(cmd.total(), Err(DomainError::InvariantViolation(_))));

        let cmd = new_invoice(vec![line("a", 1, u64::MAX), line("b", 1, 1)]);
        assert!(matches!(cmd.total(), Err(DomainError::InvariantViolation(_))));
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("PAID".parse::<InvoiceStatus>().unwrap(), InvoiceStatus::Paid);
        assert!("void".parse::<InvoiceStatus>().is_err());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig { cases: 256, ..ProptestConfig::default() })]

            #[test]
            fn amount_is_sum_of_lines(
                lines in prop::collection::vec((1u64..1_000, 0u64..1_000_000), 1..10)
            ) {
                let expected: u64 = lines.iter().map(|(q, p)| q * p).sum();
                let cmd = new_invoice(
                    lines.iter().map(|(q, p)| line("item", *q, *p)).collect(),
                );
                prop_assert_eq!(cmd.total().unwrap(), expected);
            }
        }
    }
}

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use tracing::{info, warn};

use siteerp_core::{
    DomainError, DomainResult, ProjectId, Selector, find_by_id, find_by_id_mut, text_matches,
};

use crate::invoice::{Invoice, InvoiceId, InvoiceStatus, NewInvoice};

/// Invoices listing filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoiceFilter {
    /// Case-insensitive substring of the invoice id or the client.
    pub search: String,
    pub status: Selector<InvoiceStatus>,
    pub project: Selector<ProjectId>,
}

impl InvoiceFilter {
    pub fn matches(&self, invoice: &Invoice) -> bool {
        text_matches(&self.search, &[invoice.id_typed().as_str(), invoice.client()])
            && self.status.matches(&invoice.status())
            && self.project.matches(invoice.project_id())
    }
}

/// Amount sums, in cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InvoiceStats {
    pub total: u64,
    pub paid: u64,
    /// Sent and awaiting payment.
    pub pending: u64,
    pub overdue: u64,
}

/// Every invoice. Stored in creation order, listed newest first.
#[derive(Debug, Default)]
pub struct InvoiceBook {
    invoices: Vec<Invoice>,
}

impl InvoiceBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.invoices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invoices.is_empty()
    }

    /// Newest first.
    pub fn list(&self) -> impl Iterator<Item = &Invoice> {
        self.invoices.iter().rev()
    }

    pub fn get(&self, id: &InvoiceId) -> Option<&Invoice> {
        find_by_id(&self.invoices, id)
    }

    /// Newest first. The iterator borrows only the invoices, not `project`.
    pub fn for_project<'a>(
        &'a self,
        project: &ProjectId,
    ) -> impl Iterator<Item = &'a Invoice> + use<'a> {
        let project = project.clone();
        self.list().filter(move |i| *i.project_id() == project)
    }

    /// Draft an invoice. `client` is resolved by the caller from the project.
    pub fn create(
        &mut self,
        cmd: NewInvoice,
        client: impl Into<String>,
        today: NaiveDate,
    ) -> DomainResult<&Invoice> {
        let amount = cmd.total()?;
        let id = InvoiceId::scoped(today.year(), self.invoices.len() + 1);
        info!(invoice_id = %id, project_id = %cmd.project_id, amount, "invoice created");
        self.invoices
            .push(Invoice::create(id, cmd, client.into(), amount, today));
        Ok(&self.invoices[self.invoices.len() - 1])
    }

    pub fn change_status(&mut self, id: &InvoiceId, status: InvoiceStatus) -> DomainResult<&Invoice> {
        let invoice = find_by_id_mut(&mut self.invoices, id)
            .ok_or_else(|| DomainError::not_found(format!("invoice {id}")))?;
        if let Err(e) = invoice.set_status(status) {
            warn!(invoice_id = %id, requested = %status, error = %e, "invoice status change rejected");
            return Err(e);
        }
        info!(invoice_id = %id, status = %status, "invoice status changed");
        Ok(invoice)
    }

    /// Flag every sent invoice whose due date has passed. Returns how many
    /// invoices changed.
    pub fn mark_overdue(&mut self, today: NaiveDate) -> usize {
        let mut changed = 0;
        for invoice in self.invoices.iter_mut().filter(|i| i.is_past_due(today)) {
            // Sent is never terminal.
            if invoice.set_status(InvoiceStatus::Overdue).is_ok() {
                changed += 1;
            }
        }
        if changed > 0 {
            info!(count = changed, %today, "invoices marked overdue");
        }
        changed
    }

    pub fn filter(&self, filter: &InvoiceFilter) -> Vec<&Invoice> {
        self.list().filter(|i| filter.matches(i)).collect()
    }

    pub fn stats(&self) -> InvoiceStats {
        let mut stats = InvoiceStats::default();
        for invoice in &self.invoices {
            let amount = invoice.amount();
            stats.total = stats.total.saturating_add(amount);
            let bucket = match invoice.status() {
                InvoiceStatus::Paid => &mut stats.paid,
                InvoiceStatus::Sent => &mut stats.pending,
                InvoiceStatus::Overdue => &mut stats.overdue,
                InvoiceStatus::Draft => continue,
            };
            *bucket = bucket.saturating_add(amount);
        }
        stats
    }
}

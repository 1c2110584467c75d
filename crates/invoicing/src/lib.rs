//! Invoicing module.
//!
//! Project invoices built from priced lines, with a simple
//! draft → sent → paid lifecycle and overdue detection. Amounts are in the
//! smallest currency unit (cents).

pub mod book;
pub mod invoice;

pub use book::{InvoiceBook, InvoiceFilter, InvoiceStats};
pub use invoice::{Invoice, InvoiceId, InvoiceLine, InvoiceStatus, NewInvoice};

//! Read-side views composed from several collections.

use serde::Serialize;

use siteerp_inventory::Product;
use siteerp_invoicing::Invoice;
use siteerp_issues::Issue;
use siteerp_projects::Project;
use siteerp_tools::Tool;

/// Headline figures for the dashboard cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub active_projects: usize,
    /// Products in low or out of stock.
    pub critical_stock: usize,
    pub open_issues: usize,
    /// Sum of paid invoice amounts, in cents.
    pub paid_revenue: u64,
}

/// A project with everything attached to it.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectOverview<'a> {
    pub project: &'a Project,
    pub budget_used_percent: f64,
    pub products: Vec<&'a Product>,
    pub issues: Vec<&'a Issue>,
    pub invoices: Vec<&'a Invoice>,
    pub tools: Vec<&'a Tool>,
}

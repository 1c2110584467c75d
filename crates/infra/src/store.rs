//! The site store: one instance of every domain collection plus the
//! operations that have to look across collections (project references,
//! invoice clients, dashboard figures).
//!
//! The store is plain synchronous state. Callers that share it between
//! threads wrap it in a lock (the HTTP layer uses `Arc<Mutex<SiteStore>>`).

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info};

use siteerp_core::{DomainResult, ProjectId};
use siteerp_inventory::{
    AddProduct, InventoryExportRow, MovementOutcome, Product, RecordMovement, StockLedger,
};
use siteerp_invoicing::{Invoice, InvoiceBook, InvoiceId, InvoiceStatus, NewInvoice};
use siteerp_issues::{Issue, IssueId, IssueLog, IssueStatus, NewIssue};
use siteerp_projects::{NewProject, Project, ProjectRegistry, ProjectStatus};
use siteerp_tools::{AddTool, CheckOut, Tool, ToolCrib, ToolId};

use crate::seed::{SeedData, SeedError};
use crate::views::{DashboardSummary, ProjectOverview};

#[derive(Debug, Default)]
pub struct SiteStore {
    ledger: StockLedger,
    projects: ProjectRegistry,
    tools: ToolCrib,
    issues: IssueLog,
    invoices: InvoiceBook,
}

impl SiteStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store populated with the bundled demo fixture.
    pub fn seeded() -> Result<Self, SeedError> {
        Self::from_seed(SeedData::demo()?)
    }

    pub fn from_seed(seed: SeedData) -> Result<Self, SeedError> {
        let mut store = Self::new();
        seed.load_into(&mut store)?;
        info!(
            projects = store.projects.all().len(),
            products = store.ledger.products().len(),
            tools = store.tools.all().len(),
            issues = store.issues.len(),
            invoices = store.invoices.len(),
            "site store seeded"
        );
        Ok(store)
    }

    pub fn ledger(&self) -> &StockLedger {
        &self.ledger
    }

    pub fn projects(&self) -> &ProjectRegistry {
        &self.projects
    }

    pub fn tools(&self) -> &ToolCrib {
        &self.tools
    }

    pub fn issues(&self) -> &IssueLog {
        &self.issues
    }

    pub fn invoices(&self) -> &InvoiceBook {
        &self.invoices
    }

    fn require_project(&self, id: &ProjectId) -> DomainResult<&Project> {
        self.projects.require(id)
    }

    // Projects

    pub fn create_project(&mut self, cmd: NewProject) -> DomainResult<&Project> {
        self.projects.create(cmd)
    }

    pub fn set_project_status(&mut self, id: &ProjectId, status: ProjectStatus) -> DomainResult<&Project> {
        self.projects.set_status(id, status)
    }

    pub fn set_project_progress(&mut self, id: &ProjectId, progress: u8) -> DomainResult<&Project> {
        self.projects.set_progress(id, progress)
    }

    pub fn record_project_spend(&mut self, id: &ProjectId, amount: u64) -> DomainResult<&Project> {
        self.projects.record_spend(id, amount)
    }

    // Inventory

    pub fn add_product(&mut self, cmd: AddProduct) -> DomainResult<&Product> {
        if let Some(project) = &cmd.project_id {
            self.require_project(project)?;
        }
        self.ledger.add_product(cmd)
    }

    pub fn apply_movement(&mut self, cmd: RecordMovement) -> DomainResult<MovementOutcome> {
        self.ledger.apply_movement(cmd)
    }

    /// Export rows with the owning project's name resolved (blank when the
    /// product has no project).
    pub fn inventory_export(&self) -> Vec<InventoryExportRow> {
        let projects = &self.projects;
        self.ledger
            .export_rows(|id| projects.get(id).map(|p| p.name().to_string()))
    }

    // Tools

    pub fn add_tool(&mut self, cmd: AddTool, today: NaiveDate) -> DomainResult<&Tool> {
        self.tools.add(cmd, today)
    }

    pub fn scan_tool(&self, code: &str) -> DomainResult<&Tool> {
        self.tools.scan(code)
    }

    pub fn toggle_tool(&mut self, id: &ToolId) -> DomainResult<&Tool> {
        self.tools.toggle(id)
    }

    pub fn check_out_tool(&mut self, id: &ToolId, cmd: CheckOut) -> DomainResult<&Tool> {
        if let Some(project) = &cmd.project_id {
            self.require_project(project)?;
        }
        self.tools.check_out(id, cmd)
    }

    pub fn check_in_tool(&mut self, id: &ToolId) -> DomainResult<&Tool> {
        self.tools.check_in(id)
    }

    pub fn start_tool_maintenance(&mut self, id: &ToolId) -> DomainResult<&Tool> {
        self.tools.start_maintenance(id)
    }

    pub fn finish_tool_maintenance(&mut self, id: &ToolId, today: NaiveDate) -> DomainResult<&Tool> {
        self.tools.finish_maintenance(id, today)
    }

    // Issues

    pub fn report_issue(&mut self, cmd: NewIssue, reported_at: DateTime<Utc>) -> DomainResult<&Issue> {
        self.require_project(&cmd.project_id)?;
        self.issues.report(cmd, reported_at)
    }

    pub fn change_issue_status(&mut self, id: &IssueId, status: IssueStatus) -> DomainResult<&Issue> {
        self.issues.change_status(id, status)
    }

    // Invoices

    /// Draft an invoice; the client is taken from the referenced project.
    pub fn create_invoice(&mut self, cmd: NewInvoice, today: NaiveDate) -> DomainResult<&Invoice> {
        let client = self.require_project(&cmd.project_id)?.client().to_string();
        self.invoices.create(cmd, client, today)
    }

    pub fn change_invoice_status(&mut self, id: &InvoiceId, status: InvoiceStatus) -> DomainResult<&Invoice> {
        self.invoices.change_status(id, status)
    }

    pub fn mark_overdue_invoices(&mut self, today: NaiveDate) -> usize {
        self.invoices.mark_overdue(today)
    }

    // Views

    pub fn dashboard(&self) -> DashboardSummary {
        let summary = DashboardSummary {
            active_projects: self.projects.count_with_status(ProjectStatus::Active),
            critical_stock: self.ledger.alerts().len(),
            open_issues: self.issues.stats().open,
            paid_revenue: self.invoices.stats().paid,
        };
        debug!(?summary, "dashboard computed");
        summary
    }

    pub fn project_overview(&self, id: &ProjectId) -> DomainResult<ProjectOverview<'_>> {
        let project = self.require_project(id)?;
        Ok(ProjectOverview {
            project,
            budget_used_percent: project.budget_used_percent(),
            products: self
                .ledger
                .products()
                .iter()
                .filter(|p| p.project_id() == Some(id))
                .collect(),
            issues: self.issues.for_project(id).collect(),
            invoices: self.invoices.for_project(id).collect(),
            tools: self
                .tools
                .all()
                .iter()
                .filter(|t| t.project_id() == Some(id))
                .collect(),
        })
    }
}

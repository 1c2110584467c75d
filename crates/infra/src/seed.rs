//! Demo fixture loading.
//!
//! Every fixture record is replayed through the regular store operations so
//! seeded data obeys the same invariants as user-entered data (derived stock
//! status, sequential ids, tool assignment rules).

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use thiserror::Error;

use siteerp_core::{DomainError, ProjectId};
use siteerp_inventory::AddProduct;
use siteerp_invoicing::{InvoiceStatus, NewInvoice};
use siteerp_issues::{IssueStatus, NewIssue};
use siteerp_projects::{NewProject, ProjectStatus};
use siteerp_tools::{AddTool, CheckOut, ToolStatus};

use crate::store::SiteStore;

/// The fixture bundled with the crate.
pub const DEMO_SEED: &str = include_str!("../fixtures/seed.json");

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("invalid seed document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("seed {section}[{index}] rejected: {source}")]
    Rejected {
        section: &'static str,
        index: usize,
        #[source]
        source: DomainError,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedProject {
    #[serde(flatten)]
    pub project: NewProject,
    pub status: ProjectStatus,
    pub progress: u8,
    #[serde(default)]
    pub spent: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedTool {
    #[serde(flatten)]
    pub tool: AddTool,
    pub status: ToolStatus,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub project_id: Option<ProjectId>,
    pub last_maintenance: NaiveDate,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedIssue {
    #[serde(flatten)]
    pub issue: NewIssue,
    pub status: IssueStatus,
    pub reported_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedInvoice {
    #[serde(flatten)]
    pub invoice: NewInvoice,
    pub status: InvoiceStatus,
    pub created_date: NaiveDate,
}

/// A full store snapshot expressed as creation inputs plus final states.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SeedData {
    pub projects: Vec<SeedProject>,
    pub products: Vec<AddProduct>,
    pub tools: Vec<SeedTool>,
    pub issues: Vec<SeedIssue>,
    pub invoices: Vec<SeedInvoice>,
}

impl SeedData {
    pub fn from_json(raw: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn demo() -> Result<Self, SeedError> {
        Self::from_json(DEMO_SEED)
    }

    /// Replay the fixture into `store`. Projects go first so every other
    /// section can reference them.
    pub fn load_into(self, store: &mut SiteStore) -> Result<(), SeedError> {
        fn at(section: &'static str, index: usize) -> impl FnOnce(DomainError) -> SeedError {
            move |source| SeedError::Rejected { section, index, source }
        }

        for (i, p) in self.projects.into_iter().enumerate() {
            let id = store.create_project(p.project).map_err(at("projects", i))?.id_typed().clone();
            store.set_project_status(&id, p.status).map_err(at("projects", i))?;
            store.set_project_progress(&id, p.progress).map_err(at("projects", i))?;
            if p.spent > 0 {
                store.record_project_spend(&id, p.spent).map_err(at("projects", i))?;
            }
        }

        for (i, p) in self.products.into_iter().enumerate() {
            store.add_product(p).map_err(at("products", i))?;
        }

        for (i, t) in self.tools.into_iter().enumerate() {
            let id = store
                .add_tool(t.tool, t.last_maintenance)
                .map_err(at("tools", i))?
                .id_typed()
                .clone();
            match t.status {
                ToolStatus::Available => {}
                ToolStatus::InUse => {
                    let cmd = CheckOut {
                        assignee: t.assigned_to.unwrap_or_default(),
                        project_id: t.project_id,
                    };
                    store.check_out_tool(&id, cmd).map_err(at("tools", i))?;
                }
                ToolStatus::Maintenance => {
                    store.start_tool_maintenance(&id).map_err(at("tools", i))?;
                }
            }
        }

        for (i, s) in self.issues.into_iter().enumerate() {
            let id = store
                .report_issue(s.issue, s.reported_at)
                .map_err(at("issues", i))?
                .id_typed()
                .clone();
            if s.status != IssueStatus::Open {
                store.change_issue_status(&id, s.status).map_err(at("issues", i))?;
            }
        }

        for (i, s) in self.invoices.into_iter().enumerate() {
            let id = store
                .create_invoice(s.invoice, s.created_date)
                .map_err(at("invoices", i))?
                .id_typed()
                .clone();
            if s.status != InvoiceStatus::Draft {
                store.change_invoice_status(&id, s.status).map_err(at("invoices", i))?;
            }
        }

        Ok(())
    }
}

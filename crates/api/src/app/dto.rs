//! Query and request DTOs.
//!
//! Selector values (`status`, `project`, ...) arrive as raw strings so that a
//! bad value is reported with the domain's validation message rather than a
//! generic deserialization rejection.

use serde::Deserialize;

use siteerp_core::{DomainError, DomainResult};
use siteerp_invoicing::InvoiceFilter;
use siteerp_issues::IssueFilter;
use siteerp_projects::ProjectFilter;
use siteerp_tools::ToolFilter;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProductQuery {
    pub search: String,
    pub status: String,
    pub project: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct HistoryQuery {
    /// `day`, `week` or `month`; blank means week.
    pub window: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProjectQuery {
    pub search: String,
    pub status: String,
}

impl ProjectQuery {
    pub fn into_filter(self) -> DomainResult<ProjectFilter> {
        Ok(ProjectFilter {
            search: self.search,
            status: self.status.parse()?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ProgressRequest {
    /// Any JSON number, so an out-of-range value gets the domain's message.
    pub progress: serde_json::Number,
}

impl ProgressRequest {
    /// Narrow to a percentage byte; the project still checks the 0..=100 range.
    pub fn percent(&self) -> DomainResult<u8> {
        self.progress
            .as_u64()
            .and_then(|p| u8::try_from(p).ok())
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "progress must be between 0 and 100, got {}",
                    self.progress
                ))
            })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ToolQuery {
    pub search: String,
    pub status: String,
}

impl ToolQuery {
    pub fn into_filter(self) -> DomainResult<ToolFilter> {
        Ok(ToolFilter {
            search: self.search,
            status: self.status.parse()?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ScanToolRequest {
    pub code: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct IssueQuery {
    pub search: String,
    pub status: String,
    pub priority: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl IssueQuery {
    pub fn into_filter(self) -> DomainResult<IssueFilter> {
        Ok(IssueFilter {
            search: self.search,
            status: self.status.parse()?,
            priority: self.priority.parse()?,
            kind: self.kind.parse()?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct InvoiceQuery {
    pub search: String,
    pub status: String,
    pub project: String,
}

impl InvoiceQuery {
    pub fn into_filter(self) -> DomainResult<InvoiceFilter> {
        Ok(InvoiceFilter {
            search: self.search,
            status: self.status.parse()?,
            project: self.project.parse()?,
        })
    }
}

/// Body of the status-change endpoints; parsed by the target enum.
#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

use chrono::NaiveDate;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use siteerp_core::{DomainError, DomainResult, Entity, ProjectId, business_code};

business_code!(
    /// Tool identifier (`TL-001`).
    ToolId,
    "TL"
);

/// Assignee used by the quick "toggle" action, which has no assignee input.
pub const DEFAULT_OPERATOR: &str = "Current user";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolStatus {
    Available,
    InUse,
    Maintenance,
}

impl ToolStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ToolStatus::Available => "available",
            ToolStatus::InUse => "in-use",
            ToolStatus::Maintenance => "maintenance",
        }
    }
}

impl core::fmt::Display for ToolStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "available" => Ok(ToolStatus::Available),
            "in-use" => Ok(ToolStatus::InUse),
            "maintenance" => Ok(ToolStatus::Maintenance),
            other => Err(DomainError::validation(format!(
                "tool status must be one of: available, in-use, maintenance (got {other:?})"
            ))),
        }
    }
}

/// A tracked piece of site equipment.
///
/// `assigned_to` and `project_id` are only set while the tool is in use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tool {
    id: ToolId,
    name: String,
    code: String,
    status: ToolStatus,
    assigned_to: Option<String>,
    project_id: Option<ProjectId>,
    last_maintenance: NaiveDate,
}

impl Tool {
    pub(crate) fn create(id: ToolId, cmd: AddTool, today: NaiveDate) -> Self {
        Self {
            id,
            name: cmd.name,
            code: cmd.code,
            status: ToolStatus::Available,
            assigned_to: None,
            project_id: None,
            last_maintenance: today,
        }
    }

    pub fn id_typed(&self) -> &ToolId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn status(&self) -> ToolStatus {
        self.status
    }

    pub fn assigned_to(&self) -> Option<&str> {
        self.assigned_to.as_deref()
    }

    pub fn project_id(&self) -> Option<&ProjectId> {
        self.project_id.as_ref()
    }

    pub fn last_maintenance(&self) -> NaiveDate {
        self.last_maintenance
    }

    pub fn code_matches(&self, code: &str) -> bool {
        self.code.to_lowercase() == code.trim().to_lowercase()
    }

    pub(crate) fn check_out(&mut self, cmd: CheckOut) -> DomainResult<()> {
        if self.status != ToolStatus::Available {
            return Err(DomainError::conflict(format!(
                "tool {} is {}, only available tools can be checked out",
                self.id, self.status
            )));
        }
        if cmd.assignee.trim().is_empty() {
            return Err(DomainError::validation("assignee cannot be empty"));
        }
        self.status = ToolStatus::InUse;
        self.assigned_to = Some(cmd.assignee.trim().to_string());
        self.project_id = cmd.project_id;
        Ok(())
    }

    pub(crate) fn check_in(&mut self) -> DomainResult<()> {
        if self.status != ToolStatus::InUse {
            return Err(DomainError::conflict(format!("tool {} is not checked out", self.id)));
        }
        self.release();
        Ok(())
    }

    pub(crate) fn start_maintenance(&mut self) -> DomainResult<()> {
        match self.status {
            ToolStatus::InUse => Err(DomainError::conflict(format!(
                "tool {} must be checked in before maintenance",
                self.id
            ))),
            ToolStatus::Maintenance => Err(DomainError::conflict(format!(
                "tool {} is already in maintenance",
                self.id
            ))),
            ToolStatus::Available => {
                self.status = ToolStatus::Maintenance;
                Ok(())
            }
        }
    }

    pub(crate) fn finish_maintenance(&mut self, today: NaiveDate) -> DomainResult<()> {
        if self.status != ToolStatus::Maintenance {
            return Err(DomainError::conflict(format!("tool {} is not in maintenance", self.id)));
        }
        self.status = ToolStatus::Available;
        self.last_maintenance = today;
        Ok(())
    }

    /// Quick action: an available tool goes into use for the default
    /// operator, anything else becomes available again.
    pub(crate) fn toggle(&mut self) {
        if self.status == ToolStatus::Available {
            self.status = ToolStatus::InUse;
            self.assigned_to = Some(DEFAULT_OPERATOR.to_string());
        } else {
            self.release();
        }
    }

    fn release(&mut self) {
        self.status = ToolStatus::Available;
        self.assigned_to = None;
        self.project_id = None;
    }
}

impl Entity for Tool {
    type Id = ToolId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Command: register a tool.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddTool {
    pub name: String,
    pub code: String,
}

impl AddTool {
    pub(crate) fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if self.code.trim().is_empty() {
            return Err(DomainError::validation("code cannot be empty"));
        }
        Ok(())
    }
}

/// Command: hand a tool to a worker.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CheckOut {
    pub assignee: String,
    #[serde(default)]
    pub project_id: Option<ProjectId>,
}

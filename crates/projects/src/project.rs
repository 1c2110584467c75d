use chrono::NaiveDate;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use siteerp_core::{DomainError, DomainResult, Entity, ProjectId};

/// Project status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    Active,
    Completed,
    OnHold,
}

impl ProjectStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectStatus::Active => "active",
            ProjectStatus::Completed => "completed",
            ProjectStatus::OnHold => "on-hold",
        }
    }
}

impl core::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(ProjectStatus::Active),
            "completed" => Ok(ProjectStatus::Completed),
            "on-hold" => Ok(ProjectStatus::OnHold),
            other => Err(DomainError::validation(format!(
                "project status must be one of: active, completed, on-hold (got {other:?})"
            ))),
        }
    }
}

/// A construction project. Money amounts are in cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    id: ProjectId,
    name: String,
    client: String,
    status: ProjectStatus,
    /// Completion percentage, 0..=100.
    progress: u8,
    start_date: NaiveDate,
    end_date: NaiveDate,
    budget: u64,
    spent: u64,
}

impl Project {
    pub(crate) fn create(id: ProjectId, cmd: NewProject) -> Self {
        Self {
            id,
            name: cmd.name,
            client: cmd.client,
            status: ProjectStatus::Active,
            progress: 0,
            start_date: cmd.start_date,
            end_date: cmd.end_date,
            budget: cmd.budget,
            spent: 0,
        }
    }

    pub fn id_typed(&self) -> &ProjectId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn client(&self) -> &str {
        &self.client
    }

    pub fn status(&self) -> ProjectStatus {
        self.status
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn budget(&self) -> u64 {
        self.budget
    }

    pub fn spent(&self) -> u64 {
        self.spent
    }

    /// Share of the budget already spent, in percent (0 when there is no budget).
    pub fn budget_used_percent(&self) -> f64 {
        if self.budget == 0 {
            return 0.0;
        }
        self.spent as f64 * 100.0 / self.budget as f64
    }

    pub fn remaining_budget(&self) -> u64 {
        self.budget.saturating_sub(self.spent)
    }

    pub(crate) fn set_status(&mut self, status: ProjectStatus) {
        self.status = status;
    }

    pub(crate) fn set_progress(&mut self, progress: u8) -> DomainResult<()> {
        if progress > 100 {
            return Err(DomainError::validation(format!(
                "progress must be between 0 and 100, got {progress}"
            )));
        }
        self.progress = progress;
        Ok(())
    }

    pub(crate) fn record_spend(&mut self, amount: u64) -> DomainResult<()> {
        self.spent = self
            .spent
            .checked_add(amount)
            .ok_or_else(|| DomainError::validation("spent amount overflow"))?;
        Ok(())
    }
}

impl Entity for Project {
    type Id = ProjectId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Command: create a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProject {
    pub name: String,
    pub client: String,
    /// Budget in cents.
    pub budget: u64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl NewProject {
    pub(crate) fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if self.client.trim().is_empty() {
            return Err(DomainError::validation("client cannot be empty"));
        }
        if self.end_date < self.start_date {
            return Err(DomainError::validation("end date cannot be before start date"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn cmd() -> NewProject {
        NewProject {
            name: "Tour Montparnasse Renovation".to_string(),
            client: "Bouygues Construction".to_string(),
            budget: 250_000_000,
            start_date: date(2025, 1, 15),
            end_date: date(2025, 8, 30),
        }
    }

    #[test]
    fn new_project_starts_active_and_untouched() {
        let p = Project::create(ProjectId::sequential(1), cmd());
        assert_eq!(p.status(), ProjectStatus::Active);
        assert_eq!(p.progress(), 0);
        assert_eq!(p.spent(), 0);
        assert_eq!(p.budget_used_percent(), 0.0);
    }

    #[test]
    fn budget_usage_is_a_percentage() {
        let mut p = Project::create(ProjectId::sequential(1), cmd());
        p.record_spend(162_500_000).unwrap();
        assert!((p.budget_used_percent() - 65.0).abs() < 1e-9);
        assert_eq!(p.remaining_budget(), 87_500_000);
    }

    #[test]
    fn zero_budget_reports_zero_usage() {
        let mut c = cmd();
        c.budget = 0;
        let mut p = Project::create(ProjectId::sequential(1), c);
        p.record_spend(10).unwrap();
        assert_eq!(p.budget_used_percent(), 0.0);
        assert_eq!(p.remaining_budget(), 0);
    }

    #[test]
    fn progress_above_hundred_is_rejected() {
        let mut p = Project::create(ProjectId::sequential(1), cmd());
        assert!(p.set_progress(101).is_err());
        p.set_progress(100).unwrap();
        assert_eq!(p.progress(), 100);
        assert_eq!(p.status(), ProjectStatus::Active);
    }

    #[test]
    fn validation_catches_inverted_schedule() {
        let mut c = cmd();
        c.end_date = date(2024, 12, 31);
        assert!(matches!(c.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn status_round_trips_through_text() {
        for s in [ProjectStatus::Active, ProjectStatus::Completed, ProjectStatus::OnHold] {
            assert_eq!(s.as_str().parse::<ProjectStatus>().unwrap(), s);
        }
    }
}

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use siteerp_core::{
    DomainError, DomainResult, ProjectId, Selector, find_by_id, find_by_id_mut, text_matches,
};

use crate::issue::{Issue, IssueId, IssueKind, IssuePriority, IssueStatus, NewIssue};

/// Issues listing filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueFilter {
    /// Case-insensitive substring of the title or the description.
    pub search: String,
    pub status: Selector<IssueStatus>,
    pub priority: Selector<IssuePriority>,
    pub kind: Selector<IssueKind>,
}

impl IssueFilter {
    pub fn matches(&self, issue: &Issue) -> bool {
        text_matches(&self.search, &[issue.title(), issue.description()])
            && self.status.matches(&issue.status())
            && self.priority.matches(&issue.priority())
            && self.kind.matches(&issue.kind())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IssueStats {
    pub total: usize,
    pub open: usize,
    pub in_progress: usize,
    pub resolved: usize,
    /// Urgent issues that are not resolved yet.
    pub urgent: usize,
}

/// Every reported issue. Stored in report order, listed newest first.
#[derive(Debug, Default)]
pub struct IssueLog {
    issues: Vec<Issue>,
}

impl IssueLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Newest first.
    pub fn list(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().rev()
    }

    pub fn get(&self, id: &IssueId) -> Option<&Issue> {
        find_by_id(&self.issues, id)
    }

    /// Newest first. The iterator borrows only the issues, not `project`.
    pub fn for_project<'a>(
        &'a self,
        project: &ProjectId,
    ) -> impl Iterator<Item = &'a Issue> + use<'a> {
        let project = project.clone();
        self.list().filter(move |i| *i.project_id() == project)
    }

    pub fn report(&mut self, cmd: NewIssue, reported_at: DateTime<Utc>) -> DomainResult<&Issue> {
        cmd.validate()?;
        let id = IssueId::sequential(self.issues.len() + 1);
        info!(
            issue_id = %id,
            project_id = %cmd.project_id,
            priority = %cmd.priority,
            "issue reported"
        );
        self.issues.push(Issue::create(id, cmd, reported_at));
        Ok(&self.issues[self.issues.len() - 1])
    }

    pub fn change_status(&mut self, id: &IssueId, status: IssueStatus) -> DomainResult<&Issue> {
        let issue = find_by_id_mut(&mut self.issues, id)
            .ok_or_else(|| DomainError::not_found(format!("issue {id}")))?;
        issue.set_status(status);
        info!(issue_id = %id, status = %status, "issue status changed");
        Ok(issue)
    }

    pub fn filter(&self, filter: &IssueFilter) -> Vec<&Issue> {
        self.list().filter(|i| filter.matches(i)).collect()
    }

    pub fn stats(&self) -> IssueStats {
        let mut stats = IssueStats {
            total: self.issues.len(),
            ..IssueStats::default()
        };
        for issue in &self.issues {
            match issue.status() {
                IssueStatus::Open => stats.open += 1,
                IssueStatus::InProgress => stats.in_progress += 1,
                IssueStatus::Resolved => stats.resolved += 1,
            }
            if issue.is_urgent_open() {
                stats.urgent += 1;
            }
        }
        stats
    }
}

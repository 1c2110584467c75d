use chrono::{DateTime, Utc};
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use siteerp_core::{DomainError, DomainResult, Entity, EvidenceRef, ProjectId, business_code};

business_code!(
    /// Issue identifier (`ISS-001`).
    IssueId,
    "ISS"
);

/// Declares a kebab-case string enum with `as_str`, `Display` and a
/// `FromStr` that lists the accepted values on error.
macro_rules! issue_enum {
    ($(#[$meta:meta])* $t:ident, $label:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "kebab-case")]
        pub enum $t {
            $($variant),+
        }

        impl $t {
            pub fn as_str(self) -> &'static str {
                match self {
                    $($t::$variant => $text),+
                }
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($text => Ok($t::$variant),)+
                    other => Err(DomainError::validation(format!(
                        "{} must be one of: {} (got {:?})",
                        $label,
                        [$($text),+].join(", "),
                        other
                    ))),
                }
            }
        }
    };
}

issue_enum!(IssuePriority, "issue priority", {
    Urgent => "urgent",
    High => "high",
    Medium => "medium",
    Low => "low",
});

issue_enum!(IssueStatus, "issue status", {
    Open => "open",
    InProgress => "in-progress",
    Resolved => "resolved",
});

issue_enum!(
    /// What kind of problem was reported.
    IssueKind,
    "issue type",
    {
        NonConformity => "non-conformity",
        Modification => "modification",
        Defect => "defect",
    }
);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    id: IssueId,
    title: String,
    description: String,
    project_id: ProjectId,
    priority: IssuePriority,
    status: IssueStatus,
    #[serde(rename = "type")]
    kind: IssueKind,
    reported_by: String,
    reported_at: DateTime<Utc>,
    evidence: Option<EvidenceRef>,
}

impl Issue {
    pub(crate) fn create(id: IssueId, cmd: NewIssue, reported_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: cmd.title.trim().to_string(),
            description: cmd.description,
            project_id: cmd.project_id,
            priority: cmd.priority,
            status: IssueStatus::Open,
            kind: cmd.kind,
            reported_by: cmd.reported_by,
            reported_at,
            evidence: cmd.evidence,
        }
    }

    pub fn id_typed(&self) -> &IssueId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    pub fn priority(&self) -> IssuePriority {
        self.priority
    }

    pub fn status(&self) -> IssueStatus {
        self.status
    }

    pub fn kind(&self) -> IssueKind {
        self.kind
    }

    pub fn reported_by(&self) -> &str {
        &self.reported_by
    }

    pub fn reported_at(&self) -> DateTime<Utc> {
        self.reported_at
    }

    pub fn evidence(&self) -> Option<&EvidenceRef> {
        self.evidence.as_ref()
    }

    /// Urgent and still needs attention.
    pub fn is_urgent_open(&self) -> bool {
        self.priority == IssuePriority::Urgent && self.status != IssueStatus::Resolved
    }

    pub(crate) fn set_status(&mut self, status: IssueStatus) {
        self.status = status;
    }
}

impl Entity for Issue {
    type Id = IssueId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Command: report a new issue.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewIssue {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub project_id: ProjectId,
    pub priority: IssuePriority,
    #[serde(rename = "type")]
    pub kind: IssueKind,
    pub reported_by: String,
    #[serde(default)]
    pub evidence: Option<EvidenceRef>,
}

impl NewIssue {
    pub(crate) fn validate(&self) -> DomainResult<()> {
        if self.title.trim().is_empty() {
            return Err(DomainError::validation("title cannot be empty"));
        }
        if self.reported_by.trim().is_empty() {
            return Err(DomainError::validation("reporter cannot be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_parse_their_wire_values() {
        assert_eq!("in-progress".parse::<IssueStatus>().unwrap(), IssueStatus::InProgress);
        assert_eq!(" URGENT ".parse::<IssuePriority>().unwrap(), IssuePriority::Urgent);
        assert_eq!("non-conformity".parse::<IssueKind>().unwrap(), IssueKind::NonConformity);
        let err = "blocker".parse::<IssuePriority>().unwrap_err();
        assert!(err.to_string().contains("urgent, high, medium, low"));
    }

    #[test]
    fn new_issue_deserializes_type_field() {
        let cmd: NewIssue = serde_json::from_value(serde_json::json!({
            "title": "Fissure mur porteur",
            "project_id": "PRJ-001",
            "priority": "urgent",
            "type": "defect",
            "reported_by": "Jean Dupont",
        }))
        .unwrap();
        assert_eq!(cmd.kind, IssueKind::Defect);
        assert_eq!(cmd.description, "");
        assert!(cmd.evidence.is_none());
    }

    #[test]
    fn blank_title_is_rejected() {
        let cmd = NewIssue {
            title: "  ".into(),
            description: String::new(),
            project_id: ProjectId::sequential(1),
            priority: IssuePriority::Low,
            kind: IssueKind::Modification,
            reported_by: "Marie Martin".into(),
            evidence: None,
        };
        assert!(matches!(cmd.validate(), Err(DomainError::Validation(_))));
    }
}

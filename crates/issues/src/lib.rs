//! Site issue reporting: non-conformities, modification requests and
//! defects raised against a project.

pub mod issue;
pub mod log;

pub use issue::{Issue, IssueId, IssueKind, IssuePriority, IssueStatus, NewIssue};
pub use log::{IssueFilter, IssueLog, IssueStats};

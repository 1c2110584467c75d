use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use siteerp_core::{DomainError, DomainResult, Selector, find_by_id, find_by_id_mut, text_matches};

use crate::tool::{AddTool, CheckOut, Tool, ToolId, ToolStatus};

/// Tools listing filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolFilter {
    /// Case-insensitive substring of the name or the code.
    pub search: String,
    pub status: Selector<ToolStatus>,
}

impl ToolFilter {
    pub fn matches(&self, tool: &Tool) -> bool {
        text_matches(&self.search, &[tool.name(), tool.code()]) && self.status.matches(&tool.status())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ToolStats {
    pub total: usize,
    pub available: usize,
    pub in_use: usize,
    pub maintenance: usize,
}

/// The site's tool crib: every tracked tool, in registration order.
#[derive(Debug, Default)]
pub struct ToolCrib {
    tools: Vec<Tool>,
}

impl ToolCrib {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> &[Tool] {
        &self.tools
    }

    pub fn get(&self, id: &ToolId) -> Option<&Tool> {
        find_by_id(&self.tools, id)
    }

    fn require_mut(&mut self, id: &ToolId) -> DomainResult<&mut Tool> {
        find_by_id_mut(&mut self.tools, id).ok_or_else(|| DomainError::not_found(format!("tool {id}")))
    }

    pub fn add(&mut self, cmd: AddTool, today: NaiveDate) -> DomainResult<&Tool> {
        cmd.validate()?;
        let id = ToolId::sequential(self.tools.len() + 1);
        info!(tool_id = %id, code = %cmd.code, "tool registered");
        self.tools.push(Tool::create(id, cmd, today));
        Ok(&self.tools[self.tools.len() - 1])
    }

    /// Look a tool up by its scanned code (case-insensitive exact match).
    pub fn scan(&self, code: &str) -> DomainResult<&Tool> {
        self.tools
            .iter()
            .find(|t| t.code_matches(code))
            .ok_or_else(|| DomainError::not_found(format!("tool with code {:?}", code.trim())))
    }

    pub fn check_out(&mut self, id: &ToolId, cmd: CheckOut) -> DomainResult<&Tool> {
        let tool = self.require_mut(id)?;
        tool.check_out(cmd)?;
        info!(tool_id = %id, assignee = ?tool.assigned_to(), "tool checked out");
        Ok(tool)
    }

    pub fn check_in(&mut self, id: &ToolId) -> DomainResult<&Tool> {
        let tool = self.require_mut(id)?;
        tool.check_in()?;
        info!(tool_id = %id, "tool checked in");
        Ok(tool)
    }

    pub fn toggle(&mut self, id: &ToolId) -> DomainResult<&Tool> {
        let tool = self.require_mut(id)?;
        tool.toggle();
        info!(tool_id = %id, status = %tool.status(), "tool status toggled");
        Ok(tool)
    }

    pub fn start_maintenance(&mut self, id: &ToolId) -> DomainResult<&Tool> {
        let tool = self.require_mut(id)?;
        tool.start_maintenance()?;
        Ok(tool)
    }

    pub fn finish_maintenance(&mut self, id: &ToolId, today: NaiveDate) -> DomainResult<&Tool> {
        let tool = self.require_mut(id)?;
        tool.finish_maintenance(today)?;
        Ok(tool)
    }

    pub fn filter(&self, filter: &ToolFilter) -> Vec<&Tool> {
        self.tools.iter().filter(|t| filter.matches(t)).collect()
    }

    pub fn stats(&self) -> ToolStats {
        let mut stats = ToolStats {
            total: self.tools.len(),
            ..ToolStats::default()
        };
        for t in &self.tools {
            match t.status() {
                ToolStatus::Available => stats.available += 1,
                ToolStatus::InUse => stats.in_use += 1,
                ToolStatus::Maintenance => stats.maintenance += 1,
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use siteerp_core::ProjectId;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 17).unwrap()
    }

    fn crib() -> ToolCrib {
        let mut crib = ToolCrib::new();
        for (name, code) in [
            ("Grue à tour Liebherr", "GRU-LIE-001"),
            ("Bétonnière 350L", "BET-350-002"),
            ("Marteau piqueur Hilti", "MAR-HIL-003"),
        ] {
            crib.add(AddTool { name: name.into(), code: code.into() }, today()).unwrap();
        }
        crib
    }

    fn id(n: usize) -> ToolId {
        ToolId::sequential(n)
    }

    #[test]
    fn new_tools_are_available_and_stamped() {
        let crib = crib();
        let t = crib.get(&id(2)).unwrap();
        assert_eq!(t.status(), ToolStatus::Available);
        assert_eq!(t.last_maintenance(), today());
        assert_eq!(t.id_typed().as_str(), "TL-002");
    }

    #[test]
    fn scan_matches_code_case_insensitively() {
        let crib = crib();
        assert_eq!(crib.scan("mar-hil-003").unwrap().name(), "Marteau piqueur Hilti");
        assert!(matches!(crib.scan("XXX"), Err(DomainError::NotFound(_))));
    }

    #[test]
    fn check_out_and_in_round_trip() {
        let mut crib = crib();
        let project = ProjectId::sequential(1);
        let t = crib
            .check_out(&id(1), CheckOut { assignee: "Jean Dupont".into(), project_id: Some(project.clone()) })
            .unwrap();
        assert_eq!(t.status(), ToolStatus::InUse);
        assert_eq!(t.assigned_to(), Some("Jean Dupont"));
        assert_eq!(t.project_id(), Some(&project));

        let t = crib.check_in(&id(1)).unwrap();
        assert_eq!(t.status(), ToolStatus::Available);
        assert_eq!(t.assigned_to(), None);
        assert_eq!(t.project_id(), None);
    }

    #[test]
    fn busy_tools_cannot_be_checked_out_twice() {
        let mut crib = crib();
        let cmd = CheckOut { assignee: "Marie Martin".into(), project_id: None };
        crib.check_out(&id(1), cmd.clone()).unwrap();
        assert!(matches!(crib.check_out(&id(1), cmd), Err(DomainError::Conflict(_))));
    }

    #[test]
    fn maintenance_cycle_updates_last_maintenance() {
        let mut crib = crib();
        crib.start_maintenance(&id(3)).unwrap();
        let cmd = CheckOut { assignee: "Marie Martin".into(), project_id: None };
        assert!(crib.check_out(&id(3), cmd).is_err());

        let later = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let t = crib.finish_maintenance(&id(3), later).unwrap();
        assert_eq!(t.status(), ToolStatus::Available);
        assert_eq!(t.last_maintenance(), later);
    }

    #[test]
    fn in_use_tools_cannot_enter_maintenance() {
        let mut crib = crib();
        crib.toggle(&id(1)).unwrap();
        assert!(matches!(crib.start_maintenance(&id(1)), Err(DomainError::Conflict(_))));
    }

    #[test]
    fn toggle_flips_between_available_and_in_use() {
        let mut crib = crib();
        let t = crib.toggle(&id(2)).unwrap();
        assert_eq!(t.status(), ToolStatus::InUse);
        assert_eq!(t.assigned_to(), Some(crate::DEFAULT_OPERATOR));
        let t = crib.toggle(&id(2)).unwrap();
        assert_eq!(t.status(), ToolStatus::Available);

        crib.start_maintenance(&id(3)).unwrap();
        assert_eq!(crib.toggle(&id(3)).unwrap().status(), ToolStatus::Available);
    }

    #[test]
    fn filter_and_stats() {
        let mut crib = crib();
        crib.toggle(&id(1)).unwrap();
        crib.start_maintenance(&id(3)).unwrap();

        assert_eq!(crib.stats(), ToolStats { total: 3, available: 1, in_use: 1, maintenance: 1 });

        let f = ToolFilter { search: "bét".into(), status: Selector::All };
        assert_eq!(crib.filter(&f).len(), 1);
        let f = ToolFilter { search: String::new(), status: Selector::Only(ToolStatus::InUse) };
        assert_eq!(crib.filter(&f)[0].code(), "GRU-LIE-001");
    }

    #[test]
    fn unknown_tool_id_is_not_found() {
        let mut crib = crib();
        assert!(matches!(crib.toggle(&id(9)), Err(DomainError::NotFound(_))));
    }
}

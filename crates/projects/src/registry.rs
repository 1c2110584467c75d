use tracing::info;

use siteerp_core::{
    DomainError, DomainResult, ProjectId, Selector, find_by_id, find_by_id_mut, text_matches,
};

use crate::project::{NewProject, Project, ProjectStatus};

/// Projects listing filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    /// Case-insensitive substring of the name or the client.
    pub search: String,
    pub status: Selector<ProjectStatus>,
}

impl ProjectFilter {
    pub fn matches(&self, project: &Project) -> bool {
        text_matches(&self.search, &[project.name(), project.client()])
            && self.status.matches(&project.status())
    }
}

/// All projects, in creation order.
#[derive(Debug, Default)]
pub struct ProjectRegistry {
    projects: Vec<Project>,
}

impl ProjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> &[Project] {
        &self.projects
    }

    pub fn get(&self, id: &ProjectId) -> Option<&Project> {
        find_by_id(&self.projects, id)
    }

    pub fn require(&self, id: &ProjectId) -> DomainResult<&Project> {
        self.get(id)
            .ok_or_else(|| DomainError::not_found(format!("project {id}")))
    }

    fn require_mut(&mut self, id: &ProjectId) -> DomainResult<&mut Project> {
        find_by_id_mut(&mut self.projects, id)
            .ok_or_else(|| DomainError::not_found(format!("project {id}")))
    }

    pub fn create(&mut self, cmd: NewProject) -> DomainResult<&Project> {
        cmd.validate()?;
        let id = ProjectId::sequential(self.projects.len() + 1);
        info!(project_id = %id, name = %cmd.name, client = %cmd.client, "project created");
        self.projects.push(Project::create(id, cmd));
        Ok(&self.projects[self.projects.len() - 1])
    }

    pub fn set_status(&mut self, id: &ProjectId, status: ProjectStatus) -> DomainResult<&Project> {
        let project = self.require_mut(id)?;
        project.set_status(status);
        info!(project_id = %id, status = %status, "project status changed");
        Ok(project)
    }

    pub fn set_progress(&mut self, id: &ProjectId, progress: u8) -> DomainResult<&Project> {
        let project = self.require_mut(id)?;
        project.set_progress(progress)?;
        Ok(project)
    }

    /// Add `amount` cents to the project's spent total.
    pub fn record_spend(&mut self, id: &ProjectId, amount: u64) -> DomainResult<&Project> {
        let project = self.require_mut(id)?;
        project.record_spend(amount)?;
        Ok(project)
    }

    pub fn filter(&self, filter: &ProjectFilter) -> Vec<&Project> {
        self.projects.iter().filter(|p| filter.matches(p)).collect()
    }

    pub fn count_with_status(&self, status: ProjectStatus) -> usize {
        self.projects.iter().filter(|p| p.status() == status).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn new_project(name: &str, client: &str) -> NewProject {
        NewProject {
            name: name.to_string(),
            client: client.to_string(),
            budget: 100_000,
            start_date: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 12, 15).unwrap(),
        }
    }

    fn registry() -> ProjectRegistry {
        let mut r = ProjectRegistry::new();
        r.create(new_project("Tour Montparnasse Renovation", "Bouygues Construction")).unwrap();
        r.create(new_project("Centre Commercial Les Halles", "Vinci Immobilier")).unwrap();
        r.create(new_project("Stade de France - Extension", "Eiffage")).unwrap();
        r
    }

    #[test]
    fn create_assigns_sequential_codes() {
        let r = registry();
        assert_eq!(r.all()[2].id_typed().as_str(), "PRJ-003");
        assert!(r.get(&ProjectId::sequential(2)).is_some());
    }

    #[test]
    fn create_rejects_blank_client() {
        let mut r = ProjectRegistry::new();
        assert!(r.create(new_project("Pont", " ")).is_err());
        assert!(r.all().is_empty());
    }

    #[test]
    fn unknown_project_is_not_found() {
        let mut r = registry();
        let missing = ProjectId::sequential(99);
        assert!(matches!(r.require(&missing), Err(DomainError::NotFound(_))));
        assert!(matches!(
            r.set_status(&missing, ProjectStatus::Completed),
            Err(DomainError::NotFound(_))
        ));
    }

    #[test]
    fn filter_by_client_and_status() {
        let mut r = registry();
        r.set_status(&ProjectId::sequential(3), ProjectStatus::OnHold).unwrap();

        let by_client = ProjectFilter { search: "vinci".into(), ..Default::default() };
        assert_eq!(r.filter(&by_client)[0].id_typed().as_str(), "PRJ-002");

        let active = ProjectFilter { status: Selector::Only(ProjectStatus::Active), ..Default::default() };
        assert_eq!(r.filter(&active).len(), 2);
        assert_eq!(r.count_with_status(ProjectStatus::OnHold), 1);
    }

    #[test]
    fn progress_and_spend_update_in_place() {
        let mut r = registry();
        let id = ProjectId::sequential(1);
        r.set_progress(&id, 65).unwrap();
        r.record_spend(&id, 40_000).unwrap();
        let p = r.get(&id).unwrap();
        assert_eq!(p.progress(), 65);
        assert_eq!(p.spent(), 40_000);
        assert!(r.set_progress(&id, 150).is_err());
        assert_eq!(r.get(&id).unwrap().progress(), 65);
    }
}

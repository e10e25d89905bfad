use chrono::Utc;
use log::{debug, info, warn};
use std::sync::Arc;
use uuid::Uuid;

use super::projects_calculator::{recompute, recompute_in_place};
use super::projects_filter::ProjectFilter;
use super::projects_model::{NewProject, Project};
use super::projects_traits::{ProjectMutation, ProjectRepositoryTrait, ProjectServiceTrait};
use super::projects_update::ProjectUpdate;
use crate::errors::{DatabaseError, Error, Result};
use crate::reports::{build_report, write_projects_csv, ProjectReport};

/// Service for managing trading projects
pub struct ProjectService {
    repository: Arc<dyn ProjectRepositoryTrait>,
}

impl ProjectService {
    pub fn new(repository: Arc<dyn ProjectRepositoryTrait>) -> Self {
        Self { repository }
    }

    /// Loads every record and brings its derived fields up to date, so
    /// listings, reports and exports never depend on what was stored.
    fn load_selection(&self, filter: &ProjectFilter) -> Result<Vec<Project>> {
        let projects = self
            .repository
            .list()?
            .into_iter()
            .map(recompute)
            .collect::<Vec<_>>();
        Ok(filter.apply(projects))
    }

    fn ensure_project_no_available(&self, project_no: &str, own_id: Option<&str>) -> Result<()> {
        match self.repository.find_by_project_no(project_no)? {
            Some(existing) if Some(existing.id.as_str()) != own_id => {
                warn!("Rejected duplicate project number {}", project_no);
                Err(Error::ConstraintViolation(format!(
                    "Project number '{}' already exists",
                    project_no
                )))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl ProjectServiceTrait for ProjectService {
    fn get_projects(&self, filter: &ProjectFilter) -> Result<Vec<Project>> {
        self.load_selection(filter)
    }

    fn get_project(&self, project_id: &str) -> Result<Project> {
        self.repository.get_by_id(project_id).map(recompute)
    }

    async fn create_project(&self, new_project: NewProject) -> Result<Project> {
        let now = Utc::now().naive_utc();
        let project = new_project.into_project(Uuid::new_v4().to_string(), now)?;
        self.ensure_project_no_available(&project.project_no, None)?;

        let project = recompute(project);
        let created = self.repository.insert(project).await?;
        info!("Created project {} ({})", created.project_no, created.id);
        Ok(created)
    }

    async fn update_project(&self, project_id: &str, update: ProjectUpdate) -> Result<Project> {
        if let Some(project_no) = update.new_project_no() {
            self.ensure_project_no_available(project_no, Some(project_id))?;
        }

        let mutation: ProjectMutation = Box::new(move |project: &mut Project| {
            update.apply_to(project);
            project.normalize_text_fields();
            project.validate()?;
            project.updated_at = Utc::now().naive_utc();
            recompute_in_place(project);
            Ok(())
        });
        let updated = self.repository.update_with(project_id, mutation).await?;
        info!("Updated project {} ({})", updated.project_no, updated.id);
        Ok(updated)
    }

    async fn delete_project(&self, project_id: &str) -> Result<()> {
        let deleted = self.repository.delete(project_id).await?;
        if deleted == 0 {
            return Err(DatabaseError::NotFound(format!("Project {} not found", project_id)).into());
        }
        info!("Deleted project {}", project_id);
        Ok(())
    }

    fn get_report(&self, filter: &ProjectFilter) -> Result<ProjectReport> {
        let projects = self.load_selection(filter)?;
        debug!("Building report over {} projects", projects.len());
        Ok(build_report(projects))
    }

    fn export_projects_csv(&self, filter: &ProjectFilter) -> Result<Vec<u8>> {
        let projects = self.load_selection(filter)?;
        if projects.is_empty() {
            return Err(DatabaseError::NotFound("No projects to export".to_string()).into());
        }
        debug!("Exporting {} projects", projects.len());
        write_projects_csv(&projects)
    }
}

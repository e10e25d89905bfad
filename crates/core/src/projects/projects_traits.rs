use crate::errors::Result;
use crate::projects::projects_filter::ProjectFilter;
use crate::projects::projects_model::{NewProject, Project};
use crate::projects::projects_update::ProjectUpdate;
use crate::reports::ProjectReport;
use async_trait::async_trait;

/// Change applied to a stored project as part of a single write. Returning an
/// error aborts the write and leaves the stored record as it was.
pub type ProjectMutation = Box<dyn FnOnce(&mut Project) -> Result<()> + Send + 'static>;

/// Trait for project repository operations.
///
/// Implementations store whatever record they are given. Derived fields are
/// populated by the service before any write reaches the repository.
#[async_trait]
pub trait ProjectRepositoryTrait: Send + Sync {
    fn list(&self) -> Result<Vec<Project>>;
    fn get_by_id(&self, project_id: &str) -> Result<Project>;
    fn find_by_project_no(&self, project_no: &str) -> Result<Option<Project>>;
    async fn insert(&self, project: Project) -> Result<Project>;
    /// Loads the record, applies `mutation` and stores the whole document
    /// again, all as one atomic write. Concurrent calls for the same record
    /// see each other's results.
    async fn update_with(&self, project_id: &str, mutation: ProjectMutation) -> Result<Project>;
    async fn delete(&self, project_id: &str) -> Result<usize>;
}

/// Trait for project service operations
#[async_trait]
pub trait ProjectServiceTrait: Send + Sync {
    fn get_projects(&self, filter: &ProjectFilter) -> Result<Vec<Project>>;
    fn get_project(&self, project_id: &str) -> Result<Project>;
    async fn create_project(&self, new_project: NewProject) -> Result<Project>;
    async fn update_project(&self, project_id: &str, update: ProjectUpdate) -> Result<Project>;
    async fn delete_project(&self, project_id: &str) -> Result<()>;
    fn get_report(&self, filter: &ProjectFilter) -> Result<ProjectReport>;
    fn export_projects_csv(&self, filter: &ProjectFilter) -> Result<Vec<u8>>;
}

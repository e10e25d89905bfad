use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;

use tradeledger_core::errors::{DatabaseError, Result};
use tradeledger_core::projects::{Project, ProjectMutation, ProjectRepositoryTrait};

use super::model::ProjectDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::projects;
use crate::schema::projects::dsl::*;

pub struct ProjectRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ProjectRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        ProjectRepository { pool, writer }
    }

    fn to_domain(rows: Vec<ProjectDB>) -> Result<Vec<Project>> {
        rows.into_iter()
            .map(|row| Project::try_from(row).map_err(Into::into))
            .collect()
    }
}

#[async_trait]
impl ProjectRepositoryTrait for ProjectRepository {
    fn list(&self) -> Result<Vec<Project>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = projects
            .select(ProjectDB::as_select())
            .order((project_date.desc(), created_at.desc()))
            .load::<ProjectDB>(&mut conn)
            .into_core()?;
        Self::to_domain(rows)
    }

    fn get_by_id(&self, project_id: &str) -> Result<Project> {
        let mut conn = get_connection(&self.pool)?;
        let row = projects
            .find(project_id)
            .select(ProjectDB::as_select())
            .first::<ProjectDB>(&mut conn)
            .optional()
            .into_core()?
            .ok_or_else(|| DatabaseError::NotFound(format!("Project {} not found", project_id)))?;
        Ok(Project::try_from(row)?)
    }

    fn find_by_project_no(&self, number: &str) -> Result<Option<Project>> {
        let mut conn = get_connection(&self.pool)?;
        let row = projects
            .filter(project_no.eq(number))
            .select(ProjectDB::as_select())
            .first::<ProjectDB>(&mut conn)
            .optional()
            .into_core()?;
        match row {
            Some(row) => Ok(Some(Project::try_from(row)?)),
            None => Ok(None),
        }
    }

    async fn insert(&self, project: Project) -> Result<Project> {
        let row = ProjectDB::try_from(project)?;
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Project> {
                let inserted = diesel::insert_into(projects::table)
                    .values(&row)
                    .returning(ProjectDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                debug!("Inserted project row {}", inserted.id);
                Ok(Project::try_from(inserted)?)
            })
            .await
    }

    async fn update_with(&self, project_id: &str, mutation: ProjectMutation) -> Result<Project> {
        let project_id = project_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Project> {
                let stored = projects
                    .find(project_id.as_str())
                    .select(ProjectDB::as_select())
                    .first::<ProjectDB>(conn)
                    .optional()
                    .map_err(StorageError::from)?
                    .ok_or_else(|| {
                        DatabaseError::NotFound(format!("Project {} not found", project_id))
                    })?;

                let mut project = Project::try_from(stored)?;
                mutation(&mut project)?;
                project.id = project_id.clone();

                let row = ProjectDB::try_from(project)?;
                let updated = diesel::update(projects.find(project_id.as_str()))
                    .set(&row)
                    .returning(ProjectDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                debug!("Updated project row {}", updated.id);
                Ok(Project::try_from(updated)?)
            })
            .await
    }

    async fn delete(&self, project_id: &str) -> Result<usize> {
        let project_id = project_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(projects.find(project_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}

//! Database model for projects.
//!
//! The three nested sub-records are stored as JSON documents, one column
//! each, and always written together with the identity columns.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use std::str::FromStr;

use crate::errors::StorageError;
use tradeledger_core::projects::{Project, ProjectStatus};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::projects)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProjectDB {
    pub id: String,
    pub project_no: String,
    pub project_name: String,
    pub project_date: String,
    pub status: String,
    pub supplier: String,
    pub buyer: String,
    pub costing: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Project> for ProjectDB {
    type Error = StorageError;

    fn try_from(project: Project) -> Result<Self, Self::Error> {
        Ok(Self {
            id: project.id,
            project_no: project.project_no,
            project_name: project.project_name,
            project_date: project.project_date.format(DATE_FORMAT).to_string(),
            status: project.status.as_str().to_string(),
            supplier: serde_json::to_string(&project.supplier)?,
            buyer: serde_json::to_string(&project.buyer)?,
            costing: serde_json::to_string(&project.costing)?,
            created_at: project.created_at,
            updated_at: project.updated_at,
        })
    }
}

impl TryFrom<ProjectDB> for Project {
    type Error = StorageError;

    fn try_from(db: ProjectDB) -> Result<Self, Self::Error> {
        let project_date = NaiveDate::parse_from_str(&db.project_date, DATE_FORMAT).map_err(|e| {
            StorageError::SerializationError(format!(
                "Invalid project_date '{}' for project {}: {}",
                db.project_date, db.id, e
            ))
        })?;
        let status = ProjectStatus::from_str(&db.status).unwrap_or_else(|_| {
            log::warn!(
                "Unknown status '{}' stored for project {}, treating as Active",
                db.status,
                db.id
            );
            ProjectStatus::Active
        });

        Ok(Self {
            id: db.id,
            project_name: db.project_name,
            project_no: db.project_no,
            project_date,
            status,
            supplier: serde_json::from_str(&db.supplier)?,
            buyer: serde_json::from_str(&db.buyer)?,
            costing: serde_json::from_str(&db.costing)?,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

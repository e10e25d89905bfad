use std::sync::Arc;

use crate::{auth::RequireAdmin, error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use tradeledger_core::projects::{NewProject, Project, ProjectFilter, ProjectUpdate};
use tradeledger_core::reports::export_file_name;

async fn list_projects(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<ProjectFilter>,
) -> ApiResult<Json<Vec<Project>>> {
    let projects = state.project_service.get_projects(&filter)?;
    Ok(Json(projects))
}

async fn get_project(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Project>> {
    let project = state.project_service.get_project(&id)?;
    Ok(Json(project))
}

async fn create_project(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Json(new_project): Json<NewProject>,
) -> ApiResult<(StatusCode, Json<Project>)> {
    let project = state.project_service.create_project(new_project).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

async fn update_project(
    _admin: RequireAdmin,
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(update): Json<ProjectUpdate>,
) -> ApiResult<Json<Project>> {
    let project = state.project_service.update_project(&id, update).await?;
    Ok(Json(project))
}

async fn delete_project(
    _admin: RequireAdmin,
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.project_service.delete_project(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn export_projects_csv(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<ProjectFilter>,
) -> ApiResult<impl IntoResponse> {
    let body = state.project_service.export_projects_csv(&filter)?;
    let disposition = format!(
        "attachment; filename={}",
        export_file_name(Utc::now().date_naive())
    );
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/projects", get(list_projects).post(create_project))
        .route("/projects/export/csv", get(export_projects_csv))
        .route(
            "/projects/{id}",
            get(get_project).put(update_project).delete(delete_project),
        )
}

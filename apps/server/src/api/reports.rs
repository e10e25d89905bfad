use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use tradeledger_core::projects::ProjectFilter;
use tradeledger_core::reports::ProjectReport;

async fn get_report_summary(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<ProjectFilter>,
) -> ApiResult<Json<ProjectReport>> {
    let report = state.project_service.get_report(&filter)?;
    Ok(Json(report))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/reports/summary", get(get_report_summary))
}

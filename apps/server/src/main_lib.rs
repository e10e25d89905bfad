use std::sync::Arc;

use crate::{auth::AuthManager, config::Config};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};
use tradeledger_core::projects::{ProjectService, ProjectServiceTrait};
use tradeledger_storage_sqlite::{
    create_pool, open_database, run_migrations, spawn_writer, ProjectRepository,
};

pub struct AppState {
    pub project_service: Arc<dyn ProjectServiceTrait>,
    pub auth: Option<Arc<AuthManager>>,
}

pub fn init_tracing() {
    let log_format = std::env::var("TL_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    open_database(&config.db_path)?;
    tracing::info!("Database path in use: {}", config.db_path);

    let pool = create_pool(&config.db_path)?;
    run_migrations(&pool)?;
    let writer = spawn_writer((*pool).clone());

    let project_repository = Arc::new(ProjectRepository::new(pool.clone(), writer));
    let project_service: Arc<dyn ProjectServiceTrait> =
        Arc::new(ProjectService::new(project_repository));

    let auth_manager = config
        .auth
        .as_ref()
        .map(AuthManager::new)
        .transpose()?
        .map(Arc::new);
    if auth_manager.is_none() {
        tracing::warn!("Authentication disabled: every caller has admin access");
    }

    Ok(Arc::new(AppState {
        project_service,
        auth: auth_manager,
    }))
}

use std::{net::SocketAddr, time::Duration};

use anyhow::Context;

use crate::auth::{decode_secret_key, AuthConfig};

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// `None` runs the server without authentication.
    pub auth: Option<AuthConfig>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("TL_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid TL_LISTEN_ADDR")?;
        let db_path = std::env::var("TL_DB_PATH")
            .or_else(|_| std::env::var("DATABASE_URL"))
            .unwrap_or_else(|_| "./db/app.db".into());
        let cors_allow = std::env::var("TL_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("TL_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            auth: auth_from_env()?,
        })
    }

    /// Open server on an explicit database file. Used by tests and embedders.
    pub fn local(db_path: impl Into<String>) -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            db_path: db_path.into(),
            cors_allow: vec!["*".to_string()],
            request_timeout: Duration::from_secs(30),
            auth: None,
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn auth_from_env() -> anyhow::Result<Option<AuthConfig>> {
    let Some(admin_password_hash) = non_empty_var("TL_ADMIN_PASSWORD_HASH") else {
        return Ok(None);
    };
    let secret = non_empty_var("TL_SECRET_KEY")
        .context("TL_SECRET_KEY is required when TL_ADMIN_PASSWORD_HASH is set")?;
    let ttl_minutes: u64 = non_empty_var("TL_AUTH_TOKEN_TTL_MINUTES")
        .map(|v| v.parse::<u64>())
        .transpose()
        .context("Invalid TL_AUTH_TOKEN_TTL_MINUTES")?
        .unwrap_or(60);

    Ok(Some(AuthConfig {
        admin_password_hash,
        viewer_password_hash: non_empty_var("TL_VIEWER_PASSWORD_HASH"),
        jwt_secret: decode_secret_key(&secret)?,
        access_token_ttl: Duration::from_secs(ttl_minutes * 60),
    }))
}

use std::{env, time::Duration};

use once_cell::sync::Lazy;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::errors::ModelError;

pub static DATABASE_URL: Lazy<Option<String>> = Lazy::new(|| {
    // Load .env if present
    let _ = dotenvy::dotenv();
    env::var("DATABASE_URL").ok().filter(|u| !u.trim().is_empty())
});

/// Pool settings resolved into the units `ConnectOptions` expects.
#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
    pub acquire_timeout: Duration,
    pub sqlx_logging: bool,
}

impl DatabaseConfig {
    /// Read the `[database]` section of `config.toml` (see `CONFIG_PATH`).
    pub fn from_file() -> Result<Self, ModelError> {
        let mut cfg = configs::load_default().map_err(|e| ModelError::Config(e.to_string()))?;
        cfg.database.normalize_from_env();
        cfg.database.validate().map_err(|e| ModelError::Config(e.to_string()))?;
        Ok(Self::from(&cfg.database))
    }

    /// Defaults plus `DATABASE_URL`. Fails when the variable is unset.
    pub fn from_env() -> Result<Self, ModelError> {
        Self::from_url(DATABASE_URL.as_deref())
    }

    fn from_url(url: Option<&str>) -> Result<Self, ModelError> {
        let raw = configs::DatabaseConfig { url: url.unwrap_or_default().to_string(), ..Default::default() };
        raw.validate().map_err(|e| ModelError::Config(e.to_string()))?;
        Ok(Self::from(&raw))
    }
}

impl From<&configs::DatabaseConfig> for DatabaseConfig {
    fn from(c: &configs::DatabaseConfig) -> Self {
        Self {
            url: c.url.clone(),
            max_connections: c.max_connections,
            min_connections: c.min_connections,
            connect_timeout: Duration::from_secs(c.connect_timeout_secs),
            idle_timeout: Duration::from_secs(c.idle_timeout_secs),
            max_lifetime: Duration::from_secs(c.max_lifetime_secs),
            acquire_timeout: Duration::from_secs(c.acquire_timeout_secs),
            sqlx_logging: c.sqlx_logging,
        }
    }
}

pub async fn connect_with_config(cfg: &DatabaseConfig) -> Result<DatabaseConnection, ModelError> {
    let mut opts = ConnectOptions::new(cfg.url.clone());
    opts.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(cfg.connect_timeout)
        .idle_timeout(cfg.idle_timeout)
        .max_lifetime(cfg.max_lifetime)
        .acquire_timeout(cfg.acquire_timeout)
        .sqlx_logging(cfg.sqlx_logging);
    let db = Database::connect(opts).await.map_err(|e| ModelError::Db(e.to_string()))?;
    info!(max_connections = cfg.max_connections, min_connections = cfg.min_connections, "database pool ready");
    Ok(db)
}

use std::{net::SocketAddr, path::Path, sync::Arc};

use axum::Router;
use configs::{AppConfig, PaginationConfig, ServerConfig};
use dotenvy::dotenv;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use service::category::repo::SeaOrmCategoryRepository;
use service::pagination::PageLimits;
use service::product::repo::SeaOrmProductRepository;

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Read `config.toml` (or `CONFIG_PATH`); without a file, fall back to the
/// environment. Either way the result is normalized and validated.
pub fn load_config() -> Result<AppConfig, StartupError> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    let mut cfg = if Path::new(&path).exists() {
        configs::load_from_file(&path).map_err(|e| StartupError::InvalidConfig(format!("{path}: {e}")))?
    } else {
        AppConfig::from_env()
    };
    cfg.normalize_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    Ok(cfg)
}

pub fn page_limits(cfg: &PaginationConfig) -> PageLimits {
    PageLimits { default_size: cfg.default_size, max_size: cfg.max_size }
}

fn bind_addr(cfg: &ServerConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.host, cfg.port).parse()?)
}

/// Wire SeaORM repositories into the services.
pub fn build_state(db: DatabaseConnection, cfg: &AppConfig) -> AppState {
    AppState::new(
        Arc::new(SeaOrmProductRepository::new(db.clone())),
        Arc::new(SeaOrmCategoryRepository::new(db)),
        page_limits(&cfg.pagination),
    )
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!(event = "shutdown_signal", "received Ctrl+C, draining connections"),
        Err(e) => warn!(error = %e, "failed to listen for Ctrl+C; graceful shutdown disabled"),
    }
}

/// Public entry: load config, then build and run the HTTP server.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    let cfg = load_config()?;
    common::utils::logging::init_logging(cfg.logging.format);
    run_with_config(cfg).await
}

pub async fn run_with_config(cfg: AppConfig) -> anyhow::Result<()> {
    let db_cfg = models::db::DatabaseConfig::from(&cfg.database);
    let db = models::db::connect_with_config(&db_cfg)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;

    if cfg.database.auto_migrate {
        migration::Migrator::up(&db, None)
            .await
            .map_err(|e| StartupError::Migration(e.to_string()))?;
        info!("migrations applied");
    }

    let state = build_state(db, &cfg);
    let app: Router = routes::build_router(state, build_cors());

    let addr = bind_addr(&cfg.server)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "product catalog listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    info!("server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_combines_host_and_port() {
        let addr = bind_addr(&ServerConfig { host: "0.0.0.0".into(), port: 9000, worker_threads: None }).unwrap();
        assert_eq!(addr.port(), 9000);
        assert!(bind_addr(&ServerConfig { host: "not a host".into(), port: 1, worker_threads: None }).is_err());
    }

    #[test]
    fn page_limits_follow_config() {
        let limits = page_limits(&PaginationConfig { default_size: 20, max_size: 50 });
        assert_eq!(limits, PageLimits { default_size: 20, max_size: 50 });
    }
}

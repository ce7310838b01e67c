#![cfg(test)]
use tokio::sync::OnceCell;
use sea_orm::DatabaseConnection;
use migration::MigratorTrait;
use models::db::{connect_with_config, DatabaseConfig};

// Migrations run at most once per test process; `Err` means no database.
static MIGRATED: OnceCell<bool> = OnceCell::const_new();

fn test_config() -> Option<DatabaseConfig> {
    let mut cfg = DatabaseConfig::from_file().or_else(|_| DatabaseConfig::from_env()).ok()?;
    cfg.min_connections = cfg.min_connections.min(1);
    cfg.connect_timeout = std::time::Duration::from_secs(3);
    cfg.acquire_timeout = std::time::Duration::from_secs(10);
    Some(cfg)
}

pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let migrated = *MIGRATED
        .get_or_init(|| async {
            let Some(cfg) = test_config() else { return false };
            let Ok(db) = connect_with_config(&cfg).await else { return false };
            let ok = migration::Migrator::up(&db, None).await.is_ok();
            drop(db);
            ok
        })
        .await;
    if !migrated {
        anyhow::bail!("test database unavailable");
    }

    // Fresh connection for the current test's runtime
    let cfg = test_config().ok_or_else(|| anyhow::anyhow!("DATABASE_URL is not set"))?;
    let db = connect_with_config(&cfg).await?;
    Ok(db)
}

use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::info;

use crate::config::AppConfig;

const SQLITE_BUSY_TIMEOUT_MS: u64 = 5_000;

const CREATE_KV_TABLE: &str = "CREATE TABLE IF NOT EXISTS kv_entries (
    entry_key TEXT NOT NULL PRIMARY KEY,
    entry_value TEXT NOT NULL
)";

pub async fn connect(cfg: &AppConfig) -> anyhow::Result<DatabaseConnection> {
    connect_url(&cfg.database_url, cfg.db_max_connections).await
}

pub async fn connect_url(url: &str, max_connections: u32) -> anyhow::Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(url.to_string());
    options
        .max_connections(max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    let db = Database::connect(options).await?;
    db.execute_unprepared(&format!("PRAGMA busy_timeout = {SQLITE_BUSY_TIMEOUT_MS}"))
        .await?;
    info!("ensuring key-value table exists");
    db.execute_unprepared(CREATE_KV_TABLE).await?;
    Ok(db)
}

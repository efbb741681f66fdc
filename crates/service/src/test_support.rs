use configs::DatabaseConfig;
use tokio::sync::OnceCell;

use crate::car::repo::SeaOrmCarRepository;

// Create the table only once across the whole test process
static SCHEMA: OnceCell<bool> = OnceCell::const_new();

fn test_config() -> Option<DatabaseConfig> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let url = std::env::var("DATABASE_URL").ok()?;
    Some(DatabaseConfig { url, max_connections: 10, acquire_timeout_secs: 10, ..Default::default() })
}

/// Repository on a live PostgreSQL, or `None` when none is reachable.
pub async fn live_repo() -> Option<SeaOrmCarRepository> {
    let cfg = test_config()?;
    let ready = *SCHEMA
        .get_or_init(|| async {
            match models::db::connect_with_config(&cfg).await {
                Ok(db) => models::db::ensure_schema(&db).await.is_ok(),
                Err(e) => {
                    eprintln!("skip: cannot connect to db: {e}");
                    false
                }
            }
        })
        .await;
    if !ready {
        return None;
    }
    // fresh pool per test runtime
    let db = models::db::connect_with_config(&cfg).await.ok()?;
    Some(SeaOrmCarRepository::new(db))
}

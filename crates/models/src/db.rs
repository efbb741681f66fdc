use std::time::Duration;

use configs::DatabaseConfig;
use sea_orm::sea_query::TableCreateStatement;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, DbErr, Schema,
};
use tracing::info;

use crate::car_model;

/// Open a pooled connection using the `database` section of the config.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(cfg.url.clone());
    opt.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs))
        .sqlx_logging(cfg.sqlx_logging);

    let db = Database::connect(opt).await?;
    info!(
        max_connections = cfg.max_connections,
        min_connections = cfg.min_connections,
        "database pool ready"
    );
    Ok(db)
}

/// `CREATE TABLE IF NOT EXISTS car_model (...)` derived from the entity.
pub fn car_model_table(backend: DbBackend) -> TableCreateStatement {
    Schema::new(backend)
        .create_table_from_entity(car_model::Entity)
        .if_not_exists()
        .to_owned()
}

/// Create the `car_model` table if it does not exist yet.
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    db.execute(backend.build(&car_model_table(backend))).await?;
    info!(table = "car_model", "schema ensured");
    Ok(())
}

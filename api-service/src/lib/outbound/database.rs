use std::time::Duration;

use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;

/// Pool settings derived from configuration.
///
/// `pool_size` connections are kept open; up to `max_overflow` more are
/// opened under load. Connections are pinged before being handed out.
pub fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .min_connections(config.pool_size)
        .max_connections(config.pool_size + config.max_overflow)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .test_before_acquire(true)
}

/// Open the pool and verify the database is reachable.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = pool_options(config).connect(&config.url).await?;

    tracing::info!(
        min_connections = config.pool_size,
        max_connections = config.pool_size + config.max_overflow,
        database = "postgresql",
        "Database connected"
    );

    Ok(pool)
}

/// Create the pool without opening any connection.
pub fn connect_lazy(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    pool_options(config).connect_lazy(&config.url)
}

pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");
    Ok(())
}

pub async fn disconnect(pool: PgPool) {
    pool.close().await;
    tracing::info!(database = "postgresql", "Database disconnected");
}

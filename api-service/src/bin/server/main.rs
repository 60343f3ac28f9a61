use std::net::SocketAddr;
use std::sync::Arc;

use api_service::config::Config;
use api_service::domain::team::service::TeamService;
use api_service::inbound::http::router::create_router;
use api_service::outbound::database;
use api_service::outbound::repositories::team_error_mapping;
use api_service::outbound::repositories::PostgresTeamRepository;
use api_service::telemetry;
use auth::Authenticator;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::load()?;
    telemetry::init(config.prod);

    tracing::info!(
        service = "api-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );
    if !config.prod {
        tracing::warn!("Running in development mode, do not use in production");
    }

    tracing::info!(
        host = %config.server.host,
        http_port = config.server.http_port,
        pool_size = config.database.pool_size,
        "Configuration loaded"
    );

    let pg_pool = database::connect(&config.database).await?;
    database::migrate(&pg_pool).await?;

    let authenticator = Arc::new(Authenticator::new(&config.auth_settings())?);
    let error_mapping = Arc::new(team_error_mapping());
    tracing::debug!(mapping = ?error_mapping, "Constraint error mapping built");

    let team_repository = Arc::new(PostgresTeamRepository::new(
        pg_pool.clone(),
        Arc::clone(&error_mapping),
    ));
    let team_service = Arc::new(TeamService::new(team_repository));

    let http_address = format!("{}:{}", config.server.host, config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(team_service, authenticator);
    axum::serve(
        http_listener,
        http_application.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    database::disconnect(pg_pool).await;
    tracing::info!("Server exited successfully");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}

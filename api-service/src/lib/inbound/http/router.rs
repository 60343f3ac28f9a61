use std::sync::Arc;

use auth::Authenticator;
use axum::body::Body;
use axum::extract::FromRef;
use axum::http::Request;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers::add_player::add_player;
use super::handlers::create_player::create_player;
use super::handlers::create_team::create_team;
use super::handlers::get_roster::get_roster;
use super::handlers::health::health;
use super::middleware::handle_panic;
use super::middleware::log_requests;
use crate::domain::team::service::TeamService;
use crate::outbound::repositories::PostgresTeamRepository;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub team_service: Arc<TeamService<PostgresTeamRepository>>,
    pub authenticator: Arc<Authenticator>,
}

pub fn create_router(
    team_service: Arc<TeamService<PostgresTeamRepository>>,
    authenticator: Arc<Authenticator>,
) -> Router {
    let state = AppState {
        team_service,
        authenticator,
    };

    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        tracing::debug_span!(
            "http",
            version = ?request.version(),
        )
    });

    Router::new()
        .route("/health", get(health))
        .route("/api/teams", post(create_team))
        .route("/api/players", post(create_player))
        .route(
            "/api/teams/:team_id/players",
            post(add_player).get(get_roster),
        )
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(trace_layer)
        .layer(middleware::from_fn(log_requests))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

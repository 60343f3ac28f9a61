use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::team::models::Name;
use crate::domain::team::models::Player;
use crate::domain::team::ports::TeamServicePort;
use crate::inbound::http::extractors::Me;
use crate::inbound::http::router::AppState;

pub async fn create_player(
    State(state): State<AppState>,
    Me(claims): Me,
    Json(body): Json<CreatePlayerRequest>,
) -> Result<ApiSuccess<PlayerResponseData>, ApiError> {
    let name = Name::new(body.name)?;

    tracing::debug!(subject = %claims.sub, "Creating player");

    state
        .team_service
        .create_player(name)
        .await
        .map_err(ApiError::from)
        .map(|ref player| ApiSuccess::new(StatusCode::CREATED, player.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatePlayerRequest {
    name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerResponseData {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Player> for PlayerResponseData {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id.to_string(),
            name: player.name.as_str().to_string(),
            created_at: player.created_at,
        }
    }
}

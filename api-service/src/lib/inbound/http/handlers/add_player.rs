use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::team::models::PlayerId;
use crate::domain::team::models::TeamId;
use crate::domain::team::ports::TeamServicePort;
use crate::inbound::http::extractors::Me;
use crate::inbound::http::router::AppState;

/// Add an existing player to an existing team.
///
/// Unknown team or player ids come back as 404 and a repeated add as 409,
/// both straight from the translated constraint violation.
pub async fn add_player(
    State(state): State<AppState>,
    Me(_claims): Me,
    Path(team_id): Path<String>,
    Json(body): Json<AddPlayerRequest>,
) -> Result<ApiSuccess<MembershipResponseData>, ApiError> {
    let team_id = TeamId::from_string(&team_id)?;
    let player_id = PlayerId::from_string(&body.player_id)?;

    state
        .team_service
        .add_player(&team_id, &player_id)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        MembershipResponseData {
            team_id: team_id.to_string(),
            player_id: player_id.to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddPlayerRequest {
    player_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MembershipResponseData {
    pub team_id: String,
    pub player_id: String,
}

use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::create_player::PlayerResponseData;
use super::create_team::TeamResponseData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::team::models::Roster;
use crate::domain::team::models::TeamId;
use crate::domain::team::ports::TeamServicePort;
use crate::inbound::http::extractors::MaybeMe;
use crate::inbound::http::router::AppState;

/// Rosters are public; a caller's identity is only logged when present.
pub async fn get_roster(
    State(state): State<AppState>,
    MaybeMe(claims): MaybeMe,
    Path(team_id): Path<String>,
) -> Result<ApiSuccess<RosterResponseData>, ApiError> {
    let team_id = TeamId::from_string(&team_id)?;

    if let Some(claims) = claims {
        tracing::debug!(subject = %claims.sub, team_id = %team_id, "Roster requested");
    }

    state
        .team_service
        .get_roster(&team_id)
        .await
        .map_err(ApiError::from)
        .map(|ref roster| ApiSuccess::new(StatusCode::OK, roster.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterResponseData {
    pub team: TeamResponseData,
    pub players: Vec<PlayerResponseData>,
}

impl From<&Roster> for RosterResponseData {
    fn from(roster: &Roster) -> Self {
        Self {
            team: (&roster.team).into(),
            players: roster.players.iter().map(PlayerResponseData::from).collect(),
        }
    }
}

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
use crate::domain::team::models::Team;
use crate::domain::team::ports::TeamServicePort;
use crate::inbound::http::extractors::Me;
use crate::inbound::http::router::AppState;
use crate::team::errors::NameError;

pub async fn create_team(
    State(state): State<AppState>,
    Me(claims): Me,
    Json(body): Json<CreateTeamRequest>,
) -> Result<ApiSuccess<TeamResponseData>, ApiError> {
    let name = Name::new(body.name)?;

    tracing::debug!(subject = %claims.sub, "Creating team");

    state
        .team_service
        .create_team(name)
        .await
        .map_err(ApiError::from)
        .map(|ref team| ApiSuccess::new(StatusCode::CREATED, team.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateTeamRequest {
    name: String,
}

impl From<NameError> for ApiError {
    fn from(err: NameError) -> Self {
        ApiError::UnprocessableEntity(format!("Invalid name: {}", err))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamResponseData {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Team> for TeamResponseData {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id.to_string(),
            name: team.name.as_str().to_string(),
            created_at: team.created_at,
        }
    }
}

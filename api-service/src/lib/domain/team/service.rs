use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::errors::TeamError;
use super::models::Name;
use super::models::Player;
use super::models::PlayerId;
use super::models::Roster;
use super::models::Team;
use super::models::TeamId;
use super::ports::TeamRepository;
use super::ports::TeamServicePort;

/// Domain service implementation for team roster operations.
pub struct TeamService<TR>
where
    TR: TeamRepository,
{
    repository: Arc<TR>,
}

impl<TR> TeamService<TR>
where
    TR: TeamRepository,
{
    pub fn new(repository: Arc<TR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<TR> TeamServicePort for TeamService<TR>
where
    TR: TeamRepository,
{
    async fn create_team(&self, name: Name) -> Result<Team, TeamError> {
        let team = Team {
            id: TeamId::new(),
            name,
            created_at: Utc::now(),
        };

        let created_team = self.repository.create_team(team).await?;
        tracing::info!(team_id = %created_team.id, "Team created");

        Ok(created_team)
    }

    async fn create_player(&self, name: Name) -> Result<Player, TeamError> {
        let player = Player {
            id: PlayerId::new(),
            name,
            created_at: Utc::now(),
        };

        let created_player = self.repository.create_player(player).await?;
        tracing::info!(player_id = %created_player.id, "Player created");

        Ok(created_player)
    }

    async fn add_player(&self, team_id: &TeamId, player_id: &PlayerId) -> Result<(), TeamError> {
        // Missing team or player surfaces as a foreign key violation
        self.repository.add_player(team_id, player_id).await?;
        tracing::info!(team_id = %team_id, player_id = %player_id, "Player added to team");

        Ok(())
    }

    async fn get_roster(&self, team_id: &TeamId) -> Result<Roster, TeamError> {
        let team = self
            .repository
            .find_team(team_id)
            .await?
            .ok_or(TeamError::TeamNotFound(None))?;

        let players = self.repository.list_players(team_id).await?;

        Ok(Roster { team, players })
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::domain::team::ports::MockTeamRepository;

    fn team(name: &str) -> Team {
        Team {
            id: TeamId::new(),
            name: Name::new(name).unwrap(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_team_success() {
        let mut repository = MockTeamRepository::new();
        repository
            .expect_create_team()
            .withf(|team| team.name.as_str() == "Reds")
            .times(1)
            .returning(|team| Ok(team));

        let service = TeamService::new(Arc::new(repository));
        let created = service.create_team(Name::new("Reds").unwrap()).await.unwrap();

        assert_eq!(created.name.as_str(), "Reds");
    }

    #[tokio::test]
    async fn test_create_team_name_taken() {
        let mut repository = MockTeamRepository::new();
        repository.expect_create_team().returning(|_| {
            Err(TeamError::TeamNameTaken(Some(
                "Key (name)=(Reds) already exists.".to_string(),
            )))
        });

        let service = TeamService::new(Arc::new(repository));
        let result = service.create_team(Name::new("Reds").unwrap()).await;

        assert_eq!(
            result.unwrap_err(),
            TeamError::TeamNameTaken(Some("Key (name)=(Reds) already exists.".to_string()))
        );
    }

    #[tokio::test]
    async fn test_add_player_passes_translated_error_through() {
        let team_id = TeamId::new();
        let player_id = PlayerId::new();

        let mut repository = MockTeamRepository::new();
        repository
            .expect_add_player()
            .with(eq(team_id), eq(player_id))
            .times(1)
            .returning(|_, _| Err(TeamError::TeamNotFound(Some("detail".to_string()))));

        let service = TeamService::new(Arc::new(repository));
        let result = service.add_player(&team_id, &player_id).await;

        assert_eq!(
            result.unwrap_err(),
            TeamError::TeamNotFound(Some("detail".to_string()))
        );
    }

    #[tokio::test]
    async fn test_get_roster_missing_team() {
        let mut repository = MockTeamRepository::new();
        repository.expect_find_team().returning(|_| Ok(None));
        repository.expect_list_players().never();

        let service = TeamService::new(Arc::new(repository));
        let result = service.get_roster(&TeamId::new()).await;

        assert_eq!(result.unwrap_err(), TeamError::TeamNotFound(None));
    }

    #[tokio::test]
    async fn test_get_roster_success() {
        let reds = team("Reds");
        let player = Player {
            id: PlayerId::new(),
            name: Name::new("Alice").unwrap(),
            created_at: Utc::now(),
        };

        let mut repository = MockTeamRepository::new();
        let found = reds.clone();
        repository
            .expect_find_team()
            .returning(move |_| Ok(Some(found.clone())));
        let players = vec![player.clone()];
        repository
            .expect_list_players()
            .with(eq(reds.id))
            .returning(move |_| Ok(players.clone()));

        let service = TeamService::new(Arc::new(repository));
        let roster = service.get_roster(&reds.id).await.unwrap();

        assert_eq!(
            roster,
            Roster {
                team: reds,
                players: vec![player]
            }
        );
    }
}

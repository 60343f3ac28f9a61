use async_trait::async_trait;

use super::errors::TeamError;
use super::models::Name;
use super::models::Player;
use super::models::PlayerId;
use super::models::Roster;
use super::models::Team;
use super::models::TeamId;

/// Port for team roster domain service operations.
#[async_trait]
pub trait TeamServicePort: Send + Sync + 'static {
    /// Create a new team.
    ///
    /// # Errors
    /// * `TeamNameTaken` - Another team already uses this name
    /// * `DatabaseError` - Database operation failed
    async fn create_team(&self, name: Name) -> Result<Team, TeamError>;

    /// Register a new player.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_player(&self, name: Name) -> Result<Player, TeamError>;

    /// Put a player on a team.
    ///
    /// # Errors
    /// * `TeamNotFound` - Team does not exist
    /// * `PlayerNotFound` - Player does not exist
    /// * `AlreadyOnTeam` - Player is already on this team
    /// * `DatabaseError` - Database operation failed
    async fn add_player(&self, team_id: &TeamId, player_id: &PlayerId) -> Result<(), TeamError>;

    /// Retrieve a team and its players.
    ///
    /// # Errors
    /// * `TeamNotFound` - Team does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_roster(&self, team_id: &TeamId) -> Result<Roster, TeamError>;
}

/// Persistence operations for the team roster.
///
/// Implementations report constraint violations as the matching `TeamError`
/// variant instead of checking existence up front.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TeamRepository: Send + Sync + 'static {
    /// Persist new team.
    async fn create_team(&self, team: Team) -> Result<Team, TeamError>;

    /// Persist new player.
    async fn create_player(&self, player: Player) -> Result<Player, TeamError>;

    /// Link a player to a team.
    async fn add_player(&self, team_id: &TeamId, player_id: &PlayerId) -> Result<(), TeamError>;

    /// Retrieve team by identifier (None if not found).
    async fn find_team(&self, id: &TeamId) -> Result<Option<Team>, TeamError>;

    /// Retrieve the players of a team, oldest membership first.
    async fn list_players(&self, team_id: &TeamId) -> Result<Vec<Player>, TeamError>;
}

use std::sync::Arc;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use storage::ConstraintKind;
use storage::ErrorMapping;
use storage::ErrorTranslator;
use storage::Table;
use storage::TranslatedError;
use uuid::Uuid;

use crate::domain::team::errors::TeamError;
use crate::domain::team::models::Name;
use crate::domain::team::models::Player;
use crate::domain::team::models::PlayerId;
use crate::domain::team::models::Team;
use crate::domain::team::models::TeamId;
use crate::domain::team::ports::TeamRepository;

pub struct Teams;

impl Table for Teams {
    const NAME: &'static str = "teams";
}

pub struct TeamPlayers;

impl Table for TeamPlayers {
    const NAME: &'static str = "team_players";
}

/// Constraint violations the roster tables can raise, mapped to domain errors.
///
/// Built once at start-up and shared by every repository instance.
pub fn team_error_mapping() -> ErrorMapping<TeamError> {
    ErrorMapping::builder()
        .register(
            (Teams::column("name"), ConstraintKind::Uq),
            TeamError::TeamNameTaken,
        )
        .register(
            (TeamPlayers::column("team_id"), ConstraintKind::Fk),
            TeamError::TeamNotFound,
        )
        .register(
            (TeamPlayers::column("player_id"), ConstraintKind::Fk),
            TeamError::PlayerNotFound,
        )
        .register("team_players_pk", TeamError::AlreadyOnTeam)
        .build()
}

impl From<TranslatedError<TeamError, sqlx::Error>> for TeamError {
    fn from(err: TranslatedError<TeamError, sqlx::Error>) -> Self {
        match err.into_domain() {
            Ok(domain) => domain,
            Err(cause) => TeamError::DatabaseError(cause.to_string()),
        }
    }
}

#[derive(sqlx::FromRow)]
struct TeamRow {
    id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<TeamRow> for Team {
    type Error = TeamError;

    fn try_from(row: TeamRow) -> Result<Self, Self::Error> {
        Ok(Team {
            id: TeamId(row.id),
            name: Name::new(row.name)?,
            created_at: row.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct PlayerRow {
    id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<PlayerRow> for Player {
    type Error = TeamError;

    fn try_from(row: PlayerRow) -> Result<Self, Self::Error> {
        Ok(Player {
            id: PlayerId(row.id),
            name: Name::new(row.name)?,
            created_at: row.created_at,
        })
    }
}

pub struct PostgresTeamRepository {
    pool: PgPool,
    translator: ErrorTranslator<TeamError>,
}

impl PostgresTeamRepository {
    pub fn new(pool: PgPool, mapping: Arc<ErrorMapping<TeamError>>) -> Self {
        Self {
            pool,
            translator: ErrorTranslator::shared(mapping),
        }
    }
}

#[async_trait]
impl TeamRepository for PostgresTeamRepository {
    async fn create_team(&self, team: Team) -> Result<Team, TeamError> {
        self.translator
            .run(
                sqlx::query(
                    r#"
                    INSERT INTO teams (id, name, created_at)
                    VALUES ($1, $2, $3)
                    "#,
                )
                .bind(team.id.0)
                .bind(team.name.as_str())
                .bind(team.created_at)
                .execute(&self.pool),
            )
            .await?;

        Ok(team)
    }

    async fn create_player(&self, player: Player) -> Result<Player, TeamError> {
        self.translator
            .run(
                sqlx::query(
                    r#"
                    INSERT INTO players (id, name, created_at)
                    VALUES ($1, $2, $3)
                    "#,
                )
                .bind(player.id.0)
                .bind(player.name.as_str())
                .bind(player.created_at)
                .execute(&self.pool),
            )
            .await?;

        Ok(player)
    }

    async fn add_player(&self, team_id: &TeamId, player_id: &PlayerId) -> Result<(), TeamError> {
        self.translator
            .run(
                sqlx::query(
                    r#"
                    INSERT INTO team_players (team_id, player_id, created_at)
                    VALUES ($1, $2, $3)
                    "#,
                )
                .bind(team_id.0)
                .bind(player_id.0)
                .bind(Utc::now())
                .execute(&self.pool),
            )
            .await?;

        Ok(())
    }

    async fn find_team(&self, id: &TeamId) -> Result<Option<Team>, TeamError> {
        let row = sqlx::query_as::<_, TeamRow>(
            r#"
            SELECT id, name, created_at
            FROM teams
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| TeamError::DatabaseError(e.to_string()))?;

        row.map(Team::try_from).transpose()
    }

    async fn list_players(&self, team_id: &TeamId) -> Result<Vec<Player>, TeamError> {
        let rows = sqlx::query_as::<_, PlayerRow>(
            r#"
            SELECT p.id, p.name, p.created_at
            FROM players p
            JOIN team_players tp ON tp.player_id = p.id
            WHERE tp.team_id = $1
            ORDER BY tp.created_at, p.id
            "#,
        )
        .bind(team_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| TeamError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Player::try_from).collect()
    }
}

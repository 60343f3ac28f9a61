pub mod team;

pub use team::team_error_mapping;
pub use team::PostgresTeamRepository;

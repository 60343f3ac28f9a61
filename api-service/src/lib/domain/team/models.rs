use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use super::errors::IdError;
use super::errors::NameError;

/// Team aggregate entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub id: TeamId,
    pub name: Name,
    pub created_at: DateTime<Utc>,
}

/// Player entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub name: Name,
    pub created_at: DateTime<Utc>,
}

/// A team together with its players.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    pub team: Team,
    pub players: Vec<Player>,
}

/// Team unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TeamId(pub Uuid);

impl TeamId {
    /// Generate a new time-ordered team ID.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Parse a team ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, IdError> {
        Uuid::parse_str(s)
            .map(TeamId)
            .map_err(|e| IdError::InvalidFormat(e.to_string()))
    }
}

impl Default for TeamId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Player unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    /// Generate a new time-ordered player ID.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Parse a player ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, IdError> {
        Uuid::parse_str(s)
            .map(PlayerId)
            .map_err(|e| IdError::InvalidFormat(e.to_string()))
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name of a team or player
///
/// Trimmed, non-empty and at most 64 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name(String);

impl Name {
    const MAX_LENGTH: usize = 64;

    /// Create a new valid name.
    ///
    /// # Errors
    /// * `Empty` - Name is empty after trimming
    /// * `TooLong` - Name exceeds 64 characters
    pub fn new(name: impl AsRef<str>) -> Result<Self, NameError> {
        let name = name.as_ref().trim();
        let length = name.chars().count();

        if length == 0 {
            return Err(NameError::Empty);
        }
        if length > Self::MAX_LENGTH {
            return Err(NameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

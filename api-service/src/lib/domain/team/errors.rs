use thiserror::Error;

/// Error for TeamId / PlayerId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for Name validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("Name cannot be empty")]
    Empty,

    #[error("Name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for team roster operations
///
/// Variants carrying an `Option<String>` are produced from constraint
/// violations; the string is the database's detail message when available.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TeamError {
    #[error("Invalid name: {0}")]
    InvalidName(#[from] NameError),

    #[error("Team not found{}", with_detail(.0))]
    TeamNotFound(Option<String>),

    #[error("Player not found{}", with_detail(.0))]
    PlayerNotFound(Option<String>),

    #[error("Team name already exists{}", with_detail(.0))]
    TeamNameTaken(Option<String>),

    #[error("Player already on team{}", with_detail(.0))]
    AlreadyOnTeam(Option<String>),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

fn with_detail(detail: &Option<String>) -> String {
    match detail.as_deref() {
        Some(detail) if !detail.is_empty() => format!(": {}", detail),
        _ => String::new(),
    }
}

use thiserror::Error;

/// Error type for password operations.
///
/// Verification never fails with an error: a mismatch or an unreadable digest
/// is reported as `false`.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Invalid hashing parameters: {0}")]
    InvalidParams(String),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}

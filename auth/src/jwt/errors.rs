use thiserror::Error;

/// Error type for JWT operations.
///
/// Rejected tokens are not errors: decoding yields `None` instead.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),
}

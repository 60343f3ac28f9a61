use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Error for signing secret validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SecretError {
    #[error("Signing secret too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },
}

/// Symmetric key used to sign and verify tokens.
///
/// Validated once when configuration is loaded and never printed: the `Debug`
/// output is redacted and there is no `Display` or `Serialize` implementation.
#[derive(Clone, Deserialize)]
#[serde(try_from = "String")]
pub struct SigningSecret(String);

impl SigningSecret {
    pub const MIN_LENGTH: usize = 40;

    /// Create a new signing secret.
    ///
    /// # Errors
    /// * `TooShort` - Secret has fewer than `MIN_LENGTH` characters
    pub fn new(secret: impl Into<String>) -> Result<Self, SecretError> {
        let secret = secret.into();
        let actual = secret.chars().count();
        if actual < Self::MIN_LENGTH {
            return Err(SecretError::TooShort {
                min: Self::MIN_LENGTH,
                actual,
            });
        }
        Ok(Self(secret))
    }

    /// Raw key material, for handing to the signing backend only.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SigningSecret {
    type Error = SecretError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret(**redacted**)")
    }
}

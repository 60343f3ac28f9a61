use chrono::Duration;
use serde::Deserialize;

use crate::jwt::AccessClaims;
use crate::jwt::Expiry;
use crate::jwt::JwtError;
use crate::jwt::TokenCodec;
use crate::jwt::TokenPayload;
use crate::password::HashingParams;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::secret::SigningSecret;

/// Settings needed to build an `Authenticator`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub secret: SigningSecret,
    pub access_token_minutes: i64,
    #[serde(default)]
    pub hashing: HashingParams,
}

/// Authentication coordinator combining password verification and JWT generation.
///
/// Stateless apart from the immutable keys and cost parameters it is built
/// with; share it behind an `Arc`.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
    access_token_lifetime: Duration,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

/// Settings an `Authenticator` cannot be built from.
#[derive(Debug, thiserror::Error)]
pub enum AuthSettingsError {
    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error("Access token lifetime out of range: {0} minutes")]
    TokenLifetimeOutOfRange(i64),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Errors
    /// * `Password` - Hashing parameters are rejected by Argon2
    /// * `TokenLifetimeOutOfRange` - Lifetime does not fit a `chrono::Duration`
    pub fn new(settings: &AuthSettings) -> Result<Self, AuthSettingsError> {
        let access_token_lifetime = Duration::try_minutes(settings.access_token_minutes).ok_or(
            AuthSettingsError::TokenLifetimeOutOfRange(settings.access_token_minutes),
        )?;

        Ok(Self {
            password_hasher: PasswordHasher::new(settings.hashing)?,
            token_codec: TokenCodec::new(&settings.secret),
            access_token_lifetime,
        })
    }

    /// Hash a password for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against a stored hash.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and issue an access token for `subject`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match or hash is unreadable
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
    ) -> Result<String, AuthenticationError> {
        if !self.verify_password(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_access_token(subject)?)
    }

    /// Issue an access token without password verification.
    pub fn issue_access_token(&self, subject: &str) -> Result<String, JwtError> {
        let claims = AccessClaims::for_subject(subject, self.access_token_lifetime);
        self.token_codec.encode(&claims)
    }

    /// Validate an access token.
    ///
    /// `None` means the caller is unauthenticated.
    pub fn validate_access_token(&self, token: &str) -> Option<AccessClaims> {
        self.token_codec
            .decode(token, TokenPayload::parse, Expiry::Verify)
    }

    pub fn token_codec(&self) -> &TokenCodec {
        &self.token_codec
    }
}

use std::convert::Infallible;
use std::fmt;

use chrono::Utc;

use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Serialize;
use serde_json::Value;

use super::claims::TokenPayload;
use super::errors::JwtError;
use crate::secret::SigningSecret;

/// Whether `decode` rejects tokens whose `exp` claim is in the past.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Expiry {
    #[default]
    Verify,
    Ignore,
}

/// Compact JWS codec for claim sets.
///
/// Signs with HS256 (HMAC with SHA-256) under a single process-wide secret.
/// Holds only the derived keys, so one instance can be shared across threads.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenCodec {
    /// Create a new codec keyed by `secret`.
    pub fn new(secret: &SigningSecret) -> Self {
        let secret = secret.expose().as_bytes();

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Encode claims into a signed token.
    ///
    /// An `exp` claim present in `claims` is carried over unchanged.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a token and validate its claims against `shape`.
    ///
    /// Returns `None` when the token is malformed, the signature does not
    /// match, the token is expired (with `Expiry::Verify`) or `shape` rejects
    /// the claims. Rejections are routine on an auth path and only logged at
    /// debug level.
    pub fn decode<T, E>(
        &self,
        token: &str,
        shape: impl FnOnce(TokenPayload) -> Result<T, E>,
        expiry: Expiry,
    ) -> Option<T>
    where
        E: fmt::Display,
    {
        let payload = self.verify(token, expiry)?;

        shape(payload)
            .map_err(|e| tracing::debug!(error = %e, "Token claims rejected"))
            .ok()
    }

    /// Verify a token and return its raw claims.
    pub fn decode_payload(&self, token: &str, expiry: Expiry) -> Option<TokenPayload> {
        self.decode(token, Ok::<_, Infallible>, expiry)
    }

    fn verify(&self, token: &str, expiry: Expiry) -> Option<TokenPayload> {
        match decode::<TokenPayload>(token, &self.decoding_key, &self.validation(expiry)) {
            Ok(token_data) if expiry == Expiry::Verify => {
                Self::check_expiry(token_data.claims)
            }
            Ok(token_data) => Some(token_data.claims),
            Err(e) => {
                match e.kind() {
                    ErrorKind::ExpiredSignature => tracing::debug!("Token expired"),
                    _ => tracing::debug!(error = %e, "Token rejected"),
                }
                None
            }
        }
    }

    /// `jsonwebtoken` skips an `exp` it cannot read as an unsigned integer,
    /// so negative and non-numeric values are checked here.
    fn check_expiry(payload: TokenPayload) -> Option<TokenPayload> {
        let Some(exp) = payload.get(TokenPayload::EXPIRY) else {
            return Some(payload);
        };

        match exp {
            Value::Number(n) => match n.as_f64() {
                Some(seconds) if seconds >= Utc::now().timestamp() as f64 => Some(payload),
                _ => {
                    tracing::debug!("Token expired");
                    None
                }
            },
            _ => {
                tracing::debug!("Token rejected: 'exp' claim is not a number");
                None
            }
        }
    }

    fn validation(&self, expiry: Expiry) -> Validation {
        let mut validation = Validation::new(self.algorithm);
        // No claim is mandatory
        validation.required_spec_claims.clear();
        validation.leeway = 0;
        validation.validate_exp = expiry == Expiry::Verify;
        validation.validate_aud = false;
        validation
    }
}

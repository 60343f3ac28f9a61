//! Authentication primitives
//!
//! Provides stateless authentication building blocks for services:
//! - Signed, expiring tokens (JWS compact serialization, HS256)
//! - Memory-hard password hashing (Argon2id, PHC string format)
//! - Authentication coordination
//!
//! Routine failures (bad signature, expired token, wrong password, unreadable
//! digest) are never errors: they come back as `None` or `false` and the
//! caller decides what unauthenticated means.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::default();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("my_password", "not-a-valid-digest"));
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::{Expiry, SigningSecret, TokenCodec, TokenPayload};
//!
//! let secret = SigningSecret::new("secret_key_of_at_least_forty_characters!!").unwrap();
//! let codec = TokenCodec::new(&secret);
//! let payload = TokenPayload::new().with_claim("sub", "user123");
//! let token = codec.encode(&payload).unwrap();
//! assert_eq!(codec.decode_payload(&token, Expiry::Verify), Some(payload));
//! assert_eq!(codec.decode_payload("garbage", Expiry::Verify), None);
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;
pub mod secret;

// Re-export commonly used items
pub use authenticator::AuthSettings;
pub use authenticator::AuthSettingsError;
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use jwt::AccessClaims;
pub use jwt::Expiry;
pub use jwt::JwtError;
pub use jwt::TokenCodec;
pub use jwt::TokenPayload;
pub use password::HashingParams;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use secret::SecretError;
pub use secret::SigningSecret;

use std::convert::Infallible;
use std::sync::Arc;

use async_trait::async_trait;
use auth::AccessClaims;
use auth::Authenticator;
use axum::extract::FromRef;
use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;

use super::handlers::ApiError;

/// The authenticated caller. Rejects with 401 when the bearer token is
/// missing, malformed, forged or expired.
#[derive(Debug, Clone)]
pub struct Me(pub AccessClaims);

/// The caller when a valid bearer token is present; never rejects.
#[derive(Debug, Clone)]
pub struct MaybeMe(pub Option<AccessClaims>);

fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

fn current_claims<S>(parts: &Parts, state: &S) -> Option<AccessClaims>
where
    Arc<Authenticator>: FromRef<S>,
{
    let token = bearer_token(parts)?;
    let authenticator = Arc::<Authenticator>::from_ref(state);
    authenticator.validate_access_token(token)
}

#[async_trait]
impl<S> FromRequestParts<S> for Me
where
    Arc<Authenticator>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        current_claims(parts, state)
            .map(Me)
            .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for MaybeMe
where
    Arc<Authenticator>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeMe(current_claims(parts, state)))
    }
}

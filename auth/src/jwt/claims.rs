use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

/// Open JWT claim set.
///
/// Any claim name maps to any JSON value. The registered `exp` claim, when
/// present, is a Unix timestamp in seconds and is honoured by the codec.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenPayload(Map<String, Value>);

impl TokenPayload {
    pub const EXPIRY: &'static str = "exp";

    /// Create an empty claim set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a claim, returning the previous value if any.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(name.into(), value.into())
    }

    /// Set a claim (builder style).
    pub fn with_claim(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set the expiration claim.
    pub fn with_expiry(self, at: DateTime<Utc>) -> Self {
        self.with_claim(Self::EXPIRY, at.timestamp())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.0.remove(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Expiration as a point in time.
    ///
    /// `None` when the claim is missing or is not an integer timestamp.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.get(Self::EXPIRY)
            .and_then(Value::as_i64)
            .and_then(|seconds| DateTime::from_timestamp(seconds, 0))
    }

    /// Check if the claim set is expired at `now`.
    ///
    /// A claim set without expiration never expires.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().map_or(false, |exp| exp < now)
    }

    /// Validate the claims against a typed shape.
    ///
    /// Meant to be passed as the `shape` argument of `TokenCodec::decode`.
    pub fn parse<T: DeserializeOwned>(self) -> Result<T, serde_json::Error> {
        serde_json::from_value(Value::Object(self.0))
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for TokenPayload {
    fn from(claims: Map<String, Value>) -> Self {
        Self(claims)
    }
}

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (user/entity identifier)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl AccessClaims {
    /// Create claims for a subject expiring `lifetime` from now.
    pub fn for_subject(subject: impl ToString, lifetime: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
        }
    }
}

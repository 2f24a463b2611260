use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// Tokens issued to a signed-in user, as stored in the session by the login flow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expiration_time: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
}

impl TokenResponse {
    pub fn new(access_token: impl Into<String>, expiration_time: Timestamp) -> Self {
        Self {
            access_token: access_token.into(),
            expiration_time,
            token_type: None,
            scope: None,
            expires_in: None,
            refresh_token: None,
            id_token: None,
        }
    }

    /// Derives the expiration time from the token endpoint's `expires_in` seconds.
    pub fn from_expires_in(
        access_token: impl Into<String>,
        expires_in: i64,
        issued_at: Timestamp,
    ) -> Result<Self, Error> {
        if expires_in <= 0 {
            return Err(Error::Config("expires_in must be > 0".into()));
        }
        let expiration_time = issued_at
            .checked_add(SignedDuration::from_secs(expires_in))
            .map_err(|e| Error::Config(format!("Token expiration overflow: {e}")))?;
        let mut tokens = Self::new(access_token, expiration_time);
        tokens.expires_in = Some(expires_in);
        Ok(tokens)
    }

    /// Returns the raw token value suitable for Authorization headers.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// True only when `now` is strictly after the expiration time.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        now > self.expiration_time
    }
}

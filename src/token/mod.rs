mod response;

use jiff::Timestamp;

pub use response::TokenResponse;

/// What the session's tokens allow at a given instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenState<'a> {
    Missing,
    Expired(&'a TokenResponse),
    Valid(&'a TokenResponse),
}

impl<'a> TokenState<'a> {
    pub fn inspect(tokens: Option<&'a TokenResponse>, now: Timestamp) -> Self {
        match tokens {
            None => TokenState::Missing,
            Some(tokens) if tokens.is_expired_at(now) => TokenState::Expired(tokens),
            Some(tokens) => TokenState::Valid(tokens),
        }
    }
}

use std::fmt;
use std::sync::Arc;

use jiff::Timestamp;

use crate::{
    client::OutlookServiceFactory,
    errors::Error,
    session::SessionContext,
    telemetry::{RequestOutcome, RequestTelemetry},
    token::TokenState,
    types::Contact,
    view::{SIGN_IN_MESSAGE, TOKEN_EXPIRED_MESSAGE, ViewResult},
};

/// Sort by given name in ascending order (A-Z).
pub const CONTACTS_SORT: &str = "GivenName ASC";
/// Only the properties the contacts view shows.
pub const CONTACTS_PROPERTIES: &str = "GivenName,Surname,CompanyName,EmailAddresses";
pub const CONTACTS_MAX_RESULTS: u32 = 10;

/// Why the session cannot be used to call the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthFailure {
    /// No tokens in the session.
    SignedOut,
    /// Tokens present but past their expiration time.
    TokenExpired,
}

#[derive(Debug)]
pub enum ContactsFailure {
    Unauthenticated(AuthFailure),
    RemoteCallFailure(Error),
}

impl ContactsFailure {
    pub fn outcome(&self) -> RequestOutcome {
        match self {
            ContactsFailure::Unauthenticated(AuthFailure::SignedOut) => {
                RequestOutcome::Unauthenticated
            }
            ContactsFailure::Unauthenticated(AuthFailure::TokenExpired) => {
                RequestOutcome::TokenExpired
            }
            ContactsFailure::RemoteCallFailure(_) => RequestOutcome::RemoteCallFailed,
        }
    }
}

impl fmt::Display for ContactsFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactsFailure::Unauthenticated(AuthFailure::SignedOut) => {
                f.write_str(SIGN_IN_MESSAGE)
            }
            ContactsFailure::Unauthenticated(AuthFailure::TokenExpired) => {
                f.write_str(TOKEN_EXPIRED_MESSAGE)
            }
            ContactsFailure::RemoteCallFailure(err) => write!(f, "{err}"),
        }
    }
}

/// Serves the contacts page for a signed-in user.
///
/// Holds no per-request state; one instance is shared across all requests.
#[derive(Clone)]
pub struct ContactsRequestHandler {
    services: Arc<dyn OutlookServiceFactory>,
}

impl ContactsRequestHandler {
    pub fn new(services: Arc<dyn OutlookServiceFactory>) -> Self {
        Self { services }
    }

    pub async fn handle(&self, session: &SessionContext) -> ViewResult {
        self.handle_at(session, Timestamp::now()).await
    }

    /// Like `handle`, evaluating token expiry against `now`.
    pub async fn handle_at(&self, session: &SessionContext, now: Timestamp) -> ViewResult {
        let telemetry = RequestTelemetry::new("/contacts");
        telemetry.emit_start(now);

        match self.fetch_contacts(session, now, &telemetry).await {
            Ok(contacts) => {
                telemetry.emit_outcome(RequestOutcome::Rendered, contacts.len(), None);
                ViewResult::render_contacts(contacts)
            }
            Err(failure) => {
                let message = failure.to_string();
                telemetry.emit_outcome(failure.outcome(), 0, Some(&message));
                ViewResult::redirect_with_error(message)
            }
        }
    }

    async fn fetch_contacts(
        &self,
        session: &SessionContext,
        now: Timestamp,
        telemetry: &RequestTelemetry,
    ) -> Result<Vec<Contact>, ContactsFailure> {
        let tokens = match TokenState::inspect(session.tokens.as_ref(), now) {
            TokenState::Missing => {
                return Err(ContactsFailure::Unauthenticated(AuthFailure::SignedOut));
            }
            TokenState::Expired(tokens) => {
                // Refreshing is not supported; the user has to sign in again.
                telemetry.emit_refresh_unsupported(
                    tokens.expiration_time,
                    tokens.refresh_token.is_some(),
                );
                return Err(ContactsFailure::Unauthenticated(AuthFailure::TokenExpired));
            }
            TokenState::Valid(tokens) => tokens,
        };

        let service = self
            .services
            .build(tokens.access_token(), session.user_email.as_deref());

        let page = service
            .get_contacts(CONTACTS_SORT, CONTACTS_PROPERTIES, CONTACTS_MAX_RESULTS)
            .await
            .map_err(ContactsFailure::RemoteCallFailure)?;

        Ok(page.into_value())
    }
}

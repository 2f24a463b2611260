use jiff::Timestamp;
use tracing::{Level, event};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestOutcome {
    Rendered,
    Unauthenticated,
    TokenExpired,
    RemoteCallFailed,
}

/// Structured events for one contacts request, correlated by `request_id`.
#[derive(Clone, Debug)]
pub struct RequestTelemetry {
    request_id: Uuid,
    route: &'static str,
}

impl RequestTelemetry {
    pub fn new(route: &'static str) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            route,
        }
    }

    pub fn emit_start(&self, at: Timestamp) {
        event!(
            Level::DEBUG,
            request_id = %self.request_id,
            route = self.route,
            timestamp = %at,
            "contacts.start"
        );
    }

    pub fn emit_refresh_unsupported(&self, expired_at: Timestamp, has_refresh_token: bool) {
        event!(
            Level::WARN,
            request_id = %self.request_id,
            route = self.route,
            expired_at = %expired_at,
            has_refresh_token,
            "contacts.token_refresh_unsupported"
        );
    }

    pub fn emit_outcome(&self, outcome: RequestOutcome, contacts: usize, error: Option<&str>) {
        match error {
            None => event!(
                Level::INFO,
                request_id = %self.request_id,
                route = self.route,
                outcome = ?outcome,
                contacts,
                "contacts.outcome"
            ),
            Some(error) => event!(
                Level::WARN,
                request_id = %self.request_id,
                route = self.route,
                outcome = ?outcome,
                error,
                "contacts.outcome"
            ),
        }
    }
}

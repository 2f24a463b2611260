mod request;

pub use request::{RequestOutcome, RequestTelemetry};

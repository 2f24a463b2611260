mod client;
pub mod config;
pub mod errors;
pub mod flash;
mod handler;
pub mod routes;
pub mod session;
pub mod telemetry;
pub mod token;
pub mod types;
pub mod view;

pub use client::{
    MAX_ERROR_BODY_CHARS, OutlookClient, OutlookClientFactory, OutlookService,
    OutlookServiceFactory,
};
pub use config::{Config, ConfigLocation};
pub use errors::Error;
pub use handler::{
    AuthFailure, CONTACTS_MAX_RESULTS, CONTACTS_PROPERTIES, CONTACTS_SORT, ContactsFailure,
    ContactsRequestHandler,
};
pub use routes::{AppState, router};
pub use session::{MemorySessionStore, SessionContext, SessionStore};
pub use token::TokenResponse;
pub use types::{Contact, EmailAddress, PagedResult};
pub use view::{ContactsModel, ViewResult};

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use serde::Serialize;
use tower_cookies::{Cookie, CookieManagerLayer, Cookies, cookie::SameSite};

use crate::{
    client::OutlookClientFactory,
    config::Config,
    errors::Error,
    flash::FlashMessages,
    handler::ContactsRequestHandler,
    session::{SessionContext, SessionStore},
    types::Contact,
    view::{ENTRY_PAGE, ViewResult},
};

pub const SESSION_COOKIE: &str = "session_id";
pub const FLASH_COOKIE: &str = "flash_error";

#[derive(Clone)]
pub struct AppState {
    sessions: Arc<dyn SessionStore>,
    handler: ContactsRequestHandler,
    flashes: FlashMessages,
}

impl AppState {
    pub fn new(sessions: Arc<dyn SessionStore>, handler: ContactsRequestHandler) -> Self {
        Self {
            sessions,
            handler,
            flashes: FlashMessages::new(),
        }
    }

    /// Wires the handler to the Outlook REST API described by `config`.
    pub fn from_config(config: &Config, sessions: Arc<dyn SessionStore>) -> Result<Self, Error> {
        let services = OutlookClientFactory::new(config)?;
        Ok(Self::new(
            sessions,
            ContactsRequestHandler::new(Arc::new(services)),
        ))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/contacts", get(contacts))
        .route(ENTRY_PAGE, get(index))
        .layer(CookieManagerLayer::new())
        .with_state(state)
}

#[derive(Serialize)]
struct RenderedView {
    view: &'static str,
    contacts: Vec<Contact>,
}

#[derive(Serialize)]
struct EntryPage {
    error: Option<String>,
}

#[tracing::instrument(skip_all)]
async fn contacts(State(state): State<AppState>, cookies: Cookies) -> Response {
    let session = match cookies.get(SESSION_COOKIE) {
        Some(cookie) => state
            .sessions
            .get(cookie.value())
            .await
            .unwrap_or_default(),
        None => {
            tracing::debug!("no session cookie on request");
            SessionContext::default()
        }
    };

    match state.handler.handle(&session).await {
        ViewResult::Render { view, model } => Json(RenderedView {
            view,
            contacts: model.contacts,
        })
        .into_response(),
        ViewResult::Redirect { path, flash_error } => {
            let flash_id = state.flashes.put(flash_error).await;
            cookies.add(flash_cookie(flash_id));
            Redirect::to(path).into_response()
        }
    }
}

/// Hands the pending flash message to the entry page, once.
async fn index(State(state): State<AppState>, cookies: Cookies) -> Json<EntryPage> {
    let Some(cookie) = cookies.get(FLASH_COOKIE) else {
        return Json(EntryPage { error: None });
    };
    cookies.remove(flash_cookie(String::new()));
    let error = state.flashes.take(cookie.value()).await;
    if error.is_none() {
        tracing::debug!("flash message already taken or evicted");
    }
    Json(EntryPage { error })
}

/// The cookie carries only the id of a message held in `FlashMessages`.
fn flash_cookie(flash_id: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(FLASH_COOKIE, flash_id);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

use serde::Serialize;

use crate::types::Contact;

pub const CONTACTS_VIEW: &str = "contacts";
pub const ENTRY_PAGE: &str = "/index.html";

pub const SIGN_IN_MESSAGE: &str = "Please sign in to continue.";
pub const TOKEN_EXPIRED_MESSAGE: &str = "The access token has expired. Please logout and re-login.";

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ContactsModel {
    pub contacts: Vec<Contact>,
}

/// Outcome of handling a request: either a view to render or a redirect
/// carrying a one-time error message.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewResult {
    Render {
        view: &'static str,
        model: ContactsModel,
    },
    Redirect {
        path: &'static str,
        flash_error: String,
    },
}

impl ViewResult {
    pub fn render_contacts(contacts: Vec<Contact>) -> Self {
        ViewResult::Render {
            view: CONTACTS_VIEW,
            model: ContactsModel { contacts },
        }
    }

    pub fn redirect_with_error(flash_error: impl Into<String>) -> Self {
        ViewResult::Redirect {
            path: ENTRY_PAGE,
            flash_error: flash_error.into(),
        }
    }

    pub fn flash_error(&self) -> Option<&str> {
        match self {
            ViewResult::Redirect { flash_error, .. } => Some(flash_error),
            ViewResult::Render { .. } => None,
        }
    }
}

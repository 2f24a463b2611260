#![allow(dead_code)]

use std::sync::Once;

use jiff::{SignedDuration, Timestamp};
use outlook_contacts::{Config, SessionContext, TokenResponse};

static INIT: Once = Once::new();

pub fn init_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

pub fn config(server_uri: &str) -> Config {
    Config::from_values(server_uri, Some("contacts-test/1.0".into()), Some(5), None)
        .expect("test config")
}

pub fn session_expiring_in(secs: i64) -> SessionContext {
    SessionContext::signed_in(
        TokenResponse::new(
            "access-token",
            Timestamp::now() + SignedDuration::from_secs(secs),
        ),
        Some("adele@contoso.com".to_string()),
    )
}

pub fn contacts_page() -> serde_json::Value {
    serde_json::json!({
        "@odata.context": "https://outlook.office.com/api/v2.0/$metadata#Me/Contacts",
        "value": [
            {
                "Id": "AAMk1",
                "GivenName": "Adele",
                "Surname": "Vance",
                "CompanyName": "Contoso",
                "EmailAddresses": [{"Name": "Adele Vance", "Address": "adelev@contoso.com"}]
            },
            {
                "Id": "AAMk2",
                "GivenName": "Alex",
                "Surname": "Wilber",
                "CompanyName": null,
                "EmailAddresses": []
            }
        ]
    })
}

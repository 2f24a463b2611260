mod common;

use std::time::Duration;

use reqwest::StatusCode;
use wiremock::matchers::{header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use outlook_contacts::{
    CONTACTS_MAX_RESULTS, CONTACTS_PROPERTIES, CONTACTS_SORT, Config, Error,
    OutlookClientFactory, OutlookService,
};

use common::{config, contacts_page, init_logging};

#[tokio::test]
async fn sends_fixed_query_and_auth_headers() {
    init_logging();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2.0/me/contacts"))
        .and(query_param("$orderby", "GivenName ASC"))
        .and(query_param(
            "$select",
            "GivenName,Surname,CompanyName,EmailAddresses",
        ))
        .and(query_param("$top", "10"))
        .and(header("Authorization", "Bearer access-token"))
        .and(header("Accept", "application/json"))
        .and(header("User-Agent", "contacts-test/1.0"))
        .and(header("X-AnchorMailbox", "adele@contoso.com"))
        .and(header("return-client-request-id", "true"))
        .and(header_exists("client-request-id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(contacts_page()))
        .expect(1)
        .mount(&server)
        .await;

    let factory = OutlookClientFactory::new(&config(&server.uri())).expect("factory");
    let client = factory.client("access-token", Some("adele@contoso.com"));
    let page = client
        .get_contacts(CONTACTS_SORT, CONTACTS_PROPERTIES, CONTACTS_MAX_RESULTS)
        .await
        .expect("contacts page");

    let names: Vec<_> = page
        .value
        .iter()
        .map(|c| c.given_name.clone().unwrap_or_default())
        .collect();
    assert_eq!(names, vec!["Adele", "Alex"]);
    assert_eq!(page.value[1].company_name, None);
    assert_eq!(page.next_link, None);
}

#[tokio::test]
async fn omits_anchor_mailbox_without_email() {
    init_logging();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2.0/me/contacts"))
        .respond_with(|req: &Request| {
            if req.headers.contains_key("X-AnchorMailbox") {
                ResponseTemplate::new(400)
            } else {
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"value": []}))
            }
        })
        .expect(1)
        .mount(&server)
        .await;

    let factory = OutlookClientFactory::new(&config(&server.uri())).expect("factory");
    let page = factory
        .client("access-token", None)
        .get_contacts(CONTACTS_SORT, CONTACTS_PROPERTIES, CONTACTS_MAX_RESULTS)
        .await
        .expect("contacts page");
    assert!(page.value.is_empty());
}

#[tokio::test]
async fn each_request_gets_its_own_client_request_id() {
    init_logging();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2.0/me/contacts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"value": []})))
        .expect(2)
        .mount(&server)
        .await;

    let factory = OutlookClientFactory::new(&config(&server.uri())).expect("factory");
    let client = factory.client("access-token", None);
    for _ in 0..2 {
        client
            .get_contacts(CONTACTS_SORT, CONTACTS_PROPERTIES, CONTACTS_MAX_RESULTS)
            .await
            .expect("contacts page");
    }

    let requests = server.received_requests().await.expect("recording enabled");
    let ids: Vec<_> = requests
        .iter()
        .map(|r| r.headers.get("client-request-id").cloned())
        .collect();
    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);
}

#[tokio::test]
async fn non_success_status_is_http_error() {
    init_logging();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2.0/me/contacts"))
        .respond_with(ResponseTemplate::new(401).set_body_string("token rejected"))
        .expect(1)
        .mount(&server)
        .await;

    let factory = OutlookClientFactory::new(&config(&server.uri())).expect("factory");
    let err = factory
        .client("access-token", None)
        .get_contacts(CONTACTS_SORT, CONTACTS_PROPERTIES, CONTACTS_MAX_RESULTS)
        .await
        .expect_err("401 must fail");

    match &err {
        Error::Http(status, body) => {
            assert_eq!(*status, StatusCode::UNAUTHORIZED);
            assert_eq!(body, "token rejected");
        }
        other => panic!("expected Error::Http, got {:?}", other),
    }
    assert!(err.to_string().contains("401"));
}

#[tokio::test]
async fn malformed_body_is_json_error() {
    init_logging();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2.0/me/contacts"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let factory = OutlookClientFactory::new(&config(&server.uri())).expect("factory");
    let err = factory
        .client("access-token", None)
        .get_contacts(CONTACTS_SORT, CONTACTS_PROPERTIES, CONTACTS_MAX_RESULTS)
        .await
        .expect_err("html is not a page");
    assert!(matches!(err, Error::Json(_)));
}

#[tokio::test]
async fn slow_response_times_out() {
    init_logging();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2.0/me/contacts"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"value": []}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = Config::from_values(server.uri(), None, Some(1), None).expect("config");
    let factory = OutlookClientFactory::new(&config).expect("factory");
    let err = factory
        .client("access-token", None)
        .get_contacts(CONTACTS_SORT, CONTACTS_PROPERTIES, CONTACTS_MAX_RESULTS)
        .await
        .expect_err("must time out");
    assert!(
        matches!(err, Error::Timeout(after) if after == Duration::from_secs(1)),
        "expected timeout, got {:?}",
        err
    );
}

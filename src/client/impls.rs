use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};
use tracing::{debug, error};
use uuid::Uuid;

use crate::{
    client::{OutlookClient, OutlookService},
    errors::Error,
    types::{Contact, PagedResult},
};

/// Longest error body, in characters, carried into `Error::Http`.
pub const MAX_ERROR_BODY_CHARS: usize = 2048;

impl OutlookClient {
    fn map_transport(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout(self.timeout)
        } else {
            Error::Reqwest(err)
        }
    }
}

#[async_trait]
impl OutlookService for OutlookClient {
    async fn get_contacts(
        &self,
        sort: &str,
        properties: &str,
        max_results: u32,
    ) -> Result<PagedResult<Contact>, Error> {
        let url = format!("{}/api/v2.0/me/contacts", self.api_base_url);
        let top = max_results.to_string();
        let request_id = Uuid::new_v4();

        let mut request = self
            .http
            .get(&url)
            .query(&[
                ("$orderby", sort),
                ("$select", properties),
                ("$top", top.as_str()),
            ])
            .bearer_auth(&self.access_token)
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, self.user_agent.as_str())
            .header("client-request-id", request_id.to_string())
            .header("return-client-request-id", "true");
        // Routes the request to the user's mailbox server.
        if let Some(email) = self.email.as_deref() {
            request = request.header("X-AnchorMailbox", email);
        }

        let resp = request.send().await.map_err(|e| self.map_transport(e))?;
        let status = resp.status();
        if !status.is_success() {
            let body = match resp.text().await {
                Ok(body) => truncate_chars(body, MAX_ERROR_BODY_CHARS),
                Err(e) => {
                    debug!(%request_id, error = %e, "failed to read error body");
                    String::new()
                }
            };
            error!(
                %request_id,
                status = status.as_u16(),
                body = %body,
                "get contacts failed"
            );
            return Err(Error::Http(status, body));
        }

        let body = resp.text().await.map_err(|e| self.map_transport(e))?;
        let page: PagedResult<Contact> = serde_json::from_str(&body)?;
        debug!(%request_id, count = page.value.len(), "get contacts ok");
        Ok(page)
    }
}

fn truncate_chars(mut body: String, max_chars: usize) -> String {
    if let Some((cut, _)) = body.char_indices().nth(max_chars) {
        body.truncate(cut);
    }
    body
}

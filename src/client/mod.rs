use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::{
    config::Config,
    errors::Error,
    types::{Contact, PagedResult},
};

mod impls;

pub use impls::MAX_ERROR_BODY_CHARS;

/// Operations against the Outlook REST API on behalf of one signed-in user.
#[async_trait]
pub trait OutlookService: Send + Sync {
    async fn get_contacts(
        &self,
        sort: &str,
        properties: &str,
        max_results: u32,
    ) -> Result<PagedResult<Contact>, Error>;
}

/// Builds a service bound to an access token and the user's mailbox.
pub trait OutlookServiceFactory: Send + Sync {
    fn build(&self, access_token: &str, email: Option<&str>) -> Box<dyn OutlookService>;
}

#[derive(Clone)]
pub struct OutlookClient {
    http: Client,
    api_base_url: String,
    user_agent: String,
    timeout: Duration,
    access_token: String,
    email: Option<String>,
}

/// Produces `OutlookClient`s that share one connection pool.
#[derive(Clone)]
pub struct OutlookClientFactory {
    http: Client,
    api_base_url: String,
    user_agent: String,
    timeout: Duration,
}

impl OutlookClientFactory {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let timeout = config.request_timeout();
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_base_url: config.api_base_url.clone(),
            user_agent: config.user_agent.clone(),
            timeout,
        })
    }

    pub fn client(&self, access_token: &str, email: Option<&str>) -> OutlookClient {
        OutlookClient {
            http: self.http.clone(),
            api_base_url: self.api_base_url.clone(),
            user_agent: self.user_agent.clone(),
            timeout: self.timeout,
            access_token: access_token.to_string(),
            email: email.map(str::to_string),
        }
    }
}

impl OutlookServiceFactory for OutlookClientFactory {
    fn build(&self, access_token: &str, email: Option<&str>) -> Box<dyn OutlookService> {
        Box::new(self.client(access_token, email))
    }
}

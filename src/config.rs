//! read configuration from a file, the environment, or AWS Secrets Manager

use std::path::Path;
use std::time::Duration;

use aws_config::BehaviorVersion;
use serde::Deserialize;

use crate::errors::Error;

pub const DEFAULT_API_BASE_URL: &str = "https://outlook.office.com";
pub const DEFAULT_USER_AGENT: &str = "outlook-contacts-rust/0.1.0";
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

pub enum ConfigLocation {
    File(String),
    Env,
    Secret,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_listen_addr() -> String {
    DEFAULT_LISTEN_ADDR.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            user_agent: default_user_agent(),
            request_timeout_secs: None,
            listen_addr: default_listen_addr(),
        }
    }
}

impl Config {
    pub async fn load(loc: ConfigLocation) -> Result<Self, Error> {
        match loc {
            ConfigLocation::File(path) => Self::from_file(path),
            ConfigLocation::Env => Self::from_env(),
            ConfigLocation::Secret => Self::from_secret().await,
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)?;
        config.validated()
    }

    /// Reads `OUTLOOK_API_BASE_URL` (required), plus the optional
    /// `OUTLOOK_USER_AGENT`, `OUTLOOK_REQUEST_TIMEOUT_SECS` and `CONTACTS_LISTEN_ADDR`.
    pub fn from_env() -> Result<Self, Error> {
        let api_base_url = std::env::var("OUTLOOK_API_BASE_URL")
            .map_err(|_| Error::Config("Missing OUTLOOK_API_BASE_URL env var".to_string()))?;
        let request_timeout_secs = match std::env::var("OUTLOOK_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => Some(raw.parse::<u64>().map_err(|e| {
                Error::Config(format!("Invalid OUTLOOK_REQUEST_TIMEOUT_SECS '{raw}': {e}"))
            })?),
            Err(_) => None,
        };
        Self::from_values(
            api_base_url,
            std::env::var("OUTLOOK_USER_AGENT").ok(),
            request_timeout_secs,
            std::env::var("CONTACTS_LISTEN_ADDR").ok(),
        )
    }

    pub async fn from_secret() -> Result<Self, Error> {
        let secret_arn = std::env::var("CONTACTS_CONFIG_SECRET_ARN").map_err(|_| {
            Error::Config("Missing CONTACTS_CONFIG_SECRET_ARN env var".to_string())
        })?;
        let client = aws_sdk_secretsmanager::Client::new(
            &aws_config::load_defaults(BehaviorVersion::latest()).await,
        );
        let resp = client
            .get_secret_value()
            .secret_id(secret_arn)
            .send()
            .await
            .map_err(|e| Error::Config(format!("Failed to get secret: {}", e)))?;
        let secret = resp
            .secret_string()
            .ok_or_else(|| Error::Config("Failed to get secret string, returned None".to_string()))?;
        let config: Config = serde_json::from_str(secret)?;
        config.validated()
    }

    pub fn from_values(
        api_base_url: impl Into<String>,
        user_agent: Option<String>,
        request_timeout_secs: Option<u64>,
        listen_addr: Option<String>,
    ) -> Result<Self, Error> {
        Config {
            api_base_url: api_base_url.into(),
            user_agent: user_agent.unwrap_or_else(default_user_agent),
            request_timeout_secs,
            listen_addr: listen_addr.unwrap_or_else(default_listen_addr),
        }
        .validated()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    fn validated(mut self) -> Result<Self, Error> {
        let base = self.api_base_url.trim().trim_end_matches('/');
        let base = if base.starts_with("http") {
            base.to_string()
        } else {
            format!("https://{}", base)
        };
        reqwest::Url::parse(&base)
            .map_err(|e| Error::Config(format!("Invalid API base URL '{}': {}", base, e)))?;
        self.api_base_url = base;
        if self.request_timeout_secs == Some(0) {
            return Err(Error::Config("Request timeout must be > 0".into()));
        }
        if self.user_agent.trim().is_empty() {
            return Err(Error::Config("User agent must not be empty".into()));
        }
        Ok(self)
    }
}

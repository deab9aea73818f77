//! Minimal Slack Web API client (user lookup and direct messages).

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{Config, SLACK_API_URL};
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct SlackClient {
    http: Client,
    token: String,
    base_url: String,
}

/// Envelope shared by all Slack Web API responses
#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct PostMessageRequest<'a> {
    channel: &'a str,
    text: &'a str,
    as_user: bool,
}

impl SlackClient {
    /// Create a client with the provided bot token.
    pub fn new<S: Into<String>>(token: S) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(Error::ConfigError("SLACK_BOT_TOKEN is not set".to_string()));
        }

        let http = Client::builder()
            .user_agent(format!("birthday_bot/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::SlackError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            token,
            base_url: SLACK_API_URL.to_string(),
        })
    }

    /// Create a client from configuration (token and API URL).
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut client = Self::new(config.slack_token.clone())?;
        client.base_url = config.slack_api_url.clone();
        Ok(client)
    }

    /// Create a client with a custom base url (primarily for tests).
    pub fn with_base_url<S1: Into<String>, S2: Into<String>>(
        token: S1,
        base_url: S2,
    ) -> Result<Self> {
        let mut client = Self::new(token)?;
        client.base_url = base_url.into();
        Ok(client)
    }

    /// Check whether a Slack user ID resolves via users.info.
    /// Any transport or API failure counts as invalid.
    pub async fn is_valid_user(&self, user_id: &str) -> bool {
        let url = format!("{}/users.info", self.base_url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .query(&[("user", user_id)])
            .send()
            .await;

        match response {
            Ok(resp) => match resp.json::<ApiResponse>().await {
                Ok(body) => body.ok,
                Err(e) => {
                    debug!(user_id, "users.info returned non-JSON response: {}", e);
                    false
                }
            },
            Err(e) => {
                debug!(user_id, "users.info request failed: {}", e);
                false
            }
        }
    }

    /// Post a direct message to a user via chat.postMessage.
    pub async fn post_message(&self, channel: &str, text: &str) -> Result<()> {
        let url = format!("{}/chat.postMessage", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(&PostMessageRequest {
                channel,
                text,
                as_user: true,
            })
            .send()
            .await
            .map_err(|e| Error::SlackError(format!("Failed to reach Slack: {}", e)))?;

        let status = response.status();
        if status != StatusCode::OK {
            let text = response.text().await.unwrap_or_default();
            return Err(Error::SlackError(format!(
                "Slack returned HTTP {}: {}",
                status.as_u16(),
                text
            )));
        }

        let body: ApiResponse = response
            .json()
            .await
            .map_err(|e| Error::SlackError(format!("Slack returned non-JSON response: {}", e)))?;

        if !body.ok {
            return Err(Error::SlackError(
                body.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        Ok(())
    }
}

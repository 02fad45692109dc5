mod auth_provider;
mod message;

use super::{IMailer, OutgoingEmail, SentEmail};
use auth_provider::refresh_access_token;
use chrono::Utc;
use lettre::message::Mailbox;
use message::{build_raw_message, encode_raw_message};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::time::Duration;
use tracing::error;

const GMAIL_SEND_ENDPOINT: &str = "https://gmail.googleapis.com/gmail/v1/users/me/messages/send";

#[derive(Debug, Clone)]
pub struct GmailCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone)]
struct AccessToken {
    token: String,
    expires_ts: i64,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest {
    raw: String,
}

#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    id: String,
}

/// Sends emails with the Gmail rest api on behalf of the account owning the refresh token
pub struct GmailMailer {
    client: Client,
    credentials: GmailCredentials,
    from: Mailbox,
    access_token: Mutex<Option<AccessToken>>,
}

impl GmailMailer {
    pub fn new(credentials: GmailCredentials, from: &str) -> anyhow::Result<Self> {
        let from = from.parse::<Mailbox>()?;
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            client,
            credentials,
            from,
            access_token: Mutex::new(None),
        })
    }

    async fn get_access_token(&self) -> anyhow::Result<String> {
        let now = Utc::now().timestamp_millis();
        let one_minute_in_millis = 1000 * 60;
        let cached = self.access_token.lock().unwrap().clone();
        if let Some(cached) = cached {
            if now + one_minute_in_millis <= cached.expires_ts {
                // Current access token is still valid for at least one minute so return it
                return Ok(cached.token.clone());
            }
        }

        // Access token has or will expire soon, now renew it
        let res = refresh_access_token(&self.client, &self.credentials).await?;
        let token = AccessToken {
            token: res.access_token,
            expires_ts: now + res.expires_in * 1000,
        };
        *self.access_token.lock().unwrap() = Some(token.clone());
        Ok(token.token)
    }
}

#[async_trait::async_trait]
impl IMailer for GmailMailer {
    async fn send(&self, email: &OutgoingEmail) -> anyhow::Result<SentEmail> {
        let access_token = self.get_access_token().await?;
        let raw = build_raw_message(email, &self.from).map_err(|e| {
            error!("Unable to build reminder email to: {}. Error: {:?}", email.to, e);
            e
        })?;
        let body = SendMessageRequest {
            raw: encode_raw_message(&raw),
        };

        let res = self
            .client
            .post(GMAIL_SEND_ENDPOINT)
            .header("authorization", format!("Bearer {}", access_token))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(
                    "[Network Error] Gmail API send error. Error message: {:?}",
                    e
                );
                e
            })?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            error!(
                "[Unexpected Response] Gmail API send returned status: {}. Body: {}",
                status, body
            );
            return Err(anyhow::Error::msg(format!(
                "Gmail send failed with status {}: {}",
                status, body
            )));
        }

        let res = res.json::<SendMessageResponse>().await.map_err(|e| {
            error!(
                "[Unexpected Response] Gmail API send error. Error message: {:?}",
                e
            );
            e
        })?;
        Ok(SentEmail {
            provider_message_id: res.id,
        })
    }
}

use super::GmailCredentials;
use reqwest::Client;
use serde::Deserialize;
use tracing::error;

// https://developers.google.com/identity/protocols/oauth2/web-server#httprest_3

const TOKEN_REFETCH_ENDPOINT: &str = "https://www.googleapis.com/oauth2/v4/token";

#[derive(Debug, Deserialize)]
pub struct RefreshTokenResponse {
    pub access_token: String,
    // Access token expires in specified in seconds
    pub expires_in: i64,
}

pub async fn refresh_access_token(
    client: &Client,
    credentials: &GmailCredentials,
) -> anyhow::Result<RefreshTokenResponse> {
    let params = [
        ("client_id", credentials.client_id.as_str()),
        ("client_secret", credentials.client_secret.as_str()),
        ("refresh_token", credentials.refresh_token.as_str()),
        ("grant_type", "refresh_token"),
    ];
    let res = client
        .post(TOKEN_REFETCH_ENDPOINT)
        .form(&params)
        .send()
        .await
        .map_err(|e| {
            error!(
                "[Network Error] Google OAuth token refresh error. Error message: {:?}",
                e
            );
            e
        })?;

    if !res.status().is_success() {
        let status = res.status();
        let body = res.text().await.unwrap_or_default();
        error!(
            "[Unexpected Response] Google OAuth token refresh returned status: {}. Body: {}",
            status, body
        );
        return Err(anyhow::Error::msg(format!(
            "Gmail access token refresh failed with status: {}",
            status
        )));
    }

    Ok(res.json::<RefreshTokenResponse>().await?)
}

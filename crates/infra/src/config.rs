use crate::services::GmailCredentials;
use renewal_tracker_domain::parse_offsets;
use renewal_tracker_utils::create_random_secret;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Day offsets relative to a `Customer`s expiration date at which
    /// `Reminder`s are scheduled
    pub reminder_offsets: Vec<i64>,
    /// Shared secret the external scheduler must present to trigger
    /// reminder delivery. When missing every trigger is rejected.
    pub cron_secret: Option<String>,
    /// Password for the admin api. When missing every admin request is rejected.
    pub admin_password: Option<String>,
    /// Value of the admin session cookie handed out on login. It is
    /// regenerated on every restart which logs out all admins.
    pub admin_session_token: String,
    /// Maximum number of `Customer`s returned by a single list request
    pub customers_page_limit: usize,
    /// Credentials for sending reminder emails through the Gmail api
    pub gmail: Option<GmailCredentials>,
    /// `From` header of reminder emails, required by the Gmail transport
    pub mail_from: Option<String>,
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    pub fn new() -> Self {
        let default_port = 5000;
        let port = match std::env::var("PORT") {
            Ok(port) => match port.parse::<usize>() {
                Ok(port) => port,
                Err(_) => {
                    warn!(
                        "The given PORT: {} is not valid, falling back to the default port: {}.",
                        port, default_port
                    );
                    default_port
                }
            },
            Err(_) => default_port,
        };

        let reminder_offsets = parse_offsets(std::env::var("REMINDER_OFFSETS").ok().as_deref());
        info!("Reminders are scheduled at day offsets: {:?}", reminder_offsets);

        let cron_secret = non_empty_env("CRON_SECRET");
        if cron_secret.is_none() {
            warn!("Did not find CRON_SECRET environment variable. Reminder delivery can not be triggered.");
        }
        let admin_password = non_empty_env("ADMIN_PASS");
        if admin_password.is_none() {
            warn!("Did not find ADMIN_PASS environment variable. The admin api is disabled.");
        }

        let default_page_limit = 100;
        let customers_page_limit = non_empty_env("CUSTOMERS_PAGE_LIMIT")
            .and_then(|limit| limit.parse::<usize>().ok())
            .filter(|limit| *limit > 0)
            .unwrap_or(default_page_limit);

        let gmail = match (
            non_empty_env("GMAIL_CLIENT_ID"),
            non_empty_env("GMAIL_CLIENT_SECRET"),
            non_empty_env("GMAIL_REFRESH_TOKEN"),
        ) {
            (Some(client_id), Some(client_secret), Some(refresh_token)) => Some(GmailCredentials {
                client_id,
                client_secret,
                refresh_token,
            }),
            _ => None,
        };

        Self {
            port,
            reminder_offsets,
            cron_secret,
            admin_password,
            admin_session_token: create_random_secret(32),
            customers_page_limit,
            gmail,
            mail_from: non_empty_env("MAIL_FROM"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

mod gmail;
mod inmemory;

pub use gmail::{GmailCredentials, GmailMailer};
pub use inmemory::InMemoryMailer;

#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingEmail {
    pub to: String,
    pub cc: Vec<String>,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SentEmail {
    /// Id the mail provider assigned to the delivered message
    pub provider_message_id: String,
}

/// Transport used to deliver reminder emails
#[async_trait::async_trait]
pub trait IMailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> anyhow::Result<SentEmail>;
}

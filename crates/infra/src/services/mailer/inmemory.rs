use super::{IMailer, OutgoingEmail, SentEmail};
use std::sync::Mutex;

/// Mailer that keeps every delivered email in memory, used in tests
#[derive(Default)]
pub struct InMemoryMailer {
    sent: Mutex<Vec<OutgoingEmail>>,
    failing_recipients: Mutex<Vec<String>>,
}

impl InMemoryMailer {
    pub fn new() -> Self {
        Default::default()
    }

    /// Every following email to the given recipient fails
    pub fn fail_for(&self, recipient: &str) {
        self.failing_recipients
            .lock()
            .unwrap()
            .push(recipient.to_string());
    }

    pub fn sent_emails(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl IMailer for InMemoryMailer {
    async fn send(&self, email: &OutgoingEmail) -> anyhow::Result<SentEmail> {
        if self
            .failing_recipients
            .lock()
            .unwrap()
            .iter()
            .any(|r| *r == email.to)
        {
            return Err(anyhow::Error::msg(format!(
                "Mailbox unavailable: {}",
                email.to
            )));
        }

        let mut sent = self.sent.lock().unwrap();
        sent.push(email.clone());
        Ok(SentEmail {
            provider_message_id: format!("inmemory-{}", sent.len()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(to: &str) -> OutgoingEmail {
        OutgoingEmail {
            to: to.into(),
            cc: Vec::new(),
            subject: "Hi".into(),
            html: "<p>Hi</p>".into(),
        }
    }

    #[tokio::test]
    async fn records_sent_emails_and_fails_on_demand() {
        let mailer = InMemoryMailer::new();
        let res = mailer.send(&email("a@x.com")).await.unwrap();
        assert_eq!(res.provider_message_id, "inmemory-1");

        mailer.fail_for("b@x.com");
        assert!(mailer.send(&email("b@x.com")).await.is_err());
        assert!(mailer.send(&email("c@x.com")).await.is_ok());

        let sent = mailer.sent_emails();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to, "a@x.com");
        assert_eq!(sent[1].to, "c@x.com");
    }
}

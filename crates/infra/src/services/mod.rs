mod mailer;

pub use mailer::{
    GmailCredentials, GmailMailer, IMailer, InMemoryMailer, OutgoingEmail, SentEmail,
};

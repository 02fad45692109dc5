use crate::services::mailer::OutgoingEmail;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use lettre::{
    message::{header::ContentType, Mailbox},
    Message,
};

/// Builds the RFC 822 message sent through the Gmail api
pub fn build_raw_message(email: &OutgoingEmail, from: &Mailbox) -> anyhow::Result<Vec<u8>> {
    let mut builder = Message::builder()
        .from(from.clone())
        .to(email.to.parse::<Mailbox>()?)
        .subject(email.subject.clone())
        .header(ContentType::TEXT_HTML);
    for cc in &email.cc {
        builder = builder.cc(cc.parse::<Mailbox>()?);
    }

    let message = builder.body(email.html.clone())?;
    Ok(message.formatted())
}

/// Gmail expects the raw message base64url encoded
pub fn encode_raw_message(raw: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(raw)
}

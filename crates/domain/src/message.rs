use crate::{
    customer::Customer,
    date::{days_between, format_long_date},
};
use chrono::NaiveDate;

const CONTACT_PLACEHOLDER: &str = "Customer";
const PLAN_PLACEHOLDER: &str = "your plan";
const COMPANY_PLACEHOLDER: &str = "your company";

/// The rendered subject and html body of a renewal reminder email
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderMessage {
    pub subject: String,
    pub html: String,
}

fn pluralize_days(days: i64) -> String {
    if days.abs() == 1 {
        format!("{} day", days.abs())
    } else {
        format!("{} days", days.abs())
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

impl ReminderMessage {
    /// Renders the reminder for `customer` as seen on `today`. The result only
    /// depends on its inputs, so a dry run previews exactly what would be sent.
    pub fn render(customer: &Customer, today: &NaiveDate) -> Self {
        let days_left = days_between(today, &customer.expires_on);
        let plan = customer.plan_name.as_deref().unwrap_or(PLAN_PLACEHOLDER);
        let contact = customer
            .contact_name
            .as_deref()
            .unwrap_or(CONTACT_PLACEHOLDER);
        let company = customer
            .company_name
            .as_deref()
            .unwrap_or(COMPANY_PLACEHOLDER);
        let expires_on = format_long_date(&customer.expires_on);

        let (subject_tail, body_tail) = match days_left {
            0 => ("expires today".to_string(), "That's today!".to_string()),
            d if d > 0 => (
                format!("expires in {}", pluralize_days(d)),
                format!("That's in {}!", pluralize_days(d)),
            ),
            d => (
                format!("expired {} ago", pluralize_days(d)),
                format!("That was {} ago.", pluralize_days(d)),
            ),
        };
        let verb = if days_left < 0 { "expired" } else { "expires" };

        let subject = format!("Renewal Reminder: {} {}", plan, subject_tail);

        let mut html = format!(
            "<h2>Renewal Reminder</h2>\n\
             <p>Hello {},</p>\n\
             <p>Your {} plan for <strong>{}</strong> {} on <strong>{}</strong>.</p>\n\
             <p>{}</p>\n",
            escape_html(contact),
            escape_html(plan),
            escape_html(company),
            verb,
            expires_on,
            body_tail
        );
        if let Some(link) = &customer.renew_link {
            html.push_str(&format!(
                "<p><a href=\"{}\">Renew Now</a></p>\n",
                escape_html(link)
            ));
        }

        Self { subject, html }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ID;

    fn customer() -> Customer {
        Customer {
            id: ID::new(1),
            company_name: Some("Acme".into()),
            contact_name: Some("Jane".into()),
            primary_email: "jane@acme.com".into(),
            cc_emails: vec![],
            plan_name: Some("Pro".into()),
            renew_link: Some("https://acme.example/renew".into()),
            expires_on: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            paused: false,
            last_reminder_status: None,
            last_reminder_sent_ts: None,
        }
    }

    #[test]
    fn renders_upcoming_expiration() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 8).unwrap();
        let message = ReminderMessage::render(&customer(), &today);
        assert_eq!(message.subject, "Renewal Reminder: Pro expires in 7 days");
        assert!(message.html.contains("Hello Jane,"));
        assert!(message.html.contains("<strong>Acme</strong>"));
        assert!(message.html.contains("January 15, 2025"));
        assert!(message.html.contains("That's in 7 days!"));
        assert!(message
            .html
            .contains("<a href=\"https://acme.example/renew\">Renew Now</a>"));
    }

    #[test]
    fn renders_singular_and_negative_days() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 14).unwrap();
        let message = ReminderMessage::render(&customer(), &today);
        assert_eq!(message.subject, "Renewal Reminder: Pro expires in 1 day");

        let today = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let message = ReminderMessage::render(&customer(), &today);
        assert_eq!(message.subject, "Renewal Reminder: Pro expires today");

        let today = NaiveDate::from_ymd_opt(2025, 1, 18).unwrap();
        let message = ReminderMessage::render(&customer(), &today);
        assert_eq!(message.subject, "Renewal Reminder: Pro expired 3 days ago");
        assert!(message.html.contains("expired on"));
    }

    #[test]
    fn uses_placeholders_for_missing_fields() {
        let mut c = customer();
        c.contact_name = None;
        c.plan_name = None;
        c.company_name = None;
        c.renew_link = None;
        let today = NaiveDate::from_ymd_opt(2025, 1, 12).unwrap();
        let message = ReminderMessage::render(&c, &today);
        assert_eq!(
            message.subject,
            "Renewal Reminder: your plan expires in 3 days"
        );
        assert!(message.html.contains("Hello Customer,"));
        assert!(message.html.contains("<strong>your company</strong>"));
        assert!(!message.html.contains("Renew Now"));
    }

    #[test]
    fn escapes_customer_fields() {
        let mut c = customer();
        c.company_name = Some("<b>Evil & Co</b>".into());
        let today = NaiveDate::from_ymd_opt(2025, 1, 12).unwrap();
        let message = ReminderMessage::render(&c, &today);
        assert!(message.html.contains("&lt;b&gt;Evil &amp; Co&lt;/b&gt;"));
    }
}
